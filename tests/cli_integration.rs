//! End-to-end tests for the react-tsdoc binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_react-tsdoc"))
        .current_dir(cwd)
        .env_remove("REACT_TSDOC_LOG")
        .args(args)
        .output()
        .expect("binary should run")
}

#[test]
fn test_generate_to_stdout() {
    let output = run(&testdata_path(), &["generate", "components"]);
    assert_eq!(output.status.code(), Some(0));

    let docs: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(docs["components/Button.tsx"]["description"], "Basic button");
}

#[test]
fn test_generate_to_file() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("docs.json");

    let output = run(
        &testdata_path(),
        &["generate", "components", "--output", out.to_str().unwrap(), "--pretty"],
    );
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finished in"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("{\n  \"components/Button.tsx\""));
    let docs: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(docs.as_object().unwrap().len(), 3);
}

#[test]
fn test_errors_exit_with_code_two() {
    let output = run(&testdata_path(), &["generate", "multiple"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Multiple exported component definitions found in"));
}

#[test]
fn test_invalid_format() {
    let output = run(&testdata_path(), &["generate", "components", "--format", "xml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_file_is_discovered() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("Slot.tsx"),
        "/**\n * Slotted\n * @slot header - Header area\n */\nexport function Slot({ header }: { header?: string }) { return null; }\n",
    )
    .unwrap();

    // Without the custom tag the comment is rejected.
    let output = run(temp.path(), &["generate", "src"]);
    assert_eq!(output.status.code(), Some(2));

    fs::write(
        temp.path().join("react-tsdoc.yaml"),
        "tags:\n  - name: \"@slot\"\n    syntax: block\n    binding: prop\n",
    )
    .unwrap();
    let output = run(temp.path(), &["generate", "src"]);
    assert_eq!(output.status.code(), Some(0));

    let docs: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        docs["src/Slot.tsx"]["props"]["header"]["description"],
        "Header area"
    );
}

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(temp.path().join("react-tsdoc.yaml").is_file());

    let output = run(temp.path(), &["init"]);
    assert_eq!(output.status.code(), Some(2));
}
