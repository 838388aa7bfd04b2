//! Integration tests for documentation extraction.
//!
//! These tests run the full pipeline (discovery, parsing, extraction,
//! serialization) against the fixtures under `testdata/`.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use react_tsdoc::{parse_path_from, report, Config, DocgenError};
use serde_json::{json, Value};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn document(dir: &str, config: &Config) -> Result<Value, DocgenError> {
    let testdata = testdata_path();
    let docs = parse_path_from(&testdata, testdata.join(dir), config)?;
    Ok(serde_json::to_value(&docs).expect("docs should serialize"))
}

#[test]
fn test_component_files_in_discovery_order() {
    let docs = document("components", &Config::default()).expect("extraction should succeed");
    let keys: Vec<&String> = docs.as_object().unwrap().keys().collect();

    assert_eq!(
        keys,
        vec![
            "components/Button.tsx",
            "components/TextField.tsx",
            "components/cards/Card.tsx"
        ]
    );
}

#[test]
fn test_text_field_with_interface_props() {
    let docs = document("components", &Config::default()).unwrap();

    assert_eq!(
        docs["components/TextField.tsx"],
        json!({
            "description": "Just a basic text field",
            "props": {
                "disabled": {
                    "required": false,
                    "defaultValue": {"value": "false", "computed": false},
                    "tsType": {"name": "boolean"},
                    "description": "Sets if field is disabled"
                },
                "onChange": {
                    "required": true,
                    "defaultValue": {"value": "(e) => {console.log(e)}", "computed": false},
                    "tsType": {"name": "any"},
                    "description": "Callback for when the field value is changed"
                },
                "placeholder": {
                    "required": false,
                    "defaultValue": {"value": "'Default placeholder text'", "computed": false},
                    "tsType": {"name": "string"},
                    "description": "Placeholder for the field"
                },
                "value": {
                    "required": true,
                    "tsType": {"name": "string"},
                    "description": "Sets the field's value"
                }
            }
        })
    );
}

#[test]
fn test_button_with_inline_props() {
    let docs = document("components", &Config::default()).unwrap();

    assert_eq!(
        docs["components/Button.tsx"],
        json!({
            "description": "Basic button",
            "props": {
                "disabled": {
                    "required": false,
                    "defaultValue": {"value": "false", "computed": false},
                    "tsType": {"name": "boolean"},
                    "description": "Sets if button is disabled"
                },
                "label": {
                    "required": true,
                    "tsType": {"name": "literal", "value": "'hello'"},
                    "description": "Sets the button text"
                }
            }
        })
    );
}

#[test]
fn test_card_with_props_from_other_file() {
    let docs = document("components", &Config::default()).unwrap();
    let card = &docs["components/cards/Card.tsx"];

    assert_eq!(
        card["description"],
        json!("A card with a title. Cards group related content.")
    );
    assert_eq!(
        card["props"]["variant"],
        json!({
            "required": false,
            "defaultValue": {"value": "'outlined'", "computed": false},
            "tsType": {"name": "CardVariant"},
            "description": "Visual style, see CardVariant"
        })
    );
    assert_eq!(
        card["props"]["tags"],
        json!({"required": true, "tsType": {"name": "Array", "elements": [{"name": "string"}]}})
    );
    assert_eq!(
        card["props"]["onSelect"],
        json!({
            "required": false,
            "tsType": {
                "name": "signature",
                "type": "function",
                "signature": {
                    "arguments": [
                        {"name": "id", "type": {"name": "number"}},
                        {"name": "event", "type": {"name": "MouseEvent"}}
                    ],
                    "return": {"name": "void"}
                }
            }
        })
    );
    assert_eq!(
        card["props"]["meta"]["tsType"],
        json!({
            "name": "signature",
            "type": "object",
            "signature": {
                "properties": [
                    {"key": {"name": "string"}, "value": {"name": "string", "required": true}},
                    {"key": "createdAt", "value": {"name": "number", "required": false}}
                ]
            }
        })
    );
}

#[test]
fn test_multiple_components_abort_the_run() {
    let err = document("multiple", &Config::default()).unwrap_err();

    assert!(matches!(err, DocgenError::MultipleComponents { .. }));
    assert!(err
        .to_string()
        .starts_with("Multiple exported component definitions found in "));
    assert!(err.to_string().ends_with("Both.tsx"));
}

#[test]
fn test_syntax_error_names_file_and_line() {
    let err = document("broken", &Config::default()).unwrap_err();

    match &err {
        DocgenError::Syntax { path, .. } => assert!(path.ends_with("Broken.tsx")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains(" on line "));
}

#[test]
fn test_comment_diagnostic_is_fatal() {
    let err = document("bad_comment", &Config::default()).unwrap_err();

    match err {
        DocgenError::DocComment { line, message, .. } => {
            assert_eq!(line, 4);
            assert!(message.contains("@porp"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unresolved_props_type() {
    let err = document("unresolved", &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        DocgenError::UnresolvedTypeReference { ref name, .. } if name == "LostProps"
    ));

    let lenient = Config {
        strict_type_references: false,
        ..Config::default()
    };
    let docs = document("unresolved", &lenient).unwrap();
    assert_eq!(
        docs,
        json!({"unresolved/Lost.tsx": {"description": "", "props": {}}})
    );
}

#[test]
fn test_excluded_paths() {
    let config = Config {
        excluded_paths: vec!["**/cards/**".to_string()],
        ..Config::default()
    };
    let docs = document("components", &config).unwrap();
    assert_eq!(docs.as_object().unwrap().len(), 2);
    assert!(docs.get("components/cards/Card.tsx").is_none());
}

#[test]
fn test_single_file_target() {
    let testdata = testdata_path();
    let docs = parse_path_from(
        &testdata,
        testdata.join("components").join("Button.tsx"),
        &Config::default(),
    )
    .unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs["components/Button.tsx"].description, "Basic button");
}

#[test]
fn test_single_file_target_loads_its_imports() {
    let testdata = testdata_path();
    let target = testdata.join("components").join("cards").join("Card.tsx");
    let docs = parse_path_from(&testdata, target, &Config::default()).unwrap();

    assert_eq!(docs.keys().collect::<Vec<_>>(), vec!["components/cards/Card.tsx"]);
    let card = &docs["components/cards/Card.tsx"];
    assert_eq!(
        card.props.keys().collect::<Vec<_>>(),
        vec!["title", "variant", "tags", "onSelect", "meta"]
    );
    assert!(card.props["title"].required);
}

#[test]
fn test_output_is_deterministic() {
    let testdata = testdata_path();
    let first = parse_path_from(&testdata, testdata.join("components"), &Config::default()).unwrap();
    let second = parse_path_from(&testdata, testdata.join("components"), &Config::default()).unwrap();

    assert_eq!(
        report::render_json(&first, false).unwrap(),
        report::render_json(&second, false).unwrap()
    );
}
