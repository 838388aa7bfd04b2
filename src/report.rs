//! Output formatting for extracted documentation.
//!
//! Supports two output formats:
//! - JSON: the documentation map itself, compact or indented
//! - Pretty: colored terminal summary for human readability

use std::fs;
use std::io::Write;
use std::path::Path;

use colored::*;

use crate::docgen::{ComponentDoc, ObjectProperty, ProjectDoc, PropRecord, PropertyKey, TypeSignature};

// =============================================================================
// JSON Format
// =============================================================================

/// Serialize the documentation map.
pub fn render_json(docs: &ProjectDoc, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(docs)?
    } else {
        serde_json::to_string(docs)?
    };
    Ok(json)
}

/// Write the documentation map as JSON to stdout.
pub fn write_json(docs: &ProjectDoc, pretty: bool) -> anyhow::Result<()> {
    let json = render_json(docs, pretty)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", json)?;
    Ok(())
}

/// Write the documentation map as JSON to `path`, replacing any existing file.
pub fn write_json_file(path: &Path, docs: &ProjectDoc, pretty: bool) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = render_json(docs, pretty)?;
    fs::write(path, json)?;
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write the documentation map in pretty (human-readable) format.
pub fn write_pretty(path: &str, config_path: Option<&str>, docs: &ProjectDoc, files_scanned: usize) {
    // Header
    println!();
    print!("  ");
    print!("{}", "react-tsdoc".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    if let Some(config_path) = config_path {
        print!("  {}", "Config:   ".dimmed());
        println!("{}", config_path);
    }
    println!();

    for (file, doc) in docs {
        write_component(file, doc);
        println!();
    }

    write_final_status(docs, files_scanned);
    println!();
}

fn write_component(file: &str, doc: &ComponentDoc) {
    println!("  {}", file.blue().bold());
    if !doc.description.is_empty() {
        println!("    {}", doc.description);
    }

    if doc.props.is_empty() {
        println!("    {}", "(no props)".dimmed());
        return;
    }

    println!();
    for (name, record) in &doc.props {
        write_prop(name, record);
    }
}

fn write_prop(name: &str, record: &PropRecord) {
    let marker = if record.required {
        "*".red().to_string()
    } else {
        " ".to_string()
    };
    print!("    {}{:<20} ", marker, name.bold());
    print!("{}", format_type(&record.ts_type).yellow());
    if let Some(default) = &record.default_value {
        print!("{}", format!(" = {}", default.value).dimmed());
    }
    println!();

    if let Some(description) = &record.description {
        println!("      {}", description);
    }
}

fn write_final_status(docs: &ProjectDoc, files_scanned: usize) {
    let props: usize = docs.values().map(|d| d.props.len()).sum();
    let documented: usize = docs
        .values()
        .flat_map(|d| d.props.values())
        .filter(|p| p.description.is_some())
        .count();

    print!("  {}", format!("Files: {}", files_scanned).dimmed());
    print!("  Components: {}", docs.len().to_string().green().bold());
    print!("  Props: {}", props);
    if props > 0 {
        let line = format!("  ({} documented)", documented);
        if documented == props {
            print!("{}", line.green());
        } else {
            print!("{}", line.yellow());
        }
    }
    println!();
}

/// Render a type signature back to TypeScript-like text.
pub fn format_type(sig: &TypeSignature) -> String {
    match sig {
        TypeSignature::Primitive(p) => p.as_str().to_string(),
        TypeSignature::Literal { value } => value.clone(),
        TypeSignature::Reference { name } => name.clone(),
        TypeSignature::Union { elements } => elements
            .iter()
            .map(format_type)
            .collect::<Vec<_>>()
            .join(" | "),
        TypeSignature::Array { element } => match element.as_ref() {
            TypeSignature::Union { .. } | TypeSignature::Function { .. } => {
                format!("({})[]", format_type(element))
            }
            other => format!("{}[]", format_type(other)),
        },
        TypeSignature::Tuple { elements } => format!(
            "[{}]",
            elements.iter().map(format_type).collect::<Vec<_>>().join(", ")
        ),
        TypeSignature::Function { arguments, returns } => format!(
            "({}) => {}",
            arguments
                .iter()
                .map(|a| format!("{}: {}", a.name, format_type(&a.ty)))
                .collect::<Vec<_>>()
                .join(", "),
            format_type(returns)
        ),
        TypeSignature::Object { properties } if properties.is_empty() => "{}".to_string(),
        TypeSignature::Object { properties } => format!(
            "{{ {} }}",
            properties
                .iter()
                .map(format_property)
                .collect::<Vec<_>>()
                .join("; ")
        ),
        TypeSignature::Unknown => "unknown".to_string(),
    }
}

fn format_property(property: &ObjectProperty) -> String {
    let key = match &property.key {
        PropertyKey::Name(name) => name.clone(),
        PropertyKey::Index { name } => format!("[key: {}]", name),
    };
    let optional = if property.value.required { "" } else { "?" };
    format!("{}{}: {}", key, optional, format_type(&property.value.signature))
}
