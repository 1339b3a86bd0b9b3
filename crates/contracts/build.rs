//! Build script for generating field metadata from metadata.json
//!
//! This script scans the domain directory for metadata.json files and generates
//! `<entity_dir>_metadata.rs` files with static Rust constants into `OUT_DIR`.
//! Entity modules pull them in with `include!`.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=src/domain");

    let domain_dir = Path::new("src/domain");
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is not set"));

    if !domain_dir.exists() {
        println!("cargo:warning=Domain directory not found, skipping metadata generation");
        return;
    }

    for entry in fs::read_dir(domain_dir).expect("Failed to read domain directory") {
        let path = entry.expect("Failed to read entry").path();
        if !path.is_dir() {
            continue;
        }

        let dir_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if dir_name == "common" {
            continue;
        }

        let metadata_json = path.join("metadata.json");
        if metadata_json.exists() {
            println!("cargo:rerun-if-changed={}", metadata_json.display());

            let output_rs = out_dir.join(format!("{}_metadata.rs", dir_name));
            if let Err(e) = generate_metadata(&metadata_json, &output_rs) {
                panic!("Failed to generate metadata for {}: {}", dir_name, e);
            }
        }
    }
}

// ============================================================================
// JSON Schema Types (owned Strings for serde deserialization)
// ============================================================================

#[derive(Debug, Deserialize)]
struct MetadataJson {
    schema_version: String,
    entity_type: String,
    entity_name: String,
    entity_index: String,
    collection_name: String,
    ui: UiMetadataJson,
    fields: Vec<FieldJson>,
}

#[derive(Debug, Deserialize)]
struct UiMetadataJson {
    element_name: String,
    list_name: String,
    list_route: String,
}

#[derive(Debug, Deserialize)]
struct FieldJson {
    name: String,
    rust_type: String,
    field_type: String,
    ui: FieldUiJson,
    #[serde(default)]
    validation: ValidationJson,
    ref_aggregate: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FieldUiJson {
    #[serde(default)]
    label: String,
    placeholder: Option<String>,
    #[serde(default = "default_true")]
    visible_in_list: bool,
    #[serde(default = "default_true")]
    visible_in_form: bool,
    widget: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ValidationJson {
    #[serde(default)]
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<String>,
    custom_error: Option<String>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Code Generation
// ============================================================================

fn generate_metadata(
    json_path: &Path,
    output_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_content = fs::read_to_string(json_path)?;
    let metadata: MetadataJson = serde_json::from_str(&json_content)?;

    if metadata.fields.is_empty() {
        return Err(format!("{} declares no fields", json_path.display()).into());
    }
    for field in &metadata.fields {
        if field.field_type == "aggregate_ref" && field.ref_aggregate.is_none() {
            return Err(format!("field '{}' is aggregate_ref without ref_aggregate", field.name).into());
        }
    }

    let code = generate_rust_code(&metadata);
    fs::write(output_path, code)?;

    Ok(())
}

fn generate_rust_code(meta: &MetadataJson) -> String {
    let mut code = String::new();

    code.push_str(&format!(
        "// ============================================================================\n\
         // AUTO-GENERATED FROM metadata.json - DO NOT EDIT MANUALLY\n\
         // Generated: {}\n\
         // ============================================================================\n\n",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    ));

    code.push_str(
        "use crate::shared::metadata::{\n\
         \x20   EntityMetadataInfo, EntityType, EntityUiMetadata,\n\
         \x20   FieldMetadata, FieldType, FieldUiMetadata, ValidationRules\n\
         };\n\n",
    );

    code.push_str(&generate_entity_metadata(meta));
    code.push_str("\n\n");

    code.push_str(&generate_fields_array(&meta.fields));

    code
}

fn generate_entity_metadata(meta: &MetadataJson) -> String {
    format!(
        "/// Entity metadata for {} {}\n\
         pub const ENTITY_METADATA: EntityMetadataInfo = EntityMetadataInfo {{\n\
         \x20   schema_version: \"{}\",\n\
         \x20   entity_type: EntityType::{},\n\
         \x20   entity_name: \"{}\",\n\
         \x20   entity_index: \"{}\",\n\
         \x20   collection_name: \"{}\",\n\
         \x20   ui: EntityUiMetadata {{\n\
         \x20       element_name: \"{}\",\n\
         \x20       list_name: \"{}\",\n\
         \x20       list_route: \"{}\",\n\
         \x20   }},\n\
         }};",
        meta.entity_name,
        meta.entity_type,
        meta.schema_version,
        to_pascal_case(&meta.entity_type),
        meta.entity_name,
        meta.entity_index,
        meta.collection_name,
        escape_string(&meta.ui.element_name),
        escape_string(&meta.ui.list_name),
        escape_string(&meta.ui.list_route),
    )
}

fn generate_fields_array(fields: &[FieldJson]) -> String {
    let mut code = String::from("/// Field metadata array, in form order\npub const FIELDS: &[FieldMetadata] = &[\n");

    for field in fields {
        code.push_str(&generate_field_metadata(field, 1));
        code.push_str(",\n");
    }

    code.push_str("];\n");
    code
}

fn generate_field_metadata(field: &FieldJson, indent: usize) -> String {
    let i = "    ".repeat(indent);
    format!(
        "{i}FieldMetadata {{\n\
         {i}    name: \"{}\",\n\
         {i}    rust_type: \"{}\",\n\
         {i}    field_type: FieldType::{},\n\
         {i}    ui: FieldUiMetadata {{\n\
         {i}        label: \"{}\",\n\
         {i}        placeholder: {},\n\
         {i}        visible_in_list: {},\n\
         {i}        visible_in_form: {},\n\
         {i}        widget: {},\n\
         {i}    }},\n\
         {i}    validation: ValidationRules {{\n\
         {i}        required: {},\n\
         {i}        min: {},\n\
         {i}        max: {},\n\
         {i}        min_length: {},\n\
         {i}        max_length: {},\n\
         {i}        pattern: {},\n\
         {i}        custom_error: {},\n\
         {i}    }},\n\
         {i}    ref_aggregate: {},\n\
         {i}}}",
        field.name,
        field.rust_type,
        to_pascal_case(&field.field_type),
        escape_string(&field.ui.label),
        option_str(&field.ui.placeholder),
        field.ui.visible_in_list,
        field.ui.visible_in_form,
        option_str(&field.ui.widget),
        field.validation.required,
        option_f64(field.validation.min),
        option_f64(field.validation.max),
        option_usize(field.validation.min_length),
        option_usize(field.validation.max_length),
        option_str(&field.validation.pattern),
        option_str(&field.validation.custom_error),
        option_str(&field.ref_aggregate),
        i = i
    )
}

// ============================================================================
// Helper functions
// ============================================================================

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

fn option_str(opt: &Option<String>) -> String {
    match opt {
        Some(s) => format!("Some(\"{}\")", escape_string(s)),
        None => "None".to_string(),
    }
}

fn option_f64(opt: Option<f64>) -> String {
    match opt {
        Some(v) => format!("Some({:?})", v),
        None => "None".to_string(),
    }
}

fn option_usize(opt: Option<usize>) -> String {
    match opt {
        Some(v) => format!("Some({})", v),
        None => "None".to_string(),
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
