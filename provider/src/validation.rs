use datastore_defs::{Diagnostic, Diagnostics};
use datastore_utils::{
    validate_annotation_map, validate_base64, validate_label_map, validate_name, validate_schema,
};
use serde_json::{Map, Value};

use crate::schema::{join_path, FieldKind, FieldSchema, SchemaDescriptor, Validator};

const INVALID_VALUE: &str = "Invalid Attribute Value";

/// Drops `null` object entries recursively; an attribute set to null is an unset attribute.
pub fn normalize_config(config: &Value) -> Value {
    match config {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, value)| !value.is_null())
                .map(|(key, value)| (key.clone(), normalize_config(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(normalize_config).collect()),
        _ => config.clone(),
    }
}

/// Checks a normalized configuration against the schema. Structural problems (kinds, missing
/// required attributes, unknown attributes) are reported first; attribute validators only run
/// once the structure is sound.
pub fn validate_config(schema: &SchemaDescriptor, config: &Value) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    match validate_schema(config, &schema.to_json_schema()) {
        Ok(errors) => {
            for error in errors {
                let path = attribute_path(&error.instance_path);
                let diagnostic = if path.is_empty() {
                    Diagnostic::error("Invalid Configuration", error.message)
                } else {
                    Diagnostic::attribute_error(&path, INVALID_VALUE, error.message)
                };
                diagnostics.push(diagnostic);
            }
        }
        Err(e) => {
            diagnostics.push(Diagnostic::error("Invalid Schema", e.to_string()));
        }
    }

    if !diagnostics.is_empty() {
        return diagnostics;
    }

    if let Value::Object(values) = config {
        validate_attributes(&schema.attributes, values, "", &mut diagnostics);
    }

    diagnostics
}

fn validate_attributes(
    attributes: &[FieldSchema],
    values: &Map<String, Value>,
    parent: &str,
    diagnostics: &mut Diagnostics,
) {
    for attribute in attributes {
        let Some(value) = values.get(attribute.name) else {
            continue;
        };
        let path = join_path(parent, attribute.name);

        if attribute.is_computed() {
            diagnostics.push(Diagnostic::attribute_error(
                &path,
                "Invalid Configuration for Read-Only Attribute",
                "Cannot set value for this attribute as the provider has marked it as read-only. Remove the configuration line setting the value.",
            ));
            continue;
        }

        for validator in &attribute.validators {
            if let Err(detail) = apply_validator(validator, value) {
                let summary = match validator {
                    Validator::ExactlyOneOf(_) => "Invalid Attribute Combination",
                    _ => INVALID_VALUE,
                };
                diagnostics.push(Diagnostic::attribute_error(&path, summary, detail));
            }
        }

        if let (FieldKind::Object(children), Value::Object(child_values)) =
            (&attribute.kind, value)
        {
            validate_attributes(children, child_values, &path, diagnostics);
        }
    }
}

fn string_entries(map: &Map<String, Value>) -> impl Iterator<Item = (&str, &str)> {
    map.iter()
        .map(|(key, value)| (key.as_str(), value.as_str().unwrap_or_default()))
}

fn apply_validator(validator: &Validator, value: &Value) -> Result<(), String> {
    match (validator, value) {
        (Validator::Name, Value::String(name)) => {
            validate_name(name).map_err(|e| e.to_string())
        }
        (Validator::LabelMap, Value::Object(labels)) => {
            validate_label_map(string_entries(labels)).map_err(|e| e.to_string())
        }
        (Validator::AnnotationMap, Value::Object(annotations)) => {
            validate_annotation_map(string_entries(annotations)).map_err(|e| e.to_string())
        }
        (Validator::Base64, Value::String(content)) => {
            validate_base64(content).map_err(|e| e.to_string())
        }
        (Validator::OneOf(allowed), Value::String(actual)) => {
            if allowed.iter().any(|value| *value == actual.as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Value \"{}\" {}",
                    actual,
                    validator.describe()
                ))
            }
        }
        (Validator::MinLength(min), Value::String(actual)) => {
            if actual.chars().count() >= *min {
                Ok(())
            } else {
                Err(format!("Value {}", validator.describe()))
            }
        }
        (Validator::MinItems(min), Value::Array(items)) => {
            if items.len() >= *min {
                Ok(())
            } else {
                Err(format!("List {}", validator.describe()))
            }
        }
        (Validator::ExactlyOneOf(names), Value::Object(children)) => {
            let set = names
                .iter()
                .filter(|name| children.contains_key(**name))
                .count();
            if set == 1 {
                Ok(())
            } else {
                Err(format!(
                    "Exactly one of these attributes must be configured: [{}]",
                    names.join(", ")
                ))
            }
        }
        // Kind mismatches are already reported by the structural pass.
        _ => Ok(()),
    }
}

/// Converts a JSON pointer such as `/spec/endpoints/0` into `spec.endpoints[0]`.
fn attribute_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
            path.push_str(&format!("[{}]", segment));
        } else if path.is_empty() {
            path.push_str(&segment);
        } else {
            path.push('.');
            path.push_str(&segment);
        }
    }
    path
}
