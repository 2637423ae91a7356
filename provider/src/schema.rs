use std::collections::HashSet;

use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    StringMap,
    StringList,
    Object(Vec<FieldSchema>),
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::StringMap => "Map of String",
            FieldKind::StringList => "List of String",
            FieldKind::Object(_) => "Attributes",
        }
    }
}

/// Exactly one of these holds per field, so required and computed can never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// RFC 1123 subdomain object name.
    Name,
    LabelMap,
    AnnotationMap,
    Base64,
    OneOf(&'static [&'static str]),
    MinLength(usize),
    MinItems(usize),
    /// Object-level: exactly one of the named children must be set.
    ExactlyOneOf(&'static [&'static str]),
}

impl Validator {
    fn applies_to(&self, kind: &FieldKind) -> bool {
        match self {
            Validator::Name | Validator::Base64 | Validator::OneOf(_) | Validator::MinLength(_) => {
                matches!(kind, FieldKind::String)
            }
            Validator::LabelMap | Validator::AnnotationMap => matches!(kind, FieldKind::StringMap),
            Validator::MinItems(_) => matches!(kind, FieldKind::StringList),
            Validator::ExactlyOneOf(_) => matches!(kind, FieldKind::Object(_)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Validator::Name => "must be a valid RFC 1123 subdomain name".to_string(),
            Validator::LabelMap => "must be valid Kubernetes labels".to_string(),
            Validator::AnnotationMap => "must be valid Kubernetes annotations".to_string(),
            Validator::Base64 => "must be base64 encoded".to_string(),
            Validator::OneOf(values) => format!("must be one of: {}", values.join(", ")),
            Validator::MinLength(min) => format!("must be at least {} characters long", min),
            Validator::MinItems(min) => format!("must contain at least {} item(s)", min),
            Validator::ExactlyOneOf(names) => {
                format!("exactly one of {} must be set", names.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub cardinality: Cardinality,
    pub description: &'static str,
    pub markdown_description: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl FieldSchema {
    pub fn string(name: &'static str, cardinality: Cardinality) -> Self {
        FieldSchema {
            name,
            kind: FieldKind::String,
            cardinality,
            description: "",
            markdown_description: "",
            validators: vec![],
        }
    }

    pub fn string_map(name: &'static str, cardinality: Cardinality) -> Self {
        FieldSchema {
            kind: FieldKind::StringMap,
            ..FieldSchema::string(name, cardinality)
        }
    }

    pub fn string_list(name: &'static str, cardinality: Cardinality) -> Self {
        FieldSchema {
            kind: FieldKind::StringList,
            ..FieldSchema::string(name, cardinality)
        }
    }

    pub fn object(
        name: &'static str,
        cardinality: Cardinality,
        attributes: Vec<FieldSchema>,
    ) -> Self {
        FieldSchema {
            kind: FieldKind::Object(attributes),
            ..FieldSchema::string(name, cardinality)
        }
    }

    /// Sets the same text as plain and markdown description.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self.markdown_description = description;
        self
    }

    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn attributes(&self) -> &[FieldSchema] {
        match &self.kind {
            FieldKind::Object(attributes) => attributes,
            _ => &[],
        }
    }

    pub fn is_computed(&self) -> bool {
        self.cardinality == Cardinality::Computed
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDescriptor {
    pub description: &'static str,
    pub markdown_description: &'static str,
    pub attributes: Vec<FieldSchema>,
}

impl SchemaDescriptor {
    pub fn attribute(&self, path: &[&str]) -> Option<&FieldSchema> {
        let (first, rest) = path.split_first()?;
        let mut field = self.attributes.iter().find(|a| a.name == *first)?;
        for name in rest {
            field = field.attributes().iter().find(|a| a.name == *name)?;
        }
        Some(field)
    }

    /// Self-consistency check of the attribute tree. Returns every problem found.
    pub fn check(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        check_attributes(&self.attributes, "", &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Draft 7 JSON Schema for the configuration: kinds, required attributes, enumerations
    /// and sizes. Format validators (names, labels, base64) are not expressible here.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = object_schema(&self.attributes);
        if let Value::Object(map) = &mut schema {
            map.insert(
                "$schema".to_string(),
                json!("http://json-schema.org/draft-07/schema#"),
            );
            map.insert("description".to_string(), json!(self.description));
        }
        schema
    }
}

pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn check_attributes(attributes: &[FieldSchema], parent: &str, errors: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for attribute in attributes {
        let path = join_path(parent, attribute.name);

        if attribute.name.is_empty() {
            errors.push(format!("{}: attribute name is empty", parent));
        }
        if !seen.insert(attribute.name) {
            errors.push(format!("{}: duplicate attribute", path));
        }
        if attribute.is_computed() && !attribute.validators.is_empty() {
            errors.push(format!("{}: computed attribute carries validators", path));
        }
        for validator in &attribute.validators {
            if !validator.applies_to(&attribute.kind) {
                errors.push(format!(
                    "{}: validator {:?} does not apply to {}",
                    path,
                    validator,
                    attribute.kind.type_name()
                ));
            }
            if let Validator::ExactlyOneOf(names) = validator {
                for name in names.iter() {
                    match attribute.attributes().iter().find(|a| a.name == *name) {
                        Some(child) if child.cardinality == Cardinality::Optional => {}
                        Some(_) => errors.push(format!(
                            "{}: exactly-one-of member {} must be optional",
                            path, name
                        )),
                        None => errors.push(format!(
                            "{}: exactly-one-of member {} is not an attribute",
                            path, name
                        )),
                    }
                }
            }
        }

        if let FieldKind::Object(children) = &attribute.kind {
            if children.is_empty() {
                errors.push(format!("{}: object attribute has no attributes", path));
            }
            check_attributes(children, &path, errors);
        }
    }
}

fn object_schema(attributes: &[FieldSchema]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for attribute in attributes {
        properties.insert(attribute.name.to_string(), field_schema(attribute));
        if attribute.cardinality == Cardinality::Required {
            required.push(json!(attribute.name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn field_schema(attribute: &FieldSchema) -> Value {
    let mut schema = match &attribute.kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::StringMap => json!({
            "type": "object",
            "additionalProperties": { "type": "string" },
        }),
        FieldKind::StringList => json!({
            "type": "array",
            "items": { "type": "string" },
        }),
        FieldKind::Object(children) => object_schema(children),
    };

    if let Value::Object(map) = &mut schema {
        if !attribute.description.is_empty() {
            map.insert("description".to_string(), json!(attribute.description));
        }
        if attribute.is_computed() {
            map.insert("readOnly".to_string(), json!(true));
        }
        for validator in &attribute.validators {
            match validator {
                Validator::OneOf(values) => {
                    map.insert("enum".to_string(), json!(values));
                }
                Validator::MinLength(min) => {
                    map.insert("minLength".to_string(), json!(min));
                }
                Validator::MinItems(min) => {
                    map.insert("minItems".to_string(), json!(min));
                }
                _ => {}
            }
        }
    }

    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn credential() -> FieldSchema {
        FieldSchema::object(
            "password",
            Cardinality::Optional,
            vec![
                FieldSchema::string("content", Cardinality::Optional)
                    .validate_with(Validator::Base64),
                FieldSchema::object(
                    "secret_reference",
                    Cardinality::Optional,
                    vec![FieldSchema::string("key_path", Cardinality::Required)
                        .validate_with(Validator::MinLength(1))],
                ),
            ],
        )
        .validate_with(Validator::ExactlyOneOf(&["content", "secret_reference"]))
    }

    #[test]
    fn test_check_accepts_consistent_schema() {
        let schema = SchemaDescriptor {
            description: "",
            markdown_description: "",
            attributes: vec![
                FieldSchema::string("id", Cardinality::Computed),
                credential(),
            ],
        };
        assert_eq!(schema.check(), Ok(()));
    }

    #[test]
    fn test_check_reports_every_problem() {
        let schema = SchemaDescriptor {
            description: "",
            markdown_description: "",
            attributes: vec![
                FieldSchema::string("id", Cardinality::Computed)
                    .validate_with(Validator::MinLength(1)),
                FieldSchema::string("id", Cardinality::Optional),
                FieldSchema::string_list("endpoints", Cardinality::Required)
                    .validate_with(Validator::Base64),
                FieldSchema::object("spec", Cardinality::Optional, vec![]),
                FieldSchema::object(
                    "auth",
                    Cardinality::Optional,
                    vec![FieldSchema::string("content", Cardinality::Required)],
                )
                .validate_with(Validator::ExactlyOneOf(&["content", "missing"])),
            ],
        };

        let errors = schema.check().unwrap_err();
        assert_eq!(
            errors,
            vec![
                "id: computed attribute carries validators".to_string(),
                "id: duplicate attribute".to_string(),
                "endpoints: validator Base64 does not apply to List of String".to_string(),
                "spec: object attribute has no attributes".to_string(),
                "auth: exactly-one-of member content must be optional".to_string(),
                "auth: exactly-one-of member missing is not an attribute".to_string(),
            ]
        );
    }

    #[test]
    fn test_attribute_lookup_by_path() {
        let schema = SchemaDescriptor {
            description: "",
            markdown_description: "",
            attributes: vec![credential()],
        };
        let key_path = schema
            .attribute(&["password", "secret_reference", "key_path"])
            .unwrap();
        assert_eq!(key_path.cardinality, Cardinality::Required);
        assert!(schema.attribute(&["password", "nothing"]).is_none());
        assert!(schema.attribute(&[]).is_none());
    }

    #[test]
    fn test_json_schema_for_nested_object() {
        let schema = SchemaDescriptor {
            description: "Test",
            markdown_description: "Test",
            attributes: vec![
                FieldSchema::string("id", Cardinality::Computed),
                FieldSchema::string("driver", Cardinality::Required)
                    .validate_with(Validator::OneOf(&["etcd", "MySQL"])),
                FieldSchema::string_list("endpoints", Cardinality::Required)
                    .validate_with(Validator::MinItems(1)),
            ],
        };

        assert_eq!(
            schema.to_json_schema(),
            json!({
                "$schema": "http://json-schema.org/draft-07/schema#",
                "description": "Test",
                "type": "object",
                "properties": {
                    "id": { "type": "string", "readOnly": true },
                    "driver": { "type": "string", "enum": ["etcd", "MySQL"] },
                    "endpoints": {
                        "type": "array",
                        "items": { "type": "string" },
                        "minItems": 1
                    }
                },
                "required": ["driver", "endpoints"],
                "additionalProperties": false
            })
        );
    }
}
