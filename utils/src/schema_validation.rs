use jsonschema::{Draft, JSONSchema};

/// One JSON Schema violation, located by a JSON pointer into the validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaValidationError {
    pub instance_path: String,
    pub message: String,
}

pub fn validate_schema(
    instance: &serde_json::Value,
    schema: &serde_json::Value,
) -> Result<Vec<SchemaValidationError>, anyhow::Error> {
    let compiled_schema = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema)
        .map_err(|e| anyhow::anyhow!("Invalid JSON Schema: {}", e))?;

    let result = compiled_schema.validate(instance);

    match result {
        Ok(_) => {
            log::debug!("Schema validation succeeded");
            Ok(vec![])
        }
        Err(errors) => {
            let errors: Vec<SchemaValidationError> = errors
                .map(|error| SchemaValidationError {
                    instance_path: error.instance_path.to_string(),
                    message: error.to_string(),
                })
                .collect();
            for error in &errors {
                log::debug!(
                    "Schema validation error at \"{}\": {}",
                    error.instance_path,
                    error.message
                );
            }
            Ok(errors)
        }
    }
}
