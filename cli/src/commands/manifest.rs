use datastore_defs::{Diagnostics, ManifestOutput};
use datastore_provider::{normalize_config, validate_config, DataSource};
use serde_json::Value;

pub const OUTPUT_FORMATS: [&str; 3] = ["yaml", "json", "state"];

#[derive(Debug)]
pub enum CommandError {
    Rejected(Diagnostics),
    Other(anyhow::Error),
}

impl From<anyhow::Error> for CommandError {
    fn from(error: anyhow::Error) -> Self {
        CommandError::Other(error)
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(error: serde_json::Error) -> Self {
        CommandError::Other(error.into())
    }
}

pub fn validate(data_source: &dyn DataSource, config: &Value) -> Result<(), CommandError> {
    let diagnostics = validate_config(data_source.schema(), &normalize_config(config));
    if diagnostics.has_error() {
        return Err(CommandError::Rejected(diagnostics));
    }
    Ok(())
}

pub fn render_output(
    output: &ManifestOutput,
    config: &Value,
    format: &str,
) -> Result<String, CommandError> {
    let rendered = match format {
        "yaml" => output.yaml.clone(),
        "json" => serde_json::to_string_pretty(output)?,
        "state" => serde_json::to_string_pretty(&output.state(config))?,
        _ => {
            return Err(CommandError::Other(anyhow::anyhow!(
                "Unknown output format \"{}\", expected one of: {}",
                format,
                OUTPUT_FORMATS.join(", ")
            )))
        }
    };
    Ok(rendered)
}

pub fn read(
    data_source: &dyn DataSource,
    config: &Value,
    format: &str,
) -> Result<String, CommandError> {
    let output = data_source
        .read(config)
        .map_err(CommandError::Rejected)?;
    render_output(&output, config, format)
}
