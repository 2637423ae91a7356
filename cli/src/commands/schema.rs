use datastore_provider::{render_markdown, DataSource};

pub const SCHEMA_FORMATS: [&str; 4] = ["json", "yaml", "json-schema", "markdown"];

pub fn render_metadata(data_source: &dyn DataSource, provider_type_name: &str) -> String {
    data_source.metadata(provider_type_name)
}

pub fn render_schema(
    data_source: &dyn DataSource,
    provider_type_name: &str,
    format: &str,
) -> Result<String, anyhow::Error> {
    let schema = data_source.schema();
    let rendered = match format {
        "json" => serde_json::to_string_pretty(schema)?,
        "yaml" => serde_yaml::to_string(schema)?,
        "json-schema" => serde_json::to_string_pretty(&schema.to_json_schema())?,
        "markdown" => render_markdown(data_source, provider_type_name),
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown schema format \"{}\", expected one of: {}",
                format,
                SCHEMA_FORMATS.join(", ")
            ))
        }
    };
    Ok(rendered)
}
