use anyhow::Context;
use serde_json::Value;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Reads a configuration record from a YAML or JSON file.
pub async fn read_config_from_file(file_path: &str) -> Result<Value, anyhow::Error> {
    let mut file = File::open(file_path)
        .await
        .with_context(|| format!("Could not open configuration file {}", file_path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).await?;
    let config: Value = serde_yaml::from_str(&contents)
        .with_context(|| format!("Could not parse configuration file {}", file_path))?;
    if !config.is_object() {
        return Err(anyhow::anyhow!(
            "Configuration file {} must contain a mapping of attributes",
            file_path
        ));
    }
    Ok(config)
}
