use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("Unable to serialize manifest: {0}")]
    SerializationFailed(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration does not match the data source schema: {0}")]
    Decode(#[from] serde_json::Error),
}
