use std::env;

pub const DEFAULT_PROVIDER_TYPE_NAME: &str = "k8s";

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub provider_type_name: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            provider_type_name: DEFAULT_PROVIDER_TYPE_NAME.to_string(),
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_type_name = lookup("PROVIDER_TYPE_NAME")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_PROVIDER_TYPE_NAME.to_string());

        ProviderConfig { provider_type_name }
    }

    pub fn with_provider_type_name(mut self, provider_type_name: &str) -> Self {
        self.provider_type_name = provider_type_name.to_string();
        self
    }
}
