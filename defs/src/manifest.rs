use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

use crate::datastore::DataStoreSpec;

pub const KAMAJI_API_VERSION: &str = "kamaji.clastix.io/v1alpha1";
pub const DATASTORE_KIND: &str = "DataStore";

/// Group/version and kind stamped onto every projected manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKind {
    pub api_version: String,
    pub kind: String,
}

impl ResourceKind {
    pub fn new(api_version: &str, kind: &str) -> Self {
        ResourceKind {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn datastore() -> Self {
        ResourceKind::new(KAMAJI_API_VERSION, DATASTORE_KIND)
    }
}

impl Default for ResourceKind {
    fn default() -> Self {
        ResourceKind::datastore()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataStoreManifest {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DataStoreSpec>,
}

/// Computed attributes handed back to the host after a read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ManifestOutput {
    pub id: String,
    pub yaml: String,
    pub api_version: String,
    pub kind: String,
}

impl ManifestOutput {
    /// Merges the computed attributes into the configuration, producing the state the host stores.
    pub fn state(&self, config: &serde_json::Value) -> serde_json::Value {
        let mut state = match config {
            serde_json::Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        state.insert("id".to_string(), serde_json::Value::String(self.id.clone()));
        state.insert(
            "yaml".to_string(),
            serde_json::Value::String(self.yaml.clone()),
        );
        serde_json::Value::Object(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_state_adds_computed_attributes() {
        let output = ManifestOutput {
            id: "etcd-store".to_string(),
            yaml: "kind: DataStore\n".to_string(),
            api_version: KAMAJI_API_VERSION.to_string(),
            kind: DATASTORE_KIND.to_string(),
        };
        let config = json!({ "metadata": { "name": "etcd-store" } });

        assert_eq!(
            output.state(&config),
            json!({
                "id": "etcd-store",
                "yaml": "kind: DataStore\n",
                "metadata": { "name": "etcd-store" }
            })
        );
    }

    #[test]
    fn test_default_resource_kind_is_datastore() {
        let kind = ResourceKind::default();
        assert_eq!(kind.api_version, "kamaji.clastix.io/v1alpha1");
        assert_eq!(kind.kind, "DataStore");
    }
}
