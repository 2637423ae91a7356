use datastore_defs::{
    DataStoreManifest, DataStoreRecord, ManifestOutput, ProjectionError, ResourceKind,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Turns a validated record into its resource manifest. The record is trusted as-is.
#[derive(Debug, Clone, Default)]
pub struct ManifestProjector {
    resource: ResourceKind,
}

impl ManifestProjector {
    pub fn new(resource: ResourceKind) -> Self {
        ManifestProjector { resource }
    }

    pub fn resource(&self) -> &ResourceKind {
        &self.resource
    }

    pub fn manifest(&self, record: &DataStoreRecord) -> DataStoreManifest {
        let metadata = &record.metadata;
        DataStoreManifest {
            api_version: self.resource.api_version.clone(),
            kind: self.resource.kind.clone(),
            metadata: ObjectMeta {
                name: Some(metadata.name.clone()),
                labels: (!metadata.labels.is_empty()).then(|| metadata.labels.clone()),
                annotations: (!metadata.annotations.is_empty())
                    .then(|| metadata.annotations.clone()),
                ..Default::default()
            },
            spec: record.spec.clone(),
        }
    }

    pub fn project(&self, record: &DataStoreRecord) -> Result<ManifestOutput, ProjectionError> {
        let manifest = self.manifest(record);
        let yaml = serde_yaml::to_string(&manifest)?;

        Ok(ManifestOutput {
            id: record.metadata.name.clone(),
            yaml,
            api_version: manifest.api_version,
            kind: manifest.kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datastore_defs::{BasicAuth, ContentRef, DataStoreSpec, Driver, Metadata};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record() -> DataStoreRecord {
        DataStoreRecord {
            metadata: Metadata {
                name: "etcd-store".to_string(),
                ..Default::default()
            },
            spec: Some(DataStoreSpec {
                basic_auth: None,
                driver: Driver::Etcd,
                endpoints: vec!["10.0.0.1:2379".to_string()],
                tls_config: None,
            }),
        }
    }

    fn parse(yaml: &str) -> serde_json::Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_project_minimal_record() {
        let output = ManifestProjector::default().project(&record()).unwrap();

        assert_eq!(output.id, "etcd-store");
        assert_eq!(output.api_version, "kamaji.clastix.io/v1alpha1");
        assert_eq!(output.kind, "DataStore");
        assert!(output.yaml.starts_with("apiVersion: kamaji.clastix.io/v1alpha1\nkind: DataStore\nmetadata:\n  name: etcd-store\n"));
        assert_eq!(
            parse(&output.yaml),
            json!({
                "apiVersion": "kamaji.clastix.io/v1alpha1",
                "kind": "DataStore",
                "metadata": { "name": "etcd-store" },
                "spec": { "driver": "etcd", "endpoints": ["10.0.0.1:2379"] }
            })
        );
    }

    #[test]
    fn test_project_omits_empty_metadata_maps_and_spec() {
        let mut record = record();
        record.spec = None;
        let output = ManifestProjector::default().project(&record).unwrap();

        assert!(!output.yaml.contains("labels"));
        assert!(!output.yaml.contains("annotations"));
        assert!(!output.yaml.contains("spec"));
    }

    #[test]
    fn test_project_keeps_labels_and_credentials() {
        let mut record = record();
        record.metadata.labels = BTreeMap::from([("app".to_string(), "kamaji".to_string())]);
        record.metadata.annotations =
            BTreeMap::from([("owner".to_string(), "platform team".to_string())]);
        if let Some(spec) = record.spec.as_mut() {
            spec.basic_auth = Some(BasicAuth {
                username: Some(ContentRef::inline("cm9vdA==")),
                password: Some(ContentRef::secret("etcd-auth", "kamaji-system", "password")),
            });
        }

        let output = ManifestProjector::default().project(&record).unwrap();
        let manifest = parse(&output.yaml);

        assert_eq!(manifest["metadata"]["labels"], json!({ "app": "kamaji" }));
        assert_eq!(
            manifest["metadata"]["annotations"],
            json!({ "owner": "platform team" })
        );
        assert_eq!(
            manifest["spec"]["basicAuth"],
            json!({
                "username": { "content": "cm9vdA==" },
                "password": {
                    "secretReference": {
                        "keyPath": "password",
                        "name": "etcd-auth",
                        "namespace": "kamaji-system"
                    }
                }
            })
        );
    }

    #[test]
    fn test_project_with_custom_resource_kind() {
        let projector = ManifestProjector::new(ResourceKind::new(
            "kamaji.clastix.io/v1alpha2",
            "DataStore",
        ));
        let output = projector.project(&record()).unwrap();
        assert_eq!(output.api_version, "kamaji.clastix.io/v1alpha2");
        assert!(output.yaml.starts_with("apiVersion: kamaji.clastix.io/v1alpha2\n"));
    }

    #[test]
    fn test_project_is_deterministic() {
        let mut record = record();
        record.metadata.labels = BTreeMap::from([
            ("zone".to_string(), "a".to_string()),
            ("app".to_string(), "kamaji".to_string()),
        ]);
        let projector = ManifestProjector::default();
        let first = projector.project(&record).unwrap();
        let second = projector.project(&record).unwrap();
        assert_eq!(first.yaml, second.yaml);
        assert!(first.yaml.find("app:") < first.yaml.find("zone:"));
    }
}
