use datastore_defs::{
    ConfigError, DataStoreRecord, Diagnostic, Diagnostics, Driver, ManifestOutput, ResourceKind,
};
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::data_source::DataSource;
use crate::projector::ManifestProjector;
use crate::schema::{Cardinality, FieldSchema, SchemaDescriptor, Validator};
use crate::validation::{normalize_config, validate_config};

pub const DATASTORE_TYPE_NAME_SUFFIX: &str = "kamaji_clastix_io_data_store_v1alpha1_manifest";

pub const DATASTORE_EXAMPLE: &str = r#"  metadata = {
    name = "etcd-store"
  }
  spec = {
    driver    = "etcd"
    endpoints = ["etcd-0.etcd.kamaji-system.svc:2379"]
    tls_config = {
      certificate_authority = {
        certificate = {
          secret_reference = {
            name      = "etcd-certs"
            namespace = "kamaji-system"
            key_path  = "ca.crt"
          }
        }
      }
    }
  }"#;

const CONTENT_REF_ONE_OF: &[&str] = &["content", "secret_reference"];

static DATASTORE_SCHEMA: Lazy<SchemaDescriptor> = Lazy::new(datastore_schema);

/// The DataStore schema, built on first use and shared for the life of the process.
pub fn describe() -> &'static SchemaDescriptor {
    &DATASTORE_SCHEMA
}

fn content_ref(name: &'static str, cardinality: Cardinality) -> FieldSchema {
    FieldSchema::object(
        name,
        cardinality,
        vec![
            FieldSchema::string("content", Cardinality::Optional)
                .describe("Bare content of the file, base64 encoded.")
                .validate_with(Validator::Base64),
            FieldSchema::object(
                "secret_reference",
                Cardinality::Optional,
                vec![
                    FieldSchema::string("key_path", Cardinality::Required)
                        .describe("Name of the key for the given Secret reference where the content is stored. This value is mandatory.")
                        .validate_with(Validator::MinLength(1)),
                    FieldSchema::string("name", Cardinality::Optional)
                        .describe("name is unique within a namespace to reference a secret resource."),
                    FieldSchema::string("namespace", Cardinality::Optional)
                        .describe("namespace defines the space within which the secret name must be unique."),
                ],
            )
            .describe("Secret holding the content under the given key."),
        ],
    )
    .validate_with(Validator::ExactlyOneOf(CONTENT_REF_ONE_OF))
}

fn cert_key_pair(name: &'static str, cardinality: Cardinality) -> FieldSchema {
    FieldSchema::object(
        name,
        cardinality,
        vec![
            content_ref("certificate", Cardinality::Required)
                .describe("The certificate, as inline content or a Secret reference."),
            content_ref("private_key", Cardinality::Optional)
                .describe("The private key, as inline content or a Secret reference."),
        ],
    )
}

fn datastore_schema() -> SchemaDescriptor {
    SchemaDescriptor {
        description: "DataStore is the Schema for the datastores API.",
        markdown_description: "DataStore is the Schema for the datastores API.",
        attributes: vec![
            FieldSchema::string("id", Cardinality::Computed)
                .describe("Contains the value `metadata.name`."),
            FieldSchema::string("yaml", Cardinality::Computed)
                .describe("The generated manifest in YAML format."),
            FieldSchema::object(
                "metadata",
                Cardinality::Required,
                vec![
                    FieldSchema::string("name", Cardinality::Required)
                        .describe("Unique name for this object.")
                        .validate_with(Validator::MinLength(1))
                        .validate_with(Validator::Name),
                    FieldSchema::string_map("labels", Cardinality::Optional)
                        .describe("Labels for this object.")
                        .validate_with(Validator::LabelMap),
                    FieldSchema::string_map("annotations", Cardinality::Optional)
                        .describe("Annotations for this object.")
                        .validate_with(Validator::AnnotationMap),
                ],
            )
            .describe("Data that helps uniquely identify this object."),
            FieldSchema::object(
                "spec",
                Cardinality::Optional,
                vec![
                    FieldSchema::object(
                        "basic_auth",
                        Cardinality::Optional,
                        vec![
                            content_ref("username", Cardinality::Optional)
                                .describe("The username, as inline content or a Secret reference."),
                            content_ref("password", Cardinality::Optional)
                                .describe("The password, as inline content or a Secret reference."),
                        ],
                    )
                    .describe("In case of authentication enabled for the given data store, specifies the username and password pair. This value is optional."),
                    FieldSchema::string("driver", Cardinality::Required)
                        .describe("The driver to use to connect to the shared datastore.")
                        .validate_with(Validator::OneOf(&Driver::ALL)),
                    FieldSchema::string_list("endpoints", Cardinality::Required)
                        .describe("List of the endpoints to connect to the shared datastore. No need for protocol, just bare IP/FQDN and port.")
                        .validate_with(Validator::MinItems(1)),
                    FieldSchema::object(
                        "tls_config",
                        Cardinality::Optional,
                        vec![
                            cert_key_pair("certificate_authority", Cardinality::Required)
                                .describe("Retrieve the Certificate Authority certificate and private key, such as bare content of the file, or a SecretReference."),
                            cert_key_pair("client_certificate", Cardinality::Optional)
                                .describe("Specifies the SSL/TLS key and private key pair used to connect to the data store."),
                        ],
                    )
                    .describe("Defines the TLS/SSL configuration required to connect to the data store in a secure way. This value is optional."),
                ],
            )
            .describe("DataStoreSpec defines the desired state of DataStore."),
        ],
    }
}

/// Read-only data source emitting a `kamaji.clastix.io/v1alpha1` DataStore manifest.
#[derive(Debug, Clone, Default)]
pub struct DataStoreManifestDataSource {
    projector: ManifestProjector,
}

impl DataStoreManifestDataSource {
    pub fn new() -> Self {
        DataStoreManifestDataSource {
            projector: ManifestProjector::new(ResourceKind::datastore()),
        }
    }

    pub fn with_resource(resource: ResourceKind) -> Self {
        DataStoreManifestDataSource {
            projector: ManifestProjector::new(resource),
        }
    }

    fn decode(config: &Value) -> Result<DataStoreRecord, ConfigError> {
        Ok(serde_json::from_value(config.clone())?)
    }
}

impl DataSource for DataStoreManifestDataSource {
    fn type_name_suffix(&self) -> &'static str {
        DATASTORE_TYPE_NAME_SUFFIX
    }

    fn schema(&self) -> &'static SchemaDescriptor {
        describe()
    }

    fn example(&self) -> Option<&'static str> {
        Some(DATASTORE_EXAMPLE)
    }

    fn read(&self, config: &Value) -> Result<ManifestOutput, Diagnostics> {
        log::debug!("Read data source {}", self.type_name_suffix());

        let config = normalize_config(config);
        let diagnostics = validate_config(self.schema(), &config);
        if diagnostics.has_error() {
            log::debug!(
                "Configuration rejected with {} diagnostic(s)",
                diagnostics.len()
            );
            return Err(diagnostics);
        }

        let record = Self::decode(&config)
            .map_err(|e| Diagnostic::error("Unable to read configuration", e.to_string()))?;

        self.projector
            .project(&record)
            .map_err(|e| Diagnostic::error("Unable to marshal resource", e.to_string()).into())
    }
}
