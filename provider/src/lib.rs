mod config;
mod data_source;
mod datastore;
mod docs;
mod projector;
mod schema;
mod validation;

pub use config::{ProviderConfig, DEFAULT_PROVIDER_TYPE_NAME};
pub use data_source::DataSource;
pub use datastore::{
    describe, DataStoreManifestDataSource, DATASTORE_EXAMPLE, DATASTORE_TYPE_NAME_SUFFIX,
};
pub use docs::render_markdown;
pub use projector::ManifestProjector;
pub use schema::{Cardinality, FieldKind, FieldSchema, SchemaDescriptor, Validator};
pub use validation::{normalize_config, validate_config};
