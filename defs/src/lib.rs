mod datastore;
mod diagnostics;
mod errors;
mod manifest;

pub use datastore::{
    BasicAuth, CertKeyPair, ContentRef, DataStoreRecord, DataStoreSpec, Driver, Metadata,
    SecretReference, TlsConfig,
};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use errors::{ConfigError, ProjectionError};
pub use manifest::{
    DataStoreManifest, ManifestOutput, ResourceKind, DATASTORE_KIND, KAMAJI_API_VERSION,
};
