use datastore_defs::{Diagnostics, ManifestOutput};
use serde_json::Value;

use crate::schema::SchemaDescriptor;

/// The operations a plugin host drives on a read-only data source.
pub trait DataSource {
    fn type_name_suffix(&self) -> &'static str;

    /// Full type name as registered with the host, e.g. `k8s_<suffix>`.
    fn metadata(&self, provider_type_name: &str) -> String {
        format!("{}_{}", provider_type_name, self.type_name_suffix())
    }

    fn schema(&self) -> &'static SchemaDescriptor;

    /// Body of an example configuration block, used in generated documentation.
    fn example(&self) -> Option<&'static str> {
        None
    }

    fn read(&self, config: &Value) -> Result<ManifestOutput, Diagnostics>;
}
