use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// Configuration attributes arrive in snake_case, the manifest is written in camelCase.
// `rename_all(serialize = ...)` keeps both shapes on the same types.

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DataStoreRecord {
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DataStoreSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
pub struct Metadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

/// Desired state of a DataStore: the shared datastore a tenant control plane connects to.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DataStoreSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_auth: Option<BasicAuth>,
    pub driver: Driver,
    pub endpoints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<TlsConfig>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Driver {
    #[serde(rename = "etcd")]
    Etcd,
    MySQL,
    PostgreSQL,
}

impl Driver {
    pub const ALL: [&'static str; 3] = ["etcd", "MySQL", "PostgreSQL"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Etcd => "etcd",
            Driver::MySQL => "MySQL",
            Driver::PostgreSQL => "PostgreSQL",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
pub struct BasicAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<ContentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<ContentRef>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct TlsConfig {
    pub certificate_authority: CertKeyPair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<CertKeyPair>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct CertKeyPair {
    pub certificate: ContentRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<ContentRef>,
}

/// Sensitive material, either inlined as base64 text or read from a Secret.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ContentRef {
    Inline {
        content: String,
    },
    Secret {
        #[serde(rename(serialize = "secretReference"))]
        secret_reference: SecretReference,
    },
}

impl ContentRef {
    pub fn inline(content: &str) -> Self {
        ContentRef::Inline {
            content: content.to_string(),
        }
    }

    pub fn secret(name: &str, namespace: &str, key_path: &str) -> Self {
        ContentRef::Secret {
            secret_reference: SecretReference {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                key_path: key_path.to_string(),
            },
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct SecretReference {
    pub key_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}
