//! XML documents exchanged with the Service Management API.

use serde::{Deserialize, Serialize};

/// `<Error>` body returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "Code", default)]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
}

/// Status of an asynchronous operation (`GET operations/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "HttpStatusCode", default)]
    pub http_status_code: Option<u16>,
    #[serde(rename = "Error", default)]
    pub error: Option<ServiceError>,
}

/// Operation lifecycle as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed,
}

impl Operation {
    /// Unknown status strings are treated as still running.
    pub fn state(&self) -> OperationStatus {
        match self.status.as_str() {
            "Succeeded" => OperationStatus::Succeeded,
            "Failed" => OperationStatus::Failed,
            _ => OperationStatus::InProgress,
        }
    }
}

/// `GET services/publisherextensions` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionImages {
    #[serde(rename = "ExtensionImage", default)]
    pub images: Vec<ExtensionImage>,
}

/// A published extension version.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtensionImage {
    #[serde(rename = "ProviderNameSpace")]
    pub namespace: String,
    #[serde(rename = "Type")]
    pub name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "Label", default)]
    pub label: Option<String>,
    #[serde(rename = "IsInternalExtension", default)]
    pub is_internal: bool,
    #[serde(rename = "IsJsonExtension", default)]
    pub is_json: bool,
    #[serde(rename = "Regions", default)]
    pub regions: Option<String>,
    #[serde(rename = "ReplicationCompleted", default)]
    pub replication_completed: bool,
    #[serde(rename = "SupportedOS", default)]
    pub supported_os: Option<String>,
}

/// `GET services/extensions/{ns}/{name}/{version}/replicationstatus` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplicationStatusList {
    #[serde(rename = "ReplicationStatus", default)]
    pub statuses: Vec<ReplicationStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplicationStatus {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// `GET services/storageservices/{account}/keys` response.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageService {
    #[serde(rename = "StorageServiceKeys")]
    pub keys: StorageServiceKeys,
}

#[derive(Clone, Deserialize)]
pub struct StorageServiceKeys {
    #[serde(rename = "Primary")]
    pub primary: String,
    #[serde(rename = "Secondary", default)]
    pub secondary: String,
}

impl std::fmt::Debug for StorageServiceKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StorageServiceKeys { .. }")
    }
}
