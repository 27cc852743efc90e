//! Extension image and storage account calls.

use super::client::ManagementClient;
use super::types::{
    ExtensionImage, ExtensionImages, ReplicationStatus, ReplicationStatusList, StorageService,
    StorageServiceKeys,
};
use crate::error::Result;
use reqwest::Method;

impl ManagementClient {
    /// Registers a new extension type. Returns the operation id.
    pub async fn create_extension(&self, manifest: &str) -> Result<String> {
        let url = self.endpoint(&["services", "extensions"], None)?;
        self.start_operation("CreateExtension", Method::POST, url, Some(manifest.to_string()))
            .await
    }

    /// Publishes a new version, or changes visibility of an existing one.
    /// Returns the operation id.
    pub async fn update_extension(&self, manifest: &str) -> Result<String> {
        let url = self.endpoint(&["services", "extensions"], Some("action=update"))?;
        self.start_operation("UpdateExtension", Method::PUT, url, Some(manifest.to_string()))
            .await
    }

    /// Deletes an unpublished version. Returns the operation id.
    pub async fn delete_extension(&self, namespace: &str, name: &str, version: &str) -> Result<String> {
        let url = self.endpoint(&["services", "extensions", namespace, name, version], None)?;
        self.start_operation("DeleteExtension", Method::DELETE, url, None)
            .await
    }

    /// Lists every version published by the subscription.
    pub async fn list_versions(&self) -> Result<Vec<ExtensionImage>> {
        let url = self.endpoint(&["services", "publisherextensions"], None)?;
        let list: ExtensionImages = self.get_xml("ListVersions", url).await?;
        Ok(list.images)
    }

    /// Per-region replication state of one version.
    pub async fn replication_status(
        &self,
        namespace: &str,
        name: &str,
        version: &str,
    ) -> Result<Vec<ReplicationStatus>> {
        let url = self.endpoint(
            &["services", "extensions", namespace, name, version, "replicationstatus"],
            None,
        )?;
        let list: ReplicationStatusList = self.get_xml("GetReplicationStatus", url).await?;
        Ok(list.statuses)
    }

    /// Access keys of a classic storage account in the subscription.
    pub async fn storage_keys(&self, account: &str) -> Result<StorageServiceKeys> {
        let url = self.endpoint(&["services", "storageservices", account, "keys"], None)?;
        let service: StorageService = self.get_xml("GetStorageServiceKeys", url).await?;
        Ok(service.keys)
    }
}
