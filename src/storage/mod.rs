//! Staging of extension packages in Azure Blob storage.
//!
//! The service fetches the package from the manifest's `MediaLink`, so the
//! package is uploaded to a storage account owned by the publisher
//! subscription and referenced through a long-lived read-only SAS URL.

mod blob;
pub mod sas;

pub use blob::{
    BlobClient, DEFAULT_STORAGE_BASE_URL, MAX_SINGLE_PUT_BYTES, PACKAGE_CONTAINER,
    check_package_size, oversized_package_message,
};
pub use sas::SharedKey;

/// Blob name used for a package: `{namespace}.{name}-{version}.zip`.
pub fn package_blob_name(namespace: &str, name: &str, version: &str) -> String {
    format!("{}.{}-{}.zip", namespace, name, version)
}
