//! Blob REST calls needed to stage an extension package.

use super::sas::{AccountSasBuilder, BlobSasBuilder, STORAGE_SERVICE_VERSION, SharedKey};
use crate::error::{CliError, PublisherError, Result};
use crate::management::decode_error;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use std::path::Path;
use url::Url;

/// Container that holds uploaded extension packages
pub const PACKAGE_CONTAINER: &str = "extension-packages";

/// Default storage DNS suffix of the public Azure cloud
pub const DEFAULT_STORAGE_BASE_URL: &str = "core.windows.net";

/// Largest body accepted by a single Put Blob call at the signed service version (64 MiB)
pub const MAX_SINGLE_PUT_BYTES: u64 = 64 * 1024 * 1024;

/// Storage error code for a container that is already there
const CONTAINER_ALREADY_EXISTS: &str = "ContainerAlreadyExists";

/// Blob service endpoint of one storage account.
#[derive(Debug, Clone)]
pub struct BlobClient {
    http: Client,
    endpoint: Url,
    key: SharedKey,
}

impl BlobClient {
    /// Client for an explicit blob service endpoint; blob paths are appended to it.
    pub fn new(http: Client, endpoint: Url, key: SharedKey) -> Self {
        Self { http, endpoint, key }
    }

    /// Client for `https://{account}.blob.{storage_base_url}/`.
    ///
    /// A base given with a scheme (`http://127.0.0.1:10000`) is an emulator
    /// style endpoint and is addressed path-style as `{base}/{account}/`.
    pub fn for_account(http: Client, storage_base_url: &str, key: SharedKey) -> Result<Self> {
        let base = storage_base_url.trim().trim_end_matches('/');
        let endpoint = if base.contains("://") {
            Url::parse(&format!("{}/{}/", base, key.account()))
        } else {
            Url::parse(&format!("https://{}.blob.{}/", key.account(), base.trim_start_matches('/')))
        }
        .map_err(|e| {
            PublisherError::Cli(CliError::InvalidArguments {
                reason: format!("invalid storage base URL {:?}: {}", storage_base_url, e),
            })
        })?;
        Ok(Self::new(http, endpoint, key))
    }

    /// Storage account the client signs for.
    pub fn account(&self) -> &str {
        self.key.account()
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PublisherError::Cli(CliError::InvalidArguments {
                    reason: format!("invalid blob endpoint {}", self.endpoint),
                })
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn with_upload_sas(&self, mut url: Url, extra: &[(&str, &str)]) -> Url {
        let sas = AccountSasBuilder::new(&self.key).query_pairs();
        {
            let mut query = url.query_pairs_mut();
            for (k, v) in extra {
                query.append_pair(k, v);
            }
            for (k, v) in &sas {
                query.append_pair(k, v);
            }
        }
        url
    }

    /// Creates `container` unless it already exists.
    pub async fn ensure_container(&self, container: &str) -> Result<()> {
        let url = self.with_upload_sas(self.url(&[container])?, &[("restype", "container")]);
        log::debug!("PUT container {}/{}", self.account(), container);

        let response = self
            .http
            .put(url)
            .header("x-ms-version", STORAGE_SERVICE_VERSION)
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await?;

        match response.status() {
            s if s.is_success() => {
                log::info!("Created container {}", container);
                Ok(())
            }
            StatusCode::CONFLICT => {
                let header_code = response
                    .headers()
                    .get("x-ms-error-code")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body = response.text().await.unwrap_or_default();
                let error = decode_error("CreateContainer", StatusCode::CONFLICT.as_u16(), &body);
                let code = match &error {
                    PublisherError::Azure { code, .. } => header_code.unwrap_or_else(|| code.clone()),
                    _ => header_code.unwrap_or_default(),
                };
                if code == CONTAINER_ALREADY_EXISTS {
                    log::debug!("Container {} already exists", container);
                    Ok(())
                } else {
                    Err(error)
                }
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(decode_error("CreateContainer", s.as_u16(), &body))
            }
        }
    }

    /// Uploads `path` as a block blob and returns the blob URL without a SAS.
    pub async fn upload_file(&self, container: &str, blob: &str, path: &Path) -> Result<Url> {
        check_package_size(path).await?;
        let body = Bytes::from(tokio::fs::read(path).await?);

        let blob_url = self.url(&[container, blob])?;
        let url = self.with_upload_sas(blob_url.clone(), &[]);
        log::info!("Uploading {} ({} bytes) to {}", path.display(), body.len(), blob_url);

        let response = self
            .http
            .put(url)
            .header("x-ms-version", STORAGE_SERVICE_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .header(reqwest::header::CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(decode_error("PutBlob", status.as_u16(), &body));
        }
        Ok(blob_url)
    }

    /// Read-only SAS URL for a blob.
    pub fn read_url(&self, container: &str, blob: &str) -> Result<Url> {
        let mut url = self.url(&[container, blob])?;
        let sas = BlobSasBuilder::new(&self.key, container, blob).query_pairs();
        url.query_pairs_mut().extend_pairs(sas.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(url)
    }
}

/// Fails unless `path` fits in a single Put Blob call. Returns its size.
pub async fn check_package_size(path: &Path) -> Result<u64> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_SINGLE_PUT_BYTES {
        return Err(PublisherError::Cli(CliError::InvalidArguments {
            reason: oversized_package_message(path, size),
        }));
    }
    Ok(size)
}

/// Error text for a package above [`MAX_SINGLE_PUT_BYTES`].
pub fn oversized_package_message(path: &Path, size: u64) -> String {
    format!(
        "package {} is {} bytes; packages above {} bytes are not supported",
        path.display(),
        size,
        MAX_SINGLE_PUT_BYTES
    )
}
