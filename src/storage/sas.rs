//! Shared Access Signature generation for Azure Blob storage.
//!
//! Signatures are HMAC-SHA256 over a newline-joined string-to-sign, keyed with
//! the base64-decoded storage account key, and base64 encoded into the `sig`
//! query parameter. Layouts follow storage service version 2015-04-05.

use crate::error::{CliError, PublisherError, Result};
use base64::prelude::*;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Storage service version used for signing and for REST calls
pub const STORAGE_SERVICE_VERSION: &str = "2015-04-05";

/// Hours the account SAS used while uploading stays valid
pub const UPLOAD_SAS_VALIDITY_HOURS: i64 = 1;

/// Days the read-only package link placed in the manifest stays valid.
/// Replication to every region must be able to fetch the package.
pub const MEDIA_LINK_VALIDITY_DAYS: i64 = 365;

/// A storage account name paired with its decoded access key.
#[derive(Clone)]
pub struct SharedKey {
    account: String,
    key: Vec<u8>,
}

impl std::fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedKey")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

impl SharedKey {
    /// `key` is the base64 string returned by the storage keys API.
    pub fn new(account: &str, key: &str) -> Result<Self> {
        if account.is_empty() {
            return Err(PublisherError::Cli(CliError::MissingArgument {
                argument: "storage-account".to_string(),
            }));
        }
        let key = BASE64_STANDARD.decode(key.trim()).map_err(|e| {
            PublisherError::Cli(CliError::InvalidArguments {
                reason: format!("storage key for {} is not base64: {}", account, e),
            })
        })?;
        Ok(Self {
            account: account.to_string(),
            key,
        })
    }

    /// Storage account name.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Base64 HMAC-SHA256 of `string_to_sign`.
    pub fn sign(&self, string_to_sign: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(string_to_sign.as_bytes());
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Service SAS granting access to a single blob.
pub struct BlobSasBuilder<'a> {
    key: &'a SharedKey,
    container: String,
    blob: String,
    permissions: String,
    expiry: DateTime<Utc>,
}

impl<'a> BlobSasBuilder<'a> {
    /// Read-only, valid for [`MEDIA_LINK_VALIDITY_DAYS`].
    pub fn new(key: &'a SharedKey, container: &str, blob: &str) -> Self {
        Self {
            key,
            container: container.to_string(),
            blob: blob.to_string(),
            permissions: "r".to_string(),
            expiry: Utc::now() + Duration::days(MEDIA_LINK_VALIDITY_DAYS),
        }
    }

    /// Overrides the default expiry.
    pub fn expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Newline-joined fields covered by the signature.
    pub fn string_to_sign(&self) -> String {
        let expiry = format_time(self.expiry);
        let canonicalized_resource =
            format!("/blob/{}/{}/{}", self.key.account(), self.container, self.blob);
        [
            self.permissions.as_str(),
            "", // signed start
            expiry.as_str(),
            canonicalized_resource.as_str(),
            "", // signed identifier
            "", // signed IP
            "", // signed protocol
            STORAGE_SERVICE_VERSION,
            "", // rscc
            "", // rscd
            "", // rsce
            "", // rscl
            "", // rsct
        ]
        .join("\n")
    }

    /// Query parameters, signature included.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sv", STORAGE_SERVICE_VERSION.to_string()),
            ("sr", "b".to_string()),
            ("sp", self.permissions.clone()),
            ("se", format_time(self.expiry)),
            ("sig", self.key.sign(&self.string_to_sign())),
        ]
    }
}

/// Account SAS scoped to the blob service.
pub struct AccountSasBuilder<'a> {
    key: &'a SharedKey,
    permissions: String,
    resource_types: String,
    expiry: DateTime<Utc>,
}

impl<'a> AccountSasBuilder<'a> {
    /// Read/write/create on containers and objects, valid for
    /// [`UPLOAD_SAS_VALIDITY_HOURS`].
    pub fn new(key: &'a SharedKey) -> Self {
        Self {
            key,
            permissions: "rwc".to_string(),
            resource_types: "co".to_string(),
            expiry: Utc::now() + Duration::hours(UPLOAD_SAS_VALIDITY_HOURS),
        }
    }

    /// Overrides the default expiry.
    pub fn expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = expiry;
        self
    }

    /// Newline-joined fields covered by the signature.
    pub fn string_to_sign(&self) -> String {
        let expiry = format_time(self.expiry);
        let mut s = [
            self.key.account(),
            self.permissions.as_str(),
            "b",
            self.resource_types.as_str(),
            "", // signed start
            expiry.as_str(),
            "", // signed IP
            "", // signed protocol
            STORAGE_SERVICE_VERSION,
        ]
        .join("\n");
        s.push('\n');
        s
    }

    /// Query parameters, signature included.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("sv", STORAGE_SERVICE_VERSION.to_string()),
            ("ss", "b".to_string()),
            ("srt", self.resource_types.clone()),
            ("sp", self.permissions.clone()),
            ("se", format_time(self.expiry)),
            ("sig", self.key.sign(&self.string_to_sign())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn key() -> SharedKey {
        // base64("secret-key")
        SharedKey::new("contoso", "c2VjcmV0LWtleQ==").unwrap()
    }

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2027, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn blob_string_to_sign_layout() {
        let key = key();
        let sas = BlobSasBuilder::new(&key, "extension-packages", "Contoso.Ext-1.0.zip").expiry(expiry());
        assert_eq!(
            sas.string_to_sign(),
            "r\n\n2027-01-02T03:04:05Z\n/blob/contoso/extension-packages/Contoso.Ext-1.0.zip\n\n\n\n2015-04-05\n\n\n\n\n"
        );
    }

    #[test]
    fn account_string_to_sign_layout() {
        let key = key();
        let sas = AccountSasBuilder::new(&key).expiry(expiry());
        assert_eq!(
            sas.string_to_sign(),
            "contoso\nrwc\nb\nco\n\n2027-01-02T03:04:05Z\n\n\n2015-04-05\n"
        );
    }

    #[test]
    fn signature_is_hmac_of_string_to_sign() {
        let key = key();
        let sas = BlobSasBuilder::new(&key, "c", "b").expiry(expiry());
        let pairs = sas.query_pairs();
        let sig = &pairs.iter().find(|(k, _)| *k == "sig").unwrap().1;

        let mut mac = HmacSha256::new_from_slice(b"secret-key").unwrap();
        mac.update(sas.string_to_sign().as_bytes());
        assert_eq!(*sig, BASE64_STANDARD.encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn signatures_are_scoped_to_the_blob() {
        let key = key();
        let first = BlobSasBuilder::new(&key, "c", "a.zip").expiry(expiry());
        let second = BlobSasBuilder::new(&key, "c", "b.zip").expiry(expiry());
        assert_ne!(first.query_pairs()[4].1, second.query_pairs()[4].1);
    }

    #[test]
    fn rejects_non_base64_key() {
        assert!(SharedKey::new("contoso", "not base64!").is_err());
        assert!(SharedKey::new("", "c2VjcmV0LWtleQ==").is_err());
    }

    #[test]
    fn debug_output_hides_key() {
        assert!(!format!("{:?}", key()).contains("secret"));
    }
}
