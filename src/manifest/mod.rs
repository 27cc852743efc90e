//! Extension image manifests.
//!
//! Manifests are produced by `new-extension-manifest`, edited by hand if
//! needed, and then fed back to `new-extension`, `new-extension-version` and
//! the promote commands. This module renders them, rewrites them for
//! promotion and extracts the identifying fields for logging.

mod promote;
mod template;

pub use promote::{promote_to_all_regions, promote_to_regions};
pub use template::{EXTENSION_MANIFEST_TEMPLATE, REGIONS_PLACEHOLDER, UNPUBLISH_MANIFEST_TEMPLATE};

use crate::error::{PublisherError, Result};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Values substituted into [`EXTENSION_MANIFEST_TEMPLATE`].
#[derive(Debug, Clone, Serialize)]
pub struct ExtensionManifest {
    pub namespace: String,
    pub name: String,
    pub version: String,
    pub label: String,
    /// Read-only SAS URL of the uploaded package
    pub media_link: String,
    pub description: String,
    pub eula_url: String,
    pub privacy_url: String,
    pub homepage_url: String,
    pub company: String,
    pub supported_os: String,
}

impl ExtensionManifest {
    /// Renders the manifest XML.
    pub fn render(&self) -> Result<String> {
        Ok(renderer().render_template(EXTENSION_MANIFEST_TEMPLATE, self)?)
    }
}

/// Identifies the version `unpublish-version` hides again.
#[derive(Debug, Clone, Serialize)]
pub struct UnpublishManifest {
    pub namespace: String,
    pub name: String,
    pub version: String,
    /// PaaS extensions are XML extensions and must not claim to be JSON ones
    pub xml_extension: bool,
}

impl UnpublishManifest {
    /// Renders the manifest XML.
    pub fn render(&self) -> Result<String> {
        Ok(renderer().render_template(UNPUBLISH_MANIFEST_TEMPLATE, self)?)
    }
}

/// Namespace, type and version read back from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestSummary {
    #[serde(rename = "ProviderNameSpace")]
    pub namespace: String,
    #[serde(rename = "Type")]
    pub name: String,
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "IsInternalExtension", default)]
    pub is_internal: Option<bool>,
}

impl std::fmt::Display for ManifestSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} {}", self.namespace, self.name, self.version)
    }
}

/// Parses the identifying fields out of manifest XML.
pub fn summarize(xml: &str) -> Result<ManifestSummary> {
    Ok(quick_xml::de::from_str(xml)?)
}

/// Reads a manifest file produced by `new-extension-manifest`.
pub async fn read_manifest(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await.map_err(|e| PublisherError::Manifest {
        reason: format!("cannot read {}: {}", path.display(), e),
    })?;
    String::from_utf8(bytes).map_err(|_| PublisherError::Manifest {
        reason: format!("{} is not valid UTF-8", path.display()),
    })
}

fn renderer() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(xml_escape);
    handlebars
}

/// Escapes text for use inside an XML element.
pub fn xml_escape(value: &str) -> String {
    quick_xml::escape::escape(value).into_owned()
}
