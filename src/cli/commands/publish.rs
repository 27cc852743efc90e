//! `new-extension` and `new-extension-version`.

use super::{await_operation, connect};
use crate::cli::RuntimeConfig;
use crate::cli::args::ManifestArgs;
use crate::error::Result;
use crate::manifest::{read_manifest, summarize};

/// Registers a brand new extension type from a manifest.
pub async fn new_extension(args: &ManifestArgs, config: &RuntimeConfig) -> Result<()> {
    let manifest = read_manifest(&args.manifest).await?;
    let summary = summarize(&manifest)?;
    config.section(&format!("Creating extension {}", summary))?;

    let client = connect(&args.connection, config)?;
    let operation_id = client.create_extension(&manifest).await?;
    await_operation(&client, "CreateExtension", &operation_id, config).await
}

/// Publishes a new internal version of an existing extension type.
pub async fn new_extension_version(args: &ManifestArgs, config: &RuntimeConfig) -> Result<()> {
    let manifest = read_manifest(&args.manifest).await?;
    let summary = summarize(&manifest)?;
    if summary.is_internal == Some(false) {
        config.warn("manifest is not internal; the new version will be public immediately")?;
    }
    config.section(&format!("Publishing extension version {}", summary))?;

    let client = connect(&args.connection, config)?;
    let operation_id = client.update_extension(&manifest).await?;
    await_operation(&client, "UpdateExtension", &operation_id, config).await
}
