//! `promote` and `promote-all-regions`.

use super::{await_operation, connect};
use crate::cli::RuntimeConfig;
use crate::cli::args::{ManifestArgs, PromoteArgs};
use crate::error::Result;
use crate::manifest::{self, read_manifest, summarize};

/// Makes an internal version public in the listed regions.
pub async fn promote_to_regions(args: &PromoteArgs, config: &RuntimeConfig) -> Result<()> {
    let original = read_manifest(&args.manifest.manifest).await?;
    let summary = summarize(&original)?;
    let promoted = manifest::promote_to_regions(&original, &args.regions)?;

    config.section(&format!("Promoting {} to:", summary))?;
    for region in &args.regions {
        config.indent(region.trim())?;
    }
    log::debug!("Promotion manifest:\n{}", promoted);

    update(&args.manifest, &promoted, config).await
}

/// Makes an internal version public everywhere.
pub async fn promote_all_regions(args: &ManifestArgs, config: &RuntimeConfig) -> Result<()> {
    let original = read_manifest(&args.manifest).await?;
    let summary = summarize(&original)?;
    let promoted = manifest::promote_to_all_regions(&original)?;

    config.section(&format!("Promoting {} to all regions", summary))?;
    log::debug!("Promotion manifest:\n{}", promoted);

    update(args, &promoted, config).await
}

async fn update(args: &ManifestArgs, manifest: &str, config: &RuntimeConfig) -> Result<()> {
    let client = connect(&args.connection, config)?;
    let operation_id = client.update_extension(manifest).await?;
    await_operation(&client, "UpdateExtension", &operation_id, config).await
}
