//! `unpublish-version` and `delete-version`.

use super::{await_operation, connect};
use crate::cli::RuntimeConfig;
use crate::cli::args::{UnpublishArgs, VersionArgs};
use crate::error::Result;
use crate::manifest::UnpublishManifest;

/// Marks a version internal again. The version is not deleted.
pub async fn unpublish_version(args: &UnpublishArgs, config: &RuntimeConfig) -> Result<()> {
    let id = &args.extension;
    let manifest = UnpublishManifest {
        namespace: id.namespace.clone(),
        name: id.name.clone(),
        version: id.version.clone(),
        xml_extension: args.is_xml_extension,
    }
    .render()?;
    config.section(&format!("Unpublishing {}.{} {}", id.namespace, id.name, id.version))?;
    log::debug!("Unpublish manifest:\n{}", manifest);

    let client = connect(&args.connection, config)?;
    let operation_id = client.update_extension(&manifest).await?;
    await_operation(&client, "UpdateExtension", &operation_id, config).await
}

/// Deletes a version; the service refuses unless it was unpublished first.
pub async fn delete_version(args: &VersionArgs, config: &RuntimeConfig) -> Result<()> {
    let id = &args.extension;
    config.section(&format!("Deleting {}.{} {}", id.namespace, id.name, id.version))?;

    let client = connect(&args.connection, config)?;
    let operation_id = client
        .delete_extension(&id.namespace, &id.name, &id.version)
        .await?;
    await_operation(&client, "DeleteExtension", &operation_id, config).await
}
