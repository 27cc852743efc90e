//! Command execution functions for publisher operations.
//!
//! Each command is one or two management calls followed, for mutating
//! calls, by polling the resulting operation to completion.

mod inspect;
mod manifest;
mod promote;
mod publish;
mod retire;

pub use inspect::{list_versions, replication_status};
pub use manifest::new_extension_manifest;
pub use promote::{promote_all_regions, promote_to_regions};
pub use publish::{new_extension, new_extension_version};
pub use retire::{delete_version, unpublish_version};

use super::args::{Command, ConnectionArgs};
use super::RuntimeConfig;
use crate::credentials::ManagementCertificate;
use crate::error::Result;
use crate::management::ManagementClient;

/// Runs the parsed command.
pub async fn execute(command: Command, config: &RuntimeConfig) -> Result<()> {
    match command {
        Command::NewExtensionManifest(args) => new_extension_manifest(&args, config).await,
        Command::NewExtension(args) => new_extension(&args, config).await,
        Command::NewExtensionVersion(args) => new_extension_version(&args, config).await,
        Command::Promote(args) => promote_to_regions(&args, config).await,
        Command::PromoteAllRegions(args) => promote_all_regions(&args, config).await,
        Command::ListVersions(args) => list_versions(&args, config).await,
        Command::ReplicationStatus(args) => replication_status(&args, config).await,
        Command::UnpublishVersion(args) => unpublish_version(&args, config).await,
        Command::DeleteVersion(args) => delete_version(&args, config).await,
    }
}

/// Loads the management certificate and builds a client for the subscription.
pub fn connect(connection: &ConnectionArgs, config: &RuntimeConfig) -> Result<ManagementClient> {
    let certificate = ManagementCertificate::load(&connection.subscription_cert)?;
    log::debug!(
        "Using management certificate {} (thumbprint {})",
        connection.subscription_cert.display(),
        certificate.thumbprint()
    );

    let client =
        ManagementClient::new(&connection.management_url, &connection.subscription_id, &certificate)?
            .with_retry_policy(config.retry_policy())
            .with_poll_policy(config.poll_policy());
    config.verbose_println(&format!(
        "Subscription {} via {}",
        client.subscription_id(),
        connection.management_url
    ))?;
    Ok(client)
}

/// Logs the operation id and waits for the operation to finish.
pub async fn await_operation(
    client: &ManagementClient,
    operation: &str,
    operation_id: &str,
    config: &RuntimeConfig,
) -> Result<()> {
    log::info!("{} operation started. x-ms-operation-id={}", operation, operation_id);
    config.progress(&format!("Waiting for {} to complete...", operation))?;

    client.wait_for_operation(operation_id).await?;

    log::info!("{} operation finished. x-ms-operation-id={}", operation, operation_id);
    config.success(&format!("{} succeeded", operation))?;
    Ok(())
}
