//! `list-versions` and `replication-status`.

use super::connect;
use crate::cli::RuntimeConfig;
use crate::cli::args::{ListVersionsArgs, ReplicationStatusArgs};
use crate::cli::render;
use crate::error::Result;
use std::io::Write;

pub async fn list_versions(args: &ListVersionsArgs, config: &RuntimeConfig) -> Result<()> {
    let client = connect(&args.connection, config)?;
    log::debug!("Listing published extensions.");
    let images = client.list_versions().await?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        render::write_json(&mut stdout, &images)?;
    } else {
        write!(stdout, "{}", render::versions_table(&images))?;
    }
    Ok(())
}

pub async fn replication_status(args: &ReplicationStatusArgs, config: &RuntimeConfig) -> Result<()> {
    let client = connect(&args.connection, config)?;
    let id = &args.extension;
    log::debug!("Requesting replication status.");
    let statuses = client
        .replication_status(&id.namespace, &id.name, &id.version)
        .await?;

    let mut stdout = std::io::stdout().lock();
    if args.json {
        render::write_json(&mut stdout, &statuses)?;
    } else {
        write!(stdout, "{}", render::replication_table(&statuses))?;
    }
    Ok(())
}
