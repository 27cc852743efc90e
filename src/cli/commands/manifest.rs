//! `new-extension-manifest`: stage the package and print its manifest.

use super::connect;
use crate::cli::RuntimeConfig;
use crate::cli::args::NewManifestArgs;
use crate::error::Result;
use crate::manifest::ExtensionManifest;
use crate::storage::{BlobClient, PACKAGE_CONTAINER, SharedKey, check_package_size, package_blob_name};
use std::io::Write;
use std::time::Duration;

/// Timeout for the package upload request (10 minutes)
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

/// Uploads the package and writes the manifest XML to stdout.
pub async fn new_extension_manifest(args: &NewManifestArgs, config: &RuntimeConfig) -> Result<()> {
    let id = &args.extension;
    if args
        .package
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| !e.eq_ignore_ascii_case("zip"))
        .unwrap_or(true)
    {
        config.warn(&format!(
            "{} does not have a .zip extension",
            args.package.display()
        ))?;
    }

    let size = check_package_size(&args.package).await?;
    config.verbose_println(&format!("Package {} is {} bytes", args.package.display(), size))?;

    let client = connect(&args.connection, config)?;

    config.progress(&format!("Retrieving keys of storage account {}", args.storage_account))?;
    let keys = client.storage_keys(&args.storage_account).await?;
    let key = SharedKey::new(&args.storage_account, &keys.primary)?;

    let http = reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(UPLOAD_TIMEOUT)
        .build()?;
    let blobs = BlobClient::for_account(http, &args.storage_base_url, key)?;

    blobs.ensure_container(PACKAGE_CONTAINER).await?;

    let blob_name = package_blob_name(&id.namespace, &id.name, &id.version);
    config.progress(&format!("Uploading {} as {}", args.package.display(), blob_name))?;
    let blob_url = blobs
        .upload_file(PACKAGE_CONTAINER, &blob_name, &args.package)
        .await?;
    config.success(&format!("Uploaded package to {}", blob_url))?;

    let media_link = blobs.read_url(PACKAGE_CONTAINER, &blob_name)?;
    let manifest = ExtensionManifest {
        namespace: id.namespace.clone(),
        name: id.name.clone(),
        version: id.version.clone(),
        label: args.label.clone(),
        media_link: media_link.to_string(),
        description: args.description.clone(),
        eula_url: args.eula_url.clone(),
        privacy_url: args.privacy_url.clone(),
        homepage_url: args.homepage_url.clone(),
        company: args.company.clone(),
        supported_os: args.supported_os.clone(),
    }
    .render()?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", manifest)?;
    stdout.flush()?;
    Ok(())
}
