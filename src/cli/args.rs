//! Command line argument parsing and validation.
//!
//! Connection flags fall back to environment variables so that a publisher
//! can export them once per shell session.

use crate::management::{DEFAULT_MANAGEMENT_URL, PollPolicy, RetryPolicy};
use crate::storage::{DEFAULT_STORAGE_BASE_URL, MAX_SINGLE_PUT_BYTES, oversized_package_message};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Release, update and manage Azure Virtual Machine extensions
#[derive(Parser, Debug)]
#[command(
    name = "azure-extensions-cli",
    version,
    about = "This tool is designed for internal extension publishers to release, update and manage Virtual Machine extensions.",
    long_about = "This tool is designed for internal extension publishers to release, update and manage Virtual Machine extensions.

Typical release flow:
  azure-extensions-cli new-extension-manifest --package ext.zip ... > manifest.xml
  azure-extensions-cli new-extension-version --manifest manifest.xml
  azure-extensions-cli replication-status --namespace Foo.Bar --name Ext --version 1.0.0
  azure-extensions-cli promote --manifest manifest.xml --region 'West US'
  azure-extensions-cli promote-all-regions --manifest manifest.xml

Connection flags can be set through MANAGEMENT_URL, SUBSCRIPTION_ID and SUBSCRIPTION_CERT."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Show debug logging and extra progress detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print results and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Seconds between operation status checks
    #[arg(long, global = true, value_name = "SECONDS", default_value_t = 10)]
    pub poll_interval: u64,

    /// Seconds to wait for an operation before giving up
    #[arg(long, global = true, value_name = "SECONDS", default_value_t = 7200)]
    pub operation_timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Creates an XML file used to publish or update extension.
    NewExtensionManifest(NewManifestArgs),

    /// Creates a new type of extension, not for releasing new versions.
    NewExtension(ManifestArgs),

    /// Publishes a new type of extension internally.
    NewExtensionVersion(ManifestArgs),

    /// Promote published internal extension to PROD in one or more locations.
    Promote(PromoteArgs),

    /// Promote published extension to all Locations.
    PromoteAllRegions(ManifestArgs),

    /// Lists all published extension versions for subscription
    ListVersions(ListVersionsArgs),

    /// Retrieves replication status for an uploaded extension package
    ReplicationStatus(ReplicationStatusArgs),

    /// Marks the specified version of the extension internal. Does not delete.
    UnpublishVersion(UnpublishArgs),

    /// Deletes the extension version. It should be unpublished first.
    DeleteVersion(VersionArgs),
}

/// Management endpoint and credentials
#[derive(clap::Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Azure Management URL for a non-public Azure cloud
    #[arg(long, env = "MANAGEMENT_URL", default_value = DEFAULT_MANAGEMENT_URL)]
    pub management_url: String,

    /// Subscription ID for the publisher subscription
    #[arg(long, env = "SUBSCRIPTION_ID")]
    pub subscription_id: String,

    /// Path of subscription management certificate (.pem or .pfx) file
    #[arg(long, env = "SUBSCRIPTION_CERT", value_name = "PATH")]
    pub subscription_cert: PathBuf,
}

/// Identifies one extension version
#[derive(clap::Args, Debug, Clone)]
pub struct ExtensionId {
    /// Publisher namespace e.g. Microsoft.Azure.Extensions
    #[arg(long, env = "EXTENSION_NAMESPACE")]
    pub namespace: String,

    /// Name of the extension e.g. FooExtension
    #[arg(long, env = "EXTENSION_NAME")]
    pub name: String,

    /// Version of the extension package e.g. 1.0.0
    #[arg(long)]
    pub version: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct NewManifestArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub extension: ExtensionId,

    /// Path of extension package (.zip)
    #[arg(long, value_name = "PATH")]
    pub package: PathBuf,

    /// Azure Storage base URL
    #[arg(long, env = "STORAGE_BASE_URL", default_value = DEFAULT_STORAGE_BASE_URL)]
    pub storage_base_url: String,

    /// Name of an existing storage account to be used in uploading the extension package temporarily.
    #[arg(long)]
    pub storage_account: String,

    /// Human readable name of the extension
    #[arg(long)]
    pub label: String,

    /// Description of the extension
    #[arg(long)]
    pub description: String,

    /// URL to the End-User License Agreement page
    #[arg(long)]
    pub eula_url: String,

    /// URL to the Privacy Policy page
    #[arg(long)]
    pub privacy_url: String,

    /// URL to the homepage of the extension
    #[arg(long)]
    pub homepage_url: String,

    /// Human-readable Company Name of the publisher
    #[arg(long)]
    pub company: String,

    /// Extension platform e.g. 'Linux'
    #[arg(long)]
    pub supported_os: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Path of extension manifest file (XML output of 'new-extension-manifest')
    #[arg(long, value_name = "PATH")]
    pub manifest: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PromoteArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Region to rollout an extension to (e.g. 'Japan East'); repeat for more
    #[arg(long = "region", value_name = "REGION", required = true)]
    pub regions: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListVersionsArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Print output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReplicationStatusArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub extension: ExtensionId,

    /// Print output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct UnpublishArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub extension: ExtensionId,

    /// Set if this is an XML extension, i.e. PaaS
    #[arg(long)]
    pub is_xml_extension: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct VersionArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(flatten)]
    pub extension: ExtensionId,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.global.poll_interval == 0 {
            return Err("--poll-interval must be at least 1 second".to_string());
        }

        match &self.command {
            Command::NewExtensionManifest(args) => {
                args.connection.validate()?;
                args.extension.validate()?;
                non_empty("storage-account", &args.storage_account)?;
                non_empty("storage-base-url", &args.storage_base_url)?;
                existing_file("package", &args.package)?;
                package_within_limit(&args.package)
            }
            Command::NewExtension(args)
            | Command::NewExtensionVersion(args)
            | Command::PromoteAllRegions(args) => args.validate(),
            Command::Promote(args) => {
                args.manifest.validate()?;
                if args.regions.iter().all(|r| r.trim().is_empty()) {
                    return Err("argument \"region\" must be provided".to_string());
                }
                Ok(())
            }
            Command::ListVersions(args) => args.connection.validate(),
            Command::ReplicationStatus(args) => {
                args.connection.validate()?;
                args.extension.validate()
            }
            Command::UnpublishVersion(args) => {
                args.connection.validate()?;
                args.extension.validate()
            }
            Command::DeleteVersion(args) => {
                args.connection.validate()?;
                args.extension.validate()
            }
        }
    }
}

impl ConnectionArgs {
    fn validate(&self) -> Result<(), String> {
        non_empty("management-url", &self.management_url)?;
        non_empty("subscription-id", &self.subscription_id)?;
        existing_file("subscription-cert", &self.subscription_cert)
    }
}

impl ExtensionId {
    fn validate(&self) -> Result<(), String> {
        non_empty("namespace", &self.namespace)?;
        non_empty("name", &self.name)?;
        non_empty("version", &self.version)
    }
}

impl ManifestArgs {
    fn validate(&self) -> Result<(), String> {
        self.connection.validate()?;
        existing_file("manifest", &self.manifest)
    }
}

fn non_empty(flag: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("argument {:?} must be provided", flag));
    }
    Ok(())
}

fn existing_file(flag: &str, path: &Path) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("--{}: file not found: {}", flag, path.display()));
    }
    Ok(())
}

fn package_within_limit(path: &Path) -> Result<(), String> {
    let size = std::fs::metadata(path)
        .map_err(|e| format!("--package: cannot read {}: {}", path.display(), e))?
        .len();
    if size > MAX_SINGLE_PUT_BYTES {
        return Err(format!("--package: {}", oversized_package_message(path, size)));
    }
    Ok(())
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    retry: RetryPolicy,
    poll: PollPolicy,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.global.verbose, args.global.quiet),
            retry: RetryPolicy::default(),
            poll: PollPolicy {
                interval: Duration::from_secs(args.global.poll_interval),
                timeout: Duration::from_secs(args.global.operation_timeout),
            },
        }
    }
}

impl RuntimeConfig {
    /// Retry schedule for idempotent management requests
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Polling schedule from `--poll-interval` and `--operation-timeout`
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    const CONNECTION: [&str; 4] = ["--subscription-id", "sub", "--subscription-cert", "/tmp/c.pem"];

    fn parse(args: &[&str]) -> Args {
        let mut argv = vec!["azure-extensions-cli"];
        argv.extend_from_slice(args);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn promote_collects_repeated_regions() {
        let mut argv = vec!["promote", "--manifest", "m.xml", "--region", "Japan East", "--region", "West US"];
        argv.extend_from_slice(&CONNECTION);
        match parse(&argv).command {
            Command::Promote(args) => {
                assert_eq!(args.regions, vec!["Japan East".to_string(), "West US".to_string()]);
                assert_eq!(args.manifest.manifest, PathBuf::from("m.xml"));
                assert_eq!(args.manifest.connection.management_url, DEFAULT_MANAGEMENT_URL);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn promote_requires_a_region() {
        let mut argv = vec!["azure-extensions-cli", "promote", "--manifest", "m.xml"];
        argv.extend_from_slice(&CONNECTION);
        assert!(Args::try_parse_from(argv).is_err());
    }

    #[test]
    fn unpublish_reads_xml_flag_and_global_options() {
        let mut argv = vec![
            "unpublish-version",
            "--namespace",
            "Foo.Bar",
            "--name",
            "Ext",
            "--version",
            "1.0",
            "--is-xml-extension",
            "--poll-interval",
            "2",
            "-q",
        ];
        argv.extend_from_slice(&CONNECTION);
        let args = parse(&argv);
        assert!(args.global.quiet);
        assert_eq!(args.global.poll_interval, 2);
        let config = RuntimeConfig::from(&args);
        assert_eq!(config.poll_policy().interval, Duration::from_secs(2));
        match args.command {
            Command::UnpublishVersion(args) => {
                assert!(args.is_xml_extension);
                assert_eq!(args.extension.version, "1.0");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn validate_reports_missing_certificate_file() {
        let mut argv = vec!["list-versions", "--json"];
        argv.extend_from_slice(&["--subscription-id", "sub", "--subscription-cert", "/nonexistent/cert.pem"]);
        let err = parse(&argv).validate().unwrap_err();
        assert!(err.contains("subscription-cert"), "{}", err);
    }

    #[test]
    fn validate_rejects_package_above_single_put_limit() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("mgmt.pem");
        std::fs::write(&cert, "pem").unwrap();
        let package = dir.path().join("big.zip");
        std::fs::File::create(&package)
            .unwrap()
            .set_len(MAX_SINGLE_PUT_BYTES + 1)
            .unwrap();
        let cert = cert.to_str().unwrap().to_string();
        let package = package.to_str().unwrap().to_string();

        let mut argv = vec![
            "new-extension-manifest",
            "--namespace",
            "Foo.Bar",
            "--name",
            "Ext",
            "--version",
            "1.0.0",
            "--storage-account",
            "acct",
            "--label",
            "l",
            "--description",
            "d",
            "--eula-url",
            "e",
            "--privacy-url",
            "p",
            "--homepage-url",
            "h",
            "--company",
            "c",
            "--supported-os",
            "Linux",
            "--subscription-id",
            "sub",
        ];
        argv.extend_from_slice(&["--subscription-cert", &cert, "--package", &package]);
        let err = parse(&argv).validate().unwrap_err();
        assert!(err.starts_with("--package: package "), "{}", err);
        assert!(err.contains("are not supported"), "{}", err);
    }

    #[test]
    fn validate_rejects_blank_values() {
        let cert = tempfile::NamedTempFile::new().unwrap();
        let cert_path = cert.path().to_str().unwrap();
        let args = parse(&[
            "delete-version",
            "--namespace",
            " ",
            "--name",
            "Ext",
            "--version",
            "1.0",
            "--subscription-id",
            "sub",
            "--subscription-cert",
            cert_path,
        ]);
        assert_eq!(args.validate().unwrap_err(), "argument \"namespace\" must be provided");
    }
}
