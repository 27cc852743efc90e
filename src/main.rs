//! azure-extensions-cli - publish and manage Azure VM extension packages.
//!
//! This binary creates, versions, promotes, inspects and retires extension
//! images through the Azure Service Management API.

use std::process;

#[tokio::main]
async fn main() {
    // Select ring as the process-wide rustls crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    // Run CLI and get exit code
    let exit_code = match azure_extensions_cli::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
