//! Publisher tooling for Azure Virtual Machine extensions
//!
//! This library provides the pieces behind the `azure-extensions-cli` binary:
//! - management certificate loading
//! - extension manifest rendering and promotion rewrites
//! - a Service Management API client with operation polling
//! - package staging in Azure Blob storage
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod credentials;
pub mod error;
pub mod manifest;
pub mod management;
pub mod storage;

// Re-export commonly used types
pub use error::{CliError, PublisherError, Result};
