//! Azure Service Management API access.
//!
//! Every call is authenticated with the subscription management certificate
//! and versioned with `x-ms-version`. Mutating calls are asynchronous on the
//! service side: they return an operation id in `x-ms-request-id`, which
//! [`ManagementClient::wait_for_operation`] polls to completion.

mod client;
mod extensions;
mod operations;
pub mod retry;
pub mod types;

pub(crate) use client::decode_error;
pub use client::{API_VERSION, DEFAULT_MANAGEMENT_URL, ManagementClient, REQUEST_ID_HEADER};
pub use retry::{PollPolicy, RetryPolicy};
pub use types::{ExtensionImage, Operation, OperationStatus, ReplicationStatus, StorageServiceKeys};
