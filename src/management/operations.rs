//! Polling of asynchronous management operations.

use super::client::ManagementClient;
use super::types::{Operation, OperationStatus};
use crate::error::{PublisherError, Result};
use tokio::time::Instant;

impl ManagementClient {
    /// Fetches the current status of an operation.
    pub async fn operation_status(&self, operation_id: &str) -> Result<Operation> {
        let url = self.endpoint(&["operations", operation_id], None)?;
        self.get_xml("GetOperationStatus", url).await
    }

    /// Polls `operation_id` until it succeeds, fails or the poll policy
    /// times out.
    pub async fn wait_for_operation(&self, operation_id: &str) -> Result<()> {
        let started = Instant::now();
        loop {
            let operation = self.operation_status(operation_id).await?;
            match operation.state() {
                OperationStatus::Succeeded => {
                    log::debug!(
                        "x-ms-operation-id={} succeeded after {:?}",
                        operation_id,
                        started.elapsed()
                    );
                    return Ok(());
                }
                OperationStatus::Failed => {
                    let error = operation.error.unwrap_or_default();
                    return Err(PublisherError::OperationFailed {
                        operation_id: operation_id.to_string(),
                        status: operation.http_status_code.unwrap_or_default(),
                        code: error.code,
                        message: error.message,
                    });
                }
                OperationStatus::InProgress => {
                    let waited = started.elapsed();
                    if waited + self.poll.interval > self.poll.timeout {
                        return Err(PublisherError::OperationTimeout {
                            operation_id: operation_id.to_string(),
                            waited,
                        });
                    }
                    log::debug!(
                        "x-ms-operation-id={} status={}, checking again in {:?}",
                        operation_id,
                        operation.status,
                        self.poll.interval
                    );
                    tokio::time::sleep(self.poll.interval).await;
                }
            }
        }
    }
}
