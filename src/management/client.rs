//! Certificate-authenticated client for the Service Management API.

use super::retry::{PollPolicy, RetryPolicy};
use super::types::ServiceError;
use crate::credentials::ManagementCertificate;
use crate::error::{PublisherError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Management endpoint of the public Azure cloud
pub const DEFAULT_MANAGEMENT_URL: &str = "https://management.core.windows.net/";

/// Service Management API version sent with every request
pub const API_VERSION: &str = "2014-10-01";

/// Header carrying the asynchronous operation id
pub const REQUEST_ID_HEADER: &str = "x-ms-request-id";

/// Per-request timeout; long-running work is tracked through operations
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client bound to one management endpoint and one subscription.
#[derive(Debug, Clone)]
pub struct ManagementClient {
    http: Client,
    base_url: Url,
    subscription_id: String,
    pub(crate) retry: RetryPolicy,
    pub(crate) poll: PollPolicy,
}

impl ManagementClient {
    /// Creates a client that authenticates with `certificate`.
    pub fn new(
        management_url: &str,
        subscription_id: &str,
        certificate: &ManagementCertificate,
    ) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .identity(certificate.identity()?)
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("azure-extensions-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http_client(http, management_url, subscription_id)
    }

    /// Creates a client around an existing HTTP client.
    pub fn with_http_client(http: Client, management_url: &str, subscription_id: &str) -> Result<Self> {
        let base_url = Url::parse(management_url).map_err(|e| invalid_argument(format!(
            "invalid management URL {:?}: {}",
            management_url, e
        )))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid_argument(format!(
                "invalid management URL {:?}",
                management_url
            )));
        }
        if subscription_id.trim().is_empty() {
            return Err(invalid_argument("subscription id is empty".to_string()));
        }

        Ok(Self {
            http,
            base_url,
            subscription_id: subscription_id.trim().to_string(),
            retry: RetryPolicy::default(),
            poll: PollPolicy::default(),
        })
    }

    /// Overrides the retry schedule for GET requests.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Overrides the operation polling schedule.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Subscription the client is bound to, trimmed.
    pub fn subscription_id(&self) -> &str {
        &self.subscription_id
    }

    /// Builds `{base}/{subscription}/{segments...}[?query]`.
    pub(crate) fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| invalid_argument(format!("invalid management URL {}", self.base_url)))?
            .pop_if_empty()
            .push(&self.subscription_id)
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header("x-ms-version", API_VERSION)
    }

    /// Sends a request and turns non-2xx responses into [`PublisherError::Azure`].
    async fn send(&self, operation: &str, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(decode_error(operation, status.as_u16(), &body))
    }

    /// GETs and decodes an XML document, retrying transient failures.
    pub(crate) async fn get_xml<T: DeserializeOwned>(&self, operation: &str, url: Url) -> Result<T> {
        let mut attempt = 1;
        let body = loop {
            let result = match self
                .send(operation, self.request(Method::GET, url.clone()))
                .await
            {
                Ok(response) => response.text().await.map_err(PublisherError::from),
                Err(e) => Err(e),
            };

            match result {
                Ok(body) => break body,
                Err(e) if e.is_transient() && self.retry.should_retry(attempt) => {
                    log::warn!(
                        "{} attempt {}/{} failed, retrying in {:?}: {}",
                        operation,
                        attempt,
                        self.retry.max_attempts,
                        self.retry.delay,
                        e
                    );
                    tokio::time::sleep(self.retry.delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        log::trace!("{} response: {}", operation, body);
        Ok(quick_xml::de::from_str(&body)?)
    }

    /// Starts an asynchronous operation and returns its id.
    ///
    /// Mutating requests are sent exactly once.
    pub(crate) async fn start_operation(
        &self,
        operation: &str,
        method: Method,
        url: Url,
        body: Option<String>,
    ) -> Result<String> {
        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/xml")
                .body(body);
        }

        let response = self.send(operation, request).await?;
        let status = response.status().as_u16();
        match response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
        {
            Some(id) => Ok(id.to_string()),
            None => Err(PublisherError::unexpected_response(
                operation,
                status,
                &format!("response carried no {} header", REQUEST_ID_HEADER),
            )),
        }
    }
}

/// Decodes an `<Error>` body, falling back to the raw text.
pub(crate) fn decode_error(operation: &str, status: u16, body: &str) -> PublisherError {
    match quick_xml::de::from_str::<ServiceError>(body) {
        Ok(error) if !error.code.is_empty() || !error.message.is_empty() => PublisherError::Azure {
            operation: operation.to_string(),
            status,
            code: error.code,
            message: error.message,
        },
        _ => PublisherError::unexpected_response(operation, status, body),
    }
}

fn invalid_argument(reason: String) -> PublisherError {
    PublisherError::Cli(crate::error::CliError::InvalidArguments { reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> ManagementClient {
        ManagementClient::with_http_client(Client::new(), url, "00000000-1111-2222-3333-444444444444").unwrap()
    }

    #[test]
    fn endpoint_appends_subscription_and_segments() {
        let url = client(DEFAULT_MANAGEMENT_URL)
            .endpoint(&["services", "extensions"], Some("action=update"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://management.core.windows.net/00000000-1111-2222-3333-444444444444/services/extensions?action=update"
        );
    }

    #[test]
    fn endpoint_handles_base_without_trailing_slash_and_encodes_segments() {
        let url = client("https://management.example.net/azure")
            .endpoint(&["services", "extensions", "Contoso.Ext", "My Ext", "1.0"], None)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://management.example.net/azure/00000000-1111-2222-3333-444444444444/services/extensions/Contoso.Ext/My%20Ext/1.0"
        );
    }

    #[test]
    fn rejects_bad_management_url_and_empty_subscription() {
        assert!(ManagementClient::with_http_client(Client::new(), "not a url", "sub").is_err());
        assert!(ManagementClient::with_http_client(Client::new(), "mailto:ops@example.com", "sub").is_err());
        assert!(ManagementClient::with_http_client(Client::new(), DEFAULT_MANAGEMENT_URL, " ").is_err());
    }

    #[test]
    fn subscription_id_is_trimmed() {
        let client = client(DEFAULT_MANAGEMENT_URL);
        assert_eq!(client.subscription_id(), "00000000-1111-2222-3333-444444444444");
        let padded = ManagementClient::with_http_client(Client::new(), DEFAULT_MANAGEMENT_URL, " sub \n").unwrap();
        assert_eq!(padded.subscription_id(), "sub");
    }

    #[test]
    fn decodes_service_error_document() {
        let body = r#"<Error xmlns="http://schemas.microsoft.com/windowsazure" xmlns:i="http://www.w3.org/2001/XMLSchema-instance"><Code>ForbiddenError</Code><Message>The server failed to authenticate the request.</Message></Error>"#;
        match decode_error("ListVersions", 403, body) {
            PublisherError::Azure {
                status,
                code,
                message,
                ..
            } => {
                assert_eq!(status, 403);
                assert_eq!(code, "ForbiddenError");
                assert_eq!(message, "The server failed to authenticate the request.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = decode_error("ListVersions", 502, "Bad Gateway");
        assert_eq!(
            err.to_string(),
            "ListVersions failed: HTTP 502 UnexpectedResponse: Bad Gateway"
        );
    }
}
