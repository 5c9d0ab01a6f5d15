//! HTTP client for a chain node's account API.

use crate::error::AuthorityError;
use async_trait::async_trait;
use authsig_types::{AccountAuthority, ChainEndpoint};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Path of the account-info query on a chain node.
pub const GET_ACCOUNT_PATH: &str = "/v1/chain/get_account";

/// Longest slice of a non-JSON error body quoted in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Source of account authorities.
///
/// [`ChainClient`] is the network implementation; tests plug in canned ones.
#[async_trait]
pub trait AuthorityFetcher: Send + Sync {
    async fn fetch_authority(
        &self,
        endpoint: &ChainEndpoint,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError>;
}

#[async_trait]
impl<T: AuthorityFetcher + ?Sized> AuthorityFetcher for Arc<T> {
    async fn fetch_authority(
        &self,
        endpoint: &ChainEndpoint,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError> {
        (**self).fetch_authority(endpoint, account).await
    }
}

/// Client for querying account authorities from chain nodes.
///
/// Sends `POST {endpoint}/v1/chain/get_account` with `{"account_name": ...}`.
/// Every call is a fresh round trip: no caching, no retries.
#[derive(Clone, Debug)]
pub struct ChainClient {
    /// HTTP client (reusable connection pool).
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GetAccountRequest<'a> {
    account_name: &'a str,
}

/// Error envelope returned by nodes on non-success statuses.
///
/// `{"code": 500, "message": "Internal Service Error",
///   "error": {"code": 3010001, "name": "name_type_exception", "what": "Invalid name"}}`
#[derive(Debug, Deserialize)]
struct NodeErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<NodeErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct NodeErrorDetail {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    what: Option<String>,
}

impl ChainClient {
    /// Create a client with the transport's default timeouts.
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests fail with [`AuthorityError::Network`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, AuthorityError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthorityError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http_client })
    }

    /// Wrap an existing `reqwest` client (custom TLS roots, proxies, ...).
    pub fn from_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }

    /// Fetch the authority of `account` from the node at `endpoint`.
    ///
    /// Transport failures map to `Network`. A non-success status or a body that is not
    /// JSON maps to `Remote`. JSON that does not fit the authority schema maps to
    /// `MalformedAuthority`.
    pub async fn get_account(
        &self,
        endpoint: &ChainEndpoint,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError> {
        let url = format!("{}{GET_ACCOUNT_PATH}", endpoint.base_url());
        tracing::debug!(%url, account, "fetching account authority");

        let response = self
            .http_client
            .post(&url)
            .json(&GetAccountRequest {
                account_name: account,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "node responded");

        if !status.is_success() {
            return Err(AuthorityError::Remote {
                status: status.as_u16(),
                message: node_error_message(&body),
            });
        }

        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|e| AuthorityError::Remote {
                status: status.as_u16(),
                message: format!("response body is not valid JSON: {e}"),
            })?;

        parse_authority(value)
    }
}

#[async_trait]
impl AuthorityFetcher for ChainClient {
    async fn fetch_authority(
        &self,
        endpoint: &ChainEndpoint,
        account: &str,
    ) -> Result<AccountAuthority, AuthorityError> {
        self.get_account(endpoint, account).await
    }
}

impl Default for ChainClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an already-parsed JSON body against the authority schema.
pub fn parse_authority(value: serde_json::Value) -> Result<AccountAuthority, AuthorityError> {
    if !value.is_object() {
        return Err(AuthorityError::MalformedAuthority(
            "expected a JSON object".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| AuthorityError::MalformedAuthority(e.to_string()))
}

fn transport_error(e: reqwest::Error) -> AuthorityError {
    if e.is_timeout() {
        AuthorityError::Network(format!("request timed out: {e}"))
    } else if e.is_connect() {
        AuthorityError::Network(format!("connection failed: {e}"))
    } else {
        AuthorityError::Network(e.to_string())
    }
}

/// Best-effort description of a node's error body.
fn node_error_message(body: &[u8]) -> String {
    if let Ok(err) = serde_json::from_slice::<NodeErrorResponse>(body) {
        let detail = err.error.and_then(|d| match (d.what, d.name) {
            (Some(what), Some(name)) => Some(format!("{what} ({name})")),
            (what, name) => what.or(name),
        });
        match (err.message, detail) {
            (Some(message), Some(detail)) => return format!("{message}: {detail}"),
            (Some(message), None) => return message,
            (None, Some(detail)) => return detail,
            (None, None) => {}
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        "empty response body".to_string()
    } else {
        text.chars().take(MAX_ERROR_BODY_CHARS).collect()
    }
}
