//! Client binding for the managed backend (auth, table queries, remote
//! procedures, object storage). Transport only: every durable rule
//! lives server-side, and the caller's bearer token is forwarded on
//! each request so row-level policies decide what it may touch.

pub mod error;
pub mod identity;
pub mod rpc;
pub mod storage;
pub mod table;

use std::time::Duration;

pub use error::BackendError;
use error::{status_error, transport_error};
use reqwest::{Client, RequestBuilder};

pub struct Backend {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl Backend {
    /// Build the single shared handle. `base_url` is the project URL,
    /// e.g. `https://xyzcompany.supabase.co`.
    pub fn new(
        base_url: &str,
        anon_key: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the project key and the caller's token. RLS evaluates
    /// against the bearer, not the key.
    pub(crate) fn authed(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(token)
    }

    pub(crate) fn keyed(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", self.anon_key.as_str())
    }

    /// Send, then fold non-2xx statuses and transport failures into
    /// `BackendError`, returning the raw success body.
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}
