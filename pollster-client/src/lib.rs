//! Pollster HTTP Client
//!
//! The production [`HttpClient`] for pollers, built on `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use pollster_client::ReqwestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pollster_client::ClientError> {
//!     let client = ReqwestClient::new();
//!     let status: serde_json::Value = client.get("http://localhost:8080/status").await?;
//!
//!     println!("status: {}", status);
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{ClientError, Result};

use async_trait::async_trait;
use pollster_core::{FetchError, HttpClient};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// GET-only JSON client used to poll a resource
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Create a client with reqwest's default settings
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a client around a configured reqwest `Client`
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, default
    /// headers, etc.
    ///
    /// # Example
    /// ```
    /// use pollster_client::ReqwestClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = ReqwestClient::with_client(http_client);
    /// ```
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Issue a GET and deserialize the JSON body
    ///
    /// # Arguments
    /// * `url` - Absolute URL of the resource
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "GET");
        let response = self.client.get(url).send().await?;

        self.handle_response(response).await
    }

    /// Check the status code and deserialize the body of a response
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get_json(&self, url: &str) -> std::result::Result<Value, FetchError> {
        self.get(url).await.map_err(FetchError::from)
    }
}
