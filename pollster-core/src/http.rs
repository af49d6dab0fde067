//! HTTP collaborator
//!
//! The poller issues every request through this trait, so tests can swap the
//! network for an in-memory script.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Issues GET requests and decodes their JSON bodies
///
/// Implementations treat any non-2xx status as [`FetchError::Status`] and a
/// body that fails to parse as [`FetchError::Decode`]. Headers, auth and query
/// parameters are the implementation's concern, not the poller's.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}
