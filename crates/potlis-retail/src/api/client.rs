//! JSON fetching shared by both retail APIs
//!
//! Both services answer with UTF-8 JSON that may start with a byte-order
//! mark. Any failure is logged here and handed to callers as `None`.

use super::transport::Transport;
use crate::error::{Result, RetailError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

const BOM: char = '\u{feff}';

/// Decode a response body: UTF-8, leading BOM stripped, then JSON
pub fn decode_body(body: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(body)
        .map_err(|e| RetailError::DecodeError(format!("body is not UTF-8: {e}")))?;
    let text = text.strip_prefix(BOM).unwrap_or(text);
    Ok(serde_json::from_str(text)?)
}

/// Fetches and decodes JSON documents over a shared transport
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET `url` and decode the whole document
    pub async fn fetch_json(&self, url: &str) -> Result<Value> {
        info!("Making api call with {url}");
        let start = Instant::now();
        let response = self.transport.get(url).await?;
        info!("API request {url} took {:?}", start.elapsed());

        if !response.is_success() {
            return Err(RetailError::UpstreamCallFailed {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        decode_body(&response.body)
    }

    /// GET `url` and deserialize the top-level `key` field
    pub async fn fetch_field<T: DeserializeOwned>(&self, url: &str, key: &str) -> Result<T> {
        let mut document = self.fetch_json(url).await?;
        let field = document
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| RetailError::DecodeError(format!("response has no `{key}` field")))?;
        Ok(serde_json::from_value(field)?)
    }

    /// Like [`fetch_field`](Self::fetch_field), but a failed call is logged and
    /// reported as `None`
    pub async fn fetch_field_or_absent<T: DeserializeOwned>(
        &self,
        url: &str,
        key: &str,
    ) -> Option<T> {
        match self.fetch_field(url, key).await {
            Ok(value) => Some(value),
            Err(RetailError::UpstreamCallFailed { status, body }) => {
                error!("API call {url} FAILED server returned status {status}. server returned {body}");
                None
            }
            Err(e) => {
                error!("API call {url} FAILED: {e}");
                None
            }
        }
    }
}
