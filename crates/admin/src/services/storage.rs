//! Object storage client for inspection photos.
//!
//! Thin HTTP client against the bucket API: PUT to upload, DELETE to
//! remove. Keys are `inspections/{order}/{item}/{uuid}` so an order's
//! photos can be cleaned up by prefix after shipment.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use thiserror::Error;
use uuid::Uuid;

use cedarline_core::{WholesaleOrderId, WholesaleOrderItemId};

use crate::config::StorageConfig;

/// Errors from the storage API.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Request failed at the transport level.
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage API returned a non-success status.
    #[error("storage api returned {status} for {key}")]
    Api { status: StatusCode, key: String },
}

/// HTTP client for the inspection-photo bucket.
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    token: String,
    public_url: String,
}

impl StorageClient {
    /// Create a new storage client.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            bucket: config.bucket.clone(),
            token: config.token.expose_secret().to_string(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generate a fresh object key for a photo of one order item.
    #[must_use]
    pub fn photo_key(order_id: WholesaleOrderId, item_id: WholesaleOrderItemId) -> String {
        format!("inspections/{order_id}/{item_id}/{}", Uuid::new_v4())
    }

    /// Public URL an object is served from.
    #[must_use]
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{key}", self.public_url, self.bucket)
    }

    /// Upload an object.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request fails or the API rejects it.
    pub async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let response = self
            .client
            .put(format!("{}/{}/{key}", self.endpoint, self.bucket))
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StorageError::Api {
                status: response.status(),
                key: key.to_string(),
            });
        }

        Ok(())
    }

    /// Delete an object. Deleting a missing object succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the request fails or the API rejects it.
    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(format!("{}/{}/{key}", self.endpoint, self.bucket))
            .bearer_auth(&self.token)
            .send()
            .await?;

        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(StorageError::Api {
                status: response.status(),
                key: key.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photo_key_shape() {
        let key = StorageClient::photo_key(WholesaleOrderId::new(7), WholesaleOrderItemId::new(42));
        assert!(key.starts_with("inspections/7/42/"));
        let suffix = key.rsplit('/').next().unwrap_or_default();
        assert!(Uuid::parse_str(suffix).is_ok());
    }
}
