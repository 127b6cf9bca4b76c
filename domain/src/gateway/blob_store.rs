//! Blob store client for uploaded note photos.
//!
//! A plain key/value write boundary: `put` stores the bytes under a key and
//! yields the public URL the OCR provider (and the front-end) reads from.
//! Key uniqueness is the caller's concern; every upload uses a freshly
//! generated token, and no collision handling exists beyond that.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use log::*;

/// The outcome of storing one object
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub url: String,
    pub key: String,
}

pub struct BlobStoreClient {
    client: reqwest::Client,
    base_url: String,
    public_base_url: String,
    bucket: String,
}

impl BlobStoreClient {
    /// Create a new client. `base_url` receives writes, `public_base_url`
    /// is what stored objects are read from; the two differ behind a CDN.
    pub fn new(
        base_url: &str,
        public_base_url: &str,
        bucket: &str,
        api_key: Option<String>,
    ) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(api_key) = api_key {
            let mut header_value = reqwest::header::HeaderValue::from_str(&format!(
                "Bearer {api_key}"
            ))
            .map_err(|e| {
                warn!("Failed to create blob store auth header: {:?}", e);
                Error::config("Invalid blob store API key format")
            })?;
            header_value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, header_value);
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
        })
    }

    /// Store bytes under key and return the public URL they are readable at.
    pub async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<StoredObject, Error> {
        let url = format!("{}/{}/{}", self.base_url, self.bucket, key);

        debug!("Storing {} bytes at {url}", bytes.len());

        let response = self
            .client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to reach blob store: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            Ok(StoredObject {
                url: format!("{}/{}/{}", self.public_base_url, self.bucket, key),
                key: key.to_string(),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            error!("Blob store rejected upload: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }
}
