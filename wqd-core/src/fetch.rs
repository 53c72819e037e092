//! Async retrieval of CSV resources (feature `api`).
//!
//! `http://` and `https://` locators go through `reqwest`; anything else is
//! read from the local filesystem. There is no retry and no timeout beyond
//! what the supplied client is configured with.

use crate::decode::decode_reader;
use crate::error::ResourceError;
use crate::record::RawRecord;
use crate::store::RowStore;
use reqwest::Client;

fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Fetch the raw bytes behind a locator.
///
/// Bytes are not validated as UTF-8 here. A row with bad bytes is dropped
/// at decode time instead of failing the whole resource.
pub async fn fetch_bytes(client: &Client, locator: &str) -> Result<Vec<u8>, ResourceError> {
    if !is_remote(locator) {
        return tokio::fs::read(locator)
            .await
            .map_err(|source| ResourceError::Io {
                locator: locator.to_string(),
                source,
            });
    }

    let response = client
        .get(locator)
        .send()
        .await
        .map_err(|source| ResourceError::Http {
            locator: locator.to_string(),
            source,
        })?;
    if !response.status().is_success() {
        return Err(ResourceError::HttpStatus {
            locator: locator.to_string(),
            status: response.status().as_u16(),
        });
    }
    let body = response.bytes().await.map_err(|source| ResourceError::Http {
        locator: locator.to_string(),
        source,
    })?;
    Ok(body.to_vec())
}

/// Fetch and decode a locator into records.
pub async fn fetch_rows(client: &Client, locator: &str) -> Result<Vec<RawRecord>, ResourceError> {
    let body = fetch_bytes(client, locator).await?;
    decode_reader(&body[..])
}

impl RowStore {
    /// Begin, fetch and finish in one call. Returns whether the result was
    /// applied; `false` means a newer load superseded this one meanwhile.
    pub async fn load(&self, client: &Client, locator: &str) -> bool {
        let ticket = self.begin(locator);
        let result = fetch_rows(client, locator).await;
        self.finish(&ticket, result)
    }
}
