//! Retrieves the exercise dataset over HTTP or from a local file.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Dataset;
use crate::parser::parse_dataset;

/// Issues a single GET and returns the body. Non-2xx responses are errors.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed: reqwest::Url = url
        .parse()
        .map_err(|_| Error::InvalidUrl(url.to_string()))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client.execute(req).await?;
    let status = resp.status();
    debug!(%status, "Response received");

    if !status.is_success() {
        return Err(Error::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    Ok(resp.bytes().await?.to_vec())
}

/// Fetches and decodes the dataset. No retry, no caching.
#[tracing::instrument(skip(client))]
pub async fn fetch_dataset<C: HttpClient>(client: &C, url: &str) -> Result<Dataset> {
    info!("Fetching exercises");
    let bytes = fetch_bytes(client, url).await?;
    debug!(bytes = bytes.len(), "Body received, parsing");

    let dataset = parse_dataset(&bytes)?;
    info!(count = dataset.len(), "Fetched exercises");
    Ok(dataset)
}

/// Loads a dataset from an `http(s)` URL or, for anything else, a local file.
pub async fn load_source<C: HttpClient>(client: &C, source: &str) -> Result<Dataset> {
    if is_remote(source) {
        fetch_dataset(client, source).await
    } else {
        let path = Path::new(source);
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        let dataset = parse_dataset(&bytes)?;
        info!(source, count = dataset.len(), "Loaded exercises from file");
        Ok(dataset)
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
