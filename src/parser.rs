//! JSON decoder for the exercise dataset.

use crate::error::Result;
use crate::model::Dataset;

/// Decodes a JSON array of exercise objects from raw bytes.
///
/// # Errors
///
/// Returns [`crate::Error::Decode`] if the bytes are not a JSON array whose
/// elements are all objects.
pub fn parse_dataset(bytes: &[u8]) -> Result<Dataset> {
    Ok(serde_json::from_slice(bytes)?)
}
