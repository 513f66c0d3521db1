//! XOR-distance normalization
//!
//! Crawl logs carry the XOR distance between a peer and the target key as a
//! hex string of up to 256 bits. Rendering wants a plain float, so the value
//! is mapped to `value / 2^256`. This is the only per-row hard failure in the
//! pipeline: a distance that does not parse poisons its row, nothing else.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DistanceError {
    #[error("malformed distance: not a hexadecimal string: {0:?}")]
    MalformedDistance(String),

    #[error("distance exceeds 256 bits: {0} hex digits")]
    TooWide(usize),
}

/// Number of hex digits in a full 256-bit distance.
const MAX_HEX_DIGITS: usize = 64;

/// Normalize a hex XOR-distance string into `[0, 1]`.
///
/// `normalize("0")` is `0.0`; the all-`f` 256-bit distance maps to a value
/// within f64 rounding of `1.0`. Pure function, called once per row at
/// ingestion time.
pub fn normalize(distance_hex: &str) -> Result<f64, DistanceError> {
    if distance_hex.is_empty() {
        return Err(DistanceError::MalformedDistance(String::new()));
    }
    if distance_hex.len() > MAX_HEX_DIGITS {
        return Err(DistanceError::TooWide(distance_hex.len()));
    }

    // hex::decode wants an even number of full bytes; left-pad to 256 bits.
    let mut padded = String::with_capacity(MAX_HEX_DIGITS);
    for _ in distance_hex.len()..MAX_HEX_DIGITS {
        padded.push('0');
    }
    padded.push_str(distance_hex);

    let bytes = hex::decode(&padded)
        .map_err(|_| DistanceError::MalformedDistance(distance_hex.to_string()))?;

    let value = bytes.iter().fold(0.0_f64, |acc, b| acc * 256.0 + f64::from(*b));
    Ok(value / 2.0_f64.powi(256))
}
