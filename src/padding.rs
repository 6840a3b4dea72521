//! Block padding with an explicit length prefix.
//!
//! Format: `[4 bytes: u32 LE length][data][zero padding]`
//! The total is rounded up to a multiple of the block size, so the cookie
//! only reveals the session size to block granularity.

use crate::error::{CookieJarError, Result};

/// Length prefix size for padding (4 bytes, u32 LE).
const LENGTH_PREFIX_SIZE: usize = 4;

/// Pad data to a whole number of `block` sized blocks.
///
/// Returns `Err` if the data does not fit the u32 length prefix.
pub fn pad_to_block(data: &[u8], block: usize) -> Result<Vec<u8>> {
    let len = u32::try_from(data.len()).map_err(|_| {
        CookieJarError::Padding(format!("data too large: {} bytes", data.len()))
    })?;

    let total_needed = LENGTH_PREFIX_SIZE + data.len();
    let block = block.max(1);
    let padded_size = total_needed.div_ceil(block) * block;

    let mut padded = vec![0u8; padded_size];
    padded[..LENGTH_PREFIX_SIZE].copy_from_slice(&len.to_le_bytes());
    padded[LENGTH_PREFIX_SIZE..total_needed].copy_from_slice(data);
    // Remaining bytes are already zero
    Ok(padded)
}

/// Remove padding by reading the 4-byte length prefix.
pub fn unpad(data: &[u8]) -> Result<Vec<u8>> {
    let Some((prefix, body)) = data.split_first_chunk::<LENGTH_PREFIX_SIZE>() else {
        return Err(CookieJarError::Padding(format!(
            "padded data too short: {} bytes",
            data.len()
        )));
    };

    let original_length = u32::from_le_bytes(*prefix) as usize;
    if original_length > body.len() {
        return Err(CookieJarError::Padding(format!(
            "invalid padding: claimed length {} exceeds available data {}",
            original_length,
            body.len()
        )));
    }

    Ok(body[..original_length].to_vec())
}
