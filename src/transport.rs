//! Cookie-safe text encoding for encrypted envelopes.
//!
//! Standard padded base64, then percent-escaping of everything except
//! `[A-Za-z0-9-_.]`. `+`, `/` and `=` become `%2B`, `%2F` and `%3D`.

use base64ct::{Base64, Encoding};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{CookieJarError, Result};

const ESCAPE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Encode bytes into a transport string. Output is always ASCII.
pub fn encode_transport(data: &[u8]) -> String {
    let b64 = Base64::encode_string(data);
    utf8_percent_encode(&b64, ESCAPE).to_string()
}

/// Reverse [`encode_transport`].
pub fn decode_transport(s: &str) -> Result<Vec<u8>> {
    let b64 = percent_decode_str(s)
        .decode_utf8()
        .map_err(|e| CookieJarError::InvalidTransport(format!("URL escape: {}", e)))?;
    Base64::decode_vec(&b64)
        .map_err(|e| CookieJarError::InvalidTransport(format!("base64: {}", e)))
}
