use thiserror::Error;

pub type Result<T> = std::result::Result<T, CookieJarError>;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Encrypted data too short")]
    DataTooShort,

    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u8),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Random number generation failed: {0}")]
    RngFailed(String),
}

#[derive(Debug, Error)]
pub enum CookieJarError {
    #[error("Cookie limit of {limit} exceeded in cookie session store ({chunks} cookies needed)")]
    SlotLimitExceeded { chunks: usize, limit: usize },

    #[error("Unable to write cookies to response: headers already sent")]
    HeadersAlreadySent,

    #[error("Invalid transport encoding: {0}")]
    InvalidTransport(String),

    #[error("Malformed expiry prefix: {0}")]
    MalformedExpiry(String),

    #[error("Padding error: {0}")]
    Padding(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CookieJarError {
    /// True for errors caused by unreadable cookie contents: bad encoding,
    /// a wrong key, tampering, or a broken expiry prefix.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::InvalidTransport(_)
                | Self::MalformedExpiry(_)
                | Self::Padding(_)
                | Self::Crypto(_)
        )
    }
}
