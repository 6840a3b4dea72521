/// Envelope format version written in front of every encrypted session.
///
/// Version 1: AES-256-GCM, random nonce, key identifier bound as AAD
/// Format: [version=1:1B][nonce:12B][ciphertext+tag]
pub const ENVELOPE_VERSION: u8 = 1;

/// Envelope versions accepted on read.
pub const SUPPORTED_VERSIONS: &[u8] = &[1];

/// AES-GCM nonce length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Plaintext is padded to a multiple of this many bytes before encryption.
pub const PADDING_BLOCK: usize = 32;

/// Marks the start and end of the expiry timestamp inside the plaintext.
pub const EXPIRY_DELIMITER: &[u8] = b"###";

/// Characters of transport string stored per cookie slot.
///
/// Stays under the common 4096-byte per-cookie limit once the name and
/// attributes are added.
pub const CHUNK_WIDTH: usize = 4000;

/// Default cookie name prefix; slot `i` is named `{prefix}{i}`.
pub const DEFAULT_SLOT_PREFIX: &str = "session_store_";

/// Default number of cookies a session may span.
pub const DEFAULT_MAX_SLOTS: usize = 1;

/// Default session lifetime in minutes.
pub const DEFAULT_SESSION_TTL_MINUTES: u64 = 30;
