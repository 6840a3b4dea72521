//! Session storage held entirely in client cookies: encrypted, chunked across
//! a bounded set of cookie slots, with the expiry carried inside the ciphertext.

pub mod cipher;
pub mod clock;
pub mod codec;
pub mod config;
pub mod cookie;
pub mod error;
pub mod expiry;
pub mod padding;
pub mod slots;
pub mod store;
pub mod transport;
pub mod types;

pub use cipher::{derive_key, derive_key_id, SessionCipher};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{CookieCodec, EncodedSlot};
pub use config::{CookieJarConfig, KeyMaterial};
pub use self::cookie::{RequestCookies, SetCookie, SlotSink, TransportContext};
pub use error::{CookieJarError, CryptoError, Result};
pub use expiry::{strip_expiry, tag_expiry, Stripped};
pub use padding::{pad_to_block, unpad};
pub use slots::{contiguous_slots, split_chunks, SlotName, SlotSource};
pub use store::CookieJarStore;
pub use transport::{decode_transport, encode_transport};
pub use types::{
    CHUNK_WIDTH, DEFAULT_MAX_SLOTS, DEFAULT_SESSION_TTL_MINUTES, DEFAULT_SLOT_PREFIX,
    ENVELOPE_VERSION, EXPIRY_DELIMITER,
};
