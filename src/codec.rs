//! The cookie-jar codec: session bytes to cookie slots and back.
//!
//! Write: `[expiry tag] + data -> pad -> encrypt -> base64 -> URL escape -> chunks`
//! Read:  `contiguous slots -> join -> unescape -> base64 -> decrypt -> unpad -> strip expiry`
//!
//! Two expiries are produced on write. The one embedded in the ciphertext
//! decides whether a read still yields the session; the one attached to each
//! slot only tells the client how long to keep the cookie.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cipher::SessionCipher;
use crate::clock::{Clock, SystemClock};
use crate::config::CookieJarConfig;
use crate::error::{CookieJarError, Result};
use crate::expiry::{strip_expiry, tag_expiry, Stripped};
use crate::padding::{pad_to_block, unpad};
use crate::slots::{contiguous_slots, split_chunks, SlotName, SlotSource};
use crate::transport::{decode_transport, encode_transport};
use crate::types::{CHUNK_WIDTH, EXPIRY_DELIMITER, PADDING_BLOCK};

/// One cookie's worth of output from [`CookieCodec::encode`] or
/// [`CookieCodec::clear`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSlot {
    pub name: SlotName,
    pub value: String,
    /// When the client should drop the cookie.
    pub expires: DateTime<Utc>,
}

/// Encrypts, chunks and reassembles session data held in cookies.
///
/// Holds only the validated configuration, the keyed cipher and the clock,
/// so one instance can serve concurrent requests.
pub struct CookieCodec<C: Clock = SystemClock> {
    config: CookieJarConfig,
    cipher: SessionCipher,
    clock: C,
}

impl CookieCodec<SystemClock> {
    pub fn new(config: CookieJarConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> CookieCodec<C> {
    pub fn with_clock(config: CookieJarConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let cipher = SessionCipher::new(config.encryption_key().as_bytes())?;
        Ok(Self {
            config,
            cipher,
            clock,
        })
    }

    pub fn config(&self) -> &CookieJarConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Reassemble and decrypt the session held in `slots`.
    ///
    /// No slots is an empty session, and so is a session whose enforced
    /// expiry has passed. Undecodable data is an error.
    pub fn decode<S: SlotSource + ?Sized>(&self, slots: &S) -> Result<Vec<u8>> {
        let found = contiguous_slots(slots, self.config.slot_prefix(), self.config.max_slots());
        if found.is_empty() {
            return Ok(Vec::new());
        }

        let transport: String = found.iter().map(|(_, value)| *value).collect();
        if transport.is_empty() {
            return Ok(Vec::new());
        }

        let envelope = decode_transport(&transport)?;
        let padded = self.cipher.decrypt(&envelope)?;
        let payload = unpad(&padded)?;

        let now = self.clock.now();
        let stripped = strip_expiry(payload, now, self.config.enforce_expiry())?;
        if let Stripped::Expired { expired_at } = &stripped {
            debug!(
                expired_at,
                now = now.timestamp(),
                "cookie session expired, treating as empty"
            );
        }

        let data = stripped.into_session();
        debug!(slots = found.len(), bytes = data.len(), "decoded cookie session");
        Ok(data)
    }

    /// Encrypt `data` and split it into slot values.
    ///
    /// Fails with [`CookieJarError::SlotLimitExceeded`] rather than dropping
    /// any part of the ciphertext.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<EncodedSlot>> {
        let now = self.clock.now();
        let expires = self.expires_at(now)?;

        // Leading delimiter bytes would be read back as a tag, so tag those too.
        let payload = if self.config.enforce_expiry() || data.starts_with(EXPIRY_DELIMITER) {
            tag_expiry(data, expires)
        } else {
            data.to_vec()
        };

        let padded = pad_to_block(&payload, PADDING_BLOCK)?;
        let envelope = self.cipher.encrypt(&padded)?;
        let transport = encode_transport(&envelope);

        let chunks = split_chunks(&transport, CHUNK_WIDTH);
        if chunks.len() > self.config.max_slots() {
            return Err(CookieJarError::SlotLimitExceeded {
                chunks: chunks.len(),
                limit: self.config.max_slots(),
            });
        }

        debug!(
            slots = chunks.len(),
            bytes = data.len(),
            transport_len = transport.len(),
            "encoded cookie session"
        );

        let prefix = self.config.slot_prefix();
        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| EncodedSlot {
                name: SlotName::new(prefix, index),
                value: chunk.to_string(),
                expires,
            })
            .collect())
    }

    /// Blank, already-expired replacements for every slot `decode` would read.
    pub fn clear<S: SlotSource + ?Sized>(&self, slots: &S) -> Vec<EncodedSlot> {
        contiguous_slots(slots, self.config.slot_prefix(), self.config.max_slots())
            .into_iter()
            .map(|(name, _)| EncodedSlot {
                name,
                value: String::new(),
                expires: DateTime::UNIX_EPOCH,
            })
            .collect()
    }

    /// `now + session_ttl_minutes`.
    fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let ttl = i64::try_from(self.config.session_ttl_minutes())
            .ok()
            .and_then(Duration::try_minutes)
            .ok_or_else(|| {
                CookieJarError::InvalidConfig("session_ttl_minutes out of range".into())
            })?;
        now.checked_add_signed(ttl)
            .ok_or_else(|| CookieJarError::InvalidConfig("session expiry out of range".into()))
    }
}
