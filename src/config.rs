//! Codec configuration.
//!
//! One immutable value built from defaults plus explicit overrides, either
//! through the `with_*` builders or by deserializing JSON.

use std::fmt;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CookieJarError, Result};
use crate::types::{DEFAULT_MAX_SLOTS, DEFAULT_SESSION_TTL_MINUTES, DEFAULT_SLOT_PREFIX};

/// Secret the encryption key is derived from. Wiped on drop, never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Deserialize)]
#[serde(from = "String")]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for KeyMaterial {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for KeyMaterial {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyMaterial(<redacted>)")
    }
}

fn default_slot_prefix() -> String {
    DEFAULT_SLOT_PREFIX.to_string()
}

fn default_max_slots() -> usize {
    DEFAULT_MAX_SLOTS
}

fn default_session_ttl_minutes() -> u64 {
    DEFAULT_SESSION_TTL_MINUTES
}

/// Settings for a [`CookieCodec`](crate::CookieCodec).
///
/// ```json
/// {
///   "slot_prefix": "s_",
///   "encryption_key": "change-me",
///   "max_slots": 4,
///   "session_ttl_minutes": 60,
///   "enforce_expiry": true
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CookieJarConfig {
    #[serde(default = "default_slot_prefix")]
    slot_prefix: String,
    encryption_key: KeyMaterial,
    #[serde(default = "default_max_slots")]
    max_slots: usize,
    #[serde(default = "default_session_ttl_minutes")]
    session_ttl_minutes: u64,
    #[serde(default)]
    enforce_expiry: bool,
}

impl CookieJarConfig {
    /// Defaults for everything except the key.
    pub fn new(encryption_key: impl Into<KeyMaterial>) -> Self {
        Self {
            slot_prefix: default_slot_prefix(),
            encryption_key: encryption_key.into(),
            max_slots: DEFAULT_MAX_SLOTS,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            enforce_expiry: false,
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_slot_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.slot_prefix = prefix.into();
        self
    }

    pub fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = max_slots;
        self
    }

    pub fn with_session_ttl_minutes(mut self, minutes: u64) -> Self {
        self.session_ttl_minutes = minutes;
        self
    }

    pub fn with_enforce_expiry(mut self, enforce: bool) -> Self {
        self.enforce_expiry = enforce;
        self
    }

    pub fn slot_prefix(&self) -> &str {
        &self.slot_prefix
    }

    pub fn encryption_key(&self) -> &KeyMaterial {
        &self.encryption_key
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn session_ttl_minutes(&self) -> u64 {
        self.session_ttl_minutes
    }

    pub fn enforce_expiry(&self) -> bool {
        self.enforce_expiry
    }

    /// Check the invariants the codec relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_slots == 0 {
            return Err(CookieJarError::InvalidConfig(
                "max_slots must be at least 1".into(),
            ));
        }
        if self.encryption_key.is_empty() {
            return Err(CookieJarError::InvalidConfig(
                "encryption_key must not be empty".into(),
            ));
        }
        if self.slot_prefix.is_empty() {
            return Err(CookieJarError::InvalidConfig(
                "slot_prefix must not be empty".into(),
            ));
        }
        if let Some(c) = self.slot_prefix.chars().find(|c| !is_cookie_name_char(*c)) {
            return Err(CookieJarError::InvalidConfig(format!(
                "slot_prefix contains {:?}, which is not allowed in a cookie name",
                c
            )));
        }
        // Chrono cannot represent timestamps this far out.
        if self.session_ttl_minutes > i64::MAX as u64 / 60_000 {
            return Err(CookieJarError::InvalidConfig(format!(
                "session_ttl_minutes {} is out of range",
                self.session_ttl_minutes
            )));
        }
        Ok(())
    }
}

/// RFC 6265 `token` characters.
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CookieJarConfig::new("secret");
        assert_eq!(config.slot_prefix(), "session_store_");
        assert_eq!(config.max_slots(), 1);
        assert_eq!(config.session_ttl_minutes(), 30);
        assert!(!config.enforce_expiry());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = CookieJarConfig::new("secret")
            .with_slot_prefix("s_")
            .with_max_slots(4)
            .with_session_ttl_minutes(0)
            .with_enforce_expiry(true);
        assert_eq!(config.slot_prefix(), "s_");
        assert_eq!(config.max_slots(), 4);
        assert_eq!(config.session_ttl_minutes(), 0);
        assert!(config.enforce_expiry());
    }

    #[test]
    fn json_fills_defaults() {
        let config = CookieJarConfig::from_json(r#"{"encryption_key":"k"}"#).unwrap();
        assert_eq!(config.slot_prefix(), "session_store_");
        assert_eq!(config.max_slots(), 1);
        assert_eq!(config.encryption_key().as_bytes(), b"k");
    }

    #[test]
    fn json_overrides() {
        let config = CookieJarConfig::from_json(
            r#"{"slot_prefix":"s_","encryption_key":"k","max_slots":2,"session_ttl_minutes":5,"enforce_expiry":true}"#,
        )
        .unwrap();
        assert_eq!(config.slot_prefix(), "s_");
        assert_eq!(config.max_slots(), 2);
        assert_eq!(config.session_ttl_minutes(), 5);
        assert!(config.enforce_expiry());
    }

    #[test]
    fn json_requires_key() {
        let err = CookieJarConfig::from_json(r#"{"max_slots":2}"#).unwrap_err();
        assert!(matches!(err, CookieJarError::Json(_)));
    }

    #[test]
    fn rejects_zero_slots() {
        let err = CookieJarConfig::new("k")
            .with_max_slots(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_slots"));
    }

    #[test]
    fn rejects_empty_key() {
        assert!(CookieJarConfig::new("").validate().is_err());
    }

    #[test]
    fn rejects_prefix_with_separator() {
        assert!(CookieJarConfig::new("k")
            .with_slot_prefix("bad;name")
            .validate()
            .is_err());
        assert!(CookieJarConfig::new("k")
            .with_slot_prefix("has space")
            .validate()
            .is_err());
        assert!(CookieJarConfig::new("k").with_slot_prefix("").validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let config = CookieJarConfig::new("hunter2");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("redacted"));
    }
}
