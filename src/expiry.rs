//! Expiry timestamp carried inside the encrypted payload.
//!
//! Tagged layout: `###<unix seconds>###<session bytes>`. Only a leading
//! delimiter marks a tagged payload, and the split stops after the second
//! delimiter so the session bytes may contain `###` themselves.

use chrono::{DateTime, Utc};

use crate::error::{CookieJarError, Result};
use crate::types::EXPIRY_DELIMITER;

/// Result of removing the expiry prefix from a decrypted payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stripped {
    /// No prefix, or a prefix whose deadline has not passed (or is not enforced).
    Fresh(Vec<u8>),
    /// Enforced deadline has passed; the session must be treated as absent.
    Expired { expired_at: i64 },
}

impl Stripped {
    /// Session bytes, or empty when expired.
    pub fn into_session(self) -> Vec<u8> {
        match self {
            Self::Fresh(data) => data,
            Self::Expired { .. } => Vec::new(),
        }
    }
}

/// Prefix `data` with the expiry deadline.
pub fn tag_expiry(data: &[u8], expires_at: DateTime<Utc>) -> Vec<u8> {
    let stamp = expires_at.timestamp().to_string();
    let mut tagged = Vec::with_capacity(2 * EXPIRY_DELIMITER.len() + stamp.len() + data.len());
    tagged.extend_from_slice(EXPIRY_DELIMITER);
    tagged.extend_from_slice(stamp.as_bytes());
    tagged.extend_from_slice(EXPIRY_DELIMITER);
    tagged.extend_from_slice(data);
    tagged
}

/// Strip the expiry prefix if present and apply the deadline when `enforce`.
///
/// A payload that starts with the delimiter but has no parseable timestamp
/// is an error.
pub fn strip_expiry(payload: Vec<u8>, now: DateTime<Utc>, enforce: bool) -> Result<Stripped> {
    if !payload.starts_with(EXPIRY_DELIMITER) {
        return Ok(Stripped::Fresh(payload));
    }
    let rest = &payload[EXPIRY_DELIMITER.len()..];

    let end = find(rest, EXPIRY_DELIMITER).ok_or_else(|| {
        CookieJarError::MalformedExpiry("missing closing delimiter".into())
    })?;
    let stamp = std::str::from_utf8(&rest[..end])
        .map_err(|_| CookieJarError::MalformedExpiry("timestamp is not UTF-8".into()))?;
    let expires_at: i64 = stamp
        .parse()
        .map_err(|e| CookieJarError::MalformedExpiry(format!("timestamp {:?}: {}", stamp, e)))?;

    if enforce && now.timestamp() > expires_at {
        return Ok(Stripped::Expired { expired_at: expires_at });
    }

    Ok(Stripped::Fresh(rest[end + EXPIRY_DELIMITER.len()..].to_vec()))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn tag_layout() {
        assert_eq!(tag_expiry(b"uid=42", at(1800)), b"###1800###uid=42".to_vec());
    }

    #[test]
    fn untagged_passes_through() {
        let stripped = strip_expiry(b"uid=42".to_vec(), at(0), true).unwrap();
        assert_eq!(stripped, Stripped::Fresh(b"uid=42".to_vec()));
    }

    #[test]
    fn delimiter_not_at_start_is_data() {
        let stripped = strip_expiry(b"a###1###b".to_vec(), at(0), true).unwrap();
        assert_eq!(stripped, Stripped::Fresh(b"a###1###b".to_vec()));
    }

    #[test]
    fn fresh_until_deadline_inclusive() {
        let tagged = tag_expiry(b"data", at(100));
        let stripped = strip_expiry(tagged.clone(), at(100), true).unwrap();
        assert_eq!(stripped, Stripped::Fresh(b"data".to_vec()));
        let stripped = strip_expiry(tagged, at(101), true).unwrap();
        assert_eq!(stripped, Stripped::Expired { expired_at: 100 });
    }

    #[test]
    fn expiry_ignored_when_not_enforced() {
        let tagged = tag_expiry(b"data", at(100));
        let stripped = strip_expiry(tagged, at(10_000), false).unwrap();
        assert_eq!(stripped.into_session(), b"data");
    }

    #[test]
    fn remainder_keeps_delimiters() {
        let tagged = tag_expiry(b"x###y###z", at(100));
        let stripped = strip_expiry(tagged, at(0), true).unwrap();
        assert_eq!(stripped.into_session(), b"x###y###z");
    }

    #[test]
    fn expired_yields_empty_session() {
        let stripped = Stripped::Expired { expired_at: 5 };
        assert!(stripped.into_session().is_empty());
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let err = strip_expiry(b"###soon###data".to_vec(), at(0), true).unwrap_err();
        assert!(matches!(err, CookieJarError::MalformedExpiry(_)));
    }

    #[test]
    fn rejects_missing_closing_delimiter() {
        let err = strip_expiry(b"###1800".to_vec(), at(0), false).unwrap_err();
        assert!(err.to_string().contains("closing delimiter"));
    }
}
