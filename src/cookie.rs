//! `Set-Cookie` directives and the request/response boundary.
//!
//! Header syntax (attribute rendering, the cookie date, `Cookie:` parsing)
//! is left to the `cookie` crate; this module only decides what goes in.

use std::collections::HashMap;
use std::fmt;

use ::cookie::Cookie;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use crate::slots::SlotSource;

// ============================================================================
// SetCookie
// ============================================================================

/// One cookie to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires: DateTime<Utc>,
    pub path: String,
    pub domain: Option<String>,
    pub http_only: bool,
    pub secure: bool,
}

impl SetCookie {
    /// A session cookie scoped to `/` on the request's host, always HttpOnly.
    pub fn session(
        name: impl Into<String>,
        value: impl Into<String>,
        expires: DateTime<Utc>,
        ctx: &TransportContext,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            expires,
            path: "/".to_string(),
            domain: ctx.domain().map(str::to_string),
            http_only: true,
            secure: ctx.secure,
        }
    }

    /// The directive as a `cookie::Cookie`, ready for a framework's jar.
    ///
    /// An expiry outside what `time` can represent leaves the attribute off,
    /// making it a browser-session cookie.
    pub fn to_cookie(&self) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure);
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        if let Ok(expires) = OffsetDateTime::from_unix_timestamp(self.expires.timestamp()) {
            builder = builder.expires(expires);
        }
        builder.build()
    }
}

/// Renders the header value (without the `Set-Cookie:` name).
impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_cookie(), f)
    }
}

// ============================================================================
// SlotSink — host-provided response
// ============================================================================

/// Write access to the outgoing response's cookies.
pub trait SlotSink {
    /// False once the response headers have been flushed.
    fn can_send_headers(&self) -> bool;

    fn set_cookie(&mut self, cookie: SetCookie);
}

/// Collects directives in memory. Headers are always sendable.
impl SlotSink for Vec<SetCookie> {
    fn can_send_headers(&self) -> bool {
        true
    }

    fn set_cookie(&mut self, cookie: SetCookie) {
        self.push(cookie);
    }
}

/// Per-request facts that shape the emitted cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportContext {
    /// `Host` header (or server name). Any `:port` suffix is ignored.
    pub host: Option<String>,
    /// Request arrived over TLS.
    pub secure: bool,
}

impl TransportContext {
    pub fn new(host: impl Into<String>, secure: bool) -> Self {
        Self {
            host: Some(host.into()),
            secure,
        }
    }

    /// Cookie domain derived from the host.
    pub fn domain(&self) -> Option<&str> {
        let host = self.host.as_deref()?.trim();
        let domain = match host.strip_prefix('[') {
            // [::1]:8080
            Some(v6) => v6.split(']').next().unwrap_or(v6),
            None => host.split(':').next().unwrap_or(host),
        };
        (!domain.is_empty()).then_some(domain)
    }
}

// ============================================================================
// RequestCookies
// ============================================================================

/// Cookies parsed from a `Cookie:` request header.
#[derive(Debug, Clone, Default)]
pub struct RequestCookies {
    cookies: HashMap<String, String>,
}

impl RequestCookies {
    /// Parse `name=value; name2=value2`. Malformed pairs are skipped; the
    /// first occurrence of a repeated name wins. Values are kept raw, minus
    /// any surrounding double quotes.
    pub fn parse(header: &str) -> Self {
        let mut cookies = HashMap::new();
        for cookie in Cookie::split_parse(header).flatten() {
            cookies
                .entry(cookie.name().to_string())
                .or_insert_with(|| cookie.value().trim_matches('"').to_string());
        }
        Self { cookies }
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl SlotSource for RequestCookies {
    fn slot(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }
}
