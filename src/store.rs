//! Session save-handler surface over [`CookieCodec`].
//!
//! The request cookies, the response and the request's transport facts are
//! passed in on every call; nothing is looked up from ambient state.

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::codec::{CookieCodec, EncodedSlot};
use crate::config::CookieJarConfig;
use crate::cookie::{SetCookie, SlotSink, TransportContext};
use crate::error::{CookieJarError, Result};
use crate::slots::SlotSource;

/// Cookie-backed session storage for a host framework.
pub struct CookieJarStore<C: Clock = SystemClock> {
    codec: CookieCodec<C>,
}

impl CookieJarStore<SystemClock> {
    pub fn new(config: CookieJarConfig) -> Result<Self> {
        Ok(Self {
            codec: CookieCodec::new(config)?,
        })
    }
}

impl<C: Clock> CookieJarStore<C> {
    pub fn from_codec(codec: CookieCodec<C>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &CookieCodec<C> {
        &self.codec
    }

    /// Load the session carried by the request.
    ///
    /// Never fails: unreadable cookies are logged and read as an empty
    /// session, the same as an expired one.
    pub fn open<S: SlotSource + ?Sized>(&self, request: &S) -> Vec<u8> {
        match self.codec.decode(request) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "discarding unreadable cookie session");
                Vec::new()
            }
        }
    }

    /// Store `data` in the response.
    ///
    /// Slots the request carried beyond the new slot count are cleared so a
    /// shrinking session cannot leave a stale tail behind. Returns the number
    /// of slots now holding data.
    pub fn write<S, K>(
        &self,
        data: &[u8],
        request: &S,
        ctx: &TransportContext,
        response: &mut K,
    ) -> Result<usize>
    where
        S: SlotSource + ?Sized,
        K: SlotSink + ?Sized,
    {
        let slots = self.codec.encode(data)?;
        if !response.can_send_headers() {
            return Err(CookieJarError::HeadersAlreadySent);
        }

        let written = slots.len();
        let stale: Vec<EncodedSlot> = self
            .codec
            .clear(request)
            .into_iter()
            .filter(|slot| slot.name.index() >= written)
            .collect();

        debug!(slots = written, stale = stale.len(), "writing cookie session");
        emit(slots.into_iter().chain(stale), ctx, response);
        Ok(written)
    }

    /// Expire every session cookie the request carried. Returns how many
    /// were cleared.
    pub fn destroy<S, K>(
        &self,
        request: &S,
        ctx: &TransportContext,
        response: &mut K,
    ) -> Result<usize>
    where
        S: SlotSource + ?Sized,
        K: SlotSink + ?Sized,
    {
        if !response.can_send_headers() {
            return Err(CookieJarError::HeadersAlreadySent);
        }

        let cleared = self.codec.clear(request);
        let count = cleared.len();
        debug!(slots = count, "destroying cookie session");
        emit(cleared, ctx, response);
        Ok(count)
    }
}

fn emit<K: SlotSink + ?Sized>(
    slots: impl IntoIterator<Item = EncodedSlot>,
    ctx: &TransportContext,
    response: &mut K,
) {
    for slot in slots {
        response.set_cookie(SetCookie::session(
            slot.name.to_string(),
            slot.value,
            slot.expires,
            ctx,
        ));
    }
}
