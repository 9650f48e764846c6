//! # Cookie token store: browser-side session persistence
//!
//! [`CookieTokenStore`] is the [`TokenStore`] used on the **web platform**. It keeps
//! the bearer token in a single cookie named [`TOKEN_KEY`], scoped to the whole
//! site (`path=/`) with no client-managed expiry, so the session lives as long
//! as the browser keeps the cookie.
//!
//! ## Error handling
//!
//! Like every browser-storage wrapper in this workspace, the methods swallow
//! JavaScript errors: a missing `document` or a blocked cookie jar reads as "no
//! session" and writes become no-ops. The operator simply lands on the login
//! page again.

use js_sys::{decode_uri_component, encode_uri_component};
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use crate::session::{parse_cookie, SessionToken, TokenStore, TOKEN_KEY};

/// `document.cookie`-backed TokenStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct CookieTokenStore;

impl CookieTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn document() -> Option<HtmlDocument> {
        web_sys::window()?
            .document()?
            .dyn_into::<HtmlDocument>()
            .ok()
    }

    fn write(cookie: &str) {
        let Some(doc) = Self::document() else {
            return;
        };
        let _ = doc.set_cookie(cookie);
    }
}

impl TokenStore for CookieTokenStore {
    fn get(&self) -> Option<SessionToken> {
        let cookies = Self::document()?.cookie().ok()?;
        let raw = parse_cookie(&cookies, TOKEN_KEY)?;
        let decoded: String = decode_uri_component(raw).ok()?.into();
        SessionToken::new(decoded)
    }

    fn set(&self, token: &SessionToken) {
        let value: String = encode_uri_component(token.as_str()).into();
        Self::write(&format!("{TOKEN_KEY}={value}; path=/; SameSite=Lax"));
    }

    fn clear(&self) {
        Self::write(&format!(
            "{TOKEN_KEY}=; path=/; SameSite=Lax; expires=Thu, 01 Jan 1970 00:00:00 GMT"
        ));
    }
}
