//! # Session token persistence
//!
//! The console authenticates every protected request with an opaque bearer
//! token obtained at login. [`TokenStore`] is the narrow seam between the UI and
//! wherever that token lives:
//!
//! | Implementation | Platform | Backing |
//! |----------------|----------|---------|
//! | [`crate::MemoryTokenStore`] | native, tests | process memory |
//! | `CookieTokenStore` | wasm32 + `web` feature | the `token` browser cookie |
//!
//! No expiry is tracked client-side. A stale token is only discovered when the
//! API rejects a request, at which point the caller clears the store.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the cookie (or storage key) holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Opaque bearer credential proving an authenticated operator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token. Returns `None` for blank input.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Get/set/clear access to the persisted session token.
pub trait TokenStore {
    fn get(&self) -> Option<SessionToken>;
    fn set(&self, token: &SessionToken);
    fn clear(&self);
}

/// Extract the value of `key` from a `document.cookie` style string
/// (`"a=1; token=abc; b=2"`). Empty values count as absent.
pub fn parse_cookie<'a>(cookies: &'a str, key: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == key)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_rejected() {
        assert!(SessionToken::new("").is_none());
        assert!(SessionToken::new("   ").is_none());
        assert_eq!(SessionToken::new("T").unwrap().as_str(), "T");
    }

    #[test]
    fn debug_output_hides_the_token() {
        let token = SessionToken::new("secret-value").unwrap();
        let shown = format!("{token:?}");
        assert!(!shown.contains("secret-value"));
    }

    #[test]
    fn parse_cookie_finds_key_among_others() {
        let cookies = "theme=dark; token=abc.def.ghi; lang=en";
        assert_eq!(parse_cookie(cookies, "token"), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(cookies, "lang"), Some("en"));
        assert_eq!(parse_cookie(cookies, "missing"), None);
    }

    #[test]
    fn parse_cookie_does_not_match_key_suffixes() {
        assert_eq!(parse_cookie("csrftoken=zzz", "token"), None);
        assert_eq!(parse_cookie("csrftoken=zzz; token=T", "token"), Some("T"));
    }

    #[test]
    fn parse_cookie_treats_empty_value_as_absent() {
        assert_eq!(parse_cookie("token=", "token"), None);
        assert_eq!(parse_cookie("", "token"), None);
    }

    #[test]
    fn parse_cookie_keeps_padding_in_value() {
        // base64 padding contains '='; only the first one separates name and value
        assert_eq!(parse_cookie("token=YWJj==", "token"), Some("YWJj=="));
    }
}
