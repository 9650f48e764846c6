//! Session context and hooks for the UI.
//!
//! The bearer token lives in a [`TokenStore`] (the `token` cookie on the
//! web). [`SessionProvider`] puts a [`SessionHandle`] into context; views read
//! it with [`use_session`]. Only the login flow calls
//! [`SessionHandle::sign_in`], and only logout or a rejected token calls
//! [`SessionHandle::sign_out`].

use std::rc::Rc;

use dioxus::prelude::*;
use store::{SessionToken, TokenStore};
use tracing::info;

use crate::components::{Button, ButtonVariant};
use crate::icons::FaRightFromBracket;
use crate::Icon;

/// Create the platform-appropriate token store.
///
/// - **Web** (WASM + `web` feature): the `token` cookie via [`store::CookieTokenStore`]
/// - **Native**: process memory via [`store::MemoryTokenStore`]
pub fn make_token_store() -> impl TokenStore + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::CookieTokenStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::MemoryTokenStore::new()
    }
}

/// Handle to the operator session, shared through context.
#[derive(Clone, Copy)]
pub struct SessionHandle {
    /// Mirrors the store so that readers re-render on sign-in/out.
    token: Signal<Option<SessionToken>>,
    store: Signal<Rc<dyn TokenStore>>,
}

impl SessionHandle {
    /// The stored token. Subscribes the calling scope to session changes.
    pub fn token(&self) -> Option<SessionToken> {
        let _ = self.token.read();
        self.peek_token()
    }

    /// The stored token, without subscribing.
    pub fn peek_token(&self) -> Option<SessionToken> {
        self.store.peek().get()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&mut self, token: SessionToken) {
        complete_login(&**self.store.peek(), &token);
        self.token.set(Some(token));
    }

    pub fn sign_out(&mut self) {
        end_session(&**self.store.peek());
        self.token.set(None);
    }
}

/// Persist the token issued by a successful login.
pub fn complete_login(store: &dyn TokenStore, token: &SessionToken) {
    store.set(token);
    info!("session started");
}

/// Forget the stored token.
pub fn end_session(store: &dyn TokenStore) {
    store.clear();
    info!("session cleared");
}

/// Get the current session handle.
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Provider component that loads the persisted session.
/// Wrap your app with this component to enable session-gated views.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let store = use_signal(|| Rc::new(make_token_store()) as Rc<dyn TokenStore>);
    let token = use_signal(move || store.peek().get());

    use_context_provider(|| SessionHandle { token, store });

    rsx! {
        {children}
    }
}

/// Button to end the current session.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut session = use_session();

    rsx! {
        Button {
            variant: ButtonVariant::Outline,
            class: "navbar__logout",
            onclick: move |_| {
                session.sign_out();
                on_logout.call(());
            },
            Icon { icon: FaRightFromBracket, width: 14, height: 14 }
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryTokenStore;

    #[test]
    fn login_then_logout_round_trips_the_store() {
        let store = MemoryTokenStore::new();
        let token = SessionToken::new("T").unwrap();

        complete_login(&store, &token);
        assert_eq!(store.get().unwrap().as_str(), "T");

        end_session(&store);
        assert!(store.get().is_none());
    }
}
