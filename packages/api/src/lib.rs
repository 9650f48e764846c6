//! # API crate: client for the ManDown authentication service
//!
//! The console talks to a single remote endpoint that multiplexes every
//! operation behind an `action` field. This crate owns everything about that
//! conversation: request shapes, response decoding, the error taxonomy, the
//! user models and the local validation applied before a `register` call.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], the `reqwest` implementation of [`UserApi`] |
//! | [`error`] | [`ApiError`]: auth, missing/expired session, fetch and submission failures |
//! | [`models`] | [`User`] records, [`Role`]/[`Position`], new-user drafts and their validation |
//! | [`protocol`] | Action-tagged requests and pure response decoders |
//!
//! ## Operations
//!
//! [`UserApi`] is the seam the UI programs against: `login`, `list_users`,
//! `create_user`, `delete_user`. Every operation except `login` carries the
//! session token as a bearer `Authorization` header.

use std::future::Future;

pub mod client;
pub mod error;
pub mod models;
pub mod protocol;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    DraftField, NewUser, NewUserDraft, Position, Role, User, ValidationError,
};
pub use store::SessionToken;

/// Async access to the authentication service.
pub trait UserApi {
    /// Exchange credentials for a session token.
    fn login(
        &self,
        username: &str,
        password: &str,
    ) -> impl Future<Output = Result<SessionToken, ApiError>>;

    /// Fetch every managed account.
    fn list_users(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<Vec<User>, ApiError>>;

    /// Register a validated account with its initial password.
    fn create_user(
        &self,
        token: &SessionToken,
        user: &NewUser,
        password: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;

    /// Delete the account identified by `username`.
    fn delete_user(
        &self,
        token: &SessionToken,
        username: &str,
    ) -> impl Future<Output = Result<(), ApiError>>;
}
