//! Data models for the application.

mod draft;
mod user;

pub use draft::{is_valid_email, DraftField, NewUser, NewUserDraft, ValidationError};
pub use user::{title_case, Position, Role, User, PLACEHOLDER};
