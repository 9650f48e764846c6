//! # New-user drafts and their validation
//!
//! A [`NewUserDraft`] is the raw, unvalidated content of the user form. Calling
//! [`NewUserDraft::validate`] applies the submission rules and yields a typed
//! [`NewUser`] ready for the `register` action:
//!
//! 1. Every field is required, except when the role is `admin`.
//! 2. The username must be email-shaped.
//! 3. Enumerated fields must hold one of their known values.
//!
//! Validation never touches the network.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::user::{Position, Role, User};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[^\s@.]{2,}$").expect("email regex is valid")
});

/// Email shape: a local part, `@`, a domain, and a final label of at least
/// two characters.
pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate.trim())
}

/// Local validation failures, displayed verbatim by the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please choose a valid {0}.")]
    InvalidChoice(&'static str),
}

/// Raw form input for a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub position: String,
    pub company: String,
}

/// Fields of a [`NewUserDraft`], used by the form to route input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Username,
    FirstName,
    LastName,
    Role,
    Position,
    Company,
}

impl NewUserDraft {
    /// Draft pre-filled from an existing record.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.trim().to_lowercase(),
            position: user.company_position.trim().to_lowercase(),
            company: user.company.trim().to_lowercase(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Username => &self.username,
            DraftField::FirstName => &self.first_name,
            DraftField::LastName => &self.last_name,
            DraftField::Role => &self.role,
            DraftField::Position => &self.position,
            DraftField::Company => &self.company,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        let slot = match field {
            DraftField::Username => &mut self.username,
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Role => &mut self.role,
            DraftField::Position => &mut self.position,
            DraftField::Company => &mut self.company,
        };
        *slot = value;
    }

    fn is_blank(&self, field: DraftField) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Apply the submission rules.
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        let role = self.role.parse::<Role>().ok();
        let any_blank = [
            DraftField::Username,
            DraftField::FirstName,
            DraftField::LastName,
            DraftField::Role,
            DraftField::Position,
            DraftField::Company,
        ]
        .into_iter()
        .any(|field| self.is_blank(field));
        if any_blank && role != Some(Role::Admin) {
            return Err(ValidationError::MissingFields);
        }

        if !is_valid_email(&self.username) {
            return Err(ValidationError::InvalidEmail);
        }

        let role = role.ok_or(ValidationError::InvalidChoice("role"))?;
        let position = if self.is_blank(DraftField::Position) {
            None
        } else {
            Some(
                self.position
                    .parse::<Position>()
                    .map_err(|_| ValidationError::InvalidChoice("position"))?,
            )
        };
        let company = Some(self.company.trim().to_lowercase()).filter(|c| !c.is_empty());

        Ok(NewUser {
            username: self.username.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role,
            position,
            company,
        })
    }
}

/// A validated account, ready to be registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    /// `None` only for admins created without a position.
    pub position: Option<Position>,
    /// `None` only for admins created without a company.
    pub company: Option<String>,
}
