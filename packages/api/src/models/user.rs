//! # User records as returned by `get-users`
//!
//! [`User`] mirrors the JSON objects in the `users` array (camelCase field
//! names). Every field except `username` tolerates being absent, because
//! accounts created with the admin carve-out may omit their profile fields.
//!
//! The display helpers on [`User`] implement the table formatting rules:
//! title-cased role/company/position with blank values shown as [`PLACEHOLDER`],
//! and a short `Mon D, YYYY` creation date.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of blank fields.
pub const PLACEHOLDER: &str = "-";

/// A managed account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Email-shaped unique identifier; never edited after creation.
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub company_position: String,
    /// Server-assigned timestamp, kept verbatim.
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// `"{first} {last}"`, or the placeholder when both are blank.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            name.to_string()
        }
    }

    pub fn display_role(&self) -> String {
        title_case_or_placeholder(&self.role)
    }

    pub fn display_company(&self) -> String {
        title_case_or_placeholder(&self.company)
    }

    pub fn display_position(&self) -> String {
        title_case_or_placeholder(&self.company_position)
    }

    /// Creation date as `Jan 5, 2024` (UTC date), or the placeholder when
    /// the timestamp cannot be parsed.
    pub fn display_created_at(&self) -> String {
        parse_timestamp(&self.created_at)
            .map(|date| date.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }
}

/// Accepts RFC 3339, naive ISO date-times, plain dates and epoch milliseconds.
fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.date_naive())
}

/// Lower-case the string, then upper-case the first alphanumeric character
/// of every word: `"COMPANY a"` → `"Company A"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for ch in s.chars() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        if is_word && !in_word {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        in_word = is_word;
    }
    out
}

fn title_case_or_placeholder(s: &str) -> String {
    if s.trim().is_empty() {
        PLACEHOLDER.to_string()
    } else {
        title_case(s.trim())
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(()),
        }
    }
}

/// Position within the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Supervisor,
    Worker,
}

impl Position {
    pub const ALL: [Position; 2] = [Position::Supervisor, Position::Worker];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Supervisor => "supervisor",
            Position::Worker => "worker",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Supervisor => "Supervisor",
            Position::Worker => "Worker",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "supervisor" => Ok(Position::Supervisor),
            "worker" => Ok(Position::Worker),
            _ => Err(()),
        }
    }
}
