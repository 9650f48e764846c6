//! # Wire protocol of the multiplexed endpoint
//!
//! Every call is a `POST` of a JSON object whose `action` field selects the
//! server-side behaviour:
//!
//! | Action | Payload | Success body |
//! |--------|---------|--------------|
//! | `admin` | `username`, `password` | `{ "token": "..." }` |
//! | `get-users` | (none) | `{ "users": [User, ...] }` |
//! | `register` | `username`, `firstName`, `lastName`, `role`, `position`, `company`, `password` | any truthy JSON |
//! | `delete-user` | `username` | any truthy JSON |
//!
//! Decoding is split from transport so that the rules below are testable
//! without a network:
//!
//! - a non-2xx status is an error whose message is the body's `message` field,
//!   or a per-operation fallback;
//! - 401/403 on a protected action becomes [`ApiError::Unauthorized`];
//! - a 2xx body that lacks the expected payload is an error too.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use store::SessionToken;
use tracing::warn;

use crate::error::ApiError;
use crate::models::{NewUser, Role, User};

pub const NO_TOKEN_MESSAGE: &str = "Login successful, but no token received.";
pub const NO_USERS_MESSAGE: &str = "No users data received";
pub const MALFORMED_USERS_MESSAGE: &str = "Received malformed user data";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

/// Stand-in the server expects for a skipped position or company.
const BLANK_FIELD: &str = " ";

/// The four operations of the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    ListUsers,
    CreateUser,
    DeleteUser,
}

impl Operation {
    /// Value of the `action` discriminator.
    pub fn action(self) -> &'static str {
        match self {
            Operation::Login => "admin",
            Operation::ListUsers => "get-users",
            Operation::CreateUser => "register",
            Operation::DeleteUser => "delete-user",
        }
    }

    /// Message used when neither the server nor the transport explains a failure.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Operation::Login => "Login failed. Please check your credentials.",
            Operation::ListUsers => "Failed to fetch users",
            Operation::CreateUser => "An unexpected error occurred while adding the user.",
            Operation::DeleteUser => "An unexpected error occurred while deleting the user.",
        }
    }

    fn empty_ack_message(self) -> &'static str {
        match self {
            Operation::CreateUser => "Failed to add user: No specific error message from API.",
            Operation::DeleteUser => "Failed to delete user: No specific error message from API.",
            other => other.fallback_message(),
        }
    }

    /// Wrap `message` in the error category of this operation.
    pub fn failure(self, message: impl Into<String>) -> ApiError {
        let message = message.into();
        match self {
            Operation::Login => ApiError::Auth(message),
            Operation::ListUsers => ApiError::Fetch(message),
            Operation::CreateUser | Operation::DeleteUser => ApiError::Submission(message),
        }
    }

    fn requires_session(self) -> bool {
        self != Operation::Login
    }
}

/// Request body, tagged by `action`.
#[derive(Serialize)]
#[serde(tag = "action")]
pub enum Request<'a> {
    #[serde(rename = "admin")]
    Login {
        username: &'a str,
        password: &'a str,
    },
    #[serde(rename = "get-users")]
    GetUsers,
    #[serde(rename = "register", rename_all = "camelCase")]
    Register {
        username: &'a str,
        first_name: &'a str,
        last_name: &'a str,
        role: Role,
        position: &'a str,
        company: &'a str,
        password: &'a str,
    },
    #[serde(rename = "delete-user")]
    DeleteUser { username: &'a str },
}

impl<'a> Request<'a> {
    pub fn register(user: &'a NewUser, password: &'a str) -> Self {
        Request::Register {
            username: &user.username,
            first_name: &user.first_name,
            last_name: &user.last_name,
            role: user.role,
            position: user.position.map(|p| p.as_str()).unwrap_or(BLANK_FIELD),
            company: user.company.as_deref().unwrap_or(BLANK_FIELD),
            password,
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Request::Login { .. } => Operation::Login,
            Request::GetUsers => Operation::ListUsers,
            Request::Register { .. } => Operation::CreateUser,
            Request::DeleteUser { .. } => Operation::DeleteUser,
        }
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// The `message` field of a JSON body, if present and non-blank.
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Turn a non-2xx status into the matching error.
pub fn check_status(op: Operation, status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    let message = server_message(body);
    if op.requires_session() && (status == 401 || status == 403) {
        return Err(ApiError::Unauthorized(
            message.unwrap_or_else(|| SESSION_EXPIRED_MESSAGE.to_string()),
        ));
    }
    Err(op.failure(message.unwrap_or_else(|| op.fallback_message().to_string())))
}

/// Decode the response to `admin`.
pub fn decode_login(status: u16, body: &str) -> Result<SessionToken, ApiError> {
    check_status(Operation::Login, status, body)?;
    serde_json::from_str::<LoginResponse>(body)
        .ok()
        .and_then(|r| r.token)
        .and_then(SessionToken::new)
        .ok_or_else(|| ApiError::Auth(NO_TOKEN_MESSAGE.to_string()))
}

/// Decode the response to `get-users`.
pub fn decode_users(status: u16, body: &str) -> Result<Vec<User>, ApiError> {
    check_status(Operation::ListUsers, status, body)?;
    let value: Value = serde_json::from_str(body)
        .map_err(|_| ApiError::Fetch(NO_USERS_MESSAGE.to_string()))?;
    let users = match value.get("users") {
        Some(users) if !users.is_null() => users.clone(),
        _ => return Err(ApiError::Fetch(NO_USERS_MESSAGE.to_string())),
    };
    serde_json::from_value(users).map_err(|e| {
        warn!("get-users returned malformed records: {e}");
        ApiError::Fetch(MALFORMED_USERS_MESSAGE.to_string())
    })
}

/// Decode the response to `register` or `delete-user`, which only needs to
/// be truthy.
pub fn decode_ack(op: Operation, status: u16, body: &str) -> Result<(), ApiError> {
    check_status(op, status, body)?;
    if is_truthy(body) {
        Ok(())
    } else {
        Err(op.failure(op.empty_ack_message()))
    }
}

/// JSON truthiness of a body; non-JSON text counts when non-empty.
fn is_truthy(body: &str) -> bool {
    let body = body.trim();
    if body.is_empty() {
        return false;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => false,
        Ok(Value::Bool(b)) => b,
        Ok(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Ok(Value::String(s)) => !s.is_empty(),
        Ok(_) => true,
        Err(_) => true,
    }
}
