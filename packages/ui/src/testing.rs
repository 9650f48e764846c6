//! In-memory `UserApi` for controller tests.

use std::cell::RefCell;

use api::{ApiError, NewUser, SessionToken, User, UserApi};

use crate::state::StateCell;

#[derive(Default)]
pub struct FakeApi {
    login: RefCell<Option<Result<String, ApiError>>>,
    users: RefCell<Option<Result<Vec<User>, ApiError>>>,
    create: RefCell<Option<ApiError>>,
    delete: RefCell<Option<ApiError>>,
    calls: RefCell<Vec<String>>,
}

impl FakeApi {
    pub fn with_users(users: Vec<User>) -> Self {
        let api = Self::default();
        api.set_users(Ok(users));
        api
    }

    pub fn set_login(&self, outcome: Result<&str, ApiError>) {
        *self.login.borrow_mut() = Some(outcome.map(str::to_string));
    }

    pub fn set_users(&self, outcome: Result<Vec<User>, ApiError>) {
        *self.users.borrow_mut() = Some(outcome);
    }

    pub fn fail_create(&self, err: ApiError) {
        *self.create.borrow_mut() = Some(err);
    }

    pub fn fail_delete(&self, err: ApiError) {
        *self.delete.borrow_mut() = Some(err);
    }

    /// Actions issued so far, as `action` or `action:username`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

pub fn user(username: &str, first: &str, last: &str) -> User {
    User {
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        role: "user".to_string(),
        ..Default::default()
    }
}

pub fn token() -> SessionToken {
    SessionToken::new("T").unwrap()
}

impl UserApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> Result<SessionToken, ApiError> {
        self.record(format!("admin:{username}"));
        match self.login.borrow().clone() {
            Some(Ok(token)) => SessionToken::new(token)
                .ok_or_else(|| ApiError::Auth(api::protocol::NO_TOKEN_MESSAGE.to_string())),
            Some(Err(e)) => Err(e),
            None => Err(ApiError::Auth("Invalid credentials".to_string())),
        }
    }

    async fn list_users(&self, _token: &SessionToken) -> Result<Vec<User>, ApiError> {
        self.record("get-users".to_string());
        self.users
            .borrow()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn create_user(
        &self,
        _token: &SessionToken,
        user: &NewUser,
        _password: &str,
    ) -> Result<(), ApiError> {
        self.record(format!("register:{}", user.username));
        match self.create.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn delete_user(&self, _token: &SessionToken, username: &str) -> Result<(), ApiError> {
        self.record(format!("delete-user:{username}"));
        match self.delete.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Lets a test observe state while an async flow is suspended on the API.
impl<T> StateCell<T> for &RefCell<T> {
    fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}
