//! HTTP transport for the [`UserApi`] trait.

use reqwest::header::ACCEPT;
use reqwest::{Client, IntoUrl, Url};
use store::SessionToken;
use tracing::{debug, error, info};

use crate::error::ApiError;
use crate::models::{NewUser, User};
use crate::protocol::{decode_ack, decode_login, decode_users, Operation, Request};
use crate::UserApi;

/// `reqwest`-backed client for the multiplexed endpoint.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: Url,
}

impl ApiClient {
    pub fn new<U: IntoUrl>(endpoint: U) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into_url()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Send one request and return `(status, body)`. Transport failures are
    /// logged and reported with the operation's fallback message.
    async fn send(
        &self,
        request: &Request<'_>,
        token: Option<&SessionToken>,
    ) -> Result<(u16, String), ApiError> {
        let op = request.operation();
        let mut builder = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(request);
        if let Some(token) = token {
            builder = builder.bearer_auth(token.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            error!(action = op.action(), "request failed: {e}");
            op.failure(op.fallback_message())
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            error!(action = op.action(), status, "failed to read response body: {e}");
            op.failure(op.fallback_message())
        })?;
        debug!(action = op.action(), status, "response received");
        Ok((status, body))
    }
}

/// Clients are interchangeable when they target the same endpoint.
impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint
    }
}

impl UserApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<SessionToken, ApiError> {
        let request = Request::Login { username, password };
        let (status, body) = self.send(&request, None).await?;
        let token = decode_login(status, &body)?;
        info!("operator signed in");
        Ok(token)
    }

    async fn list_users(&self, token: &SessionToken) -> Result<Vec<User>, ApiError> {
        let (status, body) = self.send(&Request::GetUsers, Some(token)).await?;
        let users = decode_users(status, &body)?;
        debug!(count = users.len(), "fetched users");
        Ok(users)
    }

    async fn create_user(
        &self,
        token: &SessionToken,
        user: &NewUser,
        password: &str,
    ) -> Result<(), ApiError> {
        let request = Request::register(user, password);
        let (status, body) = self.send(&request, Some(token)).await?;
        decode_ack(Operation::CreateUser, status, &body)?;
        info!(username = %user.username, "user created");
        Ok(())
    }

    async fn delete_user(&self, token: &SessionToken, username: &str) -> Result<(), ApiError> {
        let request = Request::DeleteUser { username };
        let (status, body) = self.send(&request, Some(token)).await?;
        decode_ack(Operation::DeleteUser, status, &body)?;
        info!(%username, "user deleted");
        Ok(())
    }
}
