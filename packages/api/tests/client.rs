//! HTTP-level tests for `ApiClient` against a local mock server.

use api::{ApiClient, ApiError, NewUserDraft, SessionToken, UserApi};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/development/mandown_authentication";

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(format!("{}{ENDPOINT}", server.uri())).expect("valid endpoint")
}

fn token() -> SessionToken {
    SessionToken::new("T").unwrap()
}

#[tokio::test]
async fn login_posts_admin_action_without_authorization() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_json(
            json!({"action": "admin", "username": "a@b.com", "password": "pw"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "T"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let token = client.login("a@b.com", "pw").await.unwrap();
    assert_eq!(token.as_str(), "T");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn login_rejection_surfaces_server_message() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.login("a@b.com", "wrong").await.unwrap_err();
    assert_eq!(err, ApiError::Auth("Invalid credentials".to_string()));
    // A bad password is not a session problem
    assert!(!err.ends_session());
}

#[tokio::test]
async fn list_users_sends_bearer_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({"action": "get-users"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [
                {"username": "a@b.com", "firstName": "Ann", "lastName": "Bell",
                 "role": "user", "company": "company a", "companyPosition": "worker",
                 "createdAt": "2024-01-05T09:00:00Z"},
                {"username": "c@d.org", "firstName": "Cy", "lastName": "Dee",
                 "role": "admin", "createdAt": "2024-02-01T09:00:00Z"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let users = client.list_users(&token()).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "a@b.com");
    assert_eq!(users[1].company, "");
}

#[tokio::test]
async fn expired_token_is_reported_as_unauthorized() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_users(&token()).await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized("Token expired".to_string()));
    assert!(err.ends_session());
}

#[tokio::test]
async fn create_user_registers_with_password() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({
            "action": "register",
            "username": "new@corp.com",
            "firstName": "New",
            "lastName": "Hire",
            "role": "user",
            "position": "worker",
            "company": "company c",
            "password": "Welcome-1",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "User registered"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let draft = NewUserDraft {
        username: "new@corp.com".to_string(),
        first_name: "New".to_string(),
        last_name: "Hire".to_string(),
        role: "user".to_string(),
        position: "worker".to_string(),
        company: "Company C".to_string(),
    };
    let user = draft.validate().unwrap();

    let client = client_for(&server).await;
    client.create_user(&token(), &user, "Welcome-1").await.unwrap();
}

#[tokio::test]
async fn create_user_conflict_is_a_submission_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "User already exists"})),
        )
        .mount(&server)
        .await;

    let user = NewUserDraft {
        username: "dup@corp.com".to_string(),
        role: "admin".to_string(),
        ..Default::default()
    }
    .validate()
    .unwrap();

    let client = client_for(&server).await;
    let err = client.create_user(&token(), &user, "x").await.unwrap_err();
    assert_eq!(err.to_string(), "User already exists");
}

#[tokio::test]
async fn delete_user_sends_username() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer T"))
        .and(body_json(json!({"action": "delete-user", "username": "a@b.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.delete_user(&token(), "a@b.com").await.unwrap();
}

#[tokio::test]
async fn unreachable_server_uses_fallback_message() {
    // Bind and immediately drop a listener to get a port nothing is serving
    let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    };
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}{ENDPOINT}")).unwrap();
    let err = client.delete_user(&token(), "a@b.com").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Submission("An unexpected error occurred while deleting the user.".to_string())
    );
}
