//! HTTP-level integration tests for the auth wrappers and the default
//! credential header.

use assert_matches::assert_matches;
use crm_testkit::{client, observed_authorization, PASSWORD};
use crm_api::{auth, ApiError};
use crm_core::auth::{LoginRequest, RegisterRequest};
use crm_core::Role;

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login yields a token and the user's identity.
#[tokio::test]
async fn login_success_returns_credentials() {
    let (api, _writer) = client().await;

    let response = auth::login(&api, &login_request("ann@x.com", PASSWORD))
        .await
        .expect("login should succeed");

    let (token, user) = response.credentials().expect("credentials present");
    let user = user.expect("identity present");
    assert_eq!(token, "tok-1");
    assert_eq!(user.name, "Ann");
    assert_eq!(user.role, Role::Admin);
}

/// A 401 surfaces the backend's message.
#[tokio::test]
async fn login_wrong_password_surfaces_message() {
    let (api, _writer) = client().await;

    let err = auth::login(&api, &login_request("ann@x.com", "wrong"))
        .await
        .expect_err("login should fail");

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.display_message(), "Invalid credentials");
}

/// Invalid input is rejected locally, before any request is sent.
#[tokio::test]
async fn login_validation_happens_before_the_network() {
    let (api, _writer) = client().await;

    let err = auth::login(&api, &login_request("not-an-email", ""))
        .await
        .expect_err("validation should fail");

    assert_matches!(err, ApiError::Validation(_));
    assert_eq!(err.status(), None);
}

/// A token issued without a user record still counts as a login.
#[tokio::test]
async fn login_without_profile_returns_token_only() {
    let (api, _writer) = client().await;

    let response = auth::login(&api, &login_request("noprofile@x.com", PASSWORD))
        .await
        .expect("login should succeed");

    let (token, user) = response.credentials().expect("token issued");
    assert_eq!(token, "tok-np");
    assert!(user.is_none());
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns the flattened identity and a token.
#[tokio::test]
async fn register_success_returns_credentials() {
    let (api, _writer) = client().await;

    let request = RegisterRequest {
        name: "Cy".into(),
        email: "cy@x.com".into(),
        password: PASSWORD.into(),
        role: Role::User,
    };
    let response = auth::register(&api, &request).await.expect("register");

    let (token, user) = response.credentials().expect("credentials present");
    assert_eq!(token, "tok-Cy");
    assert_eq!(user.id, "u-Cy");
    assert_eq!(user.role, Role::User);
}

/// A 2xx refusal that carries no identity still decodes.
#[tokio::test]
async fn register_refusal_without_identity_decodes() {
    let (api, _writer) = client().await;

    let request = RegisterRequest {
        name: "Pat".into(),
        email: "pending@x.com".into(),
        password: PASSWORD.into(),
        role: Role::User,
    };
    let response = auth::register(&api, &request).await.expect("2xx reply");

    assert!(!response.success);
    assert_eq!(response.message, "Account pending approval");
    assert!(response.credentials().is_none());
}

/// Field-level errors are joined into one message.
#[tokio::test]
async fn register_conflict_joins_field_errors() {
    let (api, _writer) = client().await;

    let request = RegisterRequest {
        name: "Dup".into(),
        email: "taken@x.com".into(),
        password: PASSWORD.into(),
        role: Role::User,
    };
    let err = auth::register(&api, &request).await.expect_err("conflict");

    assert_matches!(err, ApiError::Status { status: 400, .. });
    assert_eq!(
        err.display_message(),
        "Email already registered, Pick another address"
    );
}

// ---------------------------------------------------------------------------
// Default credentials
// ---------------------------------------------------------------------------

/// Requests carry exactly the header the writer last set.
#[tokio::test]
async fn outbound_requests_carry_current_bearer() {
    let (api, writer) = client().await;

    assert_eq!(observed_authorization(&api).await, None);

    writer.set_bearer("abc123").expect("valid token");
    assert_eq!(
        observed_authorization(&api).await.as_deref(),
        Some("Bearer abc123")
    );

    writer.clear();
    assert_eq!(observed_authorization(&api).await, None);
}
