//! In-process stand-in for the CRM backend.
//!
//! Serves `/api/auth/login`, `/api/auth/register` and `/api/echo-auth` on
//! an ephemeral localhost port so tests exercise real HTTP round-trips.
//!
//! Accounts known to the login endpoint (password [`PASSWORD`]):
//!
//! | Email             | Reply                                        |
//! |-------------------|----------------------------------------------|
//! | `ann@x.com`       | admin `1`, token `tok-1`                     |
//! | `bo@x.com`        | user `2`, token `tok-2`                      |
//! | `notoken@x.com`   | success with a user but no token             |
//! | `noprofile@x.com` | success with token `tok-np` but no user      |
//! | anything else     | 401 `Invalid credentials`                    |
//!
//! Registration answers 201 with `_id = u-<name>` and `token = tok-<name>`,
//! except `taken@x.com` (400 with two field errors), `notoken@x.com` (201
//! without a token) and `pending@x.com` (201 refusing the session, with no
//! identity at all).

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crm_api::{ApiClient, ClientConfig, CredentialWriter};

pub const PASSWORD: &str = "secret";

fn identity(email: &str) -> Option<Value> {
    match email {
        "ann@x.com" => Some(json!({"id": "1", "name": "Ann", "email": email, "role": "admin"})),
        "bo@x.com" => Some(json!({"id": "2", "name": "Bo", "email": email, "role": "user"})),
        "notoken@x.com" => Some(json!({"id": "3", "name": "Nat", "email": email, "role": "user"})),
        _ => None,
    }
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if password == PASSWORD && email == "noprofile@x.com" {
        return (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Logged in", "token": "tok-np"})),
        );
    }

    match identity(email) {
        Some(user) if password == PASSWORD && email == "notoken@x.com" => (
            StatusCode::OK,
            Json(json!({"success": true, "message": "Logged in", "user": user})),
        ),
        Some(user) if password == PASSWORD => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Logged in",
                "token": format!("tok-{}", user["id"].as_str().unwrap_or_default()),
                "user": user,
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        ),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    let role = body["role"].as_str().unwrap_or("user");

    match email {
        "taken@x.com" => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "errors": [
                    {"msg": "Email already registered", "param": "email", "location": "body"},
                    {"msg": "Pick another address", "param": "email", "location": "body"}
                ]
            })),
        ),
        "pending@x.com" => (
            StatusCode::CREATED,
            Json(json!({"success": false, "message": "Account pending approval"})),
        ),
        _ => {
            let mut response = json!({
                "success": true,
                "message": "Registered",
                "_id": format!("u-{name}"),
                "name": name,
                "email": email,
                "role": role,
            });
            if email != "notoken@x.com" {
                response["token"] = json!(format!("tok-{name}"));
            }
            (StatusCode::CREATED, Json(response))
        }
    }
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": authorization }))
}

/// Start the stand-in backend and return its `/api` base URL.
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/echo-auth", get(echo_auth));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stand-in backend");
    });

    format!("http://{addr}/api")
}

/// Client configuration pointing at `api_url` with a short timeout.
pub fn test_config(api_url: impl Into<String>) -> ClientConfig {
    ClientConfig::new(api_url, "http://localhost:5173", ".crm-test", 5)
}

/// Build a client against a freshly spawned backend.
pub async fn client() -> (ApiClient, CredentialWriter) {
    let config = test_config(spawn_backend().await);
    ApiClient::new(&config).expect("client should build")
}

/// Ask the backend which `Authorization` header it received.
pub async fn observed_authorization(api: &ApiClient) -> Option<String> {
    let body: Value = api.get_json("/echo-auth").await.expect("echo-auth");
    body["authorization"].as_str().map(str::to_string)
}
