//! Account API endpoints
//!
//! Provides REST API endpoints for accounts:
//! - POST /api/users/ - Register a new account
//! - GET /api/users/me/ - Get current user info
//! - POST /api/auth/token/login/ - Exchange credentials for a token
//! - POST /api/auth/token/logout/ - Revoke the token

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;

use super::service::{AccountError, AccountService, CurrentUserResponse, TokenResponse};
use super::store::AccountResponse;
use crate::core::form_state::FormFields;
use crate::core::registration::{RegistrationFormValues, SignInValues};

/// Account API state containing the account service
#[derive(Clone)]
pub struct AccountApiState {
    pub account_service: AccountService,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Convert AccountError to API response
impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AccountError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AccountError::UsernameTaken => (StatusCode::BAD_REQUEST, "USERNAME_TAKEN"),
            AccountError::EmailTaken => (StatusCode::BAD_REQUEST, "EMAIL_TAKEN"),
            AccountError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            AccountError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AccountError::RegistrationClosed => (StatusCode::FORBIDDEN, "REGISTRATION_CLOSED"),
            AccountError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = match &self {
            AccountError::Validation { error, .. } => error.to_string(),
            other => other.to_string(),
        };

        let mut body = ApiError::new(message, code);
        if let Some(field) = self.field() {
            body = body.with_field(field.name());
        }

        (status, Json(body)).into_response()
    }
}

/// Create the account API router
pub fn account_api_router(state: AccountApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/api/users/", post(register_handler))
        .route("/api/users/me/", get(me_handler))
        .route("/api/auth/token/login/", post(login_handler))
        .route("/api/auth/token/logout/", post(logout_handler))
        .with_state(state)
}

/// POST /api/users/
/// Register a new account
async fn register_handler(
    State(state): State<Arc<AccountApiState>>,
    Json(values): Json<RegistrationFormValues>,
) -> Result<(StatusCode, Json<AccountResponse>), AccountError> {
    tracing::info!("Registration attempt for username: {}", values.username);

    let account = state
        .account_service
        .register(values)
        .await
        .inspect_err(|e| tracing::info!("Registration rejected: {}", e))?;

    tracing::info!("Account registered: {}", account.username);

    Ok((StatusCode::CREATED, Json(account)))
}

/// POST /api/auth/token/login/
/// Exchange email and password for an auth token
async fn login_handler(
    State(state): State<Arc<AccountApiState>>,
    Json(credentials): Json<SignInValues>,
) -> Result<Json<TokenResponse>, AccountError> {
    tracing::info!("Login attempt for email: {}", credentials.email);

    let token = state.account_service.login(credentials).await?;

    Ok(Json(token))
}

/// POST /api/auth/token/logout/
/// Revoke the token from the Authorization header
async fn logout_handler(
    State(state): State<Arc<AccountApiState>>,
    headers: HeaderMap,
) -> Result<StatusCode, AccountError> {
    let token = extract_token(&headers)?;

    state.account_service.logout(&token)?;

    tracing::debug!("Token revoked");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/me/
/// Get current user info from the auth token
async fn me_handler(
    State(state): State<Arc<AccountApiState>>,
    headers: HeaderMap,
) -> Result<Json<CurrentUserResponse>, AccountError> {
    let token = extract_token(&headers)?;

    let user = state.account_service.current_user(&token)?;

    Ok(Json(user))
}

/// Extract the token from an `Authorization: Token <token>` header
fn extract_token(headers: &HeaderMap) -> Result<String, AccountError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AccountError::InvalidToken)?;

    let token = auth_header
        .strip_prefix("Token ")
        .map(str::trim)
        .ok_or(AccountError::InvalidToken)?;

    if token.is_empty() {
        return Err(AccountError::InvalidToken);
    }

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accounts::AccountStore;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderValue, Request};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        account_api_router(AccountApiState {
            account_service: AccountService::new(AccountStore::new(), 4, true),
        })
    }

    fn registration() -> Value {
        json!({
            "first_name": "Anna",
            "last_name": "Petrova",
            "username": "anna_p",
            "email": "anna@example.com",
            "password": "Borscht2024"
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[test]
    fn test_extract_token_valid() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token abc123"));

        assert_eq!(extract_token(&headers).unwrap(), "abc123");
    }

    #[test]
    fn test_extract_token_missing_or_malformed() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_token(&headers),
            Err(AccountError::InvalidToken)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert!(matches!(
            extract_token(&headers),
            Err(AccountError::InvalidToken)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Token "));
        assert!(matches!(
            extract_token(&headers),
            Err(AccountError::InvalidToken)
        ));
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("Something went wrong", "ERROR_CODE");
        let json = serde_json::to_string(&error).unwrap();

        assert!(json.contains("Something went wrong"));
        assert!(json.contains("ERROR_CODE"));
        assert!(!json.contains("field"));

        let json = serde_json::to_string(&error.with_field("email")).unwrap();
        assert!(json.contains("\"field\":\"email\""));
    }

    #[tokio::test]
    async fn test_register_returns_created_account() {
        let app = app();
        let (status, body) = send(&app, post_json("/api/users/", &registration())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "anna_p");
        assert_eq!(body["first_name"], "Anna");
        assert!(body.get("password").is_none());
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let app = app();
        send(&app, post_json("/api/users/", &registration())).await;
        let (status, body) = send(&app, post_json("/api/users/", &registration())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "USERNAME_TAKEN");
        assert_eq!(body["field"], "username");
    }

    #[tokio::test]
    async fn test_register_validation_error_names_field() {
        let app = app();
        let mut values = registration();
        values["email"] = json!("not-an-email");

        let (status, body) = send(&app, post_json("/api/users/", &values)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], "email");
        assert_eq!(body["error"], "Enter a valid email address");
    }

    #[tokio::test]
    async fn test_register_closed() {
        let app = account_api_router(AccountApiState {
            account_service: AccountService::new(AccountStore::new(), 4, false),
        });

        let (status, body) = send(&app, post_json("/api/users/", &registration())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "REGISTRATION_CLOSED");
    }

    #[tokio::test]
    async fn test_login_me_logout_flow() {
        let app = app();
        send(&app, post_json("/api/users/", &registration())).await;

        let credentials = json!({ "email": "anna@example.com", "password": "Borscht2024" });
        let (status, body) = send(&app, post_json("/api/auth/token/login/", &credentials)).await;
        assert_eq!(status, StatusCode::OK);
        let token = body["auth_token"].as_str().unwrap().to_string();

        let me = Request::builder()
            .uri("/api/users/me/")
            .header(header::AUTHORIZATION, format!("Token {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, me).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "anna@example.com");
        assert_eq!(body["is_subscribed"], false);

        let logout = Request::builder()
            .method("POST")
            .uri("/api/auth/token/logout/")
            .header(header::AUTHORIZATION, format!("Token {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, logout).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let me_again = Request::builder()
            .uri("/api/users/me/")
            .header(header::AUTHORIZATION, format!("Token {}", token))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, me_again).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let app = app();
        let credentials = json!({ "email": "nobody@example.com", "password": "x" });

        let (status, body) = send(&app, post_json("/api/auth/token/login/", &credentials)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
    }
}
