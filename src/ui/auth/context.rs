//! Auth context for managing user authentication state
//!
//! This module provides a reactive authentication context that:
//! - Stores the current user and auth token
//! - Handles sign-up, sign-in and sign-out against the account API
//! - Persists the token to localStorage and restores it after hydration

use leptos::prelude::*;
#[cfg(not(feature = "ssr"))]
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};

use crate::core::form_state::{FormFields, FormState};
use crate::core::registration::{RegistrationFormValues, SignInValues};
use crate::core::validation::FieldError;

/// User information from the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Initial state, checking localStorage
    #[default]
    Loading,
    /// User is not authenticated
    Unauthenticated,
    /// User is authenticated
    Authenticated(User),
}

impl AuthState {
    /// Whether the visitor is signed in, or `None` while that is being checked
    pub fn session(&self) -> Option<bool> {
        match self {
            AuthState::Loading => None,
            AuthState::Unauthenticated => Some(false),
            AuthState::Authenticated(_) => Some(true),
        }
    }
}

/// Error body returned by the account API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthApiError {
    pub error: String,
    pub code: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl AuthApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            field: None,
        }
    }

    /// Request never reached the server or the reply was unreadable
    pub fn network(error: impl std::fmt::Display) -> Self {
        Self::new(error.to_string(), "NETWORK_ERROR")
    }

    /// Form field this error should be shown next to
    pub fn form_field<F: FormFields>(&self) -> Option<F> {
        self.field.as_deref().and_then(F::from_name)
    }
}

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current authentication state
    pub state: RwSignal<AuthState>,
    /// Current auth token (if authenticated)
    token: RwSignal<Option<String>>,
    /// Loading state for auth operations
    pub loading: RwSignal<bool>,
    /// Error message from last operation
    pub error: RwSignal<Option<String>>,
}

impl AuthContext {
    /// Authentication status as a signal, for components that take it as input.
    /// A session that is still being checked counts as signed out.
    pub fn authenticated(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.session().unwrap_or(false)))
    }

    /// Session status that keeps the loading phase apart
    pub fn session(&self) -> Signal<Option<bool>> {
        let state = self.state;
        Signal::derive(move || state.with(AuthState::session))
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Show an API error next to its form field, or in the banner otherwise
    pub fn report_error<F: FormFields + Send + Sync>(
        &self,
        err: AuthApiError,
        form: RwSignal<FormState<F>>,
    ) {
        match err.form_field::<F>() {
            Some(field) => form.update(|f| f.set_error(field, FieldError::Server(err.error))),
            None => self.error.set(Some(err.error)),
        }
    }
}

#[allow(dead_code)]
const STORAGE_KEY_TOKEN: &str = "foodgram_token";

/// Provide auth context to the component tree
pub fn provide_auth_context() -> AuthContext {
    // The server never sees the stored token, so both sides start in Loading
    // and the client settles the state after hydration
    let state = RwSignal::new(AuthState::Loading);
    let token = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let ctx = AuthContext {
        state,
        token,
        loading,
        error,
    };

    // Restore the session from localStorage after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| {
            let Some(stored) = load_token() else {
                state.set(AuthState::Unauthenticated);
                return;
            };

            spawn_local(async move {
                // Always verify the token with the server
                match fetch_current_user(&stored).await {
                    Ok(user) => {
                        token.set(Some(stored));
                        state.set(AuthState::Authenticated(user));
                    }
                    Err(err) => {
                        leptos::logging::warn!("Stored session rejected: {}", err.error);
                        clear_token();
                        token.set(None);
                        state.set(AuthState::Unauthenticated);
                    }
                }
            });
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Token login response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TokenResponse {
    auth_token: String,
}

#[cfg(not(feature = "ssr"))]
impl AuthContext {
    /// Create an account, then sign in with the same credentials
    pub async fn sign_up(self, values: RegistrationFormValues) -> Result<User, AuthApiError> {
        use gloo_net::http::Request;

        self.loading.set(true);

        let result = async {
            let request = Request::post("/api/users/")
                .header("Content-Type", "application/json")
                .json(&values)
                .map_err(AuthApiError::network)?;

            let response = request.send().await.map_err(AuthApiError::network)?;
            if !response.ok() {
                return Err(read_api_error(response).await);
            }

            self.sign_in(SignInValues::from(&values)).await
        }
        .await;

        self.loading.set(false);
        result
    }

    /// Exchange credentials for a token and load the user
    pub async fn sign_in(self, credentials: SignInValues) -> Result<User, AuthApiError> {
        use gloo_net::http::Request;

        self.loading.set(true);

        let result = async {
            let request = Request::post("/api/auth/token/login/")
                .header("Content-Type", "application/json")
                .json(&credentials)
                .map_err(AuthApiError::network)?;

            let response = request.send().await.map_err(AuthApiError::network)?;
            if !response.ok() {
                return Err(read_api_error(response).await);
            }

            let TokenResponse { auth_token } =
                response.json().await.map_err(AuthApiError::network)?;
            let user = fetch_current_user(&auth_token).await?;

            save_token(&auth_token);
            self.token.set(Some(auth_token));
            self.state.set(AuthState::Authenticated(user.clone()));

            Ok(user)
        }
        .await;

        self.loading.set(false);
        result
    }

    /// Sign out the current user
    pub async fn sign_out(self) {
        use gloo_net::http::Request;

        // Try to revoke the token on the server; local state is cleared regardless
        if let Some(token) = self.token.get_untracked() {
            let sent = Request::post("/api/auth/token/logout/")
                .header("Authorization", &format!("Token {}", token))
                .send()
                .await;
            if let Err(err) = sent {
                leptos::logging::warn!("Logout request failed: {}", err);
            }
        }

        clear_token();
        self.token.set(None);
        self.state.set(AuthState::Unauthenticated);
    }
}

#[cfg(feature = "ssr")]
impl AuthContext {
    pub async fn sign_up(self, _values: RegistrationFormValues) -> Result<User, AuthApiError> {
        Err(AuthApiError::new("Sign up not available on server", "UNAVAILABLE"))
    }

    pub async fn sign_in(self, _credentials: SignInValues) -> Result<User, AuthApiError> {
        Err(AuthApiError::new("Sign in not available on server", "UNAVAILABLE"))
    }

    pub async fn sign_out(self) {}
}

/// Fetch current user info
#[cfg(not(feature = "ssr"))]
async fn fetch_current_user(token: &str) -> Result<User, AuthApiError> {
    use gloo_net::http::Request;

    let response = Request::get("/api/users/me/")
        .header("Authorization", &format!("Token {}", token))
        .send()
        .await
        .map_err(AuthApiError::network)?;

    if !response.ok() {
        return Err(read_api_error(response).await);
    }

    response.json().await.map_err(AuthApiError::network)
}

#[cfg(not(feature = "ssr"))]
async fn read_api_error(response: gloo_net::http::Response) -> AuthApiError {
    let status = response.status();
    response.json::<AuthApiError>().await.unwrap_or_else(|_| {
        AuthApiError::new(format!("Request failed with status {}", status), "HTTP_ERROR")
    })
}

/// Load the auth token from localStorage
#[cfg(not(feature = "ssr"))]
fn load_token() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage
        .get_item(STORAGE_KEY_TOKEN)
        .ok()?
        .filter(|t| !t.is_empty())
}

/// Save the auth token to localStorage
#[cfg(not(feature = "ssr"))]
fn save_token(token: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(STORAGE_KEY_TOKEN, token);
        }
    }
}

/// Clear the auth token from localStorage
#[cfg(not(feature = "ssr"))]
fn clear_token() {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.remove_item(STORAGE_KEY_TOKEN);
        }
    }
}
