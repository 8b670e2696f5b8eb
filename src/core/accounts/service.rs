//! Account service
//!
//! Registration, token login/logout and current-user lookup on top of the
//! account store. Password hashing runs on the blocking thread pool.

use serde::Serialize;

use super::store::{AccountResponse, AccountStore, NewAccount, StoreError};
use crate::core::form_state::FormFields;
use crate::core::registration::{RegistrationField, RegistrationFormValues, SignInValues};
use crate::core::validation::FieldError;

/// Account service error types
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{}: {error}", .field.name())]
    Validation {
        field: RegistrationField,
        error: FieldError,
    },

    #[error("A user with that username already exists.")]
    UsernameTaken,

    #[error("A user with that email already exists.")]
    EmailTaken,

    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Registration is closed.")]
    RegistrationClosed,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AccountError {
    /// Form field the error belongs to, if any
    pub fn field(&self) -> Option<RegistrationField> {
        match self {
            AccountError::Validation { field, .. } => Some(*field),
            AccountError::UsernameTaken => Some(RegistrationField::Username),
            AccountError::EmailTaken => Some(RegistrationField::Email),
            _ => None,
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken => AccountError::UsernameTaken,
            StoreError::EmailTaken => AccountError::EmailTaken,
            StoreError::NotFound | StoreError::InvalidPassword => AccountError::InvalidCredentials,
            StoreError::HashingError(_) => AccountError::InternalError(err.to_string()),
        }
    }
}

/// Token login response
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub auth_token: String,
}

/// Current user response
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    pub is_subscribed: bool,
}

/// Account service
#[derive(Clone)]
pub struct AccountService {
    store: AccountStore,
    hash_cost: u32,
    registration_open: bool,
}

impl AccountService {
    /// Create a new account service
    pub fn new(store: AccountStore, hash_cost: u32, registration_open: bool) -> Self {
        Self {
            store,
            hash_cost,
            registration_open,
        }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Register a new account
    pub async fn register(
        &self,
        values: RegistrationFormValues,
    ) -> Result<AccountResponse, AccountError> {
        if !self.registration_open {
            return Err(AccountError::RegistrationClosed);
        }

        values
            .validate()
            .map_err(|(field, error)| AccountError::Validation { field, error })?;

        // Fail fast before spending time on hashing
        if self.store.find_by_username(&values.username).is_some() {
            return Err(AccountError::UsernameTaken);
        }
        if self.store.find_by_email(&values.email).is_some() {
            return Err(AccountError::EmailTaken);
        }

        let cost = self.hash_cost;
        let RegistrationFormValues {
            first_name,
            last_name,
            username,
            email,
            password,
        } = values;

        let password_hash =
            tokio::task::spawn_blocking(move || AccountStore::hash_password(&password, cost))
                .await
                .map_err(|e| AccountError::InternalError(e.to_string()))??;

        let account = self.store.create(NewAccount {
            email,
            username,
            first_name,
            last_name,
            password_hash,
        })?;

        Ok(account.into())
    }

    /// Exchange credentials for an auth token
    pub async fn login(&self, credentials: SignInValues) -> Result<TokenResponse, AccountError> {
        let store = self.store.clone();
        let account = tokio::task::spawn_blocking(move || {
            store.authenticate(&credentials.email, &credentials.password)
        })
        .await
        .map_err(|e| AccountError::InternalError(e.to_string()))??;

        let auth_token = self.store.issue_token(account.id)?;
        Ok(TokenResponse { auth_token })
    }

    /// Revoke an auth token
    pub fn logout(&self, token: &str) -> Result<(), AccountError> {
        if self.store.revoke_token(token) {
            Ok(())
        } else {
            Err(AccountError::InvalidToken)
        }
    }

    /// Account behind an auth token
    pub fn current_user(&self, token: &str) -> Result<CurrentUserResponse, AccountError> {
        let account = self
            .store
            .resolve_token(token)
            .ok_or(AccountError::InvalidToken)?;

        Ok(CurrentUserResponse {
            account: account.into(),
            is_subscribed: false,
        })
    }
}
