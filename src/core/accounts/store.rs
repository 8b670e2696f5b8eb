//! In-memory account store
//!
//! Accounts live in a `DashMap` keyed by id, with secondary indexes for
//! username and email so uniqueness is enforced atomically. Auth tokens are
//! stored as SHA-256 digests, never in plain text.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::RngCore;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Number of random bytes in an auth token
const TOKEN_BYTES: usize = 20;

/// Account store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Account not found")]
    NotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Password hashing failed: {0}")]
    HashingError(String),
}

/// Stored account
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            first_name: account.first_name,
            last_name: account.last_name,
        }
    }
}

/// Data needed to create an account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
}

/// Account storage shared between request handlers
#[derive(Clone, Default)]
pub struct AccountStore {
    accounts: Arc<DashMap<Uuid, Account>>,
    usernames: Arc<DashMap<String, Uuid>>,
    emails: Arc<DashMap<String, Uuid>>,
    tokens: Arc<DashMap<String, Uuid>>,
}

impl AccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash a password using bcrypt with automatic salt generation
    ///
    /// Passwords longer than bcrypt's 72-byte input are refused rather than
    /// silently truncated.
    pub fn hash_password(password: &str, cost: u32) -> Result<String, StoreError> {
        bcrypt::non_truncating_hash(password, cost)
            .map_err(|e| StoreError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, StoreError> {
        match bcrypt::non_truncating_verify(password, hash) {
            Ok(matches) => Ok(matches),
            // No stored hash can come from an over-long password
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(StoreError::HashingError(e.to_string())),
        }
    }

    /// Insert a new account, rejecting duplicate usernames and emails
    pub fn create(&self, new: NewAccount) -> Result<Account, StoreError> {
        let id = Uuid::new_v4();

        match self.usernames.entry(new.username.clone()) {
            Entry::Occupied(_) => return Err(StoreError::UsernameTaken),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        match self.emails.entry(email_key(&new.email)) {
            Entry::Occupied(_) => {
                self.usernames.remove(&new.username);
                return Err(StoreError::EmailTaken);
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let account = Account {
            id,
            email: new.email,
            username: new.username,
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        self.accounts.insert(id, account.clone());

        Ok(account)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<Account> {
        self.accounts.get(&id).map(|entry| entry.value().clone())
    }

    /// Email lookup is case-insensitive
    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        let id = *self.emails.get(&email_key(email))?;
        self.find_by_id(id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<Account> {
        let id = *self.usernames.get(username)?;
        self.find_by_id(id)
    }

    /// Check credentials and return the matching account
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Account, StoreError> {
        let account = self.find_by_email(email).ok_or(StoreError::NotFound)?;

        if Self::verify_password(password, &account.password_hash)? {
            Ok(account)
        } else {
            Err(StoreError::InvalidPassword)
        }
    }

    /// Issue a fresh auth token for an account
    pub fn issue_token(&self, account_id: Uuid) -> Result<String, StoreError> {
        if !self.accounts.contains_key(&account_id) {
            return Err(StoreError::NotFound);
        }

        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.tokens.insert(token_digest(&token), account_id);
        Ok(token)
    }

    /// Account owning a token, if the token is known
    pub fn resolve_token(&self, token: &str) -> Option<Account> {
        let id = *self.tokens.get(&token_digest(token))?;
        self.find_by_id(id)
    }

    /// Forget a token; returns whether it existed
    pub fn revoke_token(&self, token: &str) -> bool {
        self.tokens.remove(&token_digest(token)).is_some()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
