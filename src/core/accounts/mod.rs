//! Account backend
//!
//! This module provides:
//! - In-memory account storage with bcrypt password hashes
//! - Registration and token login/logout
//! - REST API endpoints for the browser client

pub mod api;
pub mod service;
pub mod store;

pub use api::{AccountApiState, account_api_router};
pub use service::{AccountError, AccountService, CurrentUserResponse, TokenResponse};
pub use store::{Account, AccountResponse, AccountStore, NewAccount, StoreError};
