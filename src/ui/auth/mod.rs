//! Authentication UI module
//!
//! This module provides authentication-related components and context
//! for the recipe site frontend.

mod context;
mod signin_form;
mod signup_form;

pub use context::{
    AuthApiError, AuthContext, AuthState, User, provide_auth_context, use_auth_context,
};
pub use signin_form::SignInForm;
pub use signup_form::RegistrationForm;
