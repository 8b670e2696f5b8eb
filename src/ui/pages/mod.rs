//! Application pages module
//!
//! This module contains all the page components for the application:
//! - Recipes page (public)
//! - Registration and sign-in pages
//! - Member-only menu sections
//! - Not found page

mod not_found;
mod recipes;
mod section;
mod signin;
mod signup;

pub use not_found::NotFoundPage;
pub use recipes::RecipesPage;
pub use section::SectionPage;
pub use signin::SignInPage;
pub use signup::SignUpPage;
