//! Common reusable UI components
//!
//! Form building blocks shared by the account pages.

pub mod button;
pub mod form;

pub use button::{Button, ButtonVariant};
pub use form::FormField;
