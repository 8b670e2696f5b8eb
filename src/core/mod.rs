//! Core domain models and business logic for the recipe site frontend

#[cfg(feature = "ssr")]
pub mod accounts;
#[cfg(feature = "ssr")]
pub mod config;
pub mod form_state;
pub mod navigation;
pub mod registration;
pub mod validation;

pub use form_state::{FormFields, FormState};
pub use navigation::{NavigationEntry, RouteAccess, navigation, route_access, visible_entries};
pub use registration::{
    RegistrationField, RegistrationFormValues, SignInField, SignInValues, SignUpView, sign_up_view,
};
pub use validation::{FieldError, Rule};
