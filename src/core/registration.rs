//! Account forms: registration and sign-in
//!
//! Field definitions shared by the browser forms and the account API.

use serde::{Deserialize, Serialize};

use super::form_state::{FormFields, FormState};
use super::navigation::RECIPES_ROUTE;
use super::validation::{
    EMAIL_MAX_LENGTH, FieldError, NAME_MAX_LENGTH, PASSWORD_MAX_BYTES, PASSWORD_MAX_LENGTH,
    PASSWORD_MIN_LENGTH, Rule, USERNAME_MAX_LENGTH, validate,
};

/// Fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    FirstName,
    LastName,
    Username,
    Email,
    Password,
}

impl RegistrationField {
    /// Label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            RegistrationField::FirstName => "First name",
            RegistrationField::LastName => "Last name",
            RegistrationField::Username => "Username",
            RegistrationField::Email => "Email",
            RegistrationField::Password => "Password",
        }
    }

    /// HTML input type
    pub fn input_type(self) -> &'static str {
        match self {
            RegistrationField::Email => "email",
            RegistrationField::Password => "password",
            _ => "text",
        }
    }

    /// Browser autocomplete hint
    pub fn autocomplete(self) -> &'static str {
        match self {
            RegistrationField::FirstName => "given-name",
            RegistrationField::LastName => "family-name",
            RegistrationField::Username => "username",
            RegistrationField::Email => "email",
            RegistrationField::Password => "new-password",
        }
    }

    /// Rules enforced by the account API on top of the form rules
    pub fn server_rules(self) -> &'static [Rule] {
        match self {
            RegistrationField::Password => &[
                Rule::Required,
                Rule::MaxLength(PASSWORD_MAX_LENGTH),
                Rule::MaxBytes(PASSWORD_MAX_BYTES),
                Rule::MinLength(PASSWORD_MIN_LENGTH),
                Rule::NotNumeric,
            ],
            field => field.rules(),
        }
    }
}

impl FormFields for RegistrationField {
    fn all() -> &'static [Self] {
        &[
            RegistrationField::FirstName,
            RegistrationField::LastName,
            RegistrationField::Username,
            RegistrationField::Email,
            RegistrationField::Password,
        ]
    }

    fn name(self) -> &'static str {
        match self {
            RegistrationField::FirstName => "first_name",
            RegistrationField::LastName => "last_name",
            RegistrationField::Username => "username",
            RegistrationField::Email => "email",
            RegistrationField::Password => "password",
        }
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            RegistrationField::FirstName | RegistrationField::LastName => {
                &[Rule::Required, Rule::MaxLength(NAME_MAX_LENGTH)]
            }
            RegistrationField::Username => &[
                Rule::Required,
                Rule::MaxLength(USERNAME_MAX_LENGTH),
                Rule::UsernameChars,
            ],
            RegistrationField::Email => &[
                Rule::Required,
                Rule::MaxLength(EMAIL_MAX_LENGTH),
                Rule::Email,
            ],
            RegistrationField::Password => &[Rule::Required, Rule::MaxLength(PASSWORD_MAX_LENGTH)],
        }
    }
}

/// Values collected by the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFormValues {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationFormValues {
    /// Snapshot of the current form values
    pub fn from_form(form: &FormState<RegistrationField>) -> Self {
        Self {
            first_name: form.value(RegistrationField::FirstName).to_string(),
            last_name: form.value(RegistrationField::LastName).to_string(),
            username: form.value(RegistrationField::Username).to_string(),
            email: form.value(RegistrationField::Email).to_string(),
            password: form.value(RegistrationField::Password).to_string(),
        }
    }

    pub fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::FirstName => &self.first_name,
            RegistrationField::LastName => &self.last_name,
            RegistrationField::Username => &self.username,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
        }
    }

    /// Server-side check of every field, first failing field wins
    pub fn validate(&self) -> Result<(), (RegistrationField, FieldError)> {
        RegistrationField::all().iter().try_for_each(|field| {
            validate(self.get(*field), field.server_rules()).map_err(|err| (*field, err))
        })
    }
}

/// What the registration page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpView {
    /// Signed-in visitors are sent away
    Redirect(&'static str),
    /// Anonymous visitors get the form
    Form,
}

/// Decide the registration page output for the current session
pub fn sign_up_view(authenticated: bool) -> SignUpView {
    if authenticated {
        SignUpView::Redirect(RECIPES_ROUTE)
    } else {
        SignUpView::Form
    }
}

/// Fields of the sign-in form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignInField {
    Email,
    Password,
}

impl SignInField {
    pub fn label(self) -> &'static str {
        match self {
            SignInField::Email => "Email",
            SignInField::Password => "Password",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            SignInField::Email => "email",
            SignInField::Password => "password",
        }
    }
}

impl FormFields for SignInField {
    fn all() -> &'static [Self] {
        &[SignInField::Email, SignInField::Password]
    }

    fn name(self) -> &'static str {
        match self {
            SignInField::Email => "email",
            SignInField::Password => "password",
        }
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            SignInField::Email => &[Rule::Required, Rule::Email],
            SignInField::Password => &[Rule::Required],
        }
    }
}

/// Credentials sent to the token login endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInValues {
    pub email: String,
    pub password: String,
}

impl SignInValues {
    pub fn from_form(form: &FormState<SignInField>) -> Self {
        Self {
            email: form.value(SignInField::Email).to_string(),
            password: form.value(SignInField::Password).to_string(),
        }
    }
}

impl From<&RegistrationFormValues> for SignInValues {
    fn from(values: &RegistrationFormValues) -> Self {
        Self {
            email: values.email.clone(),
            password: values.password.clone(),
        }
    }
}
