//! Validation rules for account form fields
//!
//! Every field declares a fixed list of [`Rule`]s. Rules are checked in
//! declaration order and the first failure is reported.

/// Longest accepted first/last name (account model limit)
pub const NAME_MAX_LENGTH: usize = 150;

/// Longest accepted username
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Longest accepted email address
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Longest accepted password
pub const PASSWORD_MAX_LENGTH: usize = 100;

/// Shortest password the server accepts
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Longest password bcrypt can hash without truncation, in UTF-8 bytes
pub const PASSWORD_MAX_BYTES: usize = 72;

/// Characters allowed in a username besides letters and digits
const USERNAME_EXTRA_CHARS: [char; 5] = ['@', '.', '+', '-', '_'];

/// A single validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be empty (whitespace counts as empty)
    Required,
    /// At most this many characters
    MaxLength(usize),
    /// At least this many characters
    MinLength(usize),
    /// At most this many UTF-8 bytes
    MaxBytes(usize),
    /// Looks like `local@domain.tld`
    Email,
    /// Letters, digits and `@ . + - _` only
    UsernameChars,
    /// Must not consist of digits only
    NotNumeric,
}

/// Validation error types
#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// Value is missing
    Required,
    /// Value is too long
    TooLong { max: usize, actual: usize },
    /// Value is too short
    TooShort { min: usize, actual: usize },
    /// Value takes too many bytes once encoded
    TooManyBytes { max: usize },
    /// Value is not an email address
    InvalidEmail,
    /// Value contains characters outside the allowed set
    InvalidCharacters { invalid: Vec<char> },
    /// Value is made of digits only
    EntirelyNumeric,
    /// Message reported by the server for this field
    Server(String),
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::Required => write!(f, "This field is required"),
            FieldError::TooLong { max, actual } => write!(
                f,
                "Ensure this field has no more than {} characters ({} given)",
                max, actual
            ),
            FieldError::TooShort { min, actual } => write!(
                f,
                "Ensure this field has at least {} characters ({} given)",
                min, actual
            ),
            FieldError::TooManyBytes { max } => {
                write!(f, "Ensure this field takes no more than {} bytes", max)
            }
            FieldError::InvalidEmail => write!(f, "Enter a valid email address"),
            FieldError::InvalidCharacters { invalid } => {
                let chars: String = invalid.iter().collect();
                write!(
                    f,
                    "Invalid characters: '{}'. Only letters, numbers and @/./+/-/_ are allowed",
                    chars
                )
            }
            FieldError::EntirelyNumeric => write!(f, "This password is entirely numeric"),
            FieldError::Server(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FieldError {}

impl Rule {
    /// Check a single value against this rule
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        let length = value.chars().count();
        match *self {
            Rule::Required => {
                if value.trim().is_empty() {
                    return Err(FieldError::Required);
                }
            }
            Rule::MaxLength(max) => {
                if length > max {
                    return Err(FieldError::TooLong {
                        max,
                        actual: length,
                    });
                }
            }
            Rule::MinLength(min) => {
                if length < min {
                    return Err(FieldError::TooShort {
                        min,
                        actual: length,
                    });
                }
            }
            Rule::MaxBytes(max) => {
                if value.len() > max {
                    return Err(FieldError::TooManyBytes { max });
                }
            }
            Rule::Email => {
                if !is_email(value) {
                    return Err(FieldError::InvalidEmail);
                }
            }
            Rule::UsernameChars => {
                let mut invalid: Vec<char> = Vec::new();
                for c in value.chars() {
                    if !c.is_alphanumeric()
                        && !USERNAME_EXTRA_CHARS.contains(&c)
                        && !invalid.contains(&c)
                    {
                        invalid.push(c);
                    }
                }
                if !invalid.is_empty() {
                    return Err(FieldError::InvalidCharacters { invalid });
                }
            }
            Rule::NotNumeric => {
                if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
                    return Err(FieldError::EntirelyNumeric);
                }
            }
        }
        Ok(())
    }
}

/// Check a value against a rule list, stopping at the first failure
pub fn validate(value: &str, rules: &[Rule]) -> Result<(), FieldError> {
    rules.iter().try_for_each(|rule| rule.check(value))
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(Rule::Required.check(""), Err(FieldError::Required));
        assert_eq!(Rule::Required.check("   "), Err(FieldError::Required));
        assert!(Rule::Required.check("x").is_ok());
    }

    #[test]
    fn test_max_length_counts_chars() {
        assert!(Rule::MaxLength(3).check("abc").is_ok());
        assert!(Rule::MaxLength(3).check("жук").is_ok());
        assert_eq!(
            Rule::MaxLength(3).check("abcd"),
            Err(FieldError::TooLong { max: 3, actual: 4 })
        );
    }

    #[test]
    fn test_min_length() {
        assert!(Rule::MinLength(8).check("12345678").is_ok());
        assert_eq!(
            Rule::MinLength(8).check("short"),
            Err(FieldError::TooShort { min: 8, actual: 5 })
        );
    }

    #[test]
    fn test_max_bytes_counts_utf8() {
        assert!(Rule::MaxBytes(6).check("жук").is_ok());
        assert_eq!(
            Rule::MaxBytes(5).check("жук"),
            Err(FieldError::TooManyBytes { max: 5 })
        );
        assert!(Rule::MaxLength(5).check("жук").is_ok());
    }

    #[test]
    fn test_email() {
        assert!(Rule::Email.check("cook@example.com").is_ok());
        assert!(Rule::Email.check("a.b+c@mail.example.org").is_ok());

        assert!(Rule::Email.check("cook").is_err());
        assert!(Rule::Email.check("@example.com").is_err());
        assert!(Rule::Email.check("cook@example").is_err());
        assert!(Rule::Email.check("cook@example.").is_err());
        assert!(Rule::Email.check("cook@@example.com").is_err());
        assert!(Rule::Email.check("co ok@example.com").is_err());
    }

    #[test]
    fn test_username_chars() {
        assert!(Rule::UsernameChars.check("chef_anna").is_ok());
        assert!(Rule::UsernameChars.check("anna.b+1@home-2").is_ok());
        assert!(Rule::UsernameChars.check("Анна").is_ok());

        assert_eq!(
            Rule::UsernameChars.check("anna bee!"),
            Err(FieldError::InvalidCharacters {
                invalid: vec![' ', '!']
            })
        );
        assert_eq!(
            Rule::UsernameChars.check("a!b!c d!"),
            Err(FieldError::InvalidCharacters {
                invalid: vec!['!', ' ']
            })
        );
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(
            Rule::NotNumeric.check("12345678"),
            Err(FieldError::EntirelyNumeric)
        );
        assert!(Rule::NotNumeric.check("1234567a").is_ok());
        assert!(Rule::NotNumeric.check("").is_ok());
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let rules = [Rule::Required, Rule::MaxLength(5), Rule::UsernameChars];

        assert_eq!(validate("", &rules), Err(FieldError::Required));
        assert!(matches!(
            validate("bad name!", &rules),
            Err(FieldError::TooLong { .. })
        ));
        assert!(matches!(
            validate("a b", &rules),
            Err(FieldError::InvalidCharacters { .. })
        ));
        assert!(validate("anna", &rules).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(
            FieldError::Server("A user with that username already exists.".to_string())
                .to_string(),
            "A user with that username already exists."
        );
        assert!(
            FieldError::TooLong { max: 150, actual: 151 }
                .to_string()
                .contains("150")
        );
    }
}
