//! Application configuration from environment variables.
//!
//! Load configuration using `Config::from_env()` after calling `dotenvy::dotenv()`.

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// bcrypt cost factor for stored passwords (`PASSWORD_HASH_COST`)
    pub password_hash_cost: Option<u32>,

    /// Whether new accounts may be created (`REGISTRATION_OPEN`)
    pub registration_open: Option<bool>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv()` before this to load from `.env` file.
    /// Unparsable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key/value source
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            password_hash_cost: parse_var(&lookup, "PASSWORD_HASH_COST", |v| v.parse().ok()),
            registration_open: parse_var(&lookup, "REGISTRATION_OPEN", parse_bool),
        }
    }

    /// bcrypt cost to use, falling back to the library default
    pub fn password_hash_cost(&self) -> u32 {
        self.password_hash_cost
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Registration is open unless explicitly disabled
    pub fn registration_open(&self) -> bool {
        self.registration_open.unwrap_or(true)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        tracing::warn!("Ignoring invalid value for {}: {:?}", key, raw);
    }
    parsed
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
