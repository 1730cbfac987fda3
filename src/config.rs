// Runtime settings: where the two endpoints live, how long a request may
// take and how long to pause before each fetch. Every value has a default
// that matches the public jsonplaceholder API, so running without any
// environment variables behaves exactly like the hardcoded tool.

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_POSTS_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PACING: Duration = Duration::from_millis(600);

pub const ENV_USERS_URL: &str = "API_VALIDATOR_USERS_URL";
pub const ENV_POSTS_URL: &str = "API_VALIDATOR_POSTS_URL";
pub const ENV_TIMEOUT_SECS: &str = "API_VALIDATOR_TIMEOUT_SECS";
pub const ENV_DELAY_MS: &str = "API_VALIDATOR_DELAY_MS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Settings shared by every request the client makes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub users_url: String,
    pub posts_url: String,
    pub timeout: Duration,
    /// Cosmetic pause before each fetch. `Duration::ZERO` disables it.
    pub pacing: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            users_url: DEFAULT_USERS_URL.into(),
            posts_url: DEFAULT_POSTS_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            pacing: DEFAULT_PACING,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup. Unset variables
    /// keep their default; set-but-invalid numbers are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        if let Some(url) = lookup(ENV_USERS_URL) {
            settings.users_url = trim_base(&url);
        }
        if let Some(url) = lookup(ENV_POSTS_URL) {
            settings.posts_url = trim_base(&url);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            settings.timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_DELAY_MS) {
            settings.pacing = Duration::from_millis(parse_number(ENV_DELAY_MS, &raw)?);
        }
        Ok(settings)
    }

    /// Point both endpoints at `/users` and `/posts` under one base URL.
    /// Handy for a local mirror of the API.
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = trim_base(base);
        self.users_url = format!("{}/users", base);
        self.posts_url = format!("{}/posts", base);
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// `{users_url}/{id}` must not end up with a double slash.
fn trim_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_number(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: raw.to_string(),
    })
}
