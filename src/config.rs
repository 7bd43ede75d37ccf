//! Configuration for the Freshdesk client.
//!
//! Configuration is either loaded from environment variables with
//! [`Config::from_env`] or built directly with [`Config::new`], so several
//! independently configured clients can live in one process.

use std::env;
use std::fmt;

use url::Url;

use crate::error::FreshdeskError;

/// Default steady-state request budget when none is configured.
pub const DEFAULT_MAX_REQUESTS_PER_MINUTE: u32 = 50;

/// Password sent alongside an API key used as the user name.
///
/// Freshdesk ignores the password when the user is an API key.
const API_KEY_PASSWORD: &str = "X";

/// Configuration for connecting to Freshdesk.
///
/// The password is stored but never logged; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the helpdesk (e.g., `https://acme.freshdesk.com`).
    pub base_url: String,

    /// User name or API key for Basic authentication.
    pub user: String,

    /// Password for Basic authentication.
    password: String,

    /// Steady-state request budget for rate-limited operations.
    pub max_requests_per_minute: u32,
}

impl Config {
    /// Builds a configuration from explicit values.
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if the base URL is not an absolute
    /// http(s) URL or the request budget is zero.
    pub fn new(
        base_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        max_requests_per_minute: u32,
    ) -> Result<Self, FreshdeskError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        Self::validate_budget(max_requests_per_minute)?;

        Ok(Config {
            base_url,
            user: user.into(),
            password: password.into(),
            max_requests_per_minute,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FRESHDESK_BASE_URL` (required): base URL of the helpdesk
    /// - `FRESHDESK_USER` (required): user name or API key
    /// - `FRESHDESK_PASSWORD` (optional, default `X`)
    /// - `FRESHDESK_MAX_REQUESTS_PER_MINUTE` (optional, default 50)
    ///
    /// # Errors
    ///
    /// Returns `FreshdeskError::Config` if a required variable is missing
    /// or a value fails validation.
    pub fn from_env() -> Result<Self, FreshdeskError> {
        let base_url = Self::get_required_env("FRESHDESK_BASE_URL")?;
        let user = Self::get_required_env("FRESHDESK_USER")?;
        let password = env::var("FRESHDESK_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| API_KEY_PASSWORD.to_string());

        Self::validate_user(&user)?;

        let max_requests_per_minute = match env::var("FRESHDESK_MAX_REQUESTS_PER_MINUTE") {
            Ok(raw) => Self::parse_budget(&raw)?,
            Err(_) => DEFAULT_MAX_REQUESTS_PER_MINUTE,
        };

        Self::new(base_url, user, password, max_requests_per_minute)
    }

    /// Returns the password for building the Authorization header.
    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, FreshdeskError> {
        env::var(name)
            .map_err(|_| FreshdeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(FreshdeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    ///
    /// Trailing slashes and an `/api/v2` suffix are stripped because every
    /// request path already starts with `/api/v2`.
    fn validate_base_url(url: String) -> Result<String, FreshdeskError> {
        let url = url.trim().trim_end_matches('/');
        let url = url.strip_suffix("/api/v2").unwrap_or(url);

        let parsed = Url::parse(url).map_err(|e| {
            FreshdeskError::invalid_config(format!("FRESHDESK_BASE_URL is not a valid URL: {}", e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FreshdeskError::invalid_config(
                "FRESHDESK_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(url.to_string())
    }

    /// Rejects obvious placeholder values copied from documentation.
    fn validate_user(user: &str) -> Result<(), FreshdeskError> {
        let user_lower = user.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme"];

        for pattern in placeholder_patterns {
            if user_lower.contains(pattern) {
                return Err(FreshdeskError::invalid_config(
                    "FRESHDESK_USER appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }

    fn parse_budget(raw: &str) -> Result<u32, FreshdeskError> {
        raw.trim().parse::<u32>().map_err(|_| {
            FreshdeskError::invalid_config(format!(
                "FRESHDESK_MAX_REQUESTS_PER_MINUTE must be a positive integer, got: {:?}",
                raw
            ))
        })
    }

    fn validate_budget(max_requests_per_minute: u32) -> Result<(), FreshdeskError> {
        if max_requests_per_minute == 0 {
            return Err(FreshdeskError::invalid_config(
                "max requests per minute must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("max_requests_per_minute", &self.max_requests_per_minute)
            .finish()
    }
}
