//! Error types for the Freshdesk client.
//!
//! This module defines `FreshdeskError`, the unified error type returned by
//! every client operation.
//!
//! # Classification
//!
//! - [`FreshdeskError::Transport`]: the request never reached the server or
//!   the response could not be read. Treat as transient/unknown.
//! - [`FreshdeskError::Api`]: the server answered with a status other than
//!   the one the operation expects. The body is kept verbatim.
//! - [`FreshdeskError::NotFound`]: an email search matched no contact.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Freshdesk operations.
#[derive(Error, Debug)]
pub enum FreshdeskError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request could not be sent or its response could not be read
    /// (DNS, connection refused, timeout, truncated body).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with an unexpected status code.
    ///
    /// `body` is the raw response text. Freshdesk usually sends a JSON error
    /// envelope here; it is not parsed.
    #[error("API error (HTTP {status}): {body}")]
    Api {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The response body, exactly as received.
        body: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No contact matched an email search.
    #[error("contact not found: {email}")]
    NotFound {
        /// The email address that was searched for.
        email: String,
    },

    /// Reading a local attachment file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl FreshdeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FreshdeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FreshdeskError::Config(message.into())
    }

    /// Creates an API error from a status and raw body.
    pub fn api(status: StatusCode, body: impl Into<String>) -> Self {
        FreshdeskError::Api {
            status,
            body: body.into(),
        }
    }

    /// Creates a not found error for an email search.
    pub fn not_found(email: impl Into<String>) -> Self {
        FreshdeskError::NotFound {
            email: email.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        FreshdeskError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns the HTTP status for API errors.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FreshdeskError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body for API errors.
    ///
    /// This is the server's text unchanged, suitable for further parsing
    /// when structured detail is needed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            FreshdeskError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if an email search matched nothing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, FreshdeskError::NotFound { .. })
    }

    /// Returns true if the request never completed a round trip.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, FreshdeskError::Transport(_))
    }
}
