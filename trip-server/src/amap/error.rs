//! AMap client error types.

use std::fmt;

use crate::provider::ProviderError;

/// Infocodes AMap uses for a rejected or misconfigured key.
const UNAUTHORIZED_INFOCODES: &[&str] = &[
    "10001", "10002", "10005", "10006", "10007", "10009", "10010", "10012", "10013",
];

/// Infocodes AMap uses for quota and QPS limits.
const RATE_LIMIT_INFOCODES: &[&str] = &[
    "10003", "10004", "10014", "10019", "10020", "10021", "10044", "10045",
];

/// Errors from the AMap HTTP client.
#[derive(Debug)]
pub enum AmapError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// Non-success HTTP status
    ApiError { status: u16, message: String },

    /// HTTP 200 with `status: "0"` (v3) or a non-zero `errcode` (v4)
    Service { infocode: String, info: String },

    /// Quota or QPS limit reached
    RateLimited,

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl AmapError {
    /// Classify an in-body error by its infocode.
    pub fn from_infocode(infocode: impl Into<String>, info: impl Into<String>) -> Self {
        let infocode = infocode.into();
        if UNAUTHORIZED_INFOCODES.contains(&infocode.as_str()) {
            AmapError::Unauthorized
        } else if RATE_LIMIT_INFOCODES.contains(&infocode.as_str()) {
            AmapError::RateLimited
        } else {
            AmapError::Service {
                infocode,
                info: info.into(),
            }
        }
    }
}

impl fmt::Display for AmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmapError::Http(e) => write!(f, "HTTP error: {e}"),
            AmapError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            AmapError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            AmapError::Service { infocode, info } => {
                write!(f, "AMap error {infocode}: {info}")
            }
            AmapError::RateLimited => write!(f, "rate limited by AMap"),
            AmapError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for AmapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmapError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AmapError {
    fn from(err: reqwest::Error) -> Self {
        AmapError::Http(err)
    }
}

impl From<AmapError> for ProviderError {
    fn from(err: AmapError) -> Self {
        match err {
            AmapError::Http(e) => ProviderError::Http(e.to_string()),
            AmapError::Json { .. } => ProviderError::Json {
                message: err.to_string(),
            },
            AmapError::ApiError { status, message } => ProviderError::Api { status, message },
            AmapError::Service { infocode, info } => ProviderError::Api {
                status: 200,
                message: format!("{infocode}: {info}"),
            },
            AmapError::RateLimited => ProviderError::RateLimited,
            AmapError::Unauthorized => ProviderError::Unauthorized,
        }
    }
}
