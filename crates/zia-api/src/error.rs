use thiserror::Error;

/// ZIA error code returned when an entity does not exist.
pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";

/// Top-level error type for the `zia-api` crate.
///
/// Covers every failure mode of the ZIA REST surface: session
/// authentication, transport, structured API errors, and payload decoding.
/// `zia-provider` maps these into provider diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, locked account, disabled API key).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The `JSESSIONID` session expired or was revoked.
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// The API key could not be obfuscated (too short or non-ASCII).
    #[error("Invalid API key: {reason}")]
    InvalidApiKey { reason: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Rate limited by the API. Includes retry-after in seconds.
    #[error("Rate limited -- retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    // ── API ─────────────────────────────────────────────────────────
    /// Structured error body returned by the ZIA API.
    #[error("ZIA API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A lookup by name or key matched nothing.
    #[error("{resource} '{identifier}' not found")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    ///
    /// ZIA signals missing entities either with HTTP 404 or with a
    /// `RESOURCE_NOT_FOUND` code in the error body.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Api { code, .. } => code.as_deref() == Some(RESOURCE_NOT_FOUND),
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if this error indicates the session has expired
    /// and logging in again might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::SessionExpired)
    }

    /// Extract the ZIA error code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_by_status() {
        let err = Error::Api {
            status: 404,
            code: None,
            message: "gone".into(),
        };
        assert!(err.is_not_found());
    }

    #[test]
    fn not_found_by_code() {
        let err = Error::Api {
            status: 400,
            code: Some(RESOURCE_NOT_FOUND.into()),
            message: "Resource does not exist".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.api_error_code(), Some(RESOURCE_NOT_FOUND));
    }

    #[test]
    fn duplicate_is_not_not_found() {
        let err = Error::Api {
            status: 409,
            code: Some("DUPLICATE_ITEM".into()),
            message: "exists".into(),
        };
        assert!(!err.is_not_found());
        assert!(!err.is_auth_expired());
    }

    #[test]
    fn lookup_miss_is_not_found() {
        let err = Error::NotFound {
            resource: "rule label",
            identifier: "missing".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "rule label 'missing' not found");
    }
}
