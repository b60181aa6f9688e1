// ── Provider error types ──
//
// Operations surface two runtime kinds: "not found", which resource reads
// turn into state removal, and everything else, which aborts the operation.

use std::fmt;

use thiserror::Error;

/// A schema or configuration problem tied to an attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Dotted attribute path, e.g. `locations.0.id`.
    pub path: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Unified error type for the provider crate.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Error returned by the ZIA API client, surfaced verbatim.
    #[error(transparent)]
    Api(#[from] zia_api::Error),

    #[error("invalid configuration: {}", join_diagnostics(.0))]
    Validation(Vec<Diagnostic>),

    #[error("missing required attribute '{attribute}'")]
    MissingAttribute { attribute: String },

    #[error("invalid value for '{attribute}': {reason}")]
    InvalidAttribute { attribute: String, reason: String },

    #[error("invalid resource ID '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    #[error("{kind} '{identifier}' not found")]
    NotFound {
        kind: &'static str,
        identifier: String,
    },

    /// The entity was created but reading it back found nothing.
    #[error("{kind} '{id}' was created but could not be read back")]
    MissingAfterCreate { kind: &'static str, id: String },

    #[error("resource type '{type_name}' does not support import by name")]
    NotImportable { type_name: String },

    #[error("unknown resource or data source type '{type_name}'")]
    UnknownResource { type_name: String },
}

impl ProviderError {
    /// Returns `true` for lookups that matched nothing, locally or remotely.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api(e) => e.is_not_found(),
            _ => false,
        }
    }

    pub(crate) fn invalid(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

fn join_diagnostics(diags: &[Diagnostic]) -> String {
    diags
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_every_diagnostic() {
        let err = ProviderError::Validation(vec![
            Diagnostic::new("name", "required attribute is missing"),
            Diagnostic::new("", "bad block"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: name: required attribute is missing; bad block"
        );
    }

    #[test]
    fn api_not_found_passes_through() {
        let err = ProviderError::from(zia_api::Error::Api {
            status: 404,
            code: None,
            message: "gone".into(),
        });
        assert!(err.is_not_found());
        assert!(!ProviderError::invalid("x", "y").is_not_found());
    }
}
