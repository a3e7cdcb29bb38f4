use thiserror::Error;

/// Result type alias for Lemur operations
pub type Result<T> = std::result::Result<T, LemurError>;

/// Errors that can occur while reconciling certificates against Lemur
#[derive(Error, Debug)]
pub enum LemurError {
    /// The connection could not be established or the transport deadline passed
    #[error("transport error: {0}")]
    Transport(String),

    /// The API answered with anything other than 200
    #[error("HTTP request error ({code}): {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Raw response body
        body: String,
    },

    /// The response body was not valid JSON or lacked a required field
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A search yielded no active match
    #[error("not found: {resource}")]
    NotFound {
        /// Description of what was searched for
        resource: String,
    },

    /// Certificate issuance was rejected
    #[error("certificate issuance failed ({code}): {body}")]
    Issuance {
        /// HTTP status code
        code: u16,
        /// Raw response body
        body: String,
    },

    /// Certificate export was rejected
    #[error("certificate export failed ({code}): {body}")]
    Export {
        /// HTTP status code
        code: u16,
        /// Raw response body
        body: String,
    },

    /// The desired certificate lacks the identity required for a lookup
    #[error("invalid certificate spec: {0}")]
    InvalidSpec(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The operation has no counterpart in Lemur
    #[error("{0} is not supported for issued certificates")]
    Unsupported(&'static str),
}

impl From<serde_json::Error> for LemurError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl LemurError {
    /// Create a not-found error for the given resource description
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Returns true if a search came back empty
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status code if the server rejected the request
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } | Self::Issuance { code, .. } | Self::Export { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// Returns the raw response body if the server rejected the request
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Issuance { body, .. } | Self::Export { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// Re-tag a status error raised by the issuance endpoint
    #[must_use]
    pub fn into_issuance(self) -> Self {
        match self {
            Self::Status { code, body } => Self::Issuance { code, body },
            other => other,
        }
    }

    /// Re-tag a status error raised by the export endpoint
    #[must_use]
    pub fn into_export(self) -> Self {
        match self {
            Self::Status { code, body } => Self::Export { code, body },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_details_survive_retagging() {
        let err = LemurError::Status {
            code: 400,
            body: "{\"message\": \"bad owner\"}".into(),
        };
        let issuance = err.into_issuance();
        assert!(matches!(issuance, LemurError::Issuance { code: 400, .. }));
        assert_eq!(issuance.status_code(), Some(400));
        assert_eq!(issuance.raw_body(), Some("{\"message\": \"bad owner\"}"));
    }

    #[test]
    fn retagging_leaves_other_errors_alone() {
        let err = LemurError::Transport("connection refused".into()).into_export();
        assert!(matches!(err, LemurError::Transport(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: LemurError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, LemurError::Decode(_)));
    }

    #[test]
    fn not_found_helper() {
        let err = LemurError::not_found("certificate named svc-a");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found: certificate named svc-a");
    }
}
