use thiserror::Error;

pub mod configuration;
pub mod default_api;

/// Error type for API calls.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("Error response (status {status}): {body}")]
    ResponseError { status: u16, body: String },

    /// The query is still executing on the hosting service.
    #[error("query not ready (status {status})")]
    NotReady { status: String },

    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl Error {
    /// Transport failures, server-side errors and unfinished queries may
    /// succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Reqwest(e) => !e.is_decode() && !e.is_builder(),
            Error::ResponseError { status, .. } => *status == 429 || *status >= 500,
            Error::NotReady { .. } => true,
            Error::Serde(_) | Error::InvalidUrl(_) | Error::QueryFailed(_) => false,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_error_display_and_source() {
        let err = Error::ResponseError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Error response (status 502): bad gateway");
        assert!(err.source().is_none());

        let err = Error::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(err.to_string().starts_with("serde error: "));
        assert!(err.source().is_some());

        let err = Error::from(url::Url::parse("no scheme").unwrap_err());
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(!err.is_retryable());
    }
}
