use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BarbicanError>;

/// Classification of an unsuccessful HTTP response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpErrorKind {
    /// 401 Unauthorized, the caller should re-authenticate
    Auth,
    /// 4xx other than 401
    Client,
    /// 5xx, or a response without a status code
    Server,
}

impl fmt::Display for HttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => write!(f, "auth error"),
            Self::Client => write!(f, "client error"),
            Self::Server => write!(f, "server error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct HttpError {
    pub kind: HttpErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum BarbicanError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Barbican request error: {0}")]
    Request(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl BarbicanError {
    /// Kind of the HTTP failure, if this error came from the classifier
    pub fn http_kind(&self) -> Option<HttpErrorKind> {
        match self {
            Self::Http(err) => Some(err.kind),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BarbicanError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = HttpError {
            kind: HttpErrorKind::Client,
            status: Some(404),
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "client error: Not Found");
    }

    #[test]
    fn test_http_kind_only_for_http_errors() {
        let err: BarbicanError = HttpError {
            kind: HttpErrorKind::Auth,
            status: Some(401),
            message: "denied".to_string(),
        }
        .into();
        assert_eq!(err.http_kind(), Some(HttpErrorKind::Auth));
        assert_eq!(BarbicanError::Config("x".to_string()).http_kind(), None);
    }
}
