use crate::transport::Verb;
use http::StatusCode;
use std::{error::Error as StdError, fmt};
use thiserror::Error;
use url::Url;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    UnsupportedMethod,
    Transport,
    Api,
    Decode,
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Other,
}

/// A completed HTTP exchange whose status fell outside `[200, 300)`.
///
/// Carries the fully-constructed request URL and the response body text
/// (credential occurrences redacted); write operations additionally carry
/// the encoded form body.
#[derive(Debug, Clone)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub verb: Verb,
    pub url: Box<Url>,
    pub body: Box<str>,
    /// URL-form-encoded request body, present for write operations.
    pub form: Option<Box<str>>,
}

impl ApiFailure {
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} ({} {})", self.status, self.verb, self.url)?;
        if !self.body.is_empty() {
            write!(f, ": {}", self.body)?;
        }
        if let Some(form) = self.form.as_deref() {
            write!(f, " [form: {form}]")?;
        }
        Ok(())
    }
}

/// All errors returned by the SDK.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Verb not in {GET, POST, DELETE, PATCH}; raised before any I/O.
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: Box<str> },

    /// Network-level failure (DNS, connect, TLS, timeout).
    #[error("Transport error during {verb} {path}: {source}")]
    Transport {
        verb: Verb,
        path: Box<str>,
        kind: TransportErrorKind,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Non-2xx HTTP response.
    #[error("{0}")]
    Api(ApiFailure),

    #[error("Decode error (HTTP {status}) during {verb} {path}: {source}")]
    Decode {
        status: StatusCode,
        verb: Verb,
        path: Box<str>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedMethod { .. } => ErrorKind::UnsupportedMethod,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Api(_) => ErrorKind::Api,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(failure) => Some(failure.status),
            Self::Decode { status, .. } => Some(*status),
            Self::UnsupportedMethod { .. }
            | Self::Transport { .. }
            | Self::InvalidConfig { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(form: Option<&str>) -> ApiFailure {
        ApiFailure {
            status: StatusCode::NOT_FOUND,
            verb: Verb::Get,
            url: Box::new(Url::parse("https://api.chatwork.com/v2/rooms/9").unwrap()),
            body: "room not found".into(),
            form: form.map(Into::into),
        }
    }

    #[test]
    fn api_failure_display_includes_status_url_and_body() {
        let text = failure(None).to_string();
        assert_eq!(
            text,
            "HTTP 404 Not Found (GET https://api.chatwork.com/v2/rooms/9): room not found"
        );
    }

    #[test]
    fn api_failure_display_appends_form_for_writes() {
        let text = failure(Some("self_unread=0&body=hi")).to_string();
        assert!(text.ends_with("[form: self_unread=0&body=hi]"));
    }

    #[test]
    fn kind_and_status_accessors() {
        let err = Error::Api(failure(None));
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

        let err = Error::UnsupportedMethod {
            method: "PUT".into(),
        };
        assert_eq!(err.kind(), ErrorKind::UnsupportedMethod);
        assert_eq!(err.status(), None);
    }
}
