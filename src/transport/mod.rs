//! Transport seam: the verb set, the wire-level request/response pair, and
//! the trait any blocking HTTP layer implements.

pub mod request;
pub mod ureq_blocking;

use crate::error::Error;
use http::{HeaderMap, StatusCode};
use std::{fmt, str::FromStr, sync::Arc, time::Duration};
use url::Url;

/// The closed set of HTTP verbs the dispatcher routes.
///
/// Anything else fails with [`Error::UnsupportedMethod`] before any network
/// activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Delete,
    Patch,
}

impl Verb {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether the verb may carry a form-encoded request body.
    #[must_use]
    pub fn takes_body(self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = Error;

    /// Case-insensitive; `"get"` and `"GET"` are equivalent.
    fn from_str(s: &str) -> Result<Self, Error> {
        if s.eq_ignore_ascii_case("get") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("post") {
            Ok(Self::Post)
        } else if s.eq_ignore_ascii_case("delete") {
            Ok(Self::Delete)
        } else if s.eq_ignore_ascii_case("patch") {
            Ok(Self::Patch)
        } else {
            Err(Error::UnsupportedMethod { method: s.into() })
        }
    }
}

/// One fully-resolved outgoing request, ready for the wire.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub verb: Verb,
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Trait implemented by any blocking HTTP layer.
pub trait BlockingTransport: Send + Sync + 'static {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynBlockingTransport = Arc<dyn BlockingTransport>;

impl<T: BlockingTransport + ?Sized> BlockingTransport for Arc<T> {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req)
    }
}
