use crate::Error;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

/// Header carrying the static API credential on every request.
pub(crate) const TOKEN_HEADER: HeaderName = HeaderName::from_static("x-chatworktoken");

#[derive(Clone, Default, Eq, PartialEq)]
pub struct SecretString(String);

impl SecretString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Static Chatwork API token, sent as `x-chatworktoken`.
///
/// Immutable for the lifetime of the [`crate::Client`] that holds it.
#[derive(Clone, Debug)]
pub struct ApiToken {
    token: SecretString,
}

impl ApiToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token),
        }
    }

    pub(crate) fn secret(&self) -> &str {
        self.token.expose()
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), Error> {
        let value =
            HeaderValue::from_str(self.token.expose()).map_err(|err| Error::InvalidConfig {
                message: "API token is not a valid header value".into(),
                source: Some(Box::new(err)),
            })?;
        headers.insert(TOKEN_HEADER, value);
        Ok(())
    }
}
