use super::Verb;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

/// A logical API request: verb, endpoint path segments, parameters.
///
/// Each builder call receives its own fresh containers; nothing is shared
/// between requests.
#[derive(Clone, Debug)]
pub struct Request {
    pub verb: Verb,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    /// `None` means the dispatcher injects the default credential header.
    /// `Some` headers are sent verbatim, replacing the default entirely.
    pub headers: Option<HeaderMap>,
}

impl Request {
    #[must_use]
    pub fn new<I, S>(verb: Verb, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            verb,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            form: Vec::new(),
            headers: None,
        }
    }

    #[must_use]
    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::Get, segments)
    }

    #[must_use]
    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Verb::Post, segments)
    }

    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn form_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn form_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.form
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Replace the default credential header with an explicit header set.
    ///
    /// The dispatcher sends these verbatim; callers must include the
    /// `x-chatworktoken` header themselves.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// A classified 2xx response: status, raw body, decode-on-demand JSON.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl ApiResponse {
    /// `204 No Content`: the body is absent and must not be JSON-decoded.
    #[must_use]
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
