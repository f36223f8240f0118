//! High-level blocking Chatwork client.

use crate::{
    api,
    auth::ApiToken,
    error::{ApiFailure, Error},
    transport::{
        BlockingTransport, DynBlockingTransport, TransportRequest, Verb,
        request::{ApiResponse, Request},
        ureq_blocking::UreqBlocking,
    },
    util::{
        redact::redact_text,
        url::{encode_form, endpoint_url, normalize_base_url, url_with_query},
    },
};
use http::{HeaderMap, HeaderValue, header::ACCEPT};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

/// Chatwork v2 API root. Endpoints are path fragments relative to this.
pub const DEFAULT_BASE_URL: &str = "https://api.chatwork.com/v2/";

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`Client`].
pub struct ClientBuilder {
    base_url: String,
    token: ApiToken,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
    no_proxy: bool,
    transport: Option<DynBlockingTransport>,
}

impl ClientBuilder {
    fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: ApiToken::new(token),
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            no_proxy: false,
            transport: None,
        }
    }

    /// Override the API root, e.g. to point at a test server.
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Per-request timeout. Fixed once built; there is no per-call override.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    /// Swap out the underlying transport.
    pub fn transport<T: BlockingTransport>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<Client, Error> {
        let base = normalize_base_url(&self.base_url)?;

        let transport: DynBlockingTransport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqBlocking::try_new(
                self.insecure,
                &self.user_agent,
                self.timeout,
                self.connect_timeout,
                self.read_timeout,
                self.no_proxy,
            )?),
        };

        Ok(Client {
            inner: Arc::new(Inner {
                base,
                token: self.token,
                timeout: self.timeout,
                transport,
            }),
        })
    }
}

/// The request dispatcher.
///
/// Holds only immutable configuration (base URL, credential, transport)
/// behind an `Arc`, so clones are cheap and concurrent use needs no locking.
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    token: ApiToken,
    timeout: Duration,
    transport: DynBlockingTransport,
}

impl Client {
    pub fn builder(token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(token)
    }

    /// Quick path: default base URL and transport settings.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        Self::builder(token).build()
    }

    #[must_use]
    pub fn rooms(&self) -> api::RoomsService {
        api::RoomsService::new(self.clone())
    }

    /// Dispatch one HTTP call from its string-level description.
    ///
    /// `method` is case-insensitive and must be one of GET/POST/DELETE/PATCH;
    /// anything else fails with [`Error::UnsupportedMethod`] before any
    /// network activity. `endpoint` is a path fragment relative to the base
    /// URL (`rooms/123/messages`), never a full URL. `query` is appended to
    /// the URL for all verbs; `form` is sent URL-form-encoded as the body on
    /// POST/PATCH and ignored otherwise. `headers == None` injects the
    /// default `x-chatworktoken` header; explicit headers are sent verbatim
    /// with no merging.
    pub fn invoke(
        &self,
        method: &str,
        endpoint: &str,
        query: &[(&str, &str)],
        form: &[(&str, &str)],
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse, Error> {
        let verb: Verb = method.parse()?;
        let mut req = Request::new(verb, endpoint.split('/').filter(|s| !s.is_empty()));
        req.query = query
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        req.form = form
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        req.headers = headers;
        self.execute_request(&req)
    }

    /// Headers the resource layer attaches explicitly: `Accept` plus the
    /// credential, carrying the same token value the default path injects.
    pub(crate) fn resource_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        self.inner.token.apply(&mut headers)?;
        Ok(headers)
    }

    pub(crate) fn send_json<T: DeserializeOwned>(&self, req: Request) -> Result<T, Error> {
        let resp = self.execute_request(&req)?;
        self.decode(&req, &resp)
    }

    /// Like [`Self::send_json`], but a `204 No Content` yields `Ok(None)`
    /// instead of a decode attempt on the absent body.
    pub(crate) fn send_json_opt<T: DeserializeOwned>(
        &self,
        req: Request,
    ) -> Result<Option<T>, Error> {
        let resp = self.execute_request(&req)?;
        if resp.is_no_content() {
            return Ok(None);
        }
        self.decode(&req, &resp).map(Some)
    }

    fn decode<T: DeserializeOwned>(&self, req: &Request, resp: &ApiResponse) -> Result<T, Error> {
        resp.json().map_err(|source| Error::Decode {
            status: resp.status,
            verb: req.verb,
            path: req.segments.join("/").into_boxed_str(),
            source: Box::new(source),
        })
    }

    pub(crate) fn execute_request(&self, req: &Request) -> Result<ApiResponse, Error> {
        let url = endpoint_url(&self.inner.base, req.segments.iter().map(|s| s.as_str()))?;

        let headers = match &req.headers {
            Some(custom) => custom.clone(),
            None => {
                let mut headers = HeaderMap::new();
                self.inner.token.apply(&mut headers)?;
                headers
            }
        };

        #[cfg(feature = "tracing")]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "chatwork.request",
            http.method = %req.verb,
            http.host = %self.inner.base.host_str().unwrap_or_default(),
            http.path = %url.path(),
            http.status = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        // Exactly one transport call per invocation. The query pairs travel
        // to the transport's own query mechanism; the pre-joined URL carries
        // only the path.
        let resp = match self.inner.transport.send(TransportRequest {
            verb: req.verb,
            url: url.clone(),
            headers,
            query: req.query.clone(),
            form: req.form.clone(),
            timeout: self.inner.timeout,
        }) {
            Ok(resp) => resp,
            Err(err) => {
                #[cfg(feature = "tracing")]
                {
                    span.record("error_kind", field::debug(err.kind()));
                    span.record("latency_ms", start.elapsed().as_millis() as i64);
                }
                return Err(err);
            }
        };

        #[cfg(feature = "tracing")]
        {
            span.record("http.status", resp.status.as_u16() as i64);
            span.record("latency_ms", start.elapsed().as_millis() as i64);
        }

        if !resp.status.is_success() {
            let body = redact_text(
                String::from_utf8_lossy(&resp.body).into_owned(),
                self.inner.token.secret(),
            );
            let form = (req.verb.takes_body() && !req.form.is_empty())
                .then(|| encode_form(&req.form).into_boxed_str());

            let err = Error::Api(ApiFailure {
                status: resp.status,
                verb: req.verb,
                url: Box::new(url_with_query(&url, &req.query)),
                body: body.into_boxed_str(),
                form,
            });
            #[cfg(feature = "tracing")]
            span.record("error_kind", field::debug(err.kind()));
            return Err(err);
        }

        Ok(ApiResponse {
            status: resp.status,
            headers: resp.headers,
            body: String::from_utf8_lossy(&resp.body).into_owned(),
        })
    }
}
