//! Chatwork-SDK – a blocking client for the Chatwork v2 REST API.
//!
//! The crate is split into a request-dispatch core ([`Client`]) and a thin
//! resource layer ([`api::RoomsService`]) built on top of it. The dispatcher
//! turns a `(verb, endpoint, params)` triple into exactly one HTTP call,
//! injects the `x-chatworktoken` credential header, and classifies the
//! response: 2xx comes back as an [`ApiResponse`], everything else as
//! [`Error::Api`].

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub(crate) mod util;

pub use auth::{ApiToken, SecretString};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{ApiFailure, Error, ErrorKind, Result, TransportErrorKind};
pub use transport::request::{ApiResponse, Request};
pub use transport::{BlockingTransport, TransportRequest, TransportResponse, Verb};
pub use types::*;
