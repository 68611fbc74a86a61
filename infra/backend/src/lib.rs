//! # Backend Client
//!
//! Typed client for the external REST backend and the auth service.
//!
//! * Path segments are appended one by one and percent-encoded, so an id such as
//!   `"../users"` stays a single segment.
//! * Replies go through [`envelope::decode`]: `{ data, message }` envelopes are unwrapped,
//!   bare payloads are taken as-is.
//! * Non-2xx replies become [`BackendError::Status`] carrying the backend's message.
//! * Every request is sent with `Cache-Control: no-store`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fhub_backend::{BackendClient, BackendError};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), BackendError> {
//! let client = BackendClient::builder()
//!     .base_url("http://localhost:5000/api")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let orders: serde_json::Value =
//!     client.get(["orders", "me"]).cookie(Some("session=abc")).fetch().await?;
//! # Ok(())
//! # }
//! ```

pub mod envelope;
mod error;

pub use crate::envelope::Envelope;
pub use crate::error::{BackendError, BackendErrorExt};
pub use reqwest::{Method, Response, StatusCode, Url};

use crate::envelope::{error_message, parse_body};
use reqwest::header::{ACCEPT, CACHE_CONTROL, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct BackendClientInner {
    http: Client,
    base: Url,
}

/// Cheaply cloneable handle over one connection pool and base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

impl BackendClient {
    pub fn builder() -> BackendClientBuilder {
        BackendClientBuilder::default()
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base
    }

    /// Joins encoded `segments` onto the base URL.
    pub fn url<I, S>(&self, segments: I) -> Result<Url, BackendError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.inner.base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl {
                message: "base URL cannot carry a path".into(),
                context: Some(self.inner.base.to_string().into()),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get<I, S>(&self, segments: I) -> Call
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.request(Method::GET, segments)
    }

    pub fn post<I, S>(&self, segments: I) -> Call
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.request(Method::POST, segments)
    }

    pub fn patch<I, S>(&self, segments: I) -> Call
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.request(Method::PATCH, segments)
    }

    pub fn delete<I, S>(&self, segments: I) -> Call
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.request(Method::DELETE, segments)
    }

    pub fn request<I, S>(&self, method: Method, segments: I) -> Call
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.url(segments) {
            Ok(url) => self.request_url(method, url),
            Err(err) => Call { target: format!("{method} <invalid>"), builder: Err(err) },
        }
    }

    /// Starts a call to an already built URL (e.g. one carrying a forwarded query string).
    pub fn request_url(&self, method: Method, url: Url) -> Call {
        let target = format!("{method} {}", url.path());
        Call { target, builder: Ok(self.inner.http.request(method, url)) }
    }
}

#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct BackendClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl BackendClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// # Errors
    /// [`BackendError::InvalidUrl`] for a missing or unparsable base URL,
    /// [`BackendError::Transport`] if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<BackendClient, BackendError> {
        let raw = self.base_url.ok_or(BackendError::InvalidUrl {
            message: "base URL is required".into(),
            context: None,
        })?;
        let base = Url::parse(&raw).map_err(|e| BackendError::InvalidUrl {
            message: e.to_string().into(),
            context: Some(raw.clone().into()),
        })?;
        if base.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl {
                message: "base URL cannot carry a path".into(),
                context: Some(raw.into()),
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("Building HTTP client")?;

        Ok(BackendClient { inner: Arc::new(BackendClientInner { http, base }) })
    }
}

/// One outbound request under construction. Errors are deferred until it is sent.
#[must_use = "calls do nothing unless sent"]
pub struct Call {
    target: String,
    builder: Result<RequestBuilder, BackendError>,
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call").field("target", &self.target).finish_non_exhaustive()
    }
}

impl Call {
    /// Forwards the caller's `Cookie` header verbatim.
    pub fn cookie(self, cookie: Option<&str>) -> Self {
        match cookie {
            Some(raw) => self.header(COOKIE, raw),
            None => self,
        }
    }

    pub fn header(mut self, name: HeaderName, value: &str) -> Self {
        self.builder = self.builder.and_then(|builder| {
            let value = HeaderValue::from_str(value).map_err(|e| BackendError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Invalid value for header {name}").into()),
            })?;
            Ok(builder.header(name, value))
        });
        self
    }

    pub fn query<Q: Serialize + ?Sized>(mut self, query: &Q) -> Self {
        self.builder = self.builder.map(|builder| builder.query(query));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.builder = self.builder.map(|builder| builder.json(body));
        self
    }

    /// Raw body, for pass-through requests.
    pub fn body(mut self, body: impl Into<reqwest::Body>) -> Self {
        self.builder = self.builder.map(|builder| builder.body(body));
        self
    }

    /// Sends without inspecting the reply.
    pub async fn send(self) -> Result<Response, BackendError> {
        let response = self.builder?.send().await.map_err(|source| {
            warn!(target_call = %self.target, error = %source, "Backend call failed");
            BackendError::Transport { source, context: Some(self.target.clone().into()) }
        })?;
        debug!(target_call = %self.target, status = response.status().as_u16(), "Backend replied");
        Ok(response)
    }

    /// Sends and decodes the (possibly enveloped) payload.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<T, BackendError> {
        self.fetch_envelope().await.map(|envelope| envelope.data)
    }

    /// Like [`Call::fetch`] but keeps the envelope's `message`.
    pub async fn fetch_envelope<T: DeserializeOwned>(self) -> Result<Envelope<T>, BackendError> {
        let target = self.target.clone();
        let response = self.send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, target).await);
        }

        let bytes = response.bytes().await.context(target.clone())?;
        envelope::decode(parse_body(&bytes)?).context(target)
    }

    /// Sends and checks the status only; a successful body is discarded unread.
    pub async fn send_checked(self) -> Result<(), BackendError> {
        let target = self.target.clone();
        let response = self.send().await?;
        if response.status().is_success() {
            return Ok(());
        }
        Err(status_error(response, target).await)
    }
}

async fn status_error(response: Response, target: String) -> BackendError {
    let status = response.status().as_u16();
    let message = match response.bytes().await {
        Ok(bytes) => parse_body(&bytes).as_ref().map(error_message).unwrap_or_default(),
        Err(_) => String::new(),
    };
    BackendError::Status { status, message: message.into(), context: Some(target.into()) }
}
