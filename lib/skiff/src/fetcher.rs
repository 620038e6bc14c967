//! The fetch wrapper.
//!
//! [`Fetcher`] closes over a configured client and base URL;
//! [`FetchBuilder`] carries the per-call options (auth flag, query,
//! body, error schema) and drives one request through the before /
//! after / error steps of the fetch lifecycle.
//!
//! # Example
//!
//! ```ignore
//! let fetcher = Fetcher::builder(config)
//!     .token_source(StaticToken::new("placeholder-token"))
//!     .build();
//!
//! let post: Post = fetcher
//!     .get("/posts/42")
//!     .error_schema::<ApiFailure>()
//!     .fetch()
//!     .await?;
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;
use url::Url;

use crate::{
    Error, HttpClient, HyperClient, Method, Query, Request, Response, Result,
    config::{FetchConfig, RunMode},
    middleware::{NoToken, TokenAuthLayer, TokenSource},
};

/// Characters percent-encoded when interpolating a path segment.
///
/// Everything but unreserved characters, so `/`, `?`, `#`, spaces and
/// friends cannot break out of their segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a value for use as a single path segment.
///
/// # Example
///
/// ```
/// use skiff::encode_path_segment;
///
/// assert_eq!(encode_path_segment("42"), "42");
/// assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
/// ```
#[must_use]
pub fn encode_path_segment(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, PATH_SEGMENT).into()
}

type ErrorDecoderFn = Box<dyn Fn(&Bytes) -> Result<String> + Send + Sync>;

/// Fetch wrapper combining a client, a base URL, and a run mode.
///
/// Cheap to clone; one `Fetcher` is shared by all resource API modules
/// of an application.
#[derive(Debug)]
pub struct Fetcher<C = HyperClient> {
    client: C,
    base_url: Url,
    mode: RunMode,
}

impl<C: Clone> Clone for Fetcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            mode: self.mode,
        }
    }
}

impl Fetcher {
    /// Create a fetcher with the default middleware stack.
    ///
    /// Equivalent to `Fetcher::builder(config).build()`.
    #[must_use]
    pub fn new(config: FetchConfig) -> Self {
        Self::builder(config).build()
    }

    /// Create a new fetcher builder.
    #[must_use]
    pub fn builder(config: FetchConfig) -> FetcherBuilder {
        FetcherBuilder {
            config,
            token_source: None,
            client: None,
        }
    }
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a fetcher over a pre-built client.
    #[must_use]
    pub fn with_client(client: C, config: FetchConfig) -> Self {
        Self {
            client,
            base_url: config.base_url,
            mode: config.mode,
        }
    }

    /// Base URL paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run mode of this fetcher.
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        self.mode
    }

    /// Start a request for the given method and path.
    pub fn request(&self, method: Method, path: impl Into<String>) -> FetchBuilder<'_, C> {
        FetchBuilder {
            fetcher: self,
            method,
            path: path.into(),
            authenticated: false,
            query: Query::new(),
            body: None,
            error_decoder: None,
        }
    }

    /// Start a GET request.
    pub fn get(&self, path: impl Into<String>) -> FetchBuilder<'_, C> {
        self.request(Method::Get, path)
    }

    /// Start a POST request.
    pub fn post(&self, path: impl Into<String>) -> FetchBuilder<'_, C> {
        self.request(Method::Post, path)
    }

    /// Start a PUT request.
    pub fn put(&self, path: impl Into<String>) -> FetchBuilder<'_, C> {
        self.request(Method::Put, path)
    }

    /// Start a PATCH request.
    pub fn patch(&self, path: impl Into<String>) -> FetchBuilder<'_, C> {
        self.request(Method::Patch, path)
    }

    /// Start a DELETE request.
    pub fn delete(&self, path: impl Into<String>) -> FetchBuilder<'_, C> {
        self.request(Method::Delete, path)
    }

    /// Resolve a path against the base URL.
    fn join_url(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        if self.base_url.path().ends_with('/') {
            self.base_url.join(relative).map_err(Error::InvalidUrl)
        } else {
            // Url::join would otherwise drop the last base path segment
            let base = Url::parse(&format!("{}/", self.base_url)).map_err(Error::InvalidUrl)?;
            base.join(relative).map_err(Error::InvalidUrl)
        }
    }
}

/// Builder for [`Fetcher`] with the default middleware stack.
///
/// The assembled client logs every request (debug detail in development
/// mode) and injects bearer tokens from the configured [`TokenSource`].
/// Without a token source, auth-flagged calls fail with
/// [`Error::MissingToken`].
pub struct FetcherBuilder {
    config: FetchConfig,
    token_source: Option<Arc<dyn TokenSource>>,
    client: Option<HyperClient>,
}

impl std::fmt::Debug for FetcherBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetcherBuilder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FetcherBuilder {
    /// Set the bearer token source for authenticated calls.
    #[must_use]
    pub fn token_source(mut self, source: impl TokenSource + 'static) -> Self {
        self.token_source = Some(Arc::new(source));
        self
    }

    /// Use a custom client instead of assembling the default stack.
    ///
    /// The client is used as-is; the token source, if any, is ignored.
    #[must_use]
    pub fn client(mut self, client: HyperClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the fetcher.
    #[must_use]
    pub fn build(self) -> Fetcher {
        let FetchConfig {
            base_url,
            mode,
            client: client_config,
        } = self.config;

        let client = self.client.unwrap_or_else(|| {
            let source = self
                .token_source
                .unwrap_or_else(|| Arc::new(NoToken));
            let builder = HyperClient::builder().config(client_config);
            let builder = if mode.is_development() {
                builder.with_debug_logging()
            } else {
                builder.with_logging()
            };
            builder.layer(TokenAuthLayer::from_arc(source)).build()
        });

        Fetcher {
            client,
            base_url,
            mode,
        }
    }
}

/// Per-call options and lifecycle for one fetch.
///
/// Every option is independently skippable: an unset option leaves its
/// lifecycle step inert.
pub struct FetchBuilder<'a, C = HyperClient> {
    fetcher: &'a Fetcher<C>,
    method: Method,
    path: String,
    authenticated: bool,
    query: Query,
    body: Option<Bytes>,
    error_decoder: Option<ErrorDecoderFn>,
}

impl<C: HttpClient> FetchBuilder<'_, C> {
    /// Flag this call as requiring a bearer token.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Attach query parameters, merged after any already present.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query.extend(query);
        self
    }

    /// Attach a single query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<crate::QueryValue>) -> Self {
        self.query.push(key, value);
        self
    }

    /// Attach query parameters from a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn params<T: serde::Serialize>(self, params: &T) -> Result<Self> {
        let query = Query::from_params(params)?;
        Ok(self.query(query))
    }

    /// Attach a JSON body.
    ///
    /// The top-level mapping is cleaned first: null and empty-string
    /// members are dropped before encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(crate::to_clean_json(body)?);
        Ok(self)
    }

    /// Declare the error schema for failure responses.
    ///
    /// A failure body matching the schema enriches the resulting
    /// [`Error::Http`] message; a mismatch is logged (development mode)
    /// and falls back to the status line, best effort.
    #[must_use]
    pub fn error_schema<E>(mut self) -> Self
    where
        E: serde::de::DeserializeOwned + std::fmt::Display + 'static,
    {
        self.error_decoder = Some(Box::new(|body| {
            skiff_core::from_json::<E>(body).map(|decoded| decoded.to_string())
        }));
        self
    }

    /// Dispatch the request and return the raw response on success
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on failure status (message enriched by a
    /// decoded error body, when an error schema is declared), or the
    /// transport/middleware error unchanged.
    pub async fn send(self) -> Result<Response<Bytes>> {
        let mode = self.fetcher.mode;

        let mut url = self.fetcher.join_url(&self.path)?;
        // Query attachment: inert when nothing renders.
        self.query.append_to(&mut url);

        let mut builder = Request::builder(self.method, url)
            .header("Accept", "application/json")
            .require_auth(self.authenticated);
        if let Some(body) = self.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }
        let request = builder.build();

        let response = match self.fetcher.client.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                // Error hooks: classify and pass through unchanged.
                debug!(kind = %err.kind(), error = %err, "fetch failed");
                return Err(err);
            }
        };

        if response.is_success() {
            return Ok(response);
        }

        let (status, _headers, body) = response.into_parts();
        let message = match &self.error_decoder {
            Some(decode) => match decode(&body) {
                Ok(message) => message,
                Err(err) => {
                    if mode.is_development() {
                        debug!(status, error = %err, "error body failed schema validation");
                    }
                    status_reason(status)
                }
            },
            None => status_reason(status),
        };
        Err(Error::http_with_body(status, message, body))
    }

    /// Dispatch the request and validate the response body against the
    /// success schema `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] when the body does not match
    /// `T`, in addition to the failure modes of [`Self::send`].
    pub async fn fetch<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        let mode = self.fetcher.mode;
        let response = self.send().await?;
        response.json().map_err(|err| {
            if mode.is_development() {
                if let Error::SchemaValidation { path, message } = &err {
                    debug!(path = %path, message = %message, "response body failed schema validation");
                }
            }
            err
        })
    }
}

/// Canonical reason phrase for a status code.
fn status_reason(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("HTTP error")
        .to_string()
}
