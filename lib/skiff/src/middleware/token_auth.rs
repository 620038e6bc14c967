//! Bearer token injection middleware.
//!
//! Requests flagged with [`Request::requires_auth`] get an
//! `Authorization: Bearer <token>` header from a [`TokenSource`]. When
//! the source has no token, the request is rejected with
//! [`Error::MissingToken`] before any network dispatch. Unflagged
//! requests pass through untouched.

use std::future::{self, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use tower::{Layer, Service};

use crate::{Error, Request, Response, Result};

/// Source of bearer tokens for authenticated requests.
///
/// The fetch layer does not own token storage; an application plugs in
/// whatever holds its session state.
pub trait TokenSource: Send + Sync {
    /// The current bearer token, if any.
    fn token(&self) -> Option<String>;
}

/// A fixed token, useful as a placeholder until a real token store
/// exists and for tests.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: Arc<str>,
}

impl StaticToken {
    /// Create a source that always returns the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }
}

impl TokenSource for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.token.to_string())
    }
}

/// A source with no token; authenticated requests always fail loudly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// Layer that injects bearer tokens into auth-flagged requests.
///
/// # Example
///
/// ```ignore
/// use skiff::middleware::{StaticToken, TokenAuthLayer};
/// use tower::ServiceBuilder;
///
/// let service = ServiceBuilder::new()
///     .layer(TokenAuthLayer::new(StaticToken::new("placeholder-token")))
///     .service(client);
/// ```
#[derive(Clone)]
pub struct TokenAuthLayer {
    source: Arc<dyn TokenSource>,
}

impl std::fmt::Debug for TokenAuthLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthLayer").finish_non_exhaustive()
    }
}

impl TokenAuthLayer {
    /// Create a new token auth layer with the given source.
    pub fn new(source: impl TokenSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Create a layer from a shared source.
    #[must_use]
    pub fn from_arc(source: Arc<dyn TokenSource>) -> Self {
        Self { source }
    }
}

impl<S> Layer<S> for TokenAuthLayer {
    type Service = TokenAuth<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TokenAuth {
            inner,
            source: Arc::clone(&self.source),
        }
    }
}

/// Service that injects bearer tokens into auth-flagged requests.
#[derive(Clone)]
pub struct TokenAuth<S> {
    inner: S,
    source: Arc<dyn TokenSource>,
}

impl<S> TokenAuth<S> {
    /// Create a new token auth service wrapping the given service.
    pub fn new(inner: S, source: impl TokenSource + 'static) -> Self {
        Self {
            inner,
            source: Arc::new(source),
        }
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for TokenAuth<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<S> Service<Request<Bytes>> for TokenAuth<S>
where
    S: Service<Request<Bytes>, Response = Response<Bytes>, Error = Error> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Bytes>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Bytes>) -> Self::Future {
        if request.requires_auth() {
            let Some(token) = self.source.token() else {
                // Cancel before dispatch; the caller gets a typed error
                // instead of a silently unsent request.
                return Box::pin(future::ready(Err(Error::MissingToken)));
            };
            request
                .headers_mut()
                .insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(request).await })
    }
}
