//! HTTP client trait.
//!
//! [`HttpClient`] is the seam between the fetch wrapper and the actual
//! network stack. The wrapper only ever talks to this trait, so tests
//! and alternative transports can slot in their own implementation.

use std::future::Future;

use bytes::Bytes;

use crate::{Request, Response, Result};

/// Core HTTP client trait.
///
/// Implementations should be async-first and support connection pooling.
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Middleware rejection (e.g. missing bearer token)
    fn execute(
        &self,
        request: Request<Bytes>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}
