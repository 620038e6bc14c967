//! Tower middleware layers for the skiff fetch stack.
//!
//! Middleware are composable [`tower::Layer`]s applied to the HTTP
//! client: the before-request steps of the fetch lifecycle live here,
//! folded over the request left-to-right (first layer added processes
//! the request first).
//!
//! # Available Layers
//!
//! - [`TokenAuthLayer`] - Injects `Authorization: Bearer <token>` into
//!   auth-flagged requests; rejects them before dispatch when no token
//!   is available
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`, with
//!   error-kind tags on failures
//!
//! # Example
//!
//! ```ignore
//! use skiff::HyperClient;
//! use skiff::middleware::StaticToken;
//!
//! let client = HyperClient::builder()
//!     .with_logging()
//!     .with_token_auth(StaticToken::new("placeholder-token"))
//!     .build();
//! ```

mod logging;
mod token_auth;

pub use logging::{LogLevel, Logging, LoggingLayer};
pub use token_auth::{NoToken, StaticToken, TokenAuth, TokenAuthLayer, TokenSource};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
