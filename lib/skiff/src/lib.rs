//! Schema-validating data-fetching layer for Rust applications.
//!
//! Skiff wraps an HTTP client behind a small fetch lifecycle: bearer
//! token injection, query-string and JSON-body serialization before
//! dispatch, and schema validation of success and error bodies after.
//! Resource API modules declare one schema per record and wire plain
//! async operations on top.
//!
//! # Example
//!
//! ```ignore
//! use skiff::prelude::*;
//! use skiff::api::PostsApi;
//! use skiff::middleware::StaticToken;
//!
//! let config = FetchConfig::builder("https://api.example.com")
//!     .mode(RunMode::Development)
//!     .build()?;
//! let fetcher = Fetcher::builder(config)
//!     .token_source(StaticToken::new("placeholder-token"))
//!     .build();
//!
//! let posts = PostsApi::new(fetcher);
//! let post = posts.get("42").await?;
//! ```

pub mod api;
mod client;
mod config;
mod fetcher;
pub mod middleware;
pub mod prelude;

// Re-export client types
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, FetchConfig, FetchConfigBuilder, RunMode};
pub use fetcher::{FetchBuilder, Fetcher, FetcherBuilder, encode_path_segment};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use skiff_core::{
    Error, ErrorKind, HttpClient, Method, Query, QueryValue, Request, RequestBuilder, Response,
    Result, clean_json, from_json, to_clean_json, to_json,
};

// Re-export http types for status codes and headers
pub use skiff_core::{StatusCode, header};

// Re-export url for constructing base URLs
pub use url;
