//! Core types for the skiff data-fetching layer.
//!
//! This crate provides the foundational types used by skiff:
//! - [`Method`] - HTTP method enum
//! - [`Request`] and [`RequestBuilder`] - HTTP request types
//! - [`Response`] - HTTP response type
//! - [`Query`] and [`QueryValue`] - ordered query parameter mapping
//! - [`Error`], [`ErrorKind`] and [`Result`] - Error handling
//! - [`HttpClient`] - Core client trait for HTTP execution
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod client;
mod error;
mod method;
pub mod prelude;
mod query;
mod request;
mod response;

pub use body::{clean_json, from_json, to_clean_json, to_json};
pub use client::HttpClient;
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use query::{Query, QueryValue};
pub use request::{Request, RequestBuilder};
pub use response::Response;

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
