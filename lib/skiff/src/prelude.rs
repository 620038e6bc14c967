//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use skiff::prelude::*;
//! ```

pub use crate::{
    Error, ErrorKind, FetchConfig, Fetcher, HttpClient, HyperClient, Method, Query, QueryValue,
    Request, RequestBuilder, Response, Result, RunMode, StatusCode, from_json, to_clean_json,
    to_json,
};
pub use serde::{Deserialize, Serialize};
