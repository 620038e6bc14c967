//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions
//! for easy glob importing:
//!
//! ```ignore
//! use skiff_core::prelude::*;
//! ```

pub use crate::{
    Error, ErrorKind, HttpClient, Method, Query, QueryValue, Request, RequestBuilder, Response,
    Result, clean_json, from_json, to_clean_json, to_json,
};
