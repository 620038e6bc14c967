//! HTTP request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query
//! parameters, and bodies.
//!
//! # Example
//!
//! ```
//! use skiff_core::{Request, Method};
//! use bytes::Bytes;
//!
//! let request = Request::<Bytes>::builder(Method::Get, "https://api.example.com/posts".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("userId", "7")
//!     .build();
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{Method, Query};

/// An HTTP request with method, URL, headers, and optional body.
///
/// The `requires_auth` flag marks requests that must carry a bearer
/// token; the token-injection middleware reads it before dispatch.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    requires_auth: bool,
}

impl<B> Request<B> {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: url::Url) -> RequestBuilder<B> {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Whether this request must carry a bearer token.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
    requires_auth: bool,
}

impl<B> RequestBuilder<B> {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: None,
            requires_auth: false,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends an ordered [`Query`] mapping to the URL.
    ///
    /// Empty values are skipped; repeated values render one parameter
    /// per element.
    #[must_use]
    pub fn query_map(mut self, query: &Query) -> Self {
        query.append_to(&mut self.url);
        self
    }

    /// Marks the request as requiring a bearer token.
    #[must_use]
    pub fn require_auth(mut self, required: bool) -> Self {
        self.requires_auth = required;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request<B> {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            requires_auth: self.requires_auth,
        }
    }
}

impl RequestBuilder<Bytes> {
    /// Set a JSON body.
    ///
    /// The top-level mapping is cleaned first: null and empty-string
    /// members are dropped before encoding.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_clean_json(value)?;
        Ok(self.header("Content-Type", "application/json").body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_basic() {
        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        let request = Request::<Bytes>::builder(Method::Get, url.clone())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/posts");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_none());
        assert!(!request.requires_auth());
    }

    #[test]
    fn request_builder_with_query() {
        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        let request = Request::<Bytes>::builder(Method::Get, url)
            .query("userId", "7")
            .query("page", "1")
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/posts?userId=7&page=1"
        );
    }

    #[test]
    fn request_builder_with_query_map() {
        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        let query = Query::new().with("tags", vec!["a", "b"]).with("draft", "");
        let request = Request::<Bytes>::builder(Method::Get, url)
            .query_map(&query)
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/posts?tags=a&tags=b"
        );
    }

    #[test]
    fn request_builder_require_auth() {
        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        let request = Request::<Bytes>::builder(Method::Post, url)
            .require_auth(true)
            .build();

        assert!(request.requires_auth());
    }

    #[test]
    fn request_builder_json_cleans_body() {
        #[derive(serde::Serialize)]
        struct NewPost {
            title: String,
            subtitle: Option<String>,
        }

        let url = url::Url::parse("https://api.example.com/posts").expect("valid URL");
        let request = Request::builder(Method::Post, url)
            .json(&NewPost {
                title: "hello".to_string(),
                subtitle: None,
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body().map(Bytes::as_ref),
            Some(br#"{"title":"hello"}"#.as_slice())
        );
    }
}
