//! Error types for skiff.

use derive_more::{Display, Error, From};

// ============================================================================
// Error Kind
// ============================================================================

/// Categorical tag for a failed fetch, used by the error hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// A body failed schema validation.
    #[display("type_error")]
    Schema,
    /// The backend answered with a failure status.
    #[display("server_error")]
    Server,
    /// The request was cancelled or timed out.
    #[display("abort_error")]
    Abort,
    /// Transport-level failure; no response was received.
    #[display("transport_error")]
    Transport,
    /// Authentication was required but no token was available.
    #[display("auth_error")]
    Auth,
    /// The request could not be constructed.
    #[display("request_error")]
    Request,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for skiff operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Failure status from the backend (non-2xx).
    #[display("HTTP error {status}: {message}")]
    #[from(skip)]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message, possibly enriched by a decoded error body.
        message: String,
        /// Response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// A response body failed schema validation.
    #[display("schema validation error at '{path}': {message}")]
    #[from(skip)]
    SchemaValidation {
        /// JSON path to the mismatch (e.g. "posts[2].title").
        path: String,
        /// Validation diagnostic.
        message: String,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Authentication was required but no bearer token was available.
    ///
    /// The request is aborted before any network dispatch.
    #[display("authentication required but no token available")]
    #[from(skip)]
    MissingToken,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an HTTP error from status code and message.
    #[must_use]
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create an HTTP error with body.
    #[must_use]
    pub fn http_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::Http {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a schema validation error with path context.
    #[must_use]
    pub fn schema_validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Categorize this error for the error hooks.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http { .. } => ErrorKind::Server,
            Self::SchemaValidation { .. } => ErrorKind::Schema,
            Self::Timeout => ErrorKind::Abort,
            Self::MissingToken => ErrorKind::Auth,
            Self::Connection(_) | Self::Tls(_) => ErrorKind::Transport,
            Self::InvalidRequest(_)
            | Self::JsonSerialization(_)
            | Self::QuerySerialization(_)
            | Self::InvalidUrl(_) => ErrorKind::Request,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns `true` if this is a schema validation error.
    #[must_use]
    pub const fn is_schema_validation(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. })
    }

    /// Returns the HTTP status code if this is an HTTP error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns the response body if this is an HTTP error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::Http { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the HTTP error body against an error schema.
    ///
    /// Returns `Some(Ok(value))` if the error has a body matching the
    /// schema, `Some(Err(error))` if the body exists but does not match,
    /// or `None` if there is no body or this is not an HTTP error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");

        let err = Error::Timeout;
        assert_eq!(err.to_string(), "request timeout");

        let err = Error::MissingToken;
        assert_eq!(
            err.to_string(),
            "authentication required but no token available"
        );

        let err = Error::schema_validation("post.title", "missing field `title`");
        assert_eq!(
            err.to_string(),
            "schema validation error at 'post.title': missing field `title`"
        );
    }

    #[test]
    fn error_kind_taxonomy() {
        assert_eq!(Error::http(500, "oops").kind(), ErrorKind::Server);
        assert_eq!(
            Error::schema_validation("p", "m").kind(),
            ErrorKind::Schema
        );
        assert_eq!(Error::Timeout.kind(), ErrorKind::Abort);
        assert_eq!(Error::MissingToken.kind(), ErrorKind::Auth);
        assert_eq!(Error::connection("refused").kind(), ErrorKind::Transport);
        assert_eq!(
            Error::invalid_request("bad header").kind(),
            ErrorKind::Request
        );
    }

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Schema.to_string(), "type_error");
        assert_eq!(ErrorKind::Server.to_string(), "server_error");
        assert_eq!(ErrorKind::Abort.to_string(), "abort_error");
    }

    #[test]
    fn error_status() {
        let err = Error::http(404, "Not Found");
        assert_eq!(err.status(), Some(404));
        assert!(err.is_client_error());
        assert!(err.is_not_found());
        assert!(!err.is_server_error());

        let err = Error::http(503, "Service Unavailable");
        assert!(err.is_server_error());

        assert_eq!(Error::Timeout.status(), None);
    }

    #[test]
    fn error_body() {
        let err = Error::http(404, "Not Found");
        assert!(err.body().is_none());

        let body = bytes::Bytes::from(r#"{"error":"not found"}"#);
        let err = Error::http_with_body(404, "Not Found", body.clone());
        assert_eq!(err.body(), Some(&body));
    }

    #[test]
    fn error_decode_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct ApiFailure {
            error: String,
        }

        let body = bytes::Bytes::from(r#"{"error":"not found"}"#);
        let err = Error::http_with_body(404, "Not Found", body);

        let decoded = err
            .decode_body::<ApiFailure>()
            .expect("has body")
            .expect("matches schema");
        assert_eq!(decoded.error, "not found");

        assert!(Error::http(404, "Not Found").decode_body::<ApiFailure>().is_none());
        assert!(Error::Timeout.decode_body::<ApiFailure>().is_none());
    }
}
