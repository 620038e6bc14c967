//! Resource API modules built on the fetch wrapper.
//!
//! Each module declares the record schema for one backend resource and
//! wires the five standard operations (list, get, create, update,
//! delete) through a shared [`crate::Fetcher`]. Nothing here does more
//! than interpolate parameters and pick schemas.

mod comments;
mod posts;

pub use comments::{Comment, CommentPatch, CommentsApi, ListCommentsQuery, NewComment};
pub use posts::{ListPostsQuery, NewPost, Post, PostPatch, PostsApi};

/// Error payload shape the backend returns on failure responses.
///
/// Declared as the error schema by every resource module; a failure
/// body matching it turns into the `Error::Http` message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ApiFailure {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable detail, when the backend provides one.
    #[serde(default)]
    pub message: Option<String>,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}
