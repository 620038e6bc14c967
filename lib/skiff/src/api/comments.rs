//! Comments resource API.

use serde::{Deserialize, Serialize};

use crate::api::ApiFailure;
use crate::{Fetcher, Result, encode_path_segment};

/// A comment on a post; the wire contract with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment identifier.
    pub id: u64,
    /// Post this comment belongs to.
    pub post_id: u64,
    /// Commenter display name.
    pub name: String,
    /// Commenter email address.
    pub email: String,
    /// Comment text.
    pub body: String,
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Post to attach the comment to.
    pub post_id: u64,
    /// Commenter display name.
    pub name: String,
    /// Commenter email address.
    pub email: String,
    /// Comment text.
    pub body: String,
}

/// Partial update for a comment; absent members are dropped from the
/// request body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    /// New comment text, if changing.
    pub body: Option<String>,
}

/// Filters for listing comments.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Only comments on this post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
}

/// Typed operations over the comments resource.
#[derive(Debug, Clone)]
pub struct CommentsApi {
    fetcher: Fetcher,
}

impl CommentsApi {
    /// Create the comments API over a shared fetcher.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// List comments, optionally filtered.
    pub async fn list(&self, query: &ListCommentsQuery) -> Result<Vec<Comment>> {
        self.fetcher
            .get("/comments")
            .params(query)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Get one comment by id.
    pub async fn get(&self, id: &str) -> Result<Comment> {
        self.fetcher
            .get(format!("/comments/{}", encode_path_segment(id)))
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Create a comment.
    pub async fn create(&self, comment: &NewComment) -> Result<Comment> {
        self.fetcher
            .post("/comments")
            .authenticated()
            .json(comment)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Partially update a comment.
    pub async fn update(&self, id: &str, patch: &CommentPatch) -> Result<Comment> {
        self.fetcher
            .patch(format!("/comments/{}", encode_path_segment(id)))
            .authenticated()
            .json(patch)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.fetcher
            .delete(format!("/comments/{}", encode_path_segment(id)))
            .authenticated()
            .error_schema::<ApiFailure>()
            .send()
            .await?;
        Ok(())
    }
}
