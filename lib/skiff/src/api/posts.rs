//! Posts resource API.

use serde::{Deserialize, Serialize};

use crate::api::ApiFailure;
use crate::{Fetcher, Result, encode_path_segment};

/// A blog post record; the wire contract with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier.
    pub id: u64,
    /// Author identifier.
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

/// Payload for creating a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Author identifier.
    pub user_id: u64,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
}

/// Partial update for a post.
///
/// Absent members serialize to null and are dropped from the request
/// body by the cleaner, so the backend only sees what changed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New body text, if changing.
    pub body: Option<String>,
}

/// Filters for listing posts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    /// Only posts by this author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    /// Only posts with these identifiers (one `id` parameter each).
    #[serde(rename = "id", skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<u64>,
}

/// Typed operations over the posts resource.
#[derive(Debug, Clone)]
pub struct PostsApi {
    fetcher: Fetcher,
}

impl PostsApi {
    /// Create the posts API over a shared fetcher.
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// List posts, optionally filtered.
    pub async fn list(&self, query: &ListPostsQuery) -> Result<Vec<Post>> {
        self.fetcher
            .get("/posts")
            .params(query)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Get one post by id.
    pub async fn get(&self, id: &str) -> Result<Post> {
        self.fetcher
            .get(format!("/posts/{}", encode_path_segment(id)))
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Create a post.
    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        self.fetcher
            .post("/posts")
            .authenticated()
            .json(post)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Partially update a post.
    pub async fn update(&self, id: &str, patch: &PostPatch) -> Result<Post> {
        self.fetcher
            .patch(format!("/posts/{}", encode_path_segment(id)))
            .authenticated()
            .json(patch)?
            .error_schema::<ApiFailure>()
            .fetch()
            .await
    }

    /// Delete a post.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.fetcher
            .delete(format!("/posts/{}", encode_path_segment(id)))
            .authenticated()
            .error_schema::<ApiFailure>()
            .send()
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::middleware::StaticToken;
    use crate::{Error, FetchConfig, RunMode};

    fn api_for(server: &MockServer) -> PostsApi {
        let config = FetchConfig::builder(server.uri())
            .mode(RunMode::Development)
            .build()
            .expect("config");
        let fetcher = Fetcher::builder(config)
            .token_source(StaticToken::new("test-token"))
            .build();
        PostsApi::new(fetcher)
    }

    fn sample_post() -> Post {
        Post {
            id: 42,
            user_id: 7,
            title: "hello".to_string(),
            body: "world".to_string(),
        }
    }

    #[tokio::test]
    async fn get_by_id_hits_the_post_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_post()))
            .mount(&server)
            .await;

        let post = api_for(&server).get("42").await.expect("post");

        assert_eq!(post, sample_post());
    }

    #[tokio::test]
    async fn list_with_user_filter() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("userId", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![sample_post()]))
            .mount(&server)
            .await;

        let posts = api_for(&server)
            .list(&ListPostsQuery {
                user_id: Some(7),
                ..ListPostsQuery::default()
            })
            .await
            .expect("posts");

        assert_eq!(posts.len(), 1);
        assert_eq!(posts.first().expect("first").id, 42);
    }

    #[tokio::test]
    async fn create_sends_bearer_token_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "userId": 7,
                "title": "hello",
                "body": "world",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(sample_post()))
            .mount(&server)
            .await;

        let post = api_for(&server)
            .create(&NewPost {
                user_id: 7,
                title: "hello".to_string(),
                body: "world".to_string(),
            })
            .await
            .expect("post");

        assert_eq!(post.id, 42);
    }

    #[tokio::test]
    async fn update_sends_only_changed_members() {
        let server = MockServer::start().await;

        // body is None, so the cleaned body carries only the title
        Mock::given(method("PATCH"))
            .and(path("/posts/42"))
            .and(body_json(serde_json::json!({"title": "updated"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(Post {
                title: "updated".to_string(),
                ..sample_post()
            }))
            .mount(&server)
            .await;

        let post = api_for(&server)
            .update(
                "42",
                &PostPatch {
                    title: Some("updated".to_string()),
                    body: None,
                },
            )
            .await
            .expect("post");

        assert_eq!(post.title, "updated");
    }

    #[tokio::test]
    async fn delete_returns_unit() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/posts/42"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        api_for(&server).delete("42").await.expect("deleted");
    }

    #[tokio::test]
    async fn mismatching_body_is_a_schema_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "nope"})),
            )
            .mount(&server)
            .await;

        let err = api_for(&server).get("42").await.expect_err("should fail");
        assert!(err.is_schema_validation(), "got: {err}");
    }

    #[tokio::test]
    async fn failure_body_enriches_the_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/posts/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": "not_found",
                "message": "no such post",
            })))
            .mount(&server)
            .await;

        let err = api_for(&server).get("42").await.expect_err("should fail");
        match err {
            Error::Http { status, message, .. } => {
                assert_eq!(status, 404);
                assert_eq!(message, "not_found: no such post");
            }
            other => panic!("expected HTTP error, got: {other}"),
        }
    }
}
