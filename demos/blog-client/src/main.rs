//! Blog Client Demo
//!
//! Demonstrates the skiff fetch layer against a JSONPlaceholder-style
//! blog backend.

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use skiff::api::{ListPostsQuery, NewPost, PostsApi};
use skiff::middleware::StaticToken;
use skiff::prelude::*;

#[tokio::main]
async fn main() -> skiff::Result<()> {
    tracing_subscriber::fmt::init();

    // Explicit configuration; SKIFF_BASE_URL / SKIFF_MODE override the
    // defaults when set.
    let config = match FetchConfig::from_env() {
        Ok(config) => config,
        Err(_) => FetchConfig::builder("https://jsonplaceholder.typicode.com")
            .mode(RunMode::Development)
            .build()?,
    };

    println!("Base URL: {}", config.base_url);

    let fetcher = Fetcher::builder(config)
        .token_source(StaticToken::new("placeholder-token"))
        .build();

    let posts = PostsApi::new(fetcher);

    // List posts by one author
    let by_author = posts
        .list(&ListPostsQuery {
            user_id: Some(1),
            ..ListPostsQuery::default()
        })
        .await?;
    println!("posts by user 1: {}", by_author.len());

    // Get one post; the body is validated against the Post schema
    let post = posts.get("42").await?;
    println!("post 42: {}", post.title);

    // Create a post; the call carries the bearer token
    let created = posts
        .create(&NewPost {
            user_id: 1,
            title: "hello from skiff".to_string(),
            body: "written through the fetch layer".to_string(),
        })
        .await?;
    println!("created post {}", created.id);

    Ok(())
}
