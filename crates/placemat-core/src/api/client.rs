//! API client for the posts endpoint.
//!
//! This module provides the `ApiClient` struct for fetching the post
//! collection and, in remote delete mode, deleting individual posts.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::models::Post;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of posts returned by a fetch.
/// The upstream collection runs to a hundred records; ten keeps the list at
/// a screenful while preserving the server's ordering for those kept.
pub const MAX_POSTS: usize = 10;

/// API client for the posts endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given API host
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the post collection, capped at [`MAX_POSTS`] records in the
    /// order the server returned them.
    ///
    /// A failure is reported as-is; there is no retry here. Recovery belongs
    /// to the caller (in practice: a user-initiated refetch).
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, ApiError> {
        let url = format!("{}/posts", self.base_url);
        debug!(url = %url, "Fetching posts");

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;
        let text = response.text().await?;

        let posts = parse_posts(&text)?;
        debug!(count = posts.len(), "Fetched posts");
        Ok(posts)
    }

    /// Delete a post on the server.
    ///
    /// Only called when the configured delete mode is remote; local mode
    /// never touches the network for removals.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/posts/{}", self.base_url, id);
        debug!(url = %url, "Deleting post");

        let response = self.client.delete(&url).send().await?;
        Self::check_response(response).await?;
        Ok(())
    }

    /// Check response status and convert failures to typed errors
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "API request failed");
            Err(ApiError::from_status(status, &body))
        }
    }
}

/// Parse a JSON array of posts, truncating to [`MAX_POSTS`].
fn parse_posts(text: &str) -> Result<Vec<Post>, ApiError> {
    let mut posts: Vec<Post> = serde_json::from_str(text)
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse posts: {}", e)))?;
    posts.truncate(MAX_POSTS);
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_json(id: i64) -> String {
        format!(
            r#"{{"userId": 1, "id": {}, "title": "post {}", "body": "text {}"}}"#,
            id, id, id
        )
    }

    #[test]
    fn test_parse_posts_caps_at_limit() {
        let items: Vec<String> = (1..=25).map(post_json).collect();
        let json = format!("[{}]", items.join(","));

        let posts = parse_posts(&json).unwrap();

        assert_eq!(posts.len(), MAX_POSTS);
        // The cap drops the tail, never reorders the head.
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[MAX_POSTS - 1].id, 10);
    }

    #[test]
    fn test_parse_posts_short_collection() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "a", "body": "x"},
            {"userId": 1, "id": 2, "title": "b", "body": "y"}
        ]"#;

        let posts = parse_posts(json).unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "a");
        assert_eq!(posts[1].user_id, 1);
        assert_eq!(posts[1].body, "y");
    }

    #[test]
    fn test_parse_posts_rejects_malformed() {
        assert!(matches!(
            parse_posts("not json"),
            Err(ApiError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_posts(r#"{"posts": []}"#),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
