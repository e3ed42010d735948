//! Post records as served by the remote API.

use serde::{Deserialize, Serialize};

/// A post as it appears on the wire.
///
/// `body` exists only at the fetch boundary; it is dropped when a collection
/// enters the query cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// The cached projection of a [`Post`]: everything except `body`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostSummary {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
}

impl From<Post> for PostSummary {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
        }
    }
}
