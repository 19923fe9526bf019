use frodo::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Posts resource. Supports listing, creating, showing and deleting; every
/// other action keeps the 405 default.
pub struct PostController {
    base: BaseController,
    posts: RwLock<BTreeMap<u64, Post>>,
    next_id: AtomicU64,
}

impl PostController {
    pub fn new(base: BaseController) -> Self {
        Self {
            base,
            posts: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn max_title_len(&self) -> usize {
        self.base
            .get_as::<usize>("max_title_len")
            .ok()
            .flatten()
            .unwrap_or(120)
    }
}

fn parse_id(request: &Request) -> Option<u64> {
    request.param("id")?.parse().ok()
}

#[async_trait]
impl CrudController for PostController {
    async fn index(&self, _request: Request) -> Response {
        let posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        Json(posts).into_response()
    }

    async fn store(&self, request: Request) -> Response {
        let new_post: NewPost = match request.json().await {
            Ok(new_post) => new_post,
            Err(e) => return e.into_response(),
        };
        if new_post.title.len() > self.max_title_len() {
            return (StatusCode::UNPROCESSABLE_ENTITY, "title too long").into_response();
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let post = Post {
            id,
            title: new_post.title,
            body: new_post.body,
        };
        self.posts.write().await.insert(id, post.clone());
        tracing::info!(id, "post stored");
        (StatusCode::CREATED, Json(post)).into_response()
    }

    async fn show(&self, request: Request) -> Response {
        let Some(id) = parse_id(&request) else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        match self.posts.read().await.get(&id) {
            Some(post) => Json(post.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn destroy(&self, request: Request) -> Response {
        let Some(id) = parse_id(&request) else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        match self.posts.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(id, "post destroyed");
                StatusCode::NO_CONTENT.into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
