use axum::routing::{MethodFilter, MethodRouter};
use frodo::prelude::*;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tower_http::trace::TraceLayer;

mod post_controller;

use post_controller::PostController;

/// Mount every action of `controller` at its conventional path, so actions
/// the controller does not override answer 405.
fn resource<C: CrudController>(controller: Arc<C>) -> Router {
    let mut paths: BTreeMap<&'static str, MethodRouter> = BTreeMap::new();
    for action in Action::iter() {
        let Ok(filter) = MethodFilter::try_from(action.method()) else {
            continue;
        };
        let route = paths.remove(action.path()).unwrap_or_default();
        paths.insert(
            action.path(),
            route.on_service(filter, controller.action_service(action)),
        );
    }

    paths
        .into_iter()
        .fold(Router::new(), |router, (path, route)| router.route(path, route))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting resource server...");

    // POSTS_MAX_TITLE_LEN=80 becomes the `max_title_len` attribute
    let attributes = Attributes::from_env("POSTS_");
    let posts = Arc::new(PostController::new(BaseController::with_attributes(
        attributes,
    )));

    let router = Router::new()
        .nest("/posts", resource(posts))
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    tracing::info!("Server running on http://{}", addr);

    if let Err(e) = axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Initiating graceful shutdown...");
        })
        .await
    {
        tracing::error!("Server error: {}", e);
    }

    tracing::info!("Server stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{self, Body};
    use axum::http::{Method, Request as HttpRequest};
    use tower::ServiceExt;

    fn app() -> Router {
        let attributes = Attributes::new();
        attributes.set("max_title_len", 8).unwrap();
        let posts = Arc::new(PostController::new(BaseController::with_attributes(
            attributes,
        )));
        Router::new().nest("/posts", resource(posts))
    }

    fn request(method: Method, uri: &str, body: &'static str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_store_then_show() {
        let app = app();

        let response = app
            .clone()
            .oneshot(request(Method::POST, "/posts", r#"{"title":"Hello"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(request(Method::GET, "/posts/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let post: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(post["title"], "Hello");

        let response = app
            .oneshot(request(Method::DELETE, "/posts/1", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_store_respects_title_attribute() {
        let response = app()
            .oneshot(request(Method::POST, "/posts", r#"{"title":"Far too long"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unsupported_actions_answer_405() {
        for (method, uri) in [
            (Method::GET, "/posts/create"),
            (Method::GET, "/posts/1/edit"),
            (Method::PUT, "/posts/1"),
            (Method::PATCH, "/posts/1"),
            (Method::OPTIONS, "/posts"),
            (Method::HEAD, "/posts"),
        ] {
            let response = app().oneshot(request(method, uri, "")).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        }
    }
}
