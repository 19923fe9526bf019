//! REST controllers.
//!
//! [`CrudController`] names one handler per verb-action pair. Every handler
//! defaults to `405 Method Not Allowed`, so a controller only implements the
//! actions its resource supports.
//!
//! ```rust
//! use frodo::prelude::*;
//!
//! #[derive(Default)]
//! pub struct PostController {
//!     base: BaseController,
//! }
//!
//! #[async_trait]
//! impl CrudController for PostController {
//!     async fn show(&self, request: frodo::Request) -> Response {
//!         let id = request.param("id").unwrap_or_default().to_string();
//!         Json(serde_json::json!({ "id": id })).into_response()
//!     }
//! }
//! ```

use crate::attributes::Attributes;
use crate::request::Request;
use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::ops::Deref;

mod action;
mod next;
mod service;

pub use action::Action;
pub use next::NextArgs;
pub use service::{ActionService, IntoActionService};

/// Body written by every unhandled action.
pub const METHOD_NOT_ALLOWED_TEXT: &str = "Method Not Allowed";

/// Build the default `405 Method Not Allowed` response.
pub fn method_not_allowed() -> Response {
    let mut response =
        (StatusCode::METHOD_NOT_ALLOWED, format!("{METHOD_NOT_ALLOWED_TEXT}\n")).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response
}

fn unhandled(action: Action, request: &Request) -> Response {
    tracing::debug!(
        action = %action,
        method = %request.method(),
        uri = %request.uri(),
        "no handler for action, responding 405"
    );
    method_not_allowed()
}

/// The REST controller contract.
///
/// Any type implementing this trait can be mounted as a controller. All
/// methods have defaults, so `impl CrudController for MyController {}` is a
/// valid controller that rejects everything with 405.
#[async_trait]
pub trait CrudController: Send + Sync + 'static {
    /// Also serves as the fallback for root routes (`/`).
    /// * GET /posts
    async fn index(&self, request: Request) -> Response {
        unhandled(Action::Index, &request)
    }

    /// Show the form for creating a new resource.
    /// * GET /posts/create
    async fn create(&self, request: Request) -> Response {
        unhandled(Action::Create, &request)
    }

    /// Store a newly created resource.
    /// * POST /posts
    async fn store(&self, request: Request) -> Response {
        unhandled(Action::Store, &request)
    }

    /// Display the specified resource.
    /// * GET /posts/{id}
    async fn show(&self, request: Request) -> Response {
        unhandled(Action::Show, &request)
    }

    /// Show the form for editing the specified resource.
    /// * GET /posts/{id}/edit
    async fn edit(&self, request: Request) -> Response {
        unhandled(Action::Edit, &request)
    }

    /// Update the specified resource.
    /// * PUT /posts/{id}
    async fn update(&self, request: Request) -> Response {
        unhandled(Action::Update, &request)
    }

    /// Partial alternative to `update`.
    /// * PATCH /posts/{id}
    async fn patch(&self, request: Request) -> Response {
        unhandled(Action::Patch, &request)
    }

    /// Remove the specified resource.
    /// * DELETE /posts/{id}
    async fn destroy(&self, request: Request) -> Response {
        unhandled(Action::Destroy, &request)
    }

    async fn head(&self, request: Request) -> Response {
        unhandled(Action::Head, &request)
    }

    async fn options(&self, request: Request) -> Response {
        unhandled(Action::Options, &request)
    }

    /// Hand control to the next handler in a middleware chain.
    ///
    /// The request travels as the first argument, see [`NextArgs::request`].
    /// Does nothing unless overridden.
    async fn next(&self, _args: NextArgs) {}
}

/// Controller that handles nothing.
///
/// Application controllers hold one to carry [`Attributes`] and implement
/// [`CrudController`] for the actions they support.
#[derive(Debug, Clone, Default)]
pub struct BaseController {
    pub attributes: Attributes,
}

impl BaseController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl Deref for BaseController {
    type Target = Attributes;

    fn deref(&self) -> &Self::Target {
        &self.attributes
    }
}

impl CrudController for BaseController {}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{self, Body};
    use axum::http::Method;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use strum::IntoEnumIterator;

    #[derive(Default)]
    struct PostController {
        base: BaseController,
        shown: AtomicUsize,
    }

    #[async_trait]
    impl CrudController for PostController {
        async fn show(&self, request: Request) -> Response {
            self.shown.fetch_add(1, Ordering::SeqCst);
            let id = request.param("id").unwrap_or("none").to_string();
            (StatusCode::OK, id).into_response()
        }
    }

    /// Records the request it was handed through `next`.
    #[derive(Default)]
    struct ChainController {
        seen: tokio::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CrudController for ChainController {
        async fn next(&self, mut args: NextArgs) {
            if let Ok(request) = args.take_request() {
                self.seen.lock().await.push(request.uri().to_string());
            }
        }
    }

    fn request_for(action: Action) -> Request {
        axum::extract::Request::builder()
            .method(action.method())
            .uri("/posts")
            .body(Body::empty())
            .unwrap()
            .into()
    }

    async fn body_text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_base_controller_rejects_every_action() {
        let controller = BaseController::new();

        for action in Action::iter() {
            let response = action.dispatch(&controller, request_for(action)).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{action}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "text/plain; charset=utf-8"
            );
            assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
            assert_eq!(body_text(response).await, "Method Not Allowed\n");
        }
    }

    #[tokio::test]
    async fn test_override_keeps_other_defaults() {
        let controller = PostController::default();

        for action in Action::iter().filter(|a| *a != Action::Show) {
            let response = action.dispatch(&controller, request_for(action)).await;
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{action}");
        }
        assert_eq!(controller.shown.load(Ordering::SeqCst), 0);

        let request = request_for(Action::Show)
            .with_params([("id".to_string(), "42".to_string())].into_iter().collect());
        let response = Action::Show.dispatch(&controller, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "42");
        assert_eq!(controller.shown.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let controllers: Vec<Arc<dyn CrudController>> = vec![
            Arc::new(BaseController::new()),
            Arc::new(PostController::default()),
        ];

        let mut statuses = Vec::new();
        for controller in &controllers {
            let response = Action::Show
                .dispatch(controller.as_ref(), request_for(Action::Show))
                .await;
            statuses.push(response.status());
        }
        assert_eq!(statuses, vec![StatusCode::METHOD_NOT_ALLOWED, StatusCode::OK]);
    }

    #[tokio::test]
    async fn test_default_next_is_noop() {
        let controller = BaseController::new();
        controller.next(NextArgs::new()).await;
        controller.next(NextArgs::with_request(Request::default())).await;
        assert!(controller.attributes().is_empty());
    }

    #[tokio::test]
    async fn test_overridden_next_receives_request() {
        let controller = ChainController::default();
        let request: Request = axum::extract::Request::builder()
            .method(Method::GET)
            .uri("/posts/7")
            .body(Body::empty())
            .unwrap()
            .into();

        controller.next(NextArgs::with_request(request)).await;
        controller.next(NextArgs::new()).await;

        assert_eq!(*controller.seen.lock().await, vec!["/posts/7".to_string()]);
    }

    #[test]
    fn test_base_controller_exposes_attributes() {
        let attributes = Attributes::new();
        attributes.set("layout", "admin").unwrap();
        let controller = PostController {
            base: BaseController::with_attributes(attributes),
            ..Default::default()
        };

        assert_eq!(
            controller.base.get_as::<String>("layout").unwrap().as_deref(),
            Some("admin")
        );
    }
}
