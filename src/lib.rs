//! # Frodo
//!
//! REST base controllers for axum applications.
//!
//! A controller is a bundle of handlers, one per REST verb-action. Every
//! handler defaults to `405 Method Not Allowed`; application controllers
//! override the ones their resource supports and inherit the rest.
//!
//! ## Features
//!
//! - **CrudController**: Index, Create, Store, Show, Edit, Update, Patch, Destroy, Head and Options with 405 defaults
//! - **Middleware hook**: `next` receives the request as its first argument
//! - **Attributes**: shared, serde-typed attribute bag seeded from the environment
//! - **Tower integration**: mount any action with `Router::route_service`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use frodo::prelude::*;
//! use std::sync::Arc;
//!
//! // 1. Define your controller
//! #[derive(Default)]
//! pub struct PostController {
//!     base: BaseController,
//! }
//!
//! // 2. Override the actions you support
//! #[async_trait]
//! impl CrudController for PostController {
//!     async fn index(&self, _request: Request) -> Response {
//!         Json(vec!["hello", "world"]).into_response()
//!     }
//! }
//!
//! // 3. Mount it
//! #[tokio::main]
//! async fn main() {
//!     let posts = Arc::new(PostController::default());
//!     let app: Router = Router::new()
//!         .route_service("/posts", posts.action_service(Action::Index));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod attributes;
pub mod controller;
pub mod error;
pub mod request;

// Re-export core types
pub use attributes::Attributes;
pub use controller::{
    Action, ActionService, BaseController, CrudController, IntoActionService, NextArgs,
    method_not_allowed,
};
pub use error::{FrodoError, Result};
pub use request::Request;

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use frodo::prelude::*;
/// ```
pub mod prelude {
    pub use crate::attributes::Attributes;
    pub use crate::controller::{
        Action, ActionService, BaseController, CrudController, IntoActionService, NextArgs,
        method_not_allowed,
    };
    pub use crate::error::{FrodoError, Result};
    pub use crate::request::Request;
    pub use async_trait::async_trait;
    pub use axum::{
        Json, Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
