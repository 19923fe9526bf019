use crate::controller::{Action, CrudController};
use crate::request::Request;
use axum::extract::{FromRequestParts, Path};
use axum::response::Response;
use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;

/// A single controller action exposed as a tower [`Service`].
///
/// Mount it on the application's own router:
///
/// ```rust,no_run
/// use frodo::prelude::*;
/// use std::sync::Arc;
///
/// let posts = Arc::new(BaseController::new());
/// let app: Router = Router::new()
///     .route_service("/posts/{id}", posts.action_service(Action::Show));
/// ```
pub struct ActionService<C: ?Sized> {
    controller: Arc<C>,
    action: Action,
}

impl<C: ?Sized> ActionService<C> {
    pub fn new(controller: Arc<C>, action: Action) -> Self {
        Self { controller, action }
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

impl<C: ?Sized> Clone for ActionService<C> {
    fn clone(&self) -> Self {
        Self {
            controller: Arc::clone(&self.controller),
            action: self.action,
        }
    }
}

impl<C> Service<axum::extract::Request> for ActionService<C>
where
    C: CrudController + ?Sized,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: axum::extract::Request) -> Self::Future {
        let controller = Arc::clone(&self.controller);
        let action = self.action;

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();
            // Empty when the service is called outside a router.
            let params = Path::<HashMap<String, String>>::from_request_parts(&mut parts, &())
                .await
                .map(|Path(params)| params)
                .unwrap_or_default();
            let request =
                Request::new(axum::extract::Request::from_parts(parts, body)).with_params(params);

            let method = request.method().clone();
            let uri = request.uri().clone();
            let response = action.dispatch(controller.as_ref(), request).await;

            tracing::debug!(
                action = %action,
                method = %method,
                uri = %uri,
                status = %response.status(),
                "controller action handled"
            );
            Ok(response)
        })
    }
}

/// Build [`ActionService`]s from a shared controller.
pub trait IntoActionService<C: ?Sized> {
    fn action_service(&self, action: Action) -> ActionService<C>;
}

impl<C> IntoActionService<C> for Arc<C>
where
    C: CrudController + ?Sized,
{
    fn action_service(&self, action: Action) -> ActionService<C> {
        ActionService::new(Arc::clone(self), action)
    }
}
