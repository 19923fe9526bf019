use crate::error::{FrodoError, Result};
use axum::body::{Body, Bytes};
use axum::extract::FromRequest;
use axum::http::{Extensions, HeaderMap, Method, StatusCode, Uri};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Request object handed to every controller handler.
///
/// Wraps the underlying axum request together with the path parameters the
/// application's router captured for it.
#[derive(Debug)]
pub struct Request {
    inner: axum::extract::Request,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(inner: axum::extract::Request) -> Self {
        Self {
            inner,
            params: HashMap::new(),
        }
    }

    pub fn with_params(mut self, params: HashMap<String, String>) -> Self {
        self.params = params;
        self
    }

    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    pub fn extensions(&self) -> &Extensions {
        self.inner.extensions()
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Path parameter captured by the router, e.g. `id` for `/posts/{id}`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn into_inner(self) -> axum::extract::Request {
        self.inner
    }

    /// Collect the whole body, honouring any `DefaultBodyLimit` set by the
    /// router (2 MB when none is set).
    pub async fn bytes(self) -> Result<Bytes> {
        Bytes::from_request(self.inner, &())
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    FrodoError::PayloadTooLarge(rejection.body_text())
                } else {
                    FrodoError::Body(rejection.body_text())
                }
            })
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).map_err(FrodoError::InvalidJson)
    }
}

impl From<axum::extract::Request> for Request {
    fn from(inner: axum::extract::Request) -> Self {
        Self::new(inner)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new(axum::extract::Request::new(Body::empty()))
    }
}
