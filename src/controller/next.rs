use crate::error::{FrodoError, Result};
use crate::request::Request;
use std::any::Any;
use std::fmt;

/// Argument list handed to [`CrudController::next`](super::CrudController::next).
///
/// Arguments are type-erased. By convention the first one is the
/// [`Request`] being passed down the chain.
#[derive(Default)]
pub struct NextArgs {
    args: Vec<Box<dyn Any + Send>>,
}

impl NextArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request(request: Request) -> Self {
        Self::new().push(request)
    }

    pub fn push<T: Any + Send>(mut self, arg: T) -> Self {
        self.args.push(Box::new(arg));
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.args.get(index)?.downcast_ref::<T>()
    }

    pub fn request(&self) -> Result<&Request> {
        self.get::<Request>(0).ok_or(FrodoError::MissingRequest)
    }

    /// Remove the request from the front of the list.
    pub fn take_request(&mut self) -> Result<Request> {
        if self.get::<Request>(0).is_none() {
            return Err(FrodoError::MissingRequest);
        }
        self.args
            .remove(0)
            .downcast::<Request>()
            .map(|request| *request)
            .map_err(|_| FrodoError::MissingRequest)
    }
}

impl fmt::Debug for NextArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NextArgs").field("len", &self.args.len()).finish()
    }
}
