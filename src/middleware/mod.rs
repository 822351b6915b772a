//! Middleware layer.
//!
//! Middleware wraps the rest of the chain: it receives the request together
//! with a [`Next`] capability, decides when (and whether) to run the inner
//! stages, and may observe the outcome on the way back out.
//!
//! ```text
//! request ─▶ layer 0 ─▶ layer 1 ─▶ … ─▶ handler
//! response ◀─ layer 0 ◀─ layer 1 ◀─ … ◀─┘
//! ```
//!
//! Layers run in the order they were registered with
//! [`Router::layer`](crate::Router::layer).
//!
//! Built-in middleware:
//! - [`request_log`] — one log record per response, severity picked from
//!   the status code

pub mod request_log;

use crate::error::Error;
use crate::handler::{BoxFuture, ErasedHandler};
use crate::request::Request;
use crate::response::Response;

/// A composable stage of the request pipeline.
///
/// ```rust
/// use statuslog::middleware::{Middleware, Next};
/// use statuslog::{BoxFuture, Error, Request, Response, StatusCode};
///
/// struct RequireJson;
///
/// impl Middleware for RequireJson {
///     fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
///         Box::pin(async move {
///             if req.header("content-type") != Some("application/json") {
///                 return Ok(Response::status(StatusCode::UNSUPPORTED_MEDIA_TYPE));
///             }
///             next.run(req).await
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>>;
}

/// The remainder of the chain below the current middleware.
///
/// [`Next::run`] takes `self` by value, so a middleware can invoke the rest
/// of the chain at most once.
pub struct Next<'a> {
    endpoint: &'a (dyn ErasedHandler + Send + Sync),
    layers: &'a [Box<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(
        endpoint: &'a (dyn ErasedHandler + Send + Sync),
        layers: &'a [Box<dyn Middleware>],
    ) -> Self {
        Self { endpoint, layers }
    }

    /// Runs the remaining layers and the endpoint handler.
    pub async fn run(self, req: Request) -> Result<Response, Error> {
        match self.layers.split_first() {
            Some((layer, rest)) => layer.handle(req, Next::new(self.endpoint, rest)).await,
            None => self.endpoint.call(req).await,
        }
    }
}
