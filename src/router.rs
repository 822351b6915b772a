//! Radix-tree request router with a middleware stack.
//!
//! One tree per HTTP method. O(path-length) lookup. Every request, matched
//! or not, travels through the same middleware stack, so a 404 is observed
//! by the logging layer exactly like a 200.

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each builder call returns `self` so registrations chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    layers: Vec<Box<dyn Middleware>>,
    fallback: BoxedHandler,
}

async fn not_found(_req: Request) -> StatusCode {
    StatusCode::NOT_FOUND
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            layers: Vec::new(),
            fallback: not_found.into_boxed_handler(),
        }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use statuslog::{Method, Request, Response, Router};
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// # async fn create_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::GET,  "/users/{id}", get_user)
    ///     .on(Method::POST, "/users",      create_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Append a middleware. The first layer added is the outermost.
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Box::new(middleware));
        self
    }

    /// Replace the handler used when no route matches (default: `404`).
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = handler.into_boxed_handler();
        self
    }

    /// Routes `req` and runs it through the middleware stack.
    ///
    /// An `Err` is a failure that no layer turned into a response.
    pub async fn call(&self, mut req: Request) -> Result<Response, Error> {
        let endpoint = match self.lookup(req.method(), req.path()) {
            Some((handler, params)) => {
                req.params = params;
                handler
            }
            None => Arc::clone(&self.fallback),
        };
        Next::new(&*endpoint, &self.layers).run(req).await
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}
