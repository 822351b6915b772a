//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in one table, so each
//! handler is hidden behind a trait object (`dyn ErasedHandler`):
//!
//! ```text
//! async fn hello(req: Request) -> Response { … }   ← user writes this
//!        ↓ router.on(Method::GET, "/", hello)
//! hello.into_boxed_handler()                       ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(hello))                       ← stored as BoxedHandler
//!        ↓
//! handler.call(req)  at request time               ← one vtable dispatch
//! ```
//!
//! A handler is the innermost stage of the middleware chain. Whatever it
//! returns is normalised to `Result<Response, Error>` so that middleware can
//! tell a produced response apart from a failed handler.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future.
///
/// `Pin<Box<…>>` lets the runtime poll it in place; `Send` lets tokio move it
/// across worker threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture<'static, Result<Response, Error>>;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Handler output ────────────────────────────────────────────────────────────

/// What a handler may return: anything response-like, or a `Result` whose
/// error is a downstream failure.
///
/// ```rust
/// use statuslog::{Error, Request, Response};
///
/// async fn load(_req: Request) -> Result<Response, Error> {
///     Err(Error::handler("database unavailable"))
/// }
/// ```
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Response, Error>;
}

impl<R: IntoResponse> IntoOutcome for R {
    fn into_outcome(self) -> Result<Response, Error> {
        Ok(self.into_response())
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoResponse,
    E: Into<Error>,
{
    fn into_outcome(self) -> Result<Response, Error> {
        self.map(IntoResponse::into_response).map_err(Into::into)
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoOutcome
/// ```
///
/// The trait is **sealed**: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Holds a concrete handler `F` and bridges it to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture<'static, Result<Response, Error>> {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_outcome() })
    }
}
