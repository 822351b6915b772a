//! # statuslog
//!
//! HTTP request logging where the response decides how loud the log line is.
//!
//! Every request that passes through [`RequestLogger`] produces exactly one
//! log record once the response exists. The record's [`Severity`] comes from
//! the status code, through a fixed table rather than status classes:
//!
//! | Status | Severity |
//! |---|---|
//! | 200, 201, 202, 302 | `INFO` |
//! | 400, 404, 406, 409, 502 | `WARNING` |
//! | 500 | `ERROR` |
//! | everything else | `DEBUG` |
//!
//! The pieces:
//!
//! - [`classify`] — status code → severity. Pure, total over `i32`.
//! - [`RecordFormatter`] — renders a request/response pair into a record.
//! - [`LogSink`] — receives `(severity, record)`.
//! - [`RequestLogger`] — the middleware gluing the three together.
//!
//! A small hyper-based [`Router`]/[`Server`] pair hosts the middleware stack.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use statuslog::{Method, Request, RequestLogger, Response, Router, Server, StatusCode};
//! use statuslog::record::AccessFormatter;
//! use statuslog::sink::TracingSink;
//!
//! #[tokio::main]
//! async fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     let app = Router::new()
//!         .on(Method::GET,  "/users/{id}", get_user)
//!         .on(Method::POST, "/users",      create_user)
//!         .layer(RequestLogger::new(AccessFormatter, TracingSink));
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#))
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST); // logged at WARNING
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED) // logged at INFO
//!         .header("location", "/users/99")
//!         .json(r#"{"id":"99"}"#)
//! }
//! ```

mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;
mod severity;

pub mod middleware;
pub mod record;
pub mod sink;

pub use error::{BoxError, Error, Result};
pub use handler::{BoxFuture, Handler, IntoOutcome};
pub use http::{Method, StatusCode};
pub use middleware::request_log::RequestLogger;
pub use record::{RecordFormatter, TemplateFormatter};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use severity::{DEFAULT_SEVERITY, Severity, classify};
pub use sink::LogSink;
