//! Request logging middleware.
//!
//! Logs one record per response. The record's severity comes from the
//! response status via [`classify`](crate::classify):
//!
//! ```text
//! request ─▶ next.run(req) ─▶ response
//!                               │ classify(status)
//!                               │ formatter.format(&req, &response)
//!                               │ sink.write(severity, record)
//!                               ▼
//!                       response, untouched
//! ```
//!
//! Register it like any other layer:
//!
//! ```rust,no_run
//! use statuslog::middleware::request_log::RequestLogger;
//! use statuslog::record::AccessFormatter;
//! use statuslog::sink::TracingSink;
//! use statuslog::{Method, Request, Router};
//!
//! # async fn list_users(_: Request) -> &'static str { "[]" }
//! let app = Router::new()
//!     .on(Method::GET, "/users", list_users)
//!     .layer(RequestLogger::new(AccessFormatter, TracingSink));
//! ```
//!
//! Failures are not caught here. If the handler fails, nothing is logged and
//! the error continues outward. If the formatter or the sink fails, that
//! error replaces the response.

use tracing::trace;

use crate::error::Error;
use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::record::RecordFormatter;
use crate::request::Request;
use crate::response::Response;
use crate::severity::Severity;
use crate::sink::LogSink;

/// Logs each request/response pair at a status-derived severity.
pub struct RequestLogger<F, S> {
    formatter: F,
    sink: S,
}

impl<F, S> RequestLogger<F, S>
where
    F: RecordFormatter,
    S: LogSink<F::Record>,
{
    pub fn new(formatter: F, sink: S) -> Self {
        Self { formatter, sink }
    }

    pub fn formatter(&self) -> &F { &self.formatter }
    pub fn sink(&self) -> &S { &self.sink }

    /// Runs the rest of the chain, then logs the outcome.
    ///
    /// Returns the downstream response unmodified.
    pub async fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        // `next` takes the request by value; the formatter still needs it.
        let observed = req.clone();
        let response = next.run(req).await?;

        let severity = Severity::for_status(response.status_code());
        let record = self.formatter.format(&observed, &response)?;
        self.sink.write(severity, record)?;

        trace!(
            method = %observed.method(),
            path = observed.path(),
            status = response.status_code().as_u16(),
            severity = %severity,
            "request logged"
        );
        Ok(response)
    }
}

impl<F, S> Middleware for RequestLogger<F, S>
where
    F: RecordFormatter,
    S: LogSink<F::Record>,
{
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a, Result<Response, Error>> {
        Box::pin(self.process(req, next))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use http::StatusCode;

    use super::*;
    use crate::handler::{BoxedHandler, Handler};

    #[derive(Default)]
    struct Captured(Mutex<Vec<(Severity, String)>>);

    impl LogSink<String> for Arc<Captured> {
        fn write(&self, severity: Severity, record: String) -> Result<(), Error> {
            self.0.lock().unwrap().push((severity, record));
            Ok(())
        }
    }

    struct StatusOnly;

    impl RecordFormatter for StatusOnly {
        type Record = String;

        fn format(&self, req: &Request, res: &Response) -> Result<String, Error> {
            Ok(format!("{} {}", req.path(), res.status_code().as_u16()))
        }
    }

    fn request(path: &str) -> Request {
        Request::from(http::Request::builder().uri(path).body(Bytes::new()).unwrap())
    }

    async fn run(
        logger: &RequestLogger<StatusOnly, Arc<Captured>>,
        endpoint: BoxedHandler,
        path: &str,
    ) -> Result<Response, Error> {
        logger.process(request(path), Next::new(&*endpoint, &[])).await
    }

    async fn teapot(_req: Request) -> Response {
        Response::builder().status(StatusCode::IM_A_TEAPOT).text("short and stout")
    }

    async fn missing(_req: Request) -> StatusCode { StatusCode::NOT_FOUND }

    async fn broken(_req: Request) -> Result<Response, Error> {
        Err(Error::handler("upstream refused"))
    }

    #[tokio::test]
    async fn logs_once_with_classified_severity() {
        let captured = Arc::new(Captured::default());
        let logger = RequestLogger::new(StatusOnly, Arc::clone(&captured));

        let res = run(&logger, missing.into_boxed_handler(), "/nope").await.unwrap();

        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            *captured.0.lock().unwrap(),
            vec![(Severity::Warning, "/nope 404".to_owned())]
        );
    }

    #[tokio::test]
    async fn returns_downstream_response_untouched() {
        let captured = Arc::new(Captured::default());
        let logger = RequestLogger::new(StatusOnly, Arc::clone(&captured));

        let res = run(&logger, teapot.into_boxed_handler(), "/brew").await.unwrap();

        assert_eq!(res, teapot(request("/brew")).await);
        assert_eq!(captured.0.lock().unwrap()[0].0, Severity::Debug);
    }

    #[tokio::test]
    async fn handler_failure_propagates_without_logging() {
        let captured = Arc::new(Captured::default());
        let logger = RequestLogger::new(StatusOnly, Arc::clone(&captured));

        let err = run(&logger, broken.into_boxed_handler(), "/orders").await.unwrap_err();

        assert!(matches!(err, Error::Handler(_)));
        assert!(captured.0.lock().unwrap().is_empty());
    }
}
