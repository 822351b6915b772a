//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it. Middleware sees the
//! same value the handler produced; the logging middleware only reads it.

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;
use tracing::warn;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use statuslog::{Response, StatusCode};
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use statuslog::{Response, StatusCode};
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .json(br#"{"id":42}"#.to_vec());
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::builder().json(body)
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Bytes::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response written to the wire.
    ///
    /// Headers that are not valid HTTP are dropped with a warning rather than
    /// failing a response that has already been produced.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let len = self.body.len();
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;

        let headers = res.headers_mut();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
        for (name, value) in &self.headers {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(n), Ok(v)) => { headers.append(n, v); }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        res
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`.
/// Terminated by a typed body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.bytes("application/json", body)
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        let body: String = body.into();
        self.bytes("text/plain; charset=utf-8", body)
    }

    /// Terminate with a body of any content type.
    pub fn bytes(self, content_type: &str, body: impl Into<Bytes>) -> Response {
        let mut headers = vec![(CONTENT_TYPE.as_str().to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body: body.into(), headers, status: self.status }
    }

    /// Terminate with no body (e.g. `204 No Content`, `302 Found`).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a status directly from a handler: `return StatusCode::NOT_FOUND`
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_puts_content_type_first() {
        let res = Response::builder()
            .status(StatusCode::CREATED)
            .header("location", "/users/99")
            .json(r#"{"id":"99"}"#);

        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.headers()[0].1, "application/json");
        assert_eq!(res.header("Location"), Some("/users/99"));
        assert_eq!(res.body(), br#"{"id":"99"}"#);
    }

    #[test]
    fn into_inner_sets_length_and_drops_invalid_headers() {
        let res = Response::builder()
            .header("x-ok", "yes")
            .header("bad header", "value")
            .text("hello")
            .into_inner();

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[CONTENT_LENGTH], "5");
        assert_eq!(res.headers()["x-ok"], "yes");
        assert!(res.headers().get("bad header").is_none());
    }
}
