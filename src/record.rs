//! Rendering a request/response pair into a log record.
//!
//! The middleware never looks inside a record. It asks a [`RecordFormatter`]
//! for one and hands it to the sink as-is, so the record type is whatever the
//! sink on the other end understands.

use std::fmt;

use http::{Method, StatusCode, Uri};

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// Turns one request and the response it produced into a record.
///
/// Implementations must only read from `req` and `res`.
pub trait RecordFormatter: Send + Sync + 'static {
    type Record: Send;

    fn format(&self, req: &Request, res: &Response) -> Result<Self::Record, Error>;
}

// ── AccessRecord ──────────────────────────────────────────────────────────────

/// A structured access-log line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRecord {
    pub method: Method,
    pub uri: Uri,
    pub status: StatusCode,
    pub user_agent: Option<String>,
    pub body_bytes: usize,
}

/// `GET /users/42 404 Not Found 0B ua="curl/8.5"`
impl fmt::Display for AccessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}B",
            self.method,
            self.uri,
            self.status,
            self.body_bytes,
        )?;
        if let Some(ua) = &self.user_agent {
            write!(f, " ua={ua:?}")?;
        }
        Ok(())
    }
}

/// Produces an [`AccessRecord`]. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessFormatter;

impl RecordFormatter for AccessFormatter {
    type Record = AccessRecord;

    fn format(&self, req: &Request, res: &Response) -> Result<AccessRecord, Error> {
        Ok(AccessRecord {
            method: req.method().clone(),
            uri: req.uri().clone(),
            status: res.status_code(),
            user_agent: req.header("user-agent").map(str::to_owned),
            body_bytes: res.body().len(),
        })
    }
}

// ── TemplateFormatter ─────────────────────────────────────────────────────────

/// Renders a string template into a `String` record.
///
/// | Placeholder | Value |
/// |---|---|
/// | `{method}` | request method |
/// | `{uri}` | full request target, query included |
/// | `{path}` | request path |
/// | `{status}` | numeric status code |
/// | `{reason}` | canonical reason phrase, empty if unknown |
/// | `{bytes}` | response body length |
/// | `{header:<name>}` | request header, `-` when absent |
///
/// `{{` and `}}` produce literal braces. Anything else inside braces fails
/// the format call.
///
/// ```rust
/// use statuslog::record::TemplateFormatter;
///
/// let fmt = TemplateFormatter::new("{method} {path} -> {status} ({header:x-request-id})");
/// ```
#[derive(Clone, Debug)]
pub struct TemplateFormatter {
    template: String,
}

impl TemplateFormatter {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }

    fn placeholder(&self, name: &str, req: &Request, res: &Response) -> Result<String, Error> {
        let value = match name {
            "method" => req.method().to_string(),
            "uri"    => req.uri().to_string(),
            "path"   => req.path().to_owned(),
            "status" => res.status_code().as_u16().to_string(),
            "reason" => res.status_code().canonical_reason().unwrap_or("").to_owned(),
            "bytes"  => res.body().len().to_string(),
            _ => match name.strip_prefix("header:") {
                Some(header) => req.header(header).unwrap_or("-").to_owned(),
                None => return Err(Error::format(format!("unknown placeholder `{{{name}}}`"))),
            },
        };
        Ok(value)
    }
}

impl RecordFormatter for TemplateFormatter {
    type Record = String;

    fn format(&self, req: &Request, res: &Response) -> Result<String, Error> {
        let mut out = String::with_capacity(self.template.len() + 32);
        let mut rest = self.template.as_str();

        while let Some(i) = rest.find(['{', '}']) {
            out.push_str(&rest[..i]);
            let tail = &rest[i..];

            if tail.starts_with("{{") || tail.starts_with("}}") {
                out.push_str(&tail[..1]);
                rest = &tail[2..];
            } else if tail.starts_with('}') {
                return Err(Error::format("unmatched `}` in template"));
            } else {
                let close = tail
                    .find('}')
                    .ok_or_else(|| Error::format("unclosed `{` in template"))?;
                out.push_str(&self.placeholder(&tail[1..close], req, res)?);
                rest = &tail[close + 1..];
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn request() -> Request {
        Request::from(
            http::Request::builder()
                .method(Method::POST)
                .uri("/users?dry_run=1")
                .header("user-agent", "curl/8.5")
                .header("x-request-id", "abc123")
                .body(Bytes::from_static(b"{\"name\":\"alice\"}"))
                .unwrap(),
        )
    }

    #[test]
    fn access_formatter_reads_both_sides() {
        let res = Response::builder().status(StatusCode::CONFLICT).text("taken");
        let record = AccessFormatter.format(&request(), &res).unwrap();

        assert_eq!(record.method, Method::POST);
        assert_eq!(record.status, StatusCode::CONFLICT);
        assert_eq!(record.body_bytes, 5);
        assert_eq!(
            record.to_string(),
            r#"POST /users?dry_run=1 409 Conflict 5B ua="curl/8.5""#
        );
    }

    #[test]
    fn access_record_omits_missing_user_agent() {
        let req = Request::from(http::Request::builder().uri("/").body(Bytes::new()).unwrap());
        let record = AccessFormatter.format(&req, &Response::status(StatusCode::OK)).unwrap();
        assert_eq!(record.to_string(), "GET / 200 OK 0B");
    }

    #[test]
    fn template_substitutes_every_placeholder() {
        let fmt = TemplateFormatter::new(
            "{method} {uri} {path} {status} {reason} {bytes} {header:X-Request-Id} {header:referer}",
        );
        let res = Response::status(StatusCode::CREATED);

        assert_eq!(
            fmt.format(&request(), &res).unwrap(),
            "POST /users?dry_run=1 /users 201 Created 0 abc123 -"
        );
    }

    #[test]
    fn template_escapes_braces() {
        let fmt = TemplateFormatter::new("{{\"status\":{status}}}");
        let out = fmt.format(&request(), &Response::status(StatusCode::NOT_FOUND)).unwrap();
        assert_eq!(out, r#"{"status":404}"#);
    }

    #[test]
    fn template_rejects_unknown_and_unbalanced_placeholders() {
        let res = Response::status(StatusCode::OK);
        for template in ["{latency}", "{method", "status}"] {
            let err = TemplateFormatter::new(template).format(&request(), &res).unwrap_err();
            assert!(matches!(err, Error::Format(_)), "template {template:?}");
        }
    }
}
