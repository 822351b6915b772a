//! Unified error type.

/// Boxed error from application code (handlers, custom sinks).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type returned by statuslog's fallible operations.
///
/// Application-level outcomes (404, 422, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// the failures that travel *through* the middleware stack: a handler that
/// gave up, a record that could not be rendered, a sink that could not write,
/// plus the usual infrastructure failures of the server itself.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Binding to a port or accepting a connection failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Reading the request body off the connection failed.
    #[error("request body: {0}")]
    Body(#[from] hyper::Error),

    /// The downstream handler failed instead of producing a response.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// A record formatter could not render the request/response pair.
    #[error("record formatting failed: {0}")]
    Format(String),

    /// A log sink rejected or failed to persist a record.
    #[error("log sink write failed: {0}")]
    Sink(#[source] BoxError),

    /// A severity name did not match any level of the ladder.
    #[error("unknown severity `{0}`")]
    UnknownSeverity(String),
}

impl Error {
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn sink(err: impl Into<BoxError>) -> Self {
        Self::Sink(err.into())
    }
}
