//! Log sinks: where a `(severity, record)` pair ends up.
//!
//! A sink is shared by every in-flight request, so implementations must be
//! safe to call concurrently. [`TracingSink`] hands records to whatever
//! `tracing` subscriber the binary installed; [`WriterSink`] writes lines to
//! any `io::Write`.

use std::fmt::Display;
use std::io::Write;
use std::sync::Mutex;

use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::severity::Severity;

/// Terminal destination for log records.
pub trait LogSink<R>: Send + Sync + 'static {
    fn write(&self, severity: Severity, record: R) -> Result<(), Error>;
}

// ── TracingSink ───────────────────────────────────────────────────────────────

/// Emits each record as a `tracing` event under the `statuslog::access`
/// target.
///
/// `tracing` has five levels, so `NOTICE` shares `INFO` and everything from
/// `ERROR` up shares `ERROR`. The exact name is kept in the `severity` field.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl<R: Display> LogSink<R> for TracingSink {
    fn write(&self, severity: Severity, record: R) -> Result<(), Error> {
        match severity {
            Severity::Debug => {
                debug!(target: "statuslog::access", severity = %severity, "{record}")
            }
            Severity::Info | Severity::Notice => {
                info!(target: "statuslog::access", severity = %severity, "{record}")
            }
            Severity::Warning => {
                warn!(target: "statuslog::access", severity = %severity, "{record}")
            }
            Severity::Error | Severity::Critical | Severity::Alert | Severity::Emergency => {
                error!(target: "statuslog::access", severity = %severity, "{record}")
            }
        }
        Ok(())
    }
}

// ── WriterSink ────────────────────────────────────────────────────────────────

/// Writes `<channel>.<SEVERITY>: <record>` lines to a writer.
///
/// ```rust
/// use statuslog::{Severity, sink::{LogSink, WriterSink}};
///
/// let sink = WriterSink::new("http", Vec::new()).with_threshold(Severity::Info);
/// sink.write(Severity::Warning, "GET /missing 404 Not Found 0B").unwrap();
/// sink.write(Severity::Debug, "GET /healthz 204 No Content 0B").unwrap();
///
/// assert_eq!(sink.into_inner().unwrap(), b"http.WARNING: GET /missing 404 Not Found 0B\n");
/// ```
pub struct WriterSink<W> {
    channel: String,
    threshold: Severity,
    writer: Mutex<W>,
}

impl<W: Write + Send + 'static> WriterSink<W> {
    pub fn new(channel: impl Into<String>, writer: W) -> Self {
        Self {
            channel: channel.into(),
            threshold: Severity::Debug,
            writer: Mutex::new(writer),
        }
    }

    /// Drops records below `threshold`. Defaults to `DEBUG` (keep everything).
    pub fn with_threshold(mut self, threshold: Severity) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn channel(&self) -> &str { &self.channel }

    /// Returns the writer, or an error if a writing thread panicked.
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer
            .into_inner()
            .map_err(|_| Error::sink("writer lock poisoned"))
    }
}

impl<W, R> LogSink<R> for WriterSink<W>
where
    W: Write + Send + 'static,
    R: Display,
{
    fn write(&self, severity: Severity, record: R) -> Result<(), Error> {
        if severity < self.threshold {
            return Ok(());
        }

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::sink("writer lock poisoned"))?;
        writeln!(writer, "{}.{}: {}", self.channel, severity, record).map_err(Error::sink)?;
        writer.flush().map_err(Error::sink)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex as StdMutex};

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<StdMutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    #[test]
    fn writer_sink_prefixes_channel_and_severity() {
        let sink = WriterSink::new("api", Vec::new());
        sink.write(Severity::Info, "GET / 200 OK 2B").unwrap();
        sink.write(Severity::Error, "POST /orders 500 Internal Server Error 0B").unwrap();

        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "api.INFO: GET / 200 OK 2B\napi.ERROR: POST /orders 500 Internal Server Error 0B\n"
        );
    }

    #[test]
    fn writer_sink_threshold_drops_lower_levels() {
        let sink = WriterSink::new("api", Vec::new()).with_threshold(Severity::Warning);
        sink.write(Severity::Debug, "debug").unwrap();
        sink.write(Severity::Info, "info").unwrap();
        sink.write(Severity::Warning, "warning").unwrap();

        assert_eq!(sink.into_inner().unwrap(), b"api.WARNING: warning\n");
    }

    #[test]
    fn writer_sink_surfaces_io_failures() {
        let sink = WriterSink::new("api", BrokenPipe);
        let err = sink.write(Severity::Info, "GET / 200 OK 0B").unwrap_err();

        assert!(matches!(err, Error::Sink(_)));
        assert!(err.to_string().contains("reader went away"));
    }

    #[test]
    fn tracing_sink_maps_onto_tracing_levels() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingSink.write(Severity::Notice, "notice record").unwrap();
            TracingSink.write(Severity::Warning, "warning record").unwrap();
            TracingSink.write(Severity::Critical, "critical record").unwrap();
        });

        let out = buf.contents();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3, "{out}");
        assert!(lines[0].contains("INFO") && lines[0].contains("severity=NOTICE"));
        assert!(lines[1].contains("WARN") && lines[1].contains("warning record"));
        assert!(lines[2].contains("ERROR") && lines[2].contains("severity=CRITICAL"));
    }
}
