use std::fmt;
use std::io::{self, IsTerminal};

use anyhow::Result;
use chrono::Local;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set. Kept at
/// `warn` so interactive sessions show only prompts and the report.
const DEFAULT_FILTER: &str = "warn";

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

fn level_style(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Writes `args` wrapped in `style` when the writer accepts escape codes.
fn styled(
    writer: &mut Writer<'_>,
    style: &str,
    args: fmt::Arguments<'_>,
) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{style}{args}{RESET}")
    } else {
        writer.write_fmt(args)
    }
}

/// Event format: local timestamp, level, `file:line`, then fields.
struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let now = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        styled(&mut writer, DIM, format_args!("{now}"))?;
        writer.write_char(' ')?;
        styled(&mut writer, level_style(meta.level()), format_args!("{:>5}", meta.level()))?;
        writer.write_char(' ')?;

        // `tax-cli/src/app.rs` is shown as `app.rs`.
        let file = meta
            .file()
            .map(|f| f.rsplit_once("src/").map_or(f, |(_, rest)| rest));
        if let (Some(file), Some(line)) = (file, meta.line()) {
            styled(&mut writer, CYAN, format_args!("{file}:{line}"))?;
            writer.write_char(' ')?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn make_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| anyhow::anyhow!("invalid log level '{directive}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Initializes logging. Call once at startup.
///
/// - Output goes to stderr, colored when attached to a terminal, so it never
///   interleaves with the report on stdout.
/// - Level: `directive` when given (a bare level such as `debug` or any
///   `EnvFilter` directive), otherwise `RUST_LOG`, otherwise `warn`.
pub fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = make_filter(directive)?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(LocalFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Collects formatted log lines in memory.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    struct CaptureWriter<'a>(MutexGuard<'a, Vec<u8>>);

    impl Write for CaptureWriter<'_> {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Capture {
        type Writer = CaptureWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            CaptureWriter(self.0.lock().unwrap())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_subscriber(
        capture: Capture,
        ansi: bool,
    ) -> impl Subscriber + Send + Sync {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(LocalFmt)
            .with_ansi(ansi)
            .with_writer(capture);
        tracing_subscriber::registry().with(layer)
    }

    #[test]
    fn local_fmt_writes_level_location_and_fields() {
        let capture = Capture::default();
        let subscriber = capture_subscriber(capture.clone(), false);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(status = "MFJ", "calculated tax");
        });

        let line = capture.contents();
        assert!(line.contains(" INFO "), "missing level in {line:?}");
        assert!(line.contains("logging.rs:"), "missing location in {line:?}");
        assert!(line.contains("calculated tax"), "missing message in {line:?}");
        assert!(line.contains("status=\"MFJ\""), "missing field in {line:?}");
        assert!(!line.contains('\x1b'), "unexpected escape codes in {line:?}");
        assert!(line.ends_with('\n'));
    }

    #[test]
    fn local_fmt_colors_level_when_ansi_is_enabled() {
        let capture = Capture::default();
        let subscriber = capture_subscriber(capture.clone(), true);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("income looks unusual");
        });

        let line = capture.contents();
        assert!(line.contains("\x1b[1;33m WARN\x1b[0m"), "missing colored level in {line:?}");
        assert!(line.contains("income looks unusual"));
    }

    #[test]
    fn make_filter_rejects_malformed_directive() {
        assert!(make_filter(Some("tax_cli=notalevel")).is_err());
    }

    #[test]
    fn make_filter_accepts_bare_level() {
        assert!(make_filter(Some("debug")).is_ok());
    }
}
