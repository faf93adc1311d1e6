use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal},
    path::Path,
    sync::Mutex,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

// --- Formatter ---

/// One line per event: local timestamp, level, crate name, fields.
struct LineFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        let level = *meta.level();
        // Events from the library crates carry their crate name as target.
        let target = meta.target().split("::").next().unwrap_or_default();

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{stamp}\x1b[0m {}{level:>5}\x1b[0m \x1b[36m{target}\x1b[0m ",
                level_color(level)
            )?;
        } else {
            write!(writer, "{stamp} {level:>5} {target} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Building blocks ---

/// RUST_LOG when it is set and valid, else `level`.
///
/// `level` is a bare level ("warn", "debug") or any EnvFilter directive.
fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'"))
}

/// Opens `path` for appending. The directory must already exist.
fn open_log_file(path: &Path) -> Result<File> {
    File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))
}

fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .event_format(LineFormat)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
}

// --- Public API ---

/// Installs the global subscriber. Call once, after configuration is known.
///
/// - Terminal: stderr, so results on stdout stay clean for piping; colored
///   only when stderr is a terminal. Left out entirely when `terminal` is
///   false.
/// - File: appended to when `log_file` is given, whatever `terminal` says.
/// - Level: RUST_LOG when set, otherwise `level`.
pub fn init(
    level: &str,
    log_file: Option<&Path>,
    terminal: bool,
) -> Result<()> {
    let filter = build_filter(level)?;
    let file = log_file.map(open_log_file).transpose()?;

    let terminal_layer = terminal.then(|| {
        tracing_subscriber::fmt::layer()
            .event_format(LineFormat)
            .with_writer(io::stderr)
            .with_ansi(io::stderr().is_terminal())
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(terminal_layer)
        .with(file.map(file_layer))
        .try_init()
        .context("logging already initialized")
}
