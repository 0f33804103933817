//! Log output setup.
//!
//! Every line goes to stdout as `<timestamp> : <message>`. The level is `info`
//! by default and `debug` when verbose; `RUST_LOG` overrides both, e.g.
//! `RUST_LOG=omw_modcheck=trace`.

use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Formats events as `<timestamp> : <message>`, without level or target.
pub struct ScanLogFormat;

impl<S, N> FormatEvent<S, N> for ScanLogFormat
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
        write!(
            writer,
            "{} : ",
            chrono::Local::now().format(TIMESTAMP_FORMAT)
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stdout)
        .event_format(ScanLogFormat)
        .init();
}

/// Log capture for tests, using the same line format as stdout.
#[cfg(test)]
pub(crate) mod capture {
    use super::ScanLogFormat;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing::level_filters::LevelFilter;

    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a thread-local subscriber and return what it logged.
    pub(crate) fn capture_logs<T>(max_level: LevelFilter, f: impl FnOnce() -> T) -> (T, String) {
        let buf = SharedBuf::default();
        let sink = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_writer(move || sink.clone())
            .event_format(ScanLogFormat)
            .finish();

        let value = tracing::subscriber::with_default(subscriber, f);
        (value, buf.contents())
    }

    /// Message part of each captured line, timestamps dropped.
    pub(crate) fn messages(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter_map(|line| line.split_once(" : ").map(|(_, message)| message))
            .collect()
    }
}
