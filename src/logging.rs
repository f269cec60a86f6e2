// ============================================================================
// File: packages/ecr-cleanup/src/logging.rs
// ----------------------------------------------------------------------------
// Explicitly constructed loggers for the cleanup handler.
//
// The handler never installs or reaches for a process-wide logger. Callers
// build one here and pass it in, so tests can capture output per handler.
// ============================================================================

use std::sync::Arc;

use env_logger::Env;
use log::Log;

/// Logger handle shared by a handler and its invocations
pub type SharedLogger = Arc<dyn Log>;

/// Build the production logger from `RUST_LOG` (default `info`)
///
/// Raises the global max level to the logger's filter so `log` macros
/// targeting this logger are not filtered out before reaching it.
pub fn build_logger() -> SharedLogger {
    let logger = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .build();
    log::set_max_level(logger.filter());
    Arc::new(logger)
}

#[cfg(test)]
pub(crate) mod capture {
    use std::sync::{Arc, Mutex};

    use log::{Level, LevelFilter, Log, Metadata, Record};

    /// In-memory logger for assertions on handler output
    #[derive(Debug, Default)]
    pub(crate) struct CapturedLogs {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl CapturedLogs {
        pub(crate) fn new() -> Arc<Self> {
            log::set_max_level(LevelFilter::Trace);
            Arc::new(Self::default())
        }

        pub(crate) fn messages(&self) -> Vec<String> {
            self.records
                .lock()
                .expect("log capture lock poisoned")
                .iter()
                .map(|(_, message)| message.clone())
                .collect()
        }

        pub(crate) fn contains(&self, needle: &str) -> bool {
            self.messages().iter().any(|m| m.contains(needle))
        }

        pub(crate) fn count_at(&self, level: Level) -> usize {
            self.records
                .lock()
                .expect("log capture lock poisoned")
                .iter()
                .filter(|(l, _)| *l == level)
                .count()
        }
    }

    impl Log for CapturedLogs {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            self.records
                .lock()
                .expect("log capture lock poisoned")
                .push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }
}
