// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Bridges between the `log` crate and `logfacade`.
//!
//! * [`setup_log_crate`] forwards records from the `log` macros to the process-wide logfacade
//!   logger.
//! * [`LogCrateLogger`] is a logfacade logger that forwards to whatever `log` backend the
//!   application installed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

use std::cell::Cell;

use logfacade_core::Level;
use logfacade_core::Logger;
use logfacade_core::record::Record;

pub use self::logger::LogCrateLogger;

mod logger;

thread_local! {
    static FORWARDING: Cell<bool> = const { Cell::new(false) };
}

// Marks the current thread as forwarding a `log` record; dropped records are the ones that come
// back through the bridge while it is marked.
struct ForwardGuard(());

impl ForwardGuard {
    fn enter() -> Option<ForwardGuard> {
        if FORWARDING.replace(true) {
            None
        } else {
            Some(ForwardGuard(()))
        }
    }
}

impl Drop for ForwardGuard {
    fn drop(&mut self) {
        FORWARDING.set(false);
    }
}

fn from_log_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

fn to_log_level(level: Level) -> Option<log::Level> {
    match level {
        Level::Error => Some(log::Level::Error),
        Level::Warn => Some(log::Level::Warn),
        Level::Info => Some(log::Level::Info),
        Level::Debug => Some(log::Level::Debug),
        Level::Trace => Some(log::Level::Trace),
        Level::Off => None,
    }
}

struct LogCrateProxy(());

impl log::Log for LogCrateProxy {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !FORWARDING.get() && logfacade_core::logger().enabled(from_log_level(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        let Some(_guard) = ForwardGuard::enter() else {
            return;
        };

        let logger = logfacade_core::logger();
        let level = from_log_level(record.level());
        if !logger.enabled(level) {
            return;
        }

        let args = record.args();
        let payload = match args.as_str() {
            Some(payload) => payload.to_owned(),
            None => args.to_string(),
        };
        let record = Record::builder()
            .level(level)
            .target(Some(record.target()))
            .file(record.file())
            .line(record.line())
            .payload(&payload)
            .build();
        logger.log(&record);
    }

    fn flush(&self) {
        let Some(_guard) = ForwardGuard::enter() else {
            return;
        };

        let logger = logfacade_core::logger();
        if let Err(err) = logger.flush() {
            logger.trap(&err);
        }
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_logger`] to set up a `LogCrateProxy` and all logs from the
/// log crate will be forwarded to the process-wide logfacade logger, gated by its effective
/// level.
///
/// This should be called early in the execution of a Rust program. Any log events that occur
/// before initialization will be ignored.
///
/// This function will set the global maximum log level to `Trace`, leaving the decision to the
/// logfacade levels. To override this, call [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// if let Err(err) = logfacade_bridge_log::try_setup_log_crate() {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// ```
pub fn try_setup_log_crate() -> Result<(), log::SetLoggerError> {
    static LOGGER: LogCrateProxy = LogCrateProxy(());
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// Same as [`try_setup_log_crate`], but panics on failure.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logfacade_core::TestingLogger;
///
/// logfacade_bridge_log::setup_log_crate();
/// logfacade_core::set_logger(Arc::new(TestingLogger::default()));
/// log::info!("forwarded to logfacade");
/// ```
pub fn setup_log_crate() {
    try_setup_log_crate().expect(
        "logfacade_bridge_log::setup_log_crate must be called before the log crate global logger initialized",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping_round_trips() {
        for level in Level::SEVERITIES {
            let mapped = to_log_level(level).unwrap();
            assert_eq!(from_log_level(mapped), level);
        }
        assert_eq!(to_log_level(Level::Off), None);
    }

    #[test]
    fn test_guard_is_not_reentrant() {
        let outer = ForwardGuard::enter();
        assert!(outer.is_some());
        assert!(ForwardGuard::enter().is_none());
        drop(outer);
        assert!(ForwardGuard::enter().is_some());
    }
}
