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

//! The abstract logger and the loggers shipped with the core.

use std::fmt;
use std::panic::Location;

use crate::Error;
use crate::Level;
use crate::message::Payload;
use crate::record::Record;
use crate::trap::DefaultTrap;
use crate::trap::Trap;

mod level_override;
mod noop;
mod testing;

pub use self::level_override::LevelOverride;
pub use self::noop::NoOpLogger;
pub use self::testing::TestingLogger;

/// The capability set every logging backend provides.
///
/// Implementors supply the level accessors (usually by delegating to a [`LevelOverride`]) and
/// [`emit`](Logger::emit). Everything else is provided: each logging call resolves the effective
/// level afresh, and only when the message passes the gate is it assembled into a [`Record`] and
/// handed to `emit`.
///
/// # Examples
///
/// ```
/// use logfacade_core::Level;
/// use logfacade_core::Logger;
/// use logfacade_core::TestingLogger;
///
/// let logger = TestingLogger::default();
/// logger.set_level(Level::Info);
/// logger.debug(&[&"suppressed"]);
/// logger.info(&[&"loaded", &3, &"items"]);
/// logger.warn_fmt(format_args!("{} retries left", 2));
/// ```
pub trait Logger: fmt::Debug + Send + Sync + 'static {
    /// Install a level override on this logger only.
    fn set_level(&self, level: Level);

    /// The effective level of this logger: its override if present, the global level otherwise.
    ///
    /// Return `None` only for loggers that never emit anything.
    fn level(&self) -> Option<Level>;

    /// Remove the override of this logger, reverting to the global level.
    fn reset_level(&self);

    /// Write a record that already passed the level gate.
    fn emit(&self, record: &Record) -> Result<(), Error>;

    /// Flush any buffered records.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Handle an error returned by [`emit`](Logger::emit).
    ///
    /// Default to [`DefaultTrap`].
    fn trap(&self, err: &Error) {
        DefaultTrap::default().trap(err);
    }

    /// Check whether a message of the given severity would be emitted right now.
    fn enabled(&self, level: Level) -> bool {
        self.level()
            .is_some_and(|effective| effective.permits(level))
    }

    /// Gate and emit a record that was assembled elsewhere, e.g. by a bridge.
    fn log(&self, record: &Record) {
        if self.enabled(record.level()) {
            if let Err(err) = self.emit(record) {
                self.trap(&err);
            }
        }
    }

    /// Log the values, separated by spaces, at [`Level::Trace`].
    #[track_caller]
    fn trace(&self, values: &[&dyn fmt::Display]) {
        dispatch(self, Level::Trace, Payload::Values(values));
    }

    /// Log a formatted message at [`Level::Trace`].
    #[track_caller]
    fn trace_fmt(&self, args: fmt::Arguments<'_>) {
        dispatch(self, Level::Trace, Payload::Template(args));
    }

    /// Log the values, separated by spaces, at [`Level::Debug`].
    #[track_caller]
    fn debug(&self, values: &[&dyn fmt::Display]) {
        dispatch(self, Level::Debug, Payload::Values(values));
    }

    /// Log a formatted message at [`Level::Debug`].
    #[track_caller]
    fn debug_fmt(&self, args: fmt::Arguments<'_>) {
        dispatch(self, Level::Debug, Payload::Template(args));
    }

    /// Log the values, separated by spaces, at [`Level::Info`].
    #[track_caller]
    fn info(&self, values: &[&dyn fmt::Display]) {
        dispatch(self, Level::Info, Payload::Values(values));
    }

    /// Log a formatted message at [`Level::Info`].
    #[track_caller]
    fn info_fmt(&self, args: fmt::Arguments<'_>) {
        dispatch(self, Level::Info, Payload::Template(args));
    }

    /// Log the values, separated by spaces, at [`Level::Warn`].
    #[track_caller]
    fn warn(&self, values: &[&dyn fmt::Display]) {
        dispatch(self, Level::Warn, Payload::Values(values));
    }

    /// Log a formatted message at [`Level::Warn`].
    #[track_caller]
    fn warn_fmt(&self, args: fmt::Arguments<'_>) {
        dispatch(self, Level::Warn, Payload::Template(args));
    }

    /// Log the values, separated by spaces, at [`Level::Error`].
    #[track_caller]
    fn error(&self, values: &[&dyn fmt::Display]) {
        dispatch(self, Level::Error, Payload::Values(values));
    }

    /// Log a formatted message at [`Level::Error`].
    #[track_caller]
    fn error_fmt(&self, args: fmt::Arguments<'_>) {
        dispatch(self, Level::Error, Payload::Template(args));
    }
}

// The gate runs before assembly so that suppressed messages cost one level lookup.
#[track_caller]
fn dispatch<L: Logger + ?Sized>(logger: &L, level: Level, payload: Payload) {
    if !logger.enabled(level) {
        return;
    }

    let message = payload.assemble();
    let record = Record::builder()
        .level(level)
        .payload(&message)
        .location(Location::caller())
        .build();
    if let Err(err) = logger.emit(&record) {
        logger.trap(&err);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ErrorKind;
    use crate::registry::LevelRegistry;

    #[derive(Debug)]
    struct Recording {
        level: LevelOverride,
        lines: Mutex<Vec<String>>,
        trapped: Mutex<Vec<String>>,
        fail: bool,
    }

    impl Recording {
        fn new(registry: &LevelRegistry) -> Self {
            Self {
                level: LevelOverride::with_registry(registry.clone()),
                lines: Mutex::new(vec![]),
                trapped: Mutex::new(vec![]),
                fail: false,
            }
        }

        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Logger for Recording {
        fn set_level(&self, level: Level) {
            self.level.set(level);
        }

        fn level(&self) -> Option<Level> {
            Some(self.level.effective())
        }

        fn reset_level(&self) {
            self.level.reset();
        }

        fn emit(&self, record: &Record) -> Result<(), Error> {
            if self.fail {
                return Err(Error::new(ErrorKind::Io, "destination closed"));
            }
            let line = format!("{} {}:{}", record.level(), record.filename(), record.payload());
            self.lines.lock().unwrap().push(line);
            Ok(())
        }

        fn trap(&self, err: &Error) {
            self.trapped.lock().unwrap().push(err.message().to_string());
        }
    }

    #[test]
    fn test_global_threshold_gates_every_severity() {
        let registry = LevelRegistry::new();
        let logger = Recording::new(&registry);

        for threshold in Level::SEVERITIES {
            registry.set(threshold);
            for message in Level::SEVERITIES {
                assert_eq!(logger.enabled(message), message >= threshold);
            }
        }

        registry.set(Level::Off);
        for message in Level::SEVERITIES {
            assert!(!logger.enabled(message));
        }
    }

    #[test]
    fn test_unformatted_and_formatted_variants() {
        let registry = LevelRegistry::new();
        let logger = Recording::new(&registry);
        logger.set_level(Level::Trace);

        logger.trace(&[&"a", &1]);
        logger.trace_fmt(format_args!("b={}", 2));
        logger.debug(&[&"c"]);
        logger.debug_fmt(format_args!("d"));
        logger.info(&[&"e"]);
        logger.info_fmt(format_args!("f"));
        logger.warn(&[&"g"]);
        logger.warn_fmt(format_args!("h"));
        logger.error(&[&"i"]);
        logger.error_fmt(format_args!("j"));

        insta::assert_snapshot!(logger.lines().join("\n"), @r"
        TRACE mod.rs:a 1
        TRACE mod.rs:b=2
        DEBUG mod.rs:c
        DEBUG mod.rs:d
        INFO mod.rs:e
        INFO mod.rs:f
        WARN mod.rs:g
        WARN mod.rs:h
        ERROR mod.rs:i
        ERROR mod.rs:j
        ");
    }

    #[test]
    fn test_resolution_is_not_cached() {
        let registry = LevelRegistry::new();
        let logger = Recording::new(&registry);

        registry.set(Level::Warn);
        logger.info(&[&"dropped"]);
        registry.set(Level::Info);
        logger.info(&[&"kept"]);
        logger.set_level(Level::Error);
        logger.warn(&[&"dropped"]);
        logger.reset_level();
        logger.warn(&[&"kept"]);

        assert_eq!(logger.lines(), vec!["INFO mod.rs:kept", "WARN mod.rs:kept"]);
    }

    #[test]
    fn test_emit_errors_go_to_trap() {
        let registry = LevelRegistry::new();
        let mut logger = Recording::new(&registry);
        logger.fail = true;

        logger.error(&[&"boom"]);
        logger.trace(&[&"below threshold"]);

        assert!(logger.lines().is_empty());
        assert_eq!(
            *logger.trapped.lock().unwrap(),
            vec!["destination closed".to_string()]
        );
    }

    #[test]
    fn test_log_gates_prebuilt_records() {
        let registry = LevelRegistry::new();
        let logger = Recording::new(&registry);
        registry.set(Level::Warn);

        let record = Record::builder().level(Level::Info).payload("x").build();
        logger.log(&record);
        let record = Record::builder().level(Level::Error).payload("y").build();
        logger.log(&record);

        assert_eq!(logger.lines(), vec!["ERROR :y"]);
    }
}
