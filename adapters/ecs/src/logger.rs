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

use std::backtrace::Backtrace;
use std::env;
use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use std::sync::MutexGuard;

use jiff::Timestamp;
use logfacade_core::Error;
use logfacade_core::ErrorKind;
use logfacade_core::Level;
use logfacade_core::LevelOverride;
use logfacade_core::Logger;
use logfacade_core::Trap;
use logfacade_core::record::Record;
use logfacade_core::registry::LevelRegistry;
use logfacade_core::trap::DefaultTrap;
use serde::Serialize;

use crate::ECS_VERSION;

/// The conventional log file for the running executable: `<executable stem>-<pid>.log` in the
/// working directory.
///
/// # Errors
///
/// Return an error if the path of the running executable cannot be determined.
pub fn default_log_path() -> Result<PathBuf, Error> {
    let exe = env::current_exe().map_err(|err| {
        Error::new(ErrorKind::Config, "failed to locate the running executable").with_source(err)
    })?;
    let stem = exe
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| {
            Error::config("executable path has no file name").with_context("path", exe.display())
        })?;
    Ok(PathBuf::from(format!("{stem}-{}.log", process::id())))
}

enum Destination {
    Stdout,
    Path(PathBuf),
    DefaultPath,
    Writer(Box<dyn Write + Send>),
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Stdout => f.write_str("Stdout"),
            Destination::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Destination::DefaultPath => f.write_str("DefaultPath"),
            Destination::Writer(_) => f.write_str("Writer"),
        }
    }
}

impl Destination {
    fn open(self) -> Result<Box<dyn Write + Send>, Error> {
        let path = match self {
            Destination::Stdout => return Ok(Box::new(io::stdout())),
            Destination::Writer(writer) => return Ok(writer),
            Destination::Path(path) => path,
            Destination::DefaultPath => default_log_path()?,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|err| {
                Error::new(ErrorKind::Io, "failed to open log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;
        Ok(Box::new(file))
    }
}

/// A builder to configure and create an [`EcsLogger`].
///
/// By default the logger writes to stdout, and logs its name, the caller location and, for
/// error records, a stack trace.
#[derive(Debug)]
pub struct EcsBuilder {
    destination: Destination,
    name: Option<String>,
    name_enabled: bool,
    caller_enabled: bool,
    stack_trace_enabled: bool,
    level: Option<Level>,
    registry: Option<LevelRegistry>,
    trap: Box<dyn Trap>,
}

impl Default for EcsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EcsBuilder {
    /// Create a new ECS logger builder.
    pub fn new() -> Self {
        Self {
            destination: Destination::Stdout,
            name: None,
            name_enabled: true,
            caller_enabled: true,
            stack_trace_enabled: true,
            level: None,
            registry: None,
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Append records to the file at `path`, creating it if needed.
    ///
    /// An empty path is ignored.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.as_os_str().is_empty() {
            self.destination = Destination::Path(path);
        }
        self
    }

    /// Append records to [`default_log_path`].
    pub fn default_path(mut self) -> Self {
        self.destination = Destination::DefaultPath;
        self
    }

    /// Write records to the given writer.
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.destination = Destination::Writer(Box::new(writer));
        self
    }

    /// Set the name reported as `log.logger`.
    ///
    /// Default to the target of the record, if any.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Decide whether `log.logger` is written.
    pub fn name_enabled(mut self, enabled: bool) -> Self {
        self.name_enabled = enabled;
        self
    }

    /// Decide whether `log.origin` is written.
    pub fn caller_enabled(mut self, enabled: bool) -> Self {
        self.caller_enabled = enabled;
        self
    }

    /// Decide whether error records carry `error.stack_trace`.
    pub fn stack_trace_enabled(mut self, enabled: bool) -> Self {
        self.stack_trace_enabled = enabled;
        self
    }

    /// Install a level override on the logger, from one of the level names or aliases accepted
    /// by [`Level`]'s `FromStr` implementation.
    ///
    /// Unrecognized names are ignored and the logger follows its level registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_adapter_ecs::EcsBuilder;
    /// use logfacade_core::Level;
    /// use logfacade_core::Logger;
    ///
    /// let logger = EcsBuilder::new().level("wrn").build().unwrap();
    /// assert_eq!(logger.level(), Some(Level::Warn));
    /// ```
    pub fn level(mut self, level: &str) -> Self {
        if let Ok(level) = level.parse() {
            self.level = Some(level);
        }
        self
    }

    /// Fall back to the given level registry instead of the process-wide one.
    pub fn level_registry(mut self, registry: LevelRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Set the trap for handling errors while writing.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`EcsLogger`].
    ///
    /// # Errors
    ///
    /// Return an error if the log file cannot be opened, or if the default path is requested
    /// and the running executable cannot be located.
    pub fn build(self) -> Result<EcsLogger, Error> {
        let EcsBuilder {
            destination,
            name,
            name_enabled,
            caller_enabled,
            stack_trace_enabled,
            level,
            registry,
            trap,
        } = self;

        let writer = destination.open()?;
        let level_override = match registry {
            Some(registry) => LevelOverride::with_registry(registry),
            None => LevelOverride::new(),
        };
        if let Some(level) = level {
            level_override.set(level);
        }

        Ok(EcsLogger {
            level: level_override,
            writer: Mutex::new(writer),
            name,
            name_enabled,
            caller_enabled,
            stack_trace_enabled,
            trap,
        })
    }
}

/// A logger writing Elastic Common Schema JSON lines.
///
/// Output format:
///
/// ```json
/// {"@timestamp":"2024-08-11T14:44:57.172Z","log.level":"error","message":"connection refused","ecs.version":"1.6.0","log.logger":"billing","log.origin":{"file.name":"src/server.rs","file.line":51},"error.stack_trace":"..."}
/// {"@timestamp":"2024-08-11T14:44:57.172Z","log.level":"info","message":"listening","ecs.version":"1.6.0","log.logger":"billing","log.origin":{"file.name":"src/main.rs","file.line":20}}
/// ```
///
/// Create one with [`EcsBuilder`].
pub struct EcsLogger {
    level: LevelOverride,
    writer: Mutex<Box<dyn Write + Send>>,
    name: Option<String>,
    name_enabled: bool,
    caller_enabled: bool,
    stack_trace_enabled: bool,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for EcsLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcsLogger")
            .field("level", &self.level)
            .field("name", &self.name)
            .field("name_enabled", &self.name_enabled)
            .field("caller_enabled", &self.caller_enabled)
            .field("stack_trace_enabled", &self.stack_trace_enabled)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct EcsLine<'a> {
    #[serde(rename = "@timestamp", serialize_with = "serialize_timestamp")]
    timestamp: Timestamp,
    #[serde(rename = "log.level")]
    level: &'static str,
    message: &'a str,
    #[serde(rename = "ecs.version")]
    ecs_version: &'static str,
    #[serde(rename = "log.logger", skip_serializing_if = "Option::is_none")]
    logger: Option<&'a str>,
    #[serde(rename = "log.origin", skip_serializing_if = "Option::is_none")]
    origin: Option<Origin<'a>>,
    #[serde(rename = "error.stack_trace", skip_serializing_if = "Option::is_none")]
    stack_trace: Option<String>,
}

#[derive(Debug, Serialize)]
struct Origin<'a> {
    #[serde(rename = "file.name")]
    file: &'a str,
    #[serde(rename = "file.line")]
    line: u32,
}

fn serialize_timestamp<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&format_args!("{timestamp:.3}"))
}

fn ecs_level(level: Level) -> &'static str {
    match level {
        Level::Trace => "trace",
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error => "error",
        Level::Off => "off",
    }
}

impl EcsLogger {
    fn writer(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let timestamp = Timestamp::try_from(record.time()).map_err(|err| {
            Error::new(ErrorKind::Format, "record time out of range").with_source(err)
        })?;

        let logger = if self.name_enabled {
            self.name.as_deref().or(record.target())
        } else {
            None
        };
        let origin = match (self.caller_enabled, record.file(), record.line()) {
            (true, Some(file), Some(line)) => Some(Origin { file, line }),
            _ => None,
        };
        let stack_trace = (self.stack_trace_enabled && record.level() == Level::Error)
            .then(|| Backtrace::force_capture().to_string());

        let line = EcsLine {
            timestamp,
            level: ecs_level(record.level()),
            message: record.payload(),
            ecs_version: ECS_VERSION,
            logger,
            origin,
            stack_trace,
        };
        serde_json::to_vec(&line).map_err(|err| {
            Error::new(ErrorKind::Format, "failed to serialize record").with_source(err)
        })
    }
}

impl Logger for EcsLogger {
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
        let mut bytes = self.format(record)?;
        bytes.push(b'\n');
        let mut writer = self.writer();
        writer.write_all(&bytes).map_err(Error::from_io_error)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self.writer();
        writer.flush().map_err(Error::from_io_error)?;
        Ok(())
    }

    fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }
}

impl Drop for EcsLogger {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use std::time::SystemTime;

    use super::*;

    fn record(level: Level) -> Record<'static> {
        Record::builder()
            .level(level)
            .payload("invoice overdue")
            .target(Some("billing::reminders"))
            .file(Some("src/reminders.rs"))
            .line(Some(42))
            .time(SystemTime::UNIX_EPOCH + Duration::from_millis(1_700_000_000_123))
            .build()
    }

    fn format(builder: EcsBuilder, record: &Record) -> String {
        let logger = builder.writer(io::sink()).build().unwrap();
        String::from_utf8(logger.format(record).unwrap()).unwrap()
    }

    #[test]
    fn test_format_line() {
        let line = format(EcsBuilder::new().name("billing"), &record(Level::Warn));
        insta::assert_snapshot!(line, @r#"{"@timestamp":"2023-11-14T22:13:20.123Z","log.level":"warn","message":"invoice overdue","ecs.version":"1.6.0","log.logger":"billing","log.origin":{"file.name":"src/reminders.rs","file.line":42}}"#);
    }

    #[test]
    fn test_optional_fields() {
        let line = format(EcsBuilder::new(), &record(Level::Trace));
        insta::assert_snapshot!(line, @r#"{"@timestamp":"2023-11-14T22:13:20.123Z","log.level":"trace","message":"invoice overdue","ecs.version":"1.6.0","log.logger":"billing::reminders","log.origin":{"file.name":"src/reminders.rs","file.line":42}}"#);

        let builder = EcsBuilder::new()
            .name("billing")
            .name_enabled(false)
            .caller_enabled(false);
        let line = format(builder, &record(Level::Info));
        insta::assert_snapshot!(line, @r#"{"@timestamp":"2023-11-14T22:13:20.123Z","log.level":"info","message":"invoice overdue","ecs.version":"1.6.0"}"#);
    }

    #[test]
    fn test_stack_trace_only_for_errors() {
        let line = format(EcsBuilder::new(), &record(Level::Error));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value["error.stack_trace"].is_string(), "{line}");

        let line = format(EcsBuilder::new(), &record(Level::Warn));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value.get("error.stack_trace").is_none(), "{line}");

        let builder = EcsBuilder::new().stack_trace_enabled(false);
        let line = format(builder, &record(Level::Error));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value.get("error.stack_trace").is_none(), "{line}");
    }

    #[test]
    fn test_level_option() {
        let registry = LevelRegistry::with_level(Level::Error);
        let build = |level: &str| {
            EcsBuilder::new()
                .writer(io::sink())
                .level_registry(registry.clone())
                .level(level)
                .build()
                .unwrap()
        };

        assert_eq!(build("T").level(), Some(Level::Trace));
        assert_eq!(build("fatal").level(), Some(Level::Error));
        assert_eq!(build("Off").level(), Some(Level::Off));
        assert_eq!(build("verbose").level(), Some(Level::Error));

        let logger = build("dbg");
        logger.reset_level();
        assert_eq!(logger.level(), Some(Level::Error));
    }

    #[test]
    fn test_default_log_path() {
        let path = default_log_path().unwrap();
        let name = path.to_str().unwrap();
        assert!(name.ends_with(&format!("-{}.log", process::id())), "{name}");
        assert!(!name.contains(".exe"), "{name}");
    }
}
