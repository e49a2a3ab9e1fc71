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

//! A logger that writes optionally colored lines to stdout, stderr, a file or any writer.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub extern crate colored;
pub extern crate jiff;

use std::fmt;
use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io;
use std::io::IsTerminal;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::MutexGuard;

use colored::Color;
use colored::ColoredString;
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use logfacade_core::Error;
use logfacade_core::ErrorKind;
use logfacade_core::Level;
use logfacade_core::LevelOverride;
use logfacade_core::Logger;
use logfacade_core::Trap;
use logfacade_core::record::Record;
use logfacade_core::registry::LevelRegistry;
use logfacade_core::trap::DefaultTrap;

/// A logger that writes one line per record to a stream.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172+08:00 [ERR] connection refused (server.rs:51)
/// 2024-08-11T22:44:57.172+08:00 [WRN] retrying in 3s (server.rs:52)
/// 2024-08-11T22:44:57.173+08:00 [INF] listening on 0.0.0.0:8080 (main.rs:20)
/// ```
///
/// Level tags are colored when the destination is a terminal. Use
/// [`with_color`](StreamLogger::with_color) or [`no_color`](StreamLogger::no_color) to decide
/// explicitly.
///
/// # Examples
///
/// ```
/// use logfacade_adapter_stream::StreamLogger;
/// use logfacade_core::Level;
/// use logfacade_core::Logger;
///
/// let logger = StreamLogger::stderr().no_caller();
/// logger.set_level(Level::Trace);
/// logger.trace(&[&"ready"]);
/// ```
pub struct StreamLogger {
    level: LevelOverride,
    writer: Mutex<Box<dyn Write + Send>>,
    colors: LevelColor,
    no_color: bool,
    no_caller: bool,
    timezone: TimeZone,
    trap: Box<dyn Trap>,
}

impl fmt::Debug for StreamLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamLogger")
            .field("level", &self.level)
            .field("colors", &self.colors)
            .field("no_color", &self.no_color)
            .field("no_caller", &self.no_caller)
            .field("timezone", &self.timezone)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl StreamLogger {
    /// Create a logger writing to the given writer, without colors.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            level: LevelOverride::new(),
            writer: Mutex::new(Box::new(writer)),
            colors: LevelColor::default(),
            no_color: true,
            no_caller: false,
            timezone: TimeZone::system(),
            trap: Box::new(DefaultTrap::default()),
        }
    }

    /// Create a logger writing to stdout, colored if stdout is a terminal.
    pub fn stdout() -> Self {
        let colored = io::stdout().is_terminal();
        Self::new(io::stdout()).with_color(colored)
    }

    /// Create a logger writing to stderr, colored if stderr is a terminal.
    pub fn stderr() -> Self {
        let colored = io::stderr().is_terminal();
        Self::new(io::stderr()).with_color(colored)
    }

    /// Create a logger appending to the file at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Return an error if the file cannot be opened for appending.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_adapter_stream::StreamLogger;
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let logger = StreamLogger::file(dir.path().join("app.log")).unwrap();
    /// ```
    pub fn file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| {
                Error::new(ErrorKind::Io, "failed to open log file")
                    .with_context("path", path.display())
                    .with_source(err)
            })?;
        Ok(Self::new(file))
    }

    /// Decide whether level tags are colored.
    pub fn with_color(mut self, colored: bool) -> Self {
        self.no_color = !colored;
        self
    }

    /// Disable colored output.
    pub fn no_color(self) -> Self {
        self.with_color(false)
    }

    /// Omit the ` (file:line)` suffix.
    pub fn no_caller(mut self) -> Self {
        self.no_caller = true;
        self
    }

    /// Customize the color of the error tag. Default to bright red.
    ///
    /// No effect if colors are disabled.
    pub fn error_color(mut self, color: Color) -> Self {
        self.colors.error = color;
        self
    }

    /// Customize the color of the warn tag. Default to bright yellow.
    ///
    /// No effect if colors are disabled.
    pub fn warn_color(mut self, color: Color) -> Self {
        self.colors.warn = color;
        self
    }

    /// Customize the color of the info tag. Default to bright green.
    ///
    /// No effect if colors are disabled.
    pub fn info_color(mut self, color: Color) -> Self {
        self.colors.info = color;
        self
    }

    /// Customize the color of the debug tag. Default to bright blue.
    ///
    /// No effect if colors are disabled.
    pub fn debug_color(mut self, color: Color) -> Self {
        self.colors.debug = color;
        self
    }

    /// Customize the color of the trace tag. Default to bright white.
    ///
    /// No effect if colors are disabled.
    pub fn trace_color(mut self, color: Color) -> Self {
        self.colors.trace = color;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Default to the system timezone.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use logfacade_adapter_stream::StreamLogger;
    ///
    /// let logger = StreamLogger::stdout().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Fall back to the given level registry instead of the process-wide one.
    pub fn level_registry(mut self, registry: LevelRegistry) -> Self {
        self.level = LevelOverride::with_registry(registry);
        self
    }

    /// Set the trap for handling errors while writing.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    fn writer(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn format(&self, record: &Record) -> Result<String, Error> {
        let ts = Timestamp::try_from(record.time()).map_err(|err| {
            Error::new(ErrorKind::Format, "record time out of range").with_source(err)
        })?;
        let offset = self.timezone.to_offset(ts);
        let tag = self.colors.colorize(self.no_color, record.level());

        let mut line = format!(
            "{:.3} [{tag}] {}",
            ts.display_with_offset(offset),
            record.payload()
        );
        if !self.no_caller {
            if let (Some(_), Some(no)) = (record.file(), record.line()) {
                let file = record.filename();
                write!(&mut line, " ({file}:{no})").map_err(Error::from_fmt_error)?;
            }
        }
        Ok(line)
    }
}

impl Logger for StreamLogger {
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
        let mut bytes = self.format(record)?.into_bytes();
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

impl Drop for StreamLogger {
    fn drop(&mut self) {
        let writer = self.writer.get_mut().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}

#[derive(Debug, Clone)]
struct LevelColor {
    error: Color,
    warn: Color,
    info: Color,
    debug: Color,
    trace: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            error: Color::BrightRed,
            warn: Color::BrightYellow,
            info: Color::BrightGreen,
            debug: Color::BrightBlue,
            trace: Color::BrightWhite,
        }
    }
}

impl LevelColor {
    fn colorize(&self, no_color: bool, level: Level) -> ColoredString {
        let tag = ColoredString::from(level.tag());
        if no_color {
            return tag;
        }
        match level {
            Level::Error => tag.color(self.error),
            Level::Warn => tag.color(self.warn),
            Level::Info => tag.color(self.info),
            Level::Debug => tag.color(self.debug),
            Level::Trace => tag.color(self.trace),
            Level::Off => tag,
        }
    }
}
