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

use logfacade_core::Error;
use logfacade_core::Level;
use logfacade_core::LevelOverride;
use logfacade_core::Logger;
use logfacade_core::record::Record;
use logfacade_core::registry::LevelRegistry;

use crate::to_log_level;

/// A logger that hands records to the backend installed in the `log` crate.
///
/// The logfacade level gate runs first; records that pass it are then subject to the `log`
/// crate's own max level and the backend's filters.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logfacade_bridge_log::LogCrateLogger;
///
/// let logger = logfacade_core::set_logger(Arc::new(LogCrateLogger::new("my_app")));
/// logfacade_core::info!(logger, "routed through the log crate");
/// ```
#[derive(Debug)]
pub struct LogCrateLogger {
    level: LevelOverride,
    target: String,
}

impl LogCrateLogger {
    /// Create a logger forwarding with the given `log` target.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            level: LevelOverride::new(),
            target: target.into(),
        }
    }

    /// Fall back to the given level registry instead of the process-wide one.
    pub fn with_registry(mut self, registry: LevelRegistry) -> Self {
        self.level = LevelOverride::with_registry(registry);
        self
    }

    /// The `log` target of forwarded records.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Logger for LogCrateLogger {
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
        let Some(level) = to_log_level(record.level()) else {
            return Ok(());
        };
        if level > log::max_level() {
            return Ok(());
        }

        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", record.payload()))
                .level(level)
                .target(&self.target)
                .file(record.file())
                .line(record.line())
                .build(),
        );
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        log::logger().flush();
        Ok(())
    }
}
