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

use crate::Error;
use crate::Level;
use crate::LevelOverride;
use crate::Logger;
use crate::record::Record;
use crate::registry::LevelRegistry;

/// A logger that writes records that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// Lines look like `[INF] message`, optionally followed by ` (file:line)`.
///
/// # Examples
///
/// ```
/// use logfacade_core::Logger;
/// use logfacade_core::TestingLogger;
///
/// let logger = TestingLogger::default().with_caller();
/// logger.info(&[&"captured by the harness"]);
/// ```
#[derive(Debug, Default)]
pub struct TestingLogger {
    level: LevelOverride,
    caller: bool,
}

impl TestingLogger {
    /// Create a testing logger falling back to the given level registry.
    pub fn with_registry(registry: LevelRegistry) -> Self {
        Self {
            level: LevelOverride::with_registry(registry),
            caller: false,
        }
    }

    /// Append the caller location to every line.
    pub fn with_caller(mut self) -> Self {
        self.caller = true;
        self
    }

    fn format(&self, record: &Record) -> String {
        let mut line = format!("[{}] {}", record.level().tag(), record.payload());
        if self.caller {
            if let (Some(file), Some(no)) = (record.file(), record.line()) {
                line.push_str(&format!(" ({file}:{no})"));
            }
        }
        line
    }
}

impl Logger for TestingLogger {
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
        eprintln!("{}", self.format(record));
        Ok(())
    }
}
