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

use std::env;
use std::sync::Arc;
use std::sync::LazyLock;

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::registry::LevelRegistry;
use crate::registry::LoggerRegistry;

static GLOBAL_LEVELS: LazyLock<LevelRegistry> = LazyLock::new(LevelRegistry::new);
static GLOBAL_LOGGERS: LazyLock<LoggerRegistry> = LazyLock::new(LoggerRegistry::new);

/// The process-wide level registry.
///
/// Loggers created without an explicit registry fall back to this one.
pub fn global_levels() -> &'static LevelRegistry {
    &GLOBAL_LEVELS
}

/// The process-wide logger registry.
pub fn global_loggers() -> &'static LoggerRegistry {
    &GLOBAL_LOGGERS
}

/// Set the process-wide minimum severity.
///
/// Every logger without its own override observes the new level on its next call.
pub fn set_global_level(level: Level) {
    GLOBAL_LEVELS.set(level);
}

/// The process-wide minimum severity. Default to [`Level::Debug`].
pub fn global_level() -> Level {
    GLOBAL_LEVELS.get()
}

/// Install the process-wide logger and return it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logfacade_core::Logger;
/// use logfacade_core::TestingLogger;
///
/// let logger = logfacade_core::set_logger(Arc::new(TestingLogger::default()));
/// logger.info(&[&"installed"]);
/// assert!(Arc::ptr_eq(&logger, &logfacade_core::logger()));
/// ```
pub fn set_logger(logger: Arc<dyn Logger>) -> Arc<dyn Logger> {
    GLOBAL_LOGGERS.set(logger)
}

/// The process-wide logger, or a [`NoOpLogger`](crate::NoOpLogger) if none was installed.
pub fn logger() -> Arc<dyn Logger> {
    GLOBAL_LOGGERS.get()
}

/// Read a level from an environment variable without applying it.
///
/// Return `None` if the variable is not set. The value is parsed leniently, see [`Level`]'s
/// `FromStr` implementation.
///
/// # Errors
///
/// Return an error if the variable is set but is not unicode or not a level.
pub fn level_from_env(key: &str) -> Result<Option<Level>, Error> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(err) => {
            return Err(Error::config("failed to read log level")
                .with_context("variable", key)
                .with_source(err));
        }
    };

    let level = value
        .parse::<Level>()
        .map_err(|err| err.with_context("variable", key))?;
    Ok(Some(level))
}

/// Set the process-wide minimum severity from an environment variable.
///
/// Return the level that was applied, or `None` if the variable is not set.
///
/// # Errors
///
/// Return an error if the variable is set but is not unicode or not a level. The global level is
/// left untouched in that case.
///
/// # Examples
///
/// ```
/// if let Err(err) = logfacade_core::set_global_level_from_env("MY_APP_LOG_LEVEL") {
///     eprintln!("ignoring log level: {err}");
/// }
/// ```
pub fn set_global_level_from_env(key: &str) -> Result<Option<Level>, Error> {
    let level = level_from_env(key)?;
    if let Some(level) = level {
        set_global_level(level);
    }
    Ok(level)
}
