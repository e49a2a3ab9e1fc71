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

//! Starter configurations for quickly setting up logfacade with a stream logger.
//!
//! A starter reads the global level from [`LEVEL_ENV`], installs a [`StreamLogger`] as the
//! process-wide logger and forwards the `log` crate macros to it.

use std::sync::Arc;

use crate::Error;
use crate::Logger;
use crate::adapter::StreamLogger;

/// The environment variable read for the global level by default.
pub const LEVEL_ENV: &str = "LOGFACADE_LEVEL";

/// A builder for setting up logfacade with a [`StreamLogger`].
#[derive(Debug)]
pub struct StreamStarterBuilder {
    logger: StreamLogger,
    level_env: Option<String>,
    bridge_log: bool,
}

/// Create a starter writing to stdout.
///
/// # Examples
///
/// ```
/// logfacade::starter::stdout().apply();
/// log::info!("This info will be logged to stdout.");
/// ```
pub fn stdout() -> StreamStarterBuilder {
    StreamStarterBuilder::new(StreamLogger::stdout())
}

/// Create a starter writing to stderr.
///
/// # Examples
///
/// ```
/// let logger = logfacade::starter::stderr().apply();
/// logfacade::error!(logger, "This error will be logged to stderr.");
/// ```
pub fn stderr() -> StreamStarterBuilder {
    StreamStarterBuilder::new(StreamLogger::stderr())
}

impl StreamStarterBuilder {
    fn new(logger: StreamLogger) -> Self {
        Self {
            logger,
            level_env: Some(LEVEL_ENV.to_string()),
            bridge_log: true,
        }
    }

    /// Customize the stream logger.
    ///
    /// # Examples
    ///
    /// ```
    /// logfacade::starter::stderr()
    ///     .logger(|logger| logger.no_color().no_caller())
    ///     .apply();
    /// ```
    pub fn logger(mut self, f: impl FnOnce(StreamLogger) -> StreamLogger) -> Self {
        self.logger = f(self.logger);
        self
    }

    /// Read the global level from the given environment variable instead of [`LEVEL_ENV`].
    pub fn level_env(mut self, key: impl Into<String>) -> Self {
        self.level_env = Some(key.into());
        self
    }

    /// Leave the global level untouched.
    pub fn no_level_env(mut self) -> Self {
        self.level_env = None;
        self
    }

    /// Do not forward the `log` crate macros.
    pub fn no_bridge_log(mut self) -> Self {
        self.bridge_log = false;
        self
    }

    /// Set up the process-wide logger and return it.
    ///
    /// This function will set the `log` crate's maximum level to `Trace`, leaving the decision
    /// to the logfacade levels.
    ///
    /// # Errors
    ///
    /// Return an error if the level variable is set to something that is not a level, or if the
    /// `log` crate global logger has already been set. Neither the global level nor the global
    /// logger changes when an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// if let Err(err) = logfacade::starter::stderr().try_apply() {
    ///     eprintln!("failed to set logger: {err}");
    /// }
    /// ```
    pub fn try_apply(self) -> Result<Arc<dyn Logger>, Error> {
        let StreamStarterBuilder {
            logger,
            level_env,
            bridge_log,
        } = self;

        let level = match level_env {
            Some(key) => logfacade_core::level_from_env(&key)?,
            None => None,
        };

        if bridge_log {
            logfacade_bridge_log::try_setup_log_crate().map_err(|err| {
                Error::config("log crate global logger has been already setup").with_source(err)
            })?;
        }

        if let Some(level) = level {
            logfacade_core::set_global_level(level);
        }
        let logger = logfacade_core::set_logger(Arc::new(logger));

        Ok(logger)
    }

    /// Set up the process-wide logger and return it.
    ///
    /// # Panics
    ///
    /// Panic if [`try_apply`](StreamStarterBuilder::try_apply) fails.
    ///
    /// # Examples
    ///
    /// ```
    /// logfacade::starter::stdout().apply();
    /// ```
    pub fn apply(self) -> Arc<dyn Logger> {
        self.try_apply()
            .expect("StreamStarterBuilder::apply must be called before the log crate global logger initialized")
    }
}
