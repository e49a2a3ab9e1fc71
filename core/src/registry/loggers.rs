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

use std::sync::Arc;
use std::sync::RwLock;

use crate::Logger;
use crate::NoOpLogger;

/// A shared slot holding the active [`Logger`].
///
/// The slot is never empty: it starts out holding a [`NoOpLogger`]. Cloning a `LoggerRegistry`
/// yields another handle to the same slot. The lock only guards the swap and the clone of the
/// `Arc`; it is released before the caller uses the logger.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use logfacade_core::Logger;
/// use logfacade_core::TestingLogger;
/// use logfacade_core::registry::LoggerRegistry;
///
/// let registry = LoggerRegistry::new();
/// let installed = registry.set(Arc::new(TestingLogger::default()));
/// assert!(Arc::ptr_eq(&installed, &registry.get()));
/// registry.get().info(&[&"hello"]);
/// ```
#[derive(Debug, Clone)]
pub struct LoggerRegistry {
    logger: Arc<RwLock<Arc<dyn Logger>>>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Create a registry holding a [`NoOpLogger`].
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger::default()))
    }

    /// Create a registry holding the given logger.
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Arc::new(RwLock::new(logger)),
        }
    }

    /// Install the logger, returning it.
    ///
    /// The previously installed logger is dropped by the registry, not flushed: whoever owns an
    /// adapter is responsible for releasing its resources.
    pub fn set(&self, logger: Arc<dyn Logger>) -> Arc<dyn Logger> {
        let previous = {
            let mut slot = self.logger.write().unwrap_or_else(|e| e.into_inner());
            std::mem::replace(&mut *slot, logger.clone())
        };
        // dropping an adapter may run its destructor; do it outside the lock
        drop(previous);
        logger
    }

    /// The active logger.
    pub fn get(&self) -> Arc<dyn Logger> {
        self.logger
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
