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

use std::sync::RwLock;

use crate::Level;
use crate::level::resolve;
use crate::registry::LevelRegistry;
use crate::registry::global_levels;

/// The optional per-instance level of a logger, layered over a [`LevelRegistry`].
///
/// Loggers are shared between threads, so the override sits behind its own read-write lock.
/// Neither the override nor the registry value is cached: [`effective`](LevelOverride::effective)
/// reads both on every call.
///
/// # Examples
///
/// ```
/// use logfacade_core::Level;
/// use logfacade_core::LevelOverride;
/// use logfacade_core::registry::LevelRegistry;
///
/// let registry = LevelRegistry::with_level(Level::Info);
/// let level = LevelOverride::with_registry(registry.clone());
/// assert_eq!(level.effective(), Level::Info);
///
/// level.set(Level::Trace);
/// registry.set(Level::Error);
/// assert_eq!(level.effective(), Level::Trace);
///
/// level.reset();
/// assert_eq!(level.effective(), Level::Error);
/// ```
#[derive(Debug)]
pub struct LevelOverride {
    level: RwLock<Option<Level>>,
    registry: LevelRegistry,
}

impl Default for LevelOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelOverride {
    /// Create an empty override that falls back to the process-wide level registry.
    pub fn new() -> Self {
        Self::with_registry(global_levels().clone())
    }

    /// Create an empty override that falls back to the given registry.
    pub fn with_registry(registry: LevelRegistry) -> Self {
        Self {
            level: RwLock::new(None),
            registry,
        }
    }

    /// The registry this override falls back to.
    pub fn registry(&self) -> &LevelRegistry {
        &self.registry
    }

    /// Install the override.
    pub fn set(&self, level: Level) {
        *self.level.write().unwrap_or_else(|e| e.into_inner()) = Some(level);
    }

    /// The override alone, without falling back.
    pub fn get(&self) -> Option<Level> {
        *self.level.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Remove the override.
    pub fn reset(&self) {
        *self.level.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// The override if present, the current registry level otherwise.
    pub fn effective(&self) -> Level {
        resolve(self.get(), self.registry.get())
    }
}
