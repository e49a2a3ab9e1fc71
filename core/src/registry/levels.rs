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

use crate::Level;

/// A shared minimum severity threshold.
///
/// Cloning a `LevelRegistry` yields another handle to the same threshold. Writers exclude all
/// other readers and writers; readers proceed concurrently.
///
/// # Examples
///
/// ```
/// use logfacade_core::Level;
/// use logfacade_core::registry::LevelRegistry;
///
/// let registry = LevelRegistry::new();
/// assert_eq!(registry.get(), Level::Debug);
///
/// let handle = registry.clone();
/// handle.set(Level::Warn);
/// assert_eq!(registry.get(), Level::Warn);
/// ```
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    level: Arc<RwLock<Level>>,
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRegistry {
    /// Create a registry holding [`Level::Debug`].
    pub fn new() -> Self {
        Self::with_level(Level::Debug)
    }

    /// Create a registry holding the given level.
    pub fn with_level(level: Level) -> Self {
        Self {
            level: Arc::new(RwLock::new(level)),
        }
    }

    /// Replace the threshold.
    pub fn set(&self, level: Level) {
        *self.level.write().unwrap_or_else(|e| e.into_inner()) = level;
    }

    /// The current threshold.
    pub fn get(&self) -> Level {
        *self.level.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_independent_registries() {
        let a = LevelRegistry::new();
        let b = LevelRegistry::with_level(Level::Error);
        a.set(Level::Trace);
        assert_eq!(a.get(), Level::Trace);
        assert_eq!(b.get(), Level::Error);
    }

    #[test]
    fn test_concurrent_reads_observe_written_values() {
        let registry = LevelRegistry::with_level(Level::Info);
        let written = [Level::Info, Level::Warn, Level::Error];

        let handles = (0..8)
            .map(|i| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for j in 0..1000 {
                        if (i + j) % 2 == 0 {
                            registry.set(written[(i + j) % written.len()]);
                        } else {
                            let level = registry.get();
                            assert!(written.contains(&level), "torn read: {level}");
                        }
                    }
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(written.contains(&registry.get()));
    }
}
