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

//! Registries holding the global level and the active logger.
//!
//! Both registries are plain values that can be constructed and passed to the components that
//! need them. One instance of each is process-wide and backs the free functions re-exported at
//! the crate root.

mod global;
mod levels;
mod loggers;

pub use self::global::global_level;
pub use self::global::global_levels;
pub use self::global::global_loggers;
pub use self::global::level_from_env;
pub use self::global::logger;
pub use self::global::set_global_level;
pub use self::global::set_global_level_from_env;
pub use self::global::set_logger;
pub use self::levels::LevelRegistry;
pub use self::loggers::LoggerRegistry;
