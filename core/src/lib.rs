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

//! Core structs and functions for logfacade.
//!
//! Application code depends on the [`Logger`] trait; the concrete backend is picked at startup
//! and installed with [`set_logger`]. Each logging call resolves the logger's effective level
//! afresh: the logger's own override if it has one, the global level otherwise.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logfacade_core::Level;
//! use logfacade_core::Logger;
//! use logfacade_core::TestingLogger;
//!
//! logfacade_core::set_global_level(Level::Info);
//! let logger = logfacade_core::set_logger(Arc::new(TestingLogger::default()));
//!
//! logger.debug(&[&"suppressed"]);
//! logger.warn(&[&"emitted"]);
//!
//! logger.set_level(Level::Trace);
//! logger.debug_fmt(format_args!("emitted as well, {} items", 3));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

pub mod context;
pub mod level;
pub mod message;
pub mod record;
pub mod registry;
pub mod trap;

pub use self::level::Level;
pub use self::trap::Trap;

mod logger;
pub use self::logger::LevelOverride;
pub use self::logger::Logger;
pub use self::logger::NoOpLogger;
pub use self::logger::TestingLogger;

pub use self::registry::global_level;
pub use self::registry::level_from_env;
pub use self::registry::logger;
pub use self::registry::set_global_level;
pub use self::registry::set_global_level_from_env;
pub use self::registry::set_logger;

mod macros;
