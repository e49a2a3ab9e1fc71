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

//! logfacade decouples application code from the logging backend.
//!
//! Code logs through the [`Logger`] trait; which backend receives the records is decided once, at
//! startup, by installing a logger with [`set_logger`]. Every logger honours a process-wide
//! minimum severity ([`set_global_level`]) unless it carries its own override.
//!
//! Backends ship as features:
//!
//! ```shell
//! cargo add logfacade -F adapter-stream,adapter-ecs,bridge-log
//! ```
//!
//! # Examples
//!
//! Install a logger and log through the process-wide registry:
//!
//! ```
//! use std::sync::Arc;
//!
//! use logfacade::Level;
//! use logfacade::Logger;
//! use logfacade::TestingLogger;
//!
//! logfacade::set_global_level(Level::Info);
//! logfacade::set_logger(Arc::new(TestingLogger::default()));
//!
//! let logger = logfacade::logger();
//! logfacade::debug!(logger, "suppressed");
//! logfacade::warn!(logger; "disk", 93, "percent full");
//! ```
//!
//! Hand a logger down through a context instead:
//!
//! ```
//! use std::sync::Arc;
//!
//! use logfacade::TestingLogger;
//! use logfacade::context::Context;
//! use logfacade::context::attach_logger;
//! use logfacade::context::logger_from_context;
//!
//! let ctx = attach_logger(&Context::new(), Arc::new(TestingLogger::default()));
//! if let Some(logger) = logger_from_context(&ctx) {
//!     logfacade::info!(logger, "request {} accepted", 7);
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub use logfacade_core::Error;
pub use logfacade_core::ErrorKind;
pub use logfacade_core::Level;
pub use logfacade_core::LevelOverride;
pub use logfacade_core::Logger;
pub use logfacade_core::NoOpLogger;
pub use logfacade_core::TestingLogger;
pub use logfacade_core::context;
pub use logfacade_core::message;
pub use logfacade_core::record;
pub use logfacade_core::registry;
// functions
pub use logfacade_core::global_level;
pub use logfacade_core::level_from_env;
pub use logfacade_core::logger;
pub use logfacade_core::set_global_level;
pub use logfacade_core::set_global_level_from_env;
pub use logfacade_core::set_logger;
// macros
pub use logfacade_core::debug;
pub use logfacade_core::error;
pub use logfacade_core::info;
pub use logfacade_core::trace;
pub use logfacade_core::warn;

/// Concrete logging backends.
pub mod adapter {
    #[cfg(feature = "adapter-ecs")]
    pub use logfacade_adapter_ecs as ecs;
    #[cfg(feature = "adapter-ecs")]
    pub use logfacade_adapter_ecs::EcsBuilder;
    #[cfg(feature = "adapter-ecs")]
    pub use logfacade_adapter_ecs::EcsLogger;
    #[cfg(feature = "adapter-stream")]
    pub use logfacade_adapter_stream as stream;
    #[cfg(feature = "adapter-stream")]
    pub use logfacade_adapter_stream::StreamLogger;
}

/// Bridge logfacade with other logging frameworks.
pub mod bridge {
    /// Bridge logfacade with [`log`].
    ///
    /// [`log`]: https://docs.rs/log/
    #[cfg(feature = "bridge-log")]
    pub mod log {
        pub use logfacade_bridge_log::*;
    }
}

/// Severity levels and their resolution.
pub mod level {
    pub use logfacade_core::level::*;
}

/// Traps for processing errors.
pub mod trap {
    pub use logfacade_core::trap::*;
}

#[cfg(feature = "starter")]
pub mod starter;
