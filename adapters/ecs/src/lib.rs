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

//! A logger writing one [Elastic Common Schema] JSON object per line, ready to be shipped to
//! Elasticsearch.
//!
//! [Elastic Common Schema]: https://www.elastic.co/guide/en/ecs/current/index.html
//!
//! # Example
//!
//!```
//! use std::sync::Arc;
//!
//! use logfacade_adapter_ecs::EcsBuilder;
//!
//! let logger = EcsBuilder::new()
//!     .name("billing")
//!     .level("warning")
//!     .stack_trace_enabled(false)
//!     .build()
//!     .unwrap();
//!
//! let logger = logfacade_core::set_logger(Arc::new(logger));
//! logfacade_core::warn!(logger, "invoice {} is overdue", 1042);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub use self::logger::EcsBuilder;
pub use self::logger::EcsLogger;
pub use self::logger::default_log_path;

mod logger;

/// The version of the Elastic Common Schema the output conforms to.
pub const ECS_VERSION: &str = "1.6.0";
