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

//! Request- or operation-scoped values, and attaching a logger to them.
//!
//! A [`Context`] is an immutable chain of key-value entries. Deriving a child context never
//! modifies the parent, so a context can be shared freely between threads and handed down to
//! collaborators, which then find the logger without going through the process-wide registry.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use logfacade_core::Logger;
//! use logfacade_core::TestingLogger;
//! use logfacade_core::context::Context;
//! use logfacade_core::context::attach_logger;
//! use logfacade_core::context::logger_from_context;
//!
//! fn handle_request(ctx: &Context) {
//!     if let Some(logger) = logger_from_context(ctx) {
//!         logger.info(&[&"handling request"]);
//!     }
//! }
//!
//! let root = Context::new();
//! let ctx = attach_logger(&root, Arc::new(TestingLogger::default()));
//! handle_request(&ctx);
//! assert!(logger_from_context(&root).is_none());
//! ```

use std::any::Any;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use crate::Logger;

struct Entry {
    key: TypeId,
    key_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Entry>>,
}

/// An immutable, hierarchical bag of values keyed by type.
///
/// Keys are types: only code that can name the key type can store or read the value, so a
/// private key type cannot collide with anyone else's. A lookup walks from the most recently
/// attached entry towards the root, so a child shadows its ancestors.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Entry>>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries().map(|e| e.key_name)).finish()
    }
}

impl Context {
    /// Create an empty root context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a child context that associates `value` with the key type `K`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_core::context::Context;
    ///
    /// struct RequestId;
    ///
    /// let root = Context::new();
    /// let ctx = root.with_value::<RequestId, _>(42u64);
    /// assert_eq!(ctx.value::<RequestId, u64>(), Some(&42));
    /// assert_eq!(root.value::<RequestId, u64>(), None);
    /// ```
    pub fn with_value<K, V>(&self, value: V) -> Context
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        let entry = Entry {
            key: TypeId::of::<K>(),
            key_name: std::any::type_name::<K>(),
            value: Arc::new(value),
            parent: self.head.clone(),
        };
        Context {
            head: Some(Arc::new(entry)),
        }
    }

    /// Look up the value associated with the key type `K`.
    ///
    /// Return `None` if the key was never attached, or if the nearest value stored under it is
    /// not a `V`.
    pub fn value<K, V>(&self) -> Option<&V>
    where
        K: 'static,
        V: Any,
    {
        let key = TypeId::of::<K>();
        self.entries()
            .find(|entry| entry.key == key)
            .and_then(|entry| entry.value.downcast_ref::<V>())
    }

    fn entries(&self) -> impl Iterator<Item = &Entry> {
        std::iter::successors(self.head.as_deref(), |entry| entry.parent.as_deref())
    }
}

// Private, hence collision-proof.
struct LoggerKey;

/// Derive a child of `parent` that carries `logger`.
///
/// The parent is left untouched.
pub fn attach_logger(parent: &Context, logger: Arc<dyn Logger>) -> Context {
    parent.with_value::<LoggerKey, _>(logger)
}

/// The logger attached to `ctx` or to one of its ancestors, if any.
pub fn logger_from_context(ctx: &Context) -> Option<Arc<dyn Logger>> {
    ctx.value::<LoggerKey, Arc<dyn Logger>>().cloned()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::NoOpLogger;
    use crate::TestingLogger;

    #[test]
    fn test_attach_then_lookup() {
        let root = Context::new();
        let logger: Arc<dyn Logger> = Arc::new(TestingLogger::default());

        let ctx = attach_logger(&root, logger.clone());
        let found = logger_from_context(&ctx).unwrap();
        assert!(Arc::ptr_eq(&found, &logger));
        assert!(logger_from_context(&root).is_none());
    }

    #[test]
    fn test_child_shadows_and_inherits() {
        struct Tenant;

        let outer: Arc<dyn Logger> = Arc::new(TestingLogger::default());
        let inner: Arc<dyn Logger> = Arc::new(NoOpLogger::default());

        let ctx = attach_logger(&Context::new(), outer.clone());
        let child = ctx.with_value::<Tenant, _>("acme");
        assert!(Arc::ptr_eq(&logger_from_context(&child).unwrap(), &outer));

        let grandchild = attach_logger(&child, inner.clone());
        assert!(Arc::ptr_eq(&logger_from_context(&grandchild).unwrap(), &inner));
        assert_eq!(grandchild.value::<Tenant, &str>(), Some(&"acme"));
        assert!(Arc::ptr_eq(&logger_from_context(&child).unwrap(), &outer));
    }

    #[test]
    fn test_wrong_type_is_absent() {
        let ctx = Context::new().with_value::<LoggerKey, _>("not a logger");
        assert!(logger_from_context(&ctx).is_none());
        assert_eq!(ctx.value::<LoggerKey, &str>(), Some(&"not a logger"));
    }

    #[test]
    fn test_concurrent_readers() {
        let logger: Arc<dyn Logger> = Arc::new(TestingLogger::default());
        let ctx = attach_logger(&Context::new(), logger.clone());

        thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..100 {
                        let found = logger_from_context(&ctx).unwrap();
                        assert!(Arc::ptr_eq(&found, &logger));
                    }
                });
            }
        });
    }

    #[test]
    fn test_debug_lists_keys() {
        struct Tenant;
        let ctx = Context::new().with_value::<Tenant, _>(1u8);
        let ctx = attach_logger(&ctx, Arc::new(NoOpLogger::default()));
        let rendered = format!("{ctx:?}");
        assert!(rendered.contains("LoggerKey"), "{rendered}");
        assert!(rendered.contains("Tenant"), "{rendered}");
    }
}
