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

// `$logger` may be a logger, a reference to one or an `Arc`; method syntax handles all three.
#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($method:ident, $method_fmt:ident, $logger:expr; $($value:expr),* $(,)?) => {{
        use $crate::Logger as _;
        $logger.$method(&[$(&$value),*])
    }};
    ($method:ident, $method_fmt:ident, $logger:expr, $($arg:tt)+) => {{
        use $crate::Logger as _;
        $logger.$method_fmt(format_args!($($arg)+))
    }};
}

/// Log at [`Level::Trace`](crate::Level::Trace).
///
/// `trace!(logger, "template {}", arg)` calls [`Logger::trace_fmt`](crate::Logger::trace_fmt);
/// `trace!(logger; a, b)` calls [`Logger::trace`](crate::Logger::trace).
#[macro_export]
macro_rules! trace {
    ($($t:tt)+) => { $crate::__log!(trace, trace_fmt, $($t)+) };
}

/// Log at [`Level::Debug`](crate::Level::Debug). See [`trace!`] for the two forms.
#[macro_export]
macro_rules! debug {
    ($($t:tt)+) => { $crate::__log!(debug, debug_fmt, $($t)+) };
}

/// Log at [`Level::Info`](crate::Level::Info). See [`trace!`] for the two forms.
///
/// # Examples
///
/// ```
/// use logfacade_core::TestingLogger;
///
/// let logger = TestingLogger::default();
/// let user = "alice";
/// logfacade_core::info!(logger, "{user} logged in");
/// logfacade_core::info!(&logger; "user", user, "logged in");
/// ```
#[macro_export]
macro_rules! info {
    ($($t:tt)+) => { $crate::__log!(info, info_fmt, $($t)+) };
}

/// Log at [`Level::Warn`](crate::Level::Warn). See [`trace!`] for the two forms.
#[macro_export]
macro_rules! warn {
    ($($t:tt)+) => { $crate::__log!(warn, warn_fmt, $($t)+) };
}

/// Log at [`Level::Error`](crate::Level::Error). See [`trace!`] for the two forms.
#[macro_export]
macro_rules! error {
    ($($t:tt)+) => { $crate::__log!(error, error_fmt, $($t)+) };
}
