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

//! Severity levels and the level gate.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// An enum representing the available severity levels, from most verbose to silent.
///
/// Levels are totally ordered: `Trace < Debug < Info < Warn < Error < Off`. A logger whose
/// effective level is `L` emits a message of severity `M` if and only if `L <= M` and `L` is not
/// [`Level::Off`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Designates very low priority, often extremely verbose, information.
    Trace = 0,
    /// Designates lower priority information.
    #[default]
    Debug = 1,
    /// Designates useful information.
    Info = 2,
    /// Designates hazardous situations.
    Warn = 3,
    /// Designates errors.
    Error = 4,
    /// Suppresses all output.
    Off = 5,
}

impl Level {
    /// All message severities, i.e. every level except [`Level::Off`].
    pub const SEVERITIES: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    /// Return the string representation of the `Level`.
    ///
    /// This returns the same string as the `fmt::Display` implementation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// Return the three-letter tag used by line-oriented adapters.
    pub fn tag(&self) -> &'static str {
        match self {
            Level::Trace => "TRC",
            Level::Debug => "DBG",
            Level::Info => "INF",
            Level::Warn => "WRN",
            Level::Error => "ERR",
            Level::Off => "OFF",
        }
    }

    /// Check whether a message of severity `message` passes a logger whose effective level is
    /// `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_core::Level;
    ///
    /// assert!(Level::Info.permits(Level::Warn));
    /// assert!(Level::Info.permits(Level::Info));
    /// assert!(!Level::Info.permits(Level::Debug));
    /// assert!(!Level::Off.permits(Level::Error));
    /// ```
    pub fn permits(self, message: Level) -> bool {
        self != Level::Off && self <= message
    }
}

/// Resolve the effective level of a logger: its own override if present, the global level
/// otherwise.
///
/// # Examples
///
/// ```
/// use logfacade_core::Level;
/// use logfacade_core::level::resolve;
///
/// assert_eq!(resolve(Some(Level::Trace), Level::Info), Level::Trace);
/// assert_eq!(resolve(None, Level::Info), Level::Info);
/// ```
pub fn resolve(instance: Option<Level>, global: Level) -> Level {
    instance.unwrap_or(global)
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parse a level leniently: case-insensitive, accepting full names, tags and initials.
    /// `fatal` and its short forms map to [`Level::Error`].
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        const ALIASES: [(&[&str], Level); 6] = [
            (&["trace", "trc", "t"], Level::Trace),
            (&["debug", "dbg", "d"], Level::Debug),
            (&["info", "inf", "i"], Level::Info),
            (&["warning", "warn", "wrn", "w"], Level::Warn),
            (&["error", "err", "e", "fatal", "ftl", "f"], Level::Error),
            (&["off"], Level::Off),
        ];

        let s = s.trim();
        for (names, level) in ALIASES {
            if names.iter().any(|name| s.eq_ignore_ascii_case(name)) {
                return Ok(level);
            }
        }

        Err(Error::config(format!("malformed level: {s:?}")))
    }
}
