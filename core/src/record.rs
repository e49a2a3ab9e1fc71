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

//! The record handed to adapters once a message passed the level gate.

use std::borrow::Cow;
use std::panic::Location;
use std::time::SystemTime;

use crate::Level;

/// An assembled log message together with where and when it was produced.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: SystemTime,

    level: Level,
    target: Option<&'a str>,
    file: Option<&'a str>,
    line: Option<u32>,

    // the payload
    payload: &'a str,
}

impl<'a> Record<'a> {
    /// Returns a new builder.
    pub fn builder() -> RecordBuilder<'a> {
        RecordBuilder::default()
    }

    /// The observed time.
    pub fn time(&self) -> SystemTime {
        self.now
    }

    /// The severity of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The name of the component that produced the message, if known.
    pub fn target(&self) -> Option<&'a str> {
        self.target
    }

    /// The source file containing the message.
    pub fn file(&self) -> Option<&'a str> {
        self.file
    }

    /// The filename of the source file.
    pub fn filename(&self) -> Cow<'a, str> {
        self.file()
            .map(std::path::Path::new)
            .and_then(std::path::Path::file_name)
            .map(std::ffi::OsStr::to_string_lossy)
            .unwrap_or_default()
    }

    /// The line containing the message.
    pub fn line(&self) -> Option<u32> {
        self.line
    }

    /// The message body.
    pub fn payload(&self) -> &'a str {
        self.payload
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder<'a> {
    record: Record<'a>,
}

impl Default for RecordBuilder<'_> {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                now: SystemTime::now(),
                level: Level::Info,
                target: None,
                file: None,
                line: None,
                payload: "",
            },
        }
    }
}

impl<'a> RecordBuilder<'a> {
    /// Set [`payload`](Record::payload).
    pub fn payload(mut self, payload: &'a str) -> Self {
        self.record.payload = payload;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`target`](Record::target).
    pub fn target(mut self, target: Option<&'a str>) -> Self {
        self.record.target = target;
        self
    }

    /// Set [`file`](Record::file).
    pub fn file(mut self, file: Option<&'a str>) -> Self {
        self.record.file = file;
        self
    }

    /// Set [`line`](Record::line).
    pub fn line(mut self, line: Option<u32>) -> Self {
        self.record.line = line;
        self
    }

    /// Set both [`file`](Record::file) and [`line`](Record::line) from a caller location.
    pub fn location(self, location: &'static Location<'static>) -> Self {
        self.file(Some(location.file()))
            .line(Some(location.line()))
    }

    /// Set the observed time. Default to the time the builder was created.
    pub fn time(mut self, now: SystemTime) -> Self {
        self.record.now = now;
        self
    }

    /// Invoke the builder and return a `Record`
    pub fn build(self) -> Record<'a> {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_sets_file_and_line() {
        let location = Location::caller();
        let record = Record::builder()
            .level(Level::Warn)
            .payload("disk almost full")
            .location(location)
            .build();

        assert_eq!(record.level(), Level::Warn);
        assert_eq!(record.payload(), "disk almost full");
        assert_eq!(record.line(), Some(location.line()));
        assert_eq!(record.filename(), "record.rs");
        assert_eq!(record.target(), None);
    }

    #[test]
    fn test_filename_without_file_is_empty() {
        let record = Record::builder().payload("x").build();
        assert_eq!(record.filename(), "");
        assert_eq!(record.line(), None);
    }
}
