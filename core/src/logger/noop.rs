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

use std::fmt;

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::record::Record;

/// A logger that writes nothing.
///
/// This is what the process-wide registry hands out before any logger is installed, so callers
/// never need to check for an absent logger.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct NoOpLogger {}

impl Logger for NoOpLogger {
    fn set_level(&self, _: Level) {}

    fn level(&self) -> Option<Level> {
        None
    }

    fn reset_level(&self) {}

    fn emit(&self, _: &Record) -> Result<(), Error> {
        Ok(())
    }

    fn enabled(&self, _: Level) -> bool {
        false
    }

    fn trace(&self, _: &[&dyn fmt::Display]) {}

    fn trace_fmt(&self, _: fmt::Arguments<'_>) {}

    fn debug(&self, _: &[&dyn fmt::Display]) {}

    fn debug_fmt(&self, _: fmt::Arguments<'_>) {}

    fn info(&self, _: &[&dyn fmt::Display]) {}

    fn info_fmt(&self, _: fmt::Arguments<'_>) {}

    fn warn(&self, _: &[&dyn fmt::Display]) {}

    fn warn_fmt(&self, _: fmt::Arguments<'_>) {}

    fn error(&self, _: &[&dyn fmt::Display]) {}

    fn error_fmt(&self, _: fmt::Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panicking;

    impl fmt::Display for Panicking {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            panic!("a no-op logger must not render its arguments")
        }
    }

    #[test]
    fn test_everything_is_ignored() {
        let logger = NoOpLogger::default();
        logger.set_level(Level::Trace);
        assert_eq!(logger.level(), None);
        logger.reset_level();
        assert_eq!(logger.level(), None);

        for level in Level::SEVERITIES {
            assert!(!logger.enabled(level));
        }

        logger.trace(&[]);
        logger.debug(&[&""]);
        logger.info(&[&Panicking]);
        logger.warn_fmt(format_args!("{}", Panicking));
        logger.error(&[&Panicking, &0]);
        logger.log(&Record::builder().level(Level::Error).build());
        logger.flush().unwrap();
    }
}
