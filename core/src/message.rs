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

//! Message assembly shared by the unformatted and formatted logging calls.

use std::fmt;
use std::fmt::Write;

/// The raw content of a logging call before it is assembled into a message.
#[derive(Clone, Copy)]
pub enum Payload<'a> {
    /// A list of values, rendered with [`fmt::Display`] and joined by single spaces.
    Values(&'a [&'a dyn fmt::Display]),
    /// A template with its arguments, as produced by [`format_args!`].
    Template(fmt::Arguments<'a>),
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Values(values) => f.debug_tuple("Values").field(&values.len()).finish(),
            Payload::Template(args) => f.debug_tuple("Template").field(args).finish(),
        }
    }
}

impl Payload<'_> {
    /// Assemble the message text.
    ///
    /// Trailing line terminators are stripped so that every adapter controls its own line
    /// endings.
    ///
    /// # Examples
    ///
    /// ```
    /// use logfacade_core::message::Payload;
    ///
    /// assert_eq!(Payload::Values(&[&"answer", &42]).assemble(), "answer 42");
    /// assert_eq!(
    ///     Payload::Template(format_args!("answer={}\n", 42)).assemble(),
    ///     "answer=42"
    /// );
    /// ```
    pub fn assemble(&self) -> String {
        let mut text = String::new();
        // writing to a String never fails
        match self {
            Payload::Values(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        text.push(' ');
                    }
                    write!(&mut text, "{value}").unwrap();
                }
            }
            Payload::Template(args) => match args.as_str() {
                Some(s) => text.push_str(s),
                None => text.write_fmt(*args).unwrap(),
            },
        }

        let len = text.trim_end_matches(['\r', '\n']).len();
        text.truncate(len);
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_are_space_joined() {
        let text = Payload::Values(&[&"user", &"alice", &3.5, &'x']).assemble();
        insta::assert_snapshot!(text, @"user alice 3.5 x");
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(Payload::Values(&[]).assemble(), "");
        assert_eq!(Payload::Values(&[&""]).assemble(), "");
    }

    #[test]
    fn test_trailing_terminators_are_stripped() {
        let text = Payload::Values(&[&"first\n", &"second\r\n"]).assemble();
        assert_eq!(text, "first\n second");

        let text = Payload::Template(format_args!("{} done\r\n", "job")).assemble();
        assert_eq!(text, "job done");
    }

    #[test]
    fn test_template_without_arguments() {
        let text = Payload::Template(format_args!("static text")).assemble();
        assert_eq!(text, "static text");
    }
}
