//! Regular expression literals inside equality operands.
//!
//! A string operand written as `/pattern/flags` is matched as an unanchored
//! regular expression instead of compared literally:
//!
//! ```text
//! { "name": "/^ad/i" }        matches "Ada", "ADMIN"
//! { "name": { "$e": "/a+/" } }
//! ```
//!
//! Supported flags:
//!
//! | flag | effect |
//! |------|--------|
//! | `i`  | case-insensitive |
//! | `m`  | `^` and `$` match at line boundaries |
//! | `s`  | `.` matches `\n` |
//! | `x`  | ignore whitespace and `#` comments in the pattern |
//! | `U`  | swap greedy and lazy quantifiers |
//! | `u`  | unicode (always on) |

use regex::{Regex, RegexBuilder};

use crate::evaluator::MatchError;

/// Flag letters accepted after the closing slash.
pub const FLAGS: &str = "imsxUu";

/// A `/pattern/flags` string split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexLiteral<'a> {
    pub pattern: &'a str,
    pub flags: &'a str,
}

impl<'a> RegexLiteral<'a> {
    /// Recognizes `/pattern/flags`. Every flag must be one of the supported
    /// ones, so a path such as `/usr/bin` is not a literal and compares as
    /// plain text.
    pub fn parse(s: &'a str) -> Option<Self> {
        let rest = s.strip_prefix('/')?;
        let close = rest.rfind('/')?;
        let flags = &rest[close + 1..];
        if !flags.chars().all(|c| FLAGS.contains(c)) {
            return None;
        }
        Some(RegexLiteral {
            pattern: &rest[..close],
            flags,
        })
    }

    pub fn compile(&self) -> Result<Regex, MatchError> {
        let mut builder = RegexBuilder::new(self.pattern);
        for flag in self.flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                'x' => builder.ignore_whitespace(true),
                'U' => builder.swap_greed(true),
                'u' => builder.unicode(true),
                other => {
                    return Err(MatchError::TypeError(format!(
                        "unsupported regex flag '{}' in /{}/{}",
                        other, self.pattern, self.flags
                    )));
                }
            };
        }
        builder
            .build()
            .map_err(|e| MatchError::TypeError(format!("invalid regex /{}/: {e}", self.pattern)))
    }
}
