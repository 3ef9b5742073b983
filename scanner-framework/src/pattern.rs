//! Regular expressions anchored at the cursor.

use common_framework::TextSlice;
use regex::Regex;

use crate::cursor::Cursor;
use crate::error::{ConfigError, ScanResult};
use crate::strategy::{commit, CompiledScanner, Compile, Scan};

/// Matches a regular expression starting exactly at the cursor.
///
/// Empty matches count as no match, so `a*` does not succeed on `"bcd"`.
#[derive(Debug, Clone)]
pub struct PatternScanner {
    pattern: String,
    regex: Regex,
}

impl PatternScanner {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as given, without the anchor.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn match_len(regex: &Regex, haystack: &str) -> Option<usize> {
        regex
            .find(haystack)
            .map(|found| found.end())
            .filter(|len| *len > 0)
    }
}

impl Scan for PatternScanner {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        let remaining = cursor.remaining();
        let Some(len) = Self::match_len(&self.regex, remaining.as_str()) else {
            return Ok(None);
        };

        let start = cursor.offset();
        let end = start + len;
        while cursor.offset() < end {
            cursor.advance();
        }
        Ok(Some(cursor.slice_from(start)))
    }
}

impl Compile for PatternScanner {
    fn compile(&self) -> CompiledScanner {
        let regex = self.regex.clone();

        CompiledScanner::new(None, move |cursor| {
            let buffer = cursor.buffer().clone();
            let start = cursor.offset();
            match Self::match_len(&regex, &buffer[start..]) {
                Some(len) => Ok(Some(commit(cursor, start, start + len))),
                None => Ok(None),
            }
        })
    }
}
