use common_framework::TextSlice;
use tracing::debug;

use crate::cursor::Cursor;
use crate::error::ScanResult;
use crate::identifier::ExpectedChars;
use crate::strategy::{CompiledScanner, Compile, Scan};

/// Logs every attempt of the wrapped scanner at `debug` level.
///
/// Outcomes are exactly those of the inner scanner.
#[derive(Debug, Clone)]
pub struct Traced<S> {
    name: String,
    inner: S,
}

impl<S> Traced<S> {
    pub fn new(name: impl Into<String>, inner: S) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

fn traced<F>(name: &str, cursor: &mut Cursor, scan: F) -> ScanResult<TextSlice>
where
    F: FnOnce(&mut Cursor) -> ScanResult<TextSlice>,
{
    let checkpoint = cursor.checkpoint();
    debug!(scanner = name, position = %cursor.position(), "scan");

    match scan(cursor) {
        Ok(Some(span)) => {
            debug!(scanner = name, matched = %span, "matched");
            Ok(Some(span))
        }
        Ok(None) => {
            cursor.restore(checkpoint);
            debug!(scanner = name, remaining = %cursor.remaining(), "no match");
            Ok(None)
        }
        Err(err) => {
            debug!(scanner = name, position = %err.position(), error = %err, "malformed");
            Err(err)
        }
    }
}

impl<S: Scan> Scan for Traced<S> {
    fn scan(&self, cursor: &mut Cursor) -> ScanResult<TextSlice> {
        traced(&self.name, cursor, |cursor| self.inner.scan(cursor))
    }

    fn expected_chars(&self) -> Option<&ExpectedChars> {
        self.inner.expected_chars()
    }
}

impl<S: Scan + Compile> Compile for Traced<S> {
    fn compile(&self) -> CompiledScanner {
        let name = self.name.clone();
        let inner = self.inner.compile();
        let expected = inner.expected_chars().cloned();

        CompiledScanner::new(expected, move |cursor| {
            traced(&name, cursor, |cursor| inner.scan(cursor))
        })
    }
}
