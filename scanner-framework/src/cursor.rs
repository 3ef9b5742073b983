use common_framework::{Checkpoint, Position, TextSlice};
use std::sync::Arc;

/// A cursor for traversing input text during scanning.
///
/// The buffer is shared and never mutated; only the read head moves. Moving
/// backward is only possible through [`Cursor::restore`].
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    position: Position,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        let buffer = Arc::<str>::from(owned);
        Self::with_arc(buffer)
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            position: Position::new(),
            buffer,
        }
    }

    /// Returns the shared buffer this cursor reads from.
    pub fn buffer(&self) -> &Arc<str> {
        &self.buffer
    }

    /// Returns the current position in the source.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.buffer.len()
    }

    /// Returns the next character without advancing the cursor.
    pub fn peek(&self) -> Option<char> {
        self.buffer[self.position.offset..].chars().next()
    }

    /// Returns the character `n` characters ahead without advancing.
    ///
    /// `peek_nth(0)` is the same as `peek()`.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.buffer[self.position.offset..].chars().nth(n)
    }

    /// Returns true if the remaining input starts with `literal`.
    pub fn starts_with(&self, literal: &str) -> bool {
        self.buffer[self.position.offset..].starts_with(literal)
    }

    /// Returns the next n characters without advancing the cursor.
    pub fn peek_slice(&self, n: usize) -> TextSlice {
        let current = self.position.offset;
        let remaining = &self.buffer[current..];
        let end = remaining
            .char_indices()
            .nth(n)
            .map(|(i, _)| current + i)
            .unwrap_or_else(|| self.buffer.len());
        TextSlice::new(self.buffer.clone(), current, end)
    }

    /// Advances the cursor by one character.
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position.step(ch);
        Some(ch)
    }

    /// Advances the cursor by n characters.
    pub fn advance_by(&mut self, n: usize) -> usize {
        let mut count = 0;
        for _ in 0..n {
            if self.advance().is_none() {
                break;
            }
            count += 1;
        }
        count
    }

    /// Consumes characters while the predicate returns true.
    pub fn consume_while<F>(&mut self, mut predicate: F) -> TextSlice
    where
        F: FnMut(char) -> bool,
    {
        let start = self.position.offset;
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
        self.slice(start, self.position.offset)
    }

    /// Returns the remaining input from the current position.
    pub fn remaining(&self) -> TextSlice {
        self.slice(self.position.offset, self.buffer.len())
    }

    /// Returns a slice of the buffer between two byte offsets.
    pub fn slice(&self, start: usize, end: usize) -> TextSlice {
        TextSlice::new(self.buffer.clone(), start, end)
    }

    /// Returns the text consumed since `start`.
    pub fn slice_from(&self, start: usize) -> TextSlice {
        self.slice(start, self.position.offset)
    }

    /// Returns the position the cursor would have after moving forward to
    /// `offset`, without moving it.
    pub fn position_at(&self, offset: usize) -> Position {
        debug_assert!(offset >= self.position.offset);
        let mut position = self.position;
        position.step_over(&self.buffer[self.position.offset..offset]);
        position
    }

    /// Moves the cursor forward to a byte offset, tracking lines and columns
    /// over the skipped text.
    pub fn seek(&mut self, offset: usize) {
        self.position = self.position_at(offset);
    }

    /// Resets the cursor to the beginning.
    pub fn reset(&mut self) {
        self.position = Position::new();
    }

    /// Creates a checkpoint that can be restored later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.position)
    }

    /// Restores the cursor to a previous checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position();
    }
}
