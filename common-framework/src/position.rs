/// Represents a location in the source text.
///
/// Shared by the cursor and by every scanner so that errors raised by either
/// execution strategy point at exactly the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Byte offset from the start of the input
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Moves this position past a single character.
    ///
    /// A `'\n'` starts a new line; every other character moves one column.
    #[inline]
    pub fn step(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += ch.len_utf8();
    }

    /// Moves this position past every character of `text`.
    pub fn step_over(&mut self, text: &str) {
        for ch in text.chars() {
            self.step(ch);
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} (offset {})", self.line, self.column, self.offset)
    }
}
