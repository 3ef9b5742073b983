use crate::Position;

/// A saved cursor state that can be restored later.
///
/// Scanners capture one on entry and restore it when they do not match, so a
/// failed attempt never moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: Position,
}

impl Checkpoint {
    /// Creates a checkpoint at the given position.
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }
}
