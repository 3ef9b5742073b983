//! Common Framework
//!
//! Building blocks shared by the scanner framework and its users: source
//! positions, cursor checkpoints and zero-copy text slices.

pub mod checkpoint;
pub mod position;
pub mod text_slice;

pub use checkpoint::Checkpoint;
pub use position::Position;
pub use text_slice::TextSlice;
