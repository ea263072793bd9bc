//! Frame model: one owned contiguous dataset arena ([`FrameBuffer`]), many
//! borrowed fixed-size views into it ([`FrameView`]), and a lazy restartable
//! traversal ([`FrameSequence`]).
//!
//! No frame bytes are ever copied; views are offset+length cursors whose
//! lifetime is tied to the buffer, so a view can never outlive the arena.

pub mod buffer;
pub mod sequence;
pub mod view;

pub use buffer::FrameBuffer;
pub use sequence::{FrameSequence, Frames};
pub use view::FrameView;
