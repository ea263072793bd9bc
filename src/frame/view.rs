//! A non-owning cursor over exactly one frame of a [`FrameBuffer`].

use crate::frame::FrameBuffer;

/// Offset+length view of a single frame. Never owns memory; the lifetime
/// parameter ties its validity to the backing [`FrameBuffer`].
///
/// `offset + byte_length <= block length` holds for every constructed view,
/// and the only mutation is [`FrameView::advance`], which steps the offset by
/// one frame length.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    block: &'a [u8],
    offset: usize,
    byte_length: usize,
    element_size: usize,
}

impl<'a> FrameView<'a> {
    pub(crate) fn first(buf: &'a FrameBuffer) -> Self {
        debug_assert!(buf.frame_count() > 0);
        FrameView {
            block: buf.block(),
            offset: 0,
            byte_length: buf.frame_bytes(),
            element_size: buf.element_size(),
        }
    }

    /// The frame's bytes. The returned slice borrows from the buffer, not
    /// from the view, so it may outlive the view itself.
    pub fn bytes(&self) -> &'a [u8] {
        &self.block[self.offset..self.offset + self.byte_length]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    /// Step to the next frame position. Returns `false` (leaving the view
    /// unchanged) when no full frame follows the current one.
    pub fn advance(&mut self) -> bool {
        let next = self.offset + self.byte_length;
        if next + self.byte_length > self.block.len() {
            return false;
        }
        self.offset = next;
        true
    }
}
