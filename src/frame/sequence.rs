//! Lazy, restartable, finite traversal of the frames in a [`FrameBuffer`].

use crate::error::{BenchError, Result};
use crate::frame::{FrameBuffer, FrameView};

/// Produces `frame_count` views of `frame_bytes` each, starting at offset 0
/// and advancing by `frame_bytes` per step. Only offsets are computed; no
/// frame bytes are copied.
///
/// Each call to [`FrameSequence::iter`] starts a fresh traversal, so an outer
/// benchmark iteration can re-walk the dataset without re-deriving the buffer.
#[derive(Debug, Clone, Copy)]
pub struct FrameSequence<'a> {
    buf: &'a FrameBuffer,
}

impl<'a> FrameSequence<'a> {
    /// Fails with [`BenchError::EmptyDataset`] iff the buffer has zero frames.
    pub fn new(buf: &'a FrameBuffer) -> Result<Self> {
        if buf.frame_count() == 0 {
            return Err(BenchError::EmptyDataset);
        }
        Ok(FrameSequence { buf })
    }

    pub fn frame_count(&self) -> usize {
        self.buf.frame_count()
    }

    pub fn frame_bytes(&self) -> usize {
        self.buf.frame_bytes()
    }

    pub fn element_size(&self) -> usize {
        self.buf.element_size()
    }

    /// Begin a fresh traversal in dataset order (frame 0 first).
    pub fn iter(&self) -> Frames<'a> {
        Frames {
            view: FrameView::first(self.buf),
            remaining: self.buf.frame_count(),
        }
    }
}

impl<'a> IntoIterator for &FrameSequence<'a> {
    type Item = FrameView<'a>;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Frames<'a> {
        self.iter()
    }
}

/// Iterator over the frames of one traversal.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    view: FrameView<'a>,
    remaining: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = FrameView<'a>;

    fn next(&mut self) -> Option<FrameView<'a>> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.view;
        self.remaining -= 1;
        if self.remaining > 0 {
            let advanced = self.view.advance();
            debug_assert!(advanced);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl std::iter::FusedIterator for Frames<'_> {}
