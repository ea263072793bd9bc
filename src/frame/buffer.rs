//! The dataset arena: one contiguous block of raw bytes plus its shape.

use crate::error::{BenchError, Result};

/// Owns the whole dataset as one contiguous byte block, sliced logically into
/// `frame_count` frames of `frame_bytes` each.
///
/// Invariant: `frame_count * frame_bytes == data.len()`, checked at
/// construction. The block is read-only for the buffer's whole life; all
/// access goes through borrowed [`crate::frame::FrameView`]s.
#[derive(Debug)]
pub struct FrameBuffer {
    data: Vec<u8>,
    frame_count: usize,
    frame_bytes: usize,
    element_size: usize,
}

impl FrameBuffer {
    /// Build a buffer from explicit frame geometry.
    pub fn new(
        data: Vec<u8>,
        frame_count: usize,
        frame_bytes: usize,
        element_size: usize,
    ) -> Result<Self> {
        if frame_count > 0 && frame_bytes == 0 {
            return Err(BenchError::Format(
                "dataset declares zero-length frames".into(),
            ));
        }
        if element_size == 0 {
            return Err(BenchError::Format("dataset declares zero element size".into()));
        }
        let expected = frame_count
            .checked_mul(frame_bytes)
            .ok_or_else(|| BenchError::Format("dataset shape overflows".into()))?;
        if expected != data.len() {
            return Err(BenchError::Format(format!(
                "dataset is {} bytes but shape implies {} frames x {} bytes = {}",
                data.len(),
                frame_count,
                frame_bytes,
                expected
            )));
        }
        Ok(FrameBuffer {
            data,
            frame_count,
            frame_bytes,
            element_size,
        })
    }

    /// Build a buffer from a dimension list, treating dimension 0 as the
    /// frame axis: `frame_bytes = product(dims[1..]) * element_size`.
    ///
    /// A 1-D dataset falls out of the same formula (empty tail product = 1),
    /// yielding `dims[0]` frames of `element_size` bytes each.
    pub fn from_shape(data: Vec<u8>, dims: &[u64], element_size: usize) -> Result<Self> {
        if dims.is_empty() {
            return Err(BenchError::Format("dataset has no dimensions".into()));
        }
        let frame_count = dims[0] as usize;
        let frame_elems = dims[1..]
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d as usize))
            .ok_or_else(|| BenchError::Format("dataset shape overflows".into()))?;
        let frame_bytes = frame_elems
            .checked_mul(element_size)
            .ok_or_else(|| BenchError::Format("dataset shape overflows".into()))?;
        Self::new(data, frame_count, frame_bytes, element_size)
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Bytes per frame; constant across all frames (rectangular dataset).
    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }

    /// Bytes per sample, used by the codec for shuffle preconditioning.
    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn total_bytes(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn block(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_checks_geometry() {
        let buf = FrameBuffer::new(vec![0u8; 600], 3, 200, 4).unwrap();
        assert_eq!(buf.frame_count(), 3);
        assert_eq!(buf.frame_bytes(), 200);
        assert_eq!(buf.element_size(), 4);
        assert_eq!(buf.total_bytes(), 600);
    }

    #[test]
    fn new_rejects_mismatched_size() {
        let err = FrameBuffer::new(vec![0u8; 601], 3, 200, 4).unwrap_err();
        assert!(matches!(err, BenchError::Format(_)));
    }

    #[test]
    fn new_rejects_zero_length_frames() {
        let err = FrameBuffer::new(vec![], 3, 0, 4).unwrap_err();
        assert!(matches!(err, BenchError::Format(_)));
    }

    #[test]
    fn from_shape_dimension_zero_is_frame_axis() {
        // 10 frames of 4x3 two-byte samples.
        let buf = FrameBuffer::from_shape(vec![0u8; 10 * 4 * 3 * 2], &[10, 4, 3], 2).unwrap();
        assert_eq!(buf.frame_count(), 10);
        assert_eq!(buf.frame_bytes(), 24);
    }

    #[test]
    fn from_shape_one_dimensional_dataset() {
        // Degenerate 1-D shape: each element is its own frame.
        let buf = FrameBuffer::from_shape(vec![0u8; 7 * 4], &[7], 4).unwrap();
        assert_eq!(buf.frame_count(), 7);
        assert_eq!(buf.frame_bytes(), 4);
    }

    #[test]
    fn from_shape_zero_frames_is_constructible() {
        // An empty dataset builds; FrameSequence::new is what rejects it.
        let buf = FrameBuffer::from_shape(vec![], &[0, 16], 1).unwrap();
        assert_eq!(buf.frame_count(), 0);
    }
}
