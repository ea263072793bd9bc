//! Aggregated benchmark results.

use crate::bench::config::MB;
use crate::timefn::CpuTimes;

/// One verbose-mode sample, recorded immediately after a frame is compressed.
#[derive(Debug, Clone, Copy)]
pub struct FrameSample {
    pub iteration: u32,
    pub frame_index: usize,
    pub compressed_bytes: usize,
    /// Timer state at the moment the frame finished.
    pub times: CpuTimes,
}

/// Final metrics of one harness run.
///
/// `ratio` and `data_rate` are derived, never stored: a codec that somehow
/// produced zero output or a run too fast for the wall clock yields `None`
/// rather than a division by zero.
#[derive(Debug, Clone)]
pub struct BenchmarkMetrics {
    /// Total uncompressed bytes processed: `iterations * frame_count * frame_bytes`.
    pub dataset_bytes: u64,
    /// Sum of compressed sizes across every frame of every iteration.
    pub compressed_bytes: u64,
    /// Wall/user/system time over the whole loop.
    pub times: CpuTimes,
    /// Per-frame samples; empty unless verbose diagnostics were enabled.
    pub samples: Vec<FrameSample>,
}

impl BenchmarkMetrics {
    pub fn dataset_megabytes(&self) -> f64 {
        self.dataset_bytes as f64 / MB as f64
    }

    pub fn compressed_megabytes(&self) -> f64 {
        self.compressed_bytes as f64 / MB as f64
    }

    /// Compression ratio `dataset / compressed`, or `None` when the
    /// compressed size is zero (undefined/infinite ratio).
    pub fn ratio(&self) -> Option<f64> {
        if self.compressed_bytes == 0 {
            None
        } else {
            Some(self.dataset_bytes as f64 / self.compressed_bytes as f64)
        }
    }

    /// Uncompressed megabytes processed per wall-clock second, or `None`
    /// when no wall time elapsed.
    pub fn data_rate(&self) -> Option<f64> {
        if self.times.wall_ns == 0 {
            None
        } else {
            Some(self.dataset_megabytes() / self.times.wall_seconds())
        }
    }
}
