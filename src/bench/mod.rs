//! Benchmark entry points.
//!
//! [`bench_dataset`] is the primary public API: it wires the whole flow,
//! dataset source to [`FrameBuffer`] to [`FrameSequence`] to configured
//! [`CompressionSession`] to [`harness::run`], and returns the aggregated
//! [`metrics::BenchmarkMetrics`]. The harness itself is usable directly with
//! any [`crate::codec::CodecEngine`], which is how the integration tests
//! drive it with stub codecs.

pub mod config;
pub mod harness;
pub mod metrics;
pub mod report;

pub use config::BenchConfig;
pub use metrics::{BenchmarkMetrics, FrameSample};

use std::path::Path;

use crate::codec::{CompressionSession, ZstdEngine};
use crate::dataset::{BpdFile, DatasetSource};
use crate::displaylevel;
use crate::error::Result;
use crate::frame::{FrameBuffer, FrameSequence};

/// Benchmark the named dataset in `path` with the bundled engine.
///
/// Dataset and configuration errors abort before the timer starts; the
/// engine is shut down on every exit path via the session's Drop.
pub fn bench_dataset(path: &Path, dataset: &str, config: &BenchConfig) -> Result<BenchmarkMetrics> {
    let mut source = BpdFile::open(path)?;
    let shape = source.shape(dataset)?;
    let data = source.read_all(dataset)?;
    drop(source);

    let buffer = FrameBuffer::from_shape(data, &shape.dims, shape.element_size)?;
    displaylevel!(2, "Number of frames read: {}\n", buffer.frame_count());

    let frames = FrameSequence::new(&buffer)?;

    let mut session =
        CompressionSession::configure(Box::new(ZstdEngine::new()), config.session_config())?;

    // Sized once from the frame length; reused across all frames and
    // iterations.
    let scratch_capacity = frames.frame_bytes() + session.max_overhead();

    harness::run(
        &frames,
        &mut session,
        config.iterations,
        scratch_capacity,
        config.verbose,
    )
}
