//! The core benchmark loop.
//!
//! [`run`] drives `iterations` passes over a [`FrameSequence`], compressing
//! every frame into one shared scratch buffer and accumulating byte counts
//! and timing. The scratch buffer is allocated once before the timer starts
//! and never resized mid-run; exactly one compress call is in flight against
//! it at any time. Frames are always processed in ascending dataset order and
//! iterations sequentially; the loop is single-threaded and synchronous,
//! with codec-internal parallelism configured through the session only.

use crate::bench::metrics::{BenchmarkMetrics, FrameSample};
use crate::codec::CompressionSession;
use crate::displaylevel;
use crate::error::{BenchError, Result};
use crate::frame::FrameSequence;
use crate::timefn::CpuTimer;

/// Run the benchmark. Fails with `InvalidConfiguration` before any compress
/// call when `iterations == 0` or `scratch_capacity` is below
/// `frame_bytes + session.max_overhead()`; fails with `CompressionFailure`
/// (identifying frame and iteration) on the first codec error, discarding all
/// partial accumulation.
pub fn run(
    frames: &FrameSequence<'_>,
    session: &mut CompressionSession,
    iterations: u32,
    scratch_capacity: usize,
    verbose: bool,
) -> Result<BenchmarkMetrics> {
    if iterations == 0 {
        return Err(BenchError::InvalidConfiguration(
            "iteration count must be >= 1".into(),
        ));
    }
    let frame_bytes = frames.frame_bytes();
    let needed = frame_bytes + session.max_overhead();
    if scratch_capacity < needed {
        return Err(BenchError::InvalidConfiguration(format!(
            "scratch capacity {} is below frame length {} + codec overhead {}",
            scratch_capacity,
            frame_bytes,
            session.max_overhead()
        )));
    }

    // Raise scheduling priority to reduce OS-induced jitter in measurements.
    #[cfg(feature = "realtime-priority")]
    {
        // SAFETY: setpriority(2) adjusts only the calling process's
        // scheduling priority; it has no memory-safety implications.
        unsafe {
            libc::setpriority(libc::PRIO_PROCESS, 0, -20);
        }
    }

    // Allocated before any timing starts; overwritten every frame, never
    // read back, never resized.
    let mut scratch = vec![0u8; scratch_capacity];

    let mut total_compressed: u64 = 0;
    let mut samples: Vec<FrameSample> = Vec::new();

    let timer = CpuTimer::start();

    for iteration in 0..iterations {
        if verbose {
            displaylevel!(3, "Iteration={}\n", iteration);
        }
        for (frame_index, frame) in frames.iter().enumerate() {
            let written = match session.compress(&frame, &mut scratch) {
                Ok(n) => n,
                Err(e) => {
                    return Err(BenchError::CompressionFailure {
                        frame_index,
                        iteration_index: iteration,
                        code: e.code(),
                    })
                }
            };
            total_compressed += written as u64;

            if verbose {
                // Sample immediately after the frame, not batched.
                let times = timer.elapsed();
                if written > 0 {
                    displaylevel!(
                        3,
                        "Ratio: {} ({}/{})",
                        frame.byte_length() as f64 / written as f64,
                        written,
                        frame.byte_length()
                    );
                } else {
                    displaylevel!(3, "Ratio: inf (0/{})", frame.byte_length());
                }
                displaylevel!(
                    3,
                    " Wall: {} User: {} System: {}\n",
                    times.wall_seconds(),
                    times.user_seconds(),
                    times.system_seconds()
                );
                samples.push(FrameSample {
                    iteration,
                    frame_index,
                    compressed_bytes: written,
                    times,
                });
            }
        }
    }

    let times = timer.elapsed();

    Ok(BenchmarkMetrics {
        dataset_bytes: iterations as u64 * frames.frame_count() as u64 * frame_bytes as u64,
        compressed_bytes: total_compressed,
        times,
        samples,
    })
}
