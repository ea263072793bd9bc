//! Unified error type for the benchpress library.
//!
//! Every fatal condition a benchmark run can hit is one variant here, so the
//! binary can print a single clear message and exit. Dataset errors abort
//! before any benchmarking starts; configuration errors surface before the
//! timer starts; a codec failure aborts the whole run with the offending
//! frame and iteration indices so it can be reproduced.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// The dataset file could not be opened.
    #[error("cannot open dataset file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The named dataset does not exist in the container.
    #[error("dataset {name:?} not found in file")]
    NotFound { name: String },

    /// The dataset payload could not be read.
    #[error("cannot read dataset {name:?}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The container header is malformed or inconsistent.
    #[error("malformed dataset file: {0}")]
    Format(String),

    /// The dataset contains zero frames; there is nothing to benchmark.
    #[error("dataset contains no frames")]
    EmptyDataset,

    /// Out-of-range level, bad thread count, unknown algorithm, or an
    /// undersized scratch buffer. Always raised before the timer starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The codec reported an error for a single frame. The whole run is
    /// discarded; no partial metrics are reported.
    #[error(
        "compression failed at frame {frame_index} of iteration {iteration_index} \
         (codec error {code})"
    )]
    CompressionFailure {
        frame_index: usize,
        iteration_index: u32,
        code: i32,
    },
}
