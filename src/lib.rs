// benchpress: codec benchmarking over framed binary datasets

pub mod cli;
pub mod timefn;
pub mod error;
pub mod dataset;
pub mod frame;
pub mod codec;
pub mod bench;

pub use error::{BenchError, Result};

pub const BENCHPRESS_VERSION: &str = env!("CARGO_PKG_VERSION");
