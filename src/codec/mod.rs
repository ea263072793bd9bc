//! Codec engine boundary.
//!
//! The benchmark core treats the codec as an opaque engine behind the
//! [`CodecEngine`] trait: it accepts configuration (algorithm, thread count)
//! and compresses byte buffers, nothing more. [`engine::ZstdEngine`] is the
//! bundled implementation; tests drive the harness with stub engines through
//! the same seam.

pub mod engine;
pub mod session;
pub mod shuffle;

pub use engine::ZstdEngine;
pub use session::{CompressionSession, SessionConfig};

use thiserror::Error;

use crate::error::Result;

/// One entry of the engine's algorithm listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: String,
    /// Backing library identifier (e.g. "libzstd").
    pub library: String,
    pub version: String,
}

/// A negative error code reported by a compress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("codec error {code}")]
pub struct CodecError {
    pub code: i32,
}

impl CodecError {
    pub fn new(code: i32) -> Self {
        CodecError { code }
    }

    pub fn code(&self) -> i32 {
        self.code
    }
}

/// The external codec collaborator.
///
/// `init`/`shutdown` bracket all compress calls and run at most once per
/// engine; [`session::CompressionSession`] enforces the pairing on every exit
/// path. Configuration calls (`set_thread_count`, `set_algorithm`) must be
/// accepted before the first compress.
pub trait CodecEngine {
    /// Available algorithms as (name, backing library, version) entries, in a
    /// stable order.
    fn list_algorithms(&self) -> Vec<AlgorithmInfo>;

    /// Hard worst-case expansion bound in bytes. A destination buffer of
    /// `input_len + max_overhead()` bytes is always large enough.
    fn max_overhead(&self) -> usize;

    fn init(&mut self);

    fn shutdown(&mut self);

    fn set_thread_count(&mut self, threads: usize) -> Result<()>;

    fn set_algorithm(&mut self, name: &str) -> Result<()>;

    /// Compress `src` into `dst`, returning the number of bytes written.
    ///
    /// `level` is the session's compression level (0 = store), `shuffle`
    /// requests byte-shuffle preconditioning for samples of `element_size`
    /// bytes. `dst` must honor the [`CodecEngine::max_overhead`] bound.
    fn compress(
        &mut self,
        level: u32,
        shuffle: bool,
        element_size: usize,
        src: &[u8],
        dst: &mut [u8],
    ) -> std::result::Result<usize, CodecError>;
}
