//! Bundled codec engine backed by the `zstd` crate.
//!
//! The engine wraps each compressed frame in a small fixed header and falls
//! back to storing the payload verbatim whenever the backing compressor
//! would overflow the destination or expand the input. That fallback is what
//! makes [`MAX_OVERHEAD`] a hard constant: a destination of
//! `input_len + MAX_OVERHEAD` bytes always suffices, so the benchmark can
//! size its scratch buffer once from the first frame's length.
//!
//! Frame header layout (16 bytes, little-endian):
//!
//! ```text
//! [0]      format version
//! [1]      flags: bit 0 = shuffled, bit 1 = stored (payload uncompressed)
//! [2]      algorithm id (0 = store, 1 = zstd)
//! [3]      element size (clamped to 255)
//! [4..8]   uncompressed payload length
//! [8..12]  total length including header
//! [12..16] reserved, zero
//! ```

use crate::codec::shuffle::shuffle_bytes;
use crate::codec::{AlgorithmInfo, CodecEngine, CodecError};
use crate::error::{BenchError, Result};

/// Worst-case per-frame expansion: the frame header.
pub const MAX_OVERHEAD: usize = 16;

const FORMAT_VERSION: u8 = 1;
const FLAG_SHUFFLED: u8 = 0x01;
const FLAG_STORED: u8 = 0x02;

// Negative error codes, mirroring a C-style codec ABI.
pub const ERR_NOT_INITIALIZED: i32 = -1;
pub const ERR_DST_TOO_SMALL: i32 = -2;
pub const ERR_BACKEND: i32 = -3;
pub const ERR_INPUT_TOO_LARGE: i32 = -4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Algorithm {
    Store,
    Zstd,
}

impl Algorithm {
    fn id(self) -> u8 {
        match self {
            Algorithm::Store => 0,
            Algorithm::Zstd => 1,
        }
    }
}

/// Default [`CodecEngine`] implementation: `zstd` plus a `store` (memcpy)
/// algorithm for baseline measurements.
pub struct ZstdEngine {
    algorithm: Algorithm,
    threads: usize,
    initialized: bool,
    /// Compression context cached per level so the timing loop never
    /// re-creates it; the level is fixed for a whole run.
    zctx: Option<(i32, zstd::bulk::Compressor<'static>)>,
    /// Reusable shuffle destination, grown once on first use.
    shuffle_buf: Vec<u8>,
}

impl ZstdEngine {
    pub fn new() -> Self {
        ZstdEngine {
            algorithm: Algorithm::Zstd,
            threads: 1,
            initialized: false,
            zctx: None,
            shuffle_buf: Vec::new(),
        }
    }
}

impl Default for ZstdEngine {
    fn default() -> Self {
        ZstdEngine::new()
    }
}

impl CodecEngine for ZstdEngine {
    fn list_algorithms(&self) -> Vec<AlgorithmInfo> {
        vec![
            AlgorithmInfo {
                name: "store".into(),
                library: "benchpress".into(),
                version: crate::BENCHPRESS_VERSION.into(),
            },
            AlgorithmInfo {
                name: "zstd".into(),
                library: "libzstd".into(),
                version: zstd_version_string(),
            },
        ]
    }

    fn max_overhead(&self) -> usize {
        MAX_OVERHEAD
    }

    fn init(&mut self) {
        self.initialized = true;
    }

    fn shutdown(&mut self) {
        self.initialized = false;
        self.zctx = None;
        self.shuffle_buf = Vec::new();
    }

    fn set_thread_count(&mut self, threads: usize) -> Result<()> {
        if threads == 0 {
            return Err(BenchError::InvalidConfiguration(
                "thread count must be >= 1".into(),
            ));
        }
        self.threads = threads;
        // Thread count feeds the next compression context; drop any cached
        // one so the new setting takes effect.
        self.zctx = None;
        Ok(())
    }

    fn set_algorithm(&mut self, name: &str) -> Result<()> {
        self.algorithm = match name {
            "store" => Algorithm::Store,
            "zstd" => Algorithm::Zstd,
            other => {
                return Err(BenchError::InvalidConfiguration(format!(
                    "unknown algorithm {:?} (available: store, zstd)",
                    other
                )))
            }
        };
        Ok(())
    }

    fn compress(
        &mut self,
        level: u32,
        shuffle: bool,
        element_size: usize,
        src: &[u8],
        dst: &mut [u8],
    ) -> std::result::Result<usize, CodecError> {
        if !self.initialized {
            return Err(CodecError::new(ERR_NOT_INITIALIZED));
        }
        if src.len() > (u32::MAX as usize) - MAX_OVERHEAD {
            return Err(CodecError::new(ERR_INPUT_TOO_LARGE));
        }
        if dst.len() < src.len() + MAX_OVERHEAD {
            return Err(CodecError::new(ERR_DST_TOO_SMALL));
        }

        let ZstdEngine {
            algorithm,
            threads,
            zctx,
            shuffle_buf,
            ..
        } = self;

        // Shuffle only applies to typed data: element_size > 1 and a whole
        // number of samples per frame.
        let do_shuffle = shuffle && element_size > 1 && src.len() % element_size == 0;
        let input: &[u8] = if do_shuffle {
            if shuffle_buf.len() < src.len() {
                shuffle_buf.resize(src.len(), 0);
            }
            shuffle_bytes(element_size, src, &mut shuffle_buf[..src.len()]);
            &shuffle_buf[..src.len()]
        } else {
            src
        };

        // Level 0 means "store" for every algorithm.
        let try_zstd = *algorithm == Algorithm::Zstd && level > 0;
        let mut stored = true;
        let mut payload_len = src.len();

        if try_zstd {
            let zlevel = level.min(9) as i32;
            let ctx = match zctx {
                Some((cached_level, ctx)) if *cached_level == zlevel => ctx,
                slot => {
                    let mut ctx = zstd::bulk::Compressor::new(zlevel)
                        .map_err(|_| CodecError::new(ERR_BACKEND))?;
                    if *threads > 1 {
                        // Engine-internal worker threads; not every libzstd
                        // build supports them, and a refusal is not fatal.
                        let _ = ctx.multithread(*threads as u32);
                    }
                    &mut slot.insert((zlevel, ctx)).1
                }
            };
            match ctx.compress_to_buffer(input, &mut dst[MAX_OVERHEAD..]) {
                Ok(n) if n < src.len() => {
                    stored = false;
                    payload_len = n;
                }
                // Destination overflow or expansion: fall through to store.
                _ => {}
            }
        }

        if stored {
            dst[MAX_OVERHEAD..MAX_OVERHEAD + src.len()].copy_from_slice(input);
        }

        let total = MAX_OVERHEAD + payload_len;
        let mut flags = 0u8;
        if do_shuffle {
            flags |= FLAG_SHUFFLED;
        }
        if stored {
            flags |= FLAG_STORED;
        }
        dst[0] = FORMAT_VERSION;
        dst[1] = flags;
        dst[2] = algorithm.id();
        dst[3] = element_size.min(255) as u8;
        dst[4..8].copy_from_slice(&(src.len() as u32).to_le_bytes());
        dst[8..12].copy_from_slice(&(total as u32).to_le_bytes());
        dst[12..16].fill(0);

        Ok(total)
    }
}

fn zstd_version_string() -> String {
    let v = zstd::zstd_safe::version_number();
    format!("{}.{}.{}", v / 10_000, (v / 100) % 100, v % 100)
}
