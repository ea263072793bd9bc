//! Benchmark configuration: runtime parameters for a single run.
//!
//! [`BenchConfig`] holds every tuneable the CLI exposes: algorithm, thread
//! count, level, shuffle, iteration count, verbosity. Builder-style setters
//! allow callers to construct a configuration incrementally before passing it
//! to [`super::bench_dataset`].

use crate::codec::SessionConfig;

// ── Size multiplier constants ────────────────────────────────────────────────

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ── BenchConfig struct ───────────────────────────────────────────────────────

/// Runtime parameters controlling a single benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Codec algorithm name (default: "zstd").
    pub algorithm: String,

    /// Codec-internal worker threads (default: 1).
    pub threads: usize,

    /// Compression level `[0..9]`; 0 stores frames verbatim (default: 0).
    pub level: u32,

    /// Byte-shuffle preconditioning (default: on).
    pub shuffle: bool,

    /// Number of outer passes over the whole dataset (default: 1).
    pub iterations: u32,

    /// Record and print per-frame ratio and timer samples.
    pub verbose: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            algorithm: "zstd".into(),
            threads: 1,
            level: 0,
            shuffle: true,
            iterations: 1,
            verbose: false,
        }
    }
}

impl BenchConfig {
    pub fn set_algorithm(&mut self, algorithm: &str) -> &mut Self {
        self.algorithm = algorithm.to_owned();
        self
    }

    pub fn set_threads(&mut self, threads: usize) -> &mut Self {
        self.threads = threads;
        self
    }

    pub fn set_level(&mut self, level: u32) -> &mut Self {
        self.level = level;
        self
    }

    pub fn set_shuffle(&mut self, shuffle: bool) -> &mut Self {
        self.shuffle = shuffle;
        self
    }

    pub fn set_iterations(&mut self, iterations: u32) -> &mut Self {
        self.iterations = iterations;
        self
    }

    pub fn set_verbose(&mut self, verbose: bool) -> &mut Self {
        self.verbose = verbose;
        self
    }

    /// The codec-facing subset of this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            algorithm: self.algorithm.clone(),
            threads: self.threads,
            level: self.level,
            shuffle: self.shuffle,
        }
    }
}
