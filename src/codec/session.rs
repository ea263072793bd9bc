//! Compression session: validated configuration plus a scoped engine
//! lifecycle.
//!
//! The session owns the engine for the duration of a benchmark run. Its
//! constructor validates the configuration, brings the engine up, and applies
//! thread count and algorithm; `Drop` shuts the engine down on every exit
//! path, including configuration failures after `init` and codec failures
//! mid-run. There is no explicit free or cleanup label; RAII enforces the
//! init/shutdown pairing that C-style codec libraries leave to the caller.

use crate::codec::{CodecEngine, CodecError};
use crate::error::{BenchError, Result};
use crate::frame::FrameView;

/// Immutable codec configuration for one benchmark run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub algorithm: String,
    pub threads: usize,
    /// Compression level in `[0, 9]`; 0 stores frames verbatim.
    pub level: u32,
    /// Byte-shuffle preconditioning for typed samples.
    pub shuffle: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            algorithm: "zstd".into(),
            threads: 1,
            level: 0,
            shuffle: true,
        }
    }
}

/// A configured codec engine, ready to compress frames.
pub struct CompressionSession {
    engine: Box<dyn CodecEngine>,
    config: SessionConfig,
}

impl std::fmt::Debug for CompressionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressionSession")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CompressionSession {
    /// Validate `config` and bring `engine` up. The engine is shut down
    /// before returning if any configuration step fails after `init`.
    pub fn configure(mut engine: Box<dyn CodecEngine>, config: SessionConfig) -> Result<Self> {
        if config.level > 9 {
            return Err(BenchError::InvalidConfiguration(format!(
                "compression level {} out of range [0..9]",
                config.level
            )));
        }
        if config.threads == 0 {
            return Err(BenchError::InvalidConfiguration(
                "thread count must be >= 1".into(),
            ));
        }

        engine.init();
        let applied = engine
            .set_thread_count(config.threads)
            .and_then(|()| engine.set_algorithm(&config.algorithm));
        if let Err(e) = applied {
            engine.shutdown();
            return Err(e);
        }

        Ok(CompressionSession { engine, config })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Worst-case expansion bound of the underlying engine, used to size the
    /// scratch buffer.
    pub fn max_overhead(&self) -> usize {
        self.engine.max_overhead()
    }

    /// Compress one frame into `scratch`, returning the bytes written.
    pub fn compress(
        &mut self,
        frame: &FrameView<'_>,
        scratch: &mut [u8],
    ) -> std::result::Result<usize, CodecError> {
        self.engine.compress(
            self.config.level,
            self.config.shuffle,
            frame.element_size(),
            frame.bytes(),
            scratch,
        )
    }
}

impl Drop for CompressionSession {
    fn drop(&mut self) {
        self.engine.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AlgorithmInfo;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Counts lifecycle calls so tests can assert the init/shutdown pairing.
    struct LifecycleProbe {
        inits: Arc<AtomicU32>,
        shutdowns: Arc<AtomicU32>,
        reject_algorithm: bool,
    }

    impl CodecEngine for LifecycleProbe {
        fn list_algorithms(&self) -> Vec<AlgorithmInfo> {
            Vec::new()
        }

        fn max_overhead(&self) -> usize {
            4
        }

        fn init(&mut self) {
            self.inits.fetch_add(1, Ordering::Relaxed);
        }

        fn shutdown(&mut self) {
            self.shutdowns.fetch_add(1, Ordering::Relaxed);
        }

        fn set_thread_count(&mut self, _threads: usize) -> Result<()> {
            Ok(())
        }

        fn set_algorithm(&mut self, name: &str) -> Result<()> {
            if self.reject_algorithm {
                Err(BenchError::InvalidConfiguration(format!(
                    "unknown algorithm {:?}",
                    name
                )))
            } else {
                Ok(())
            }
        }

        fn compress(
            &mut self,
            _level: u32,
            _shuffle: bool,
            _element_size: usize,
            src: &[u8],
            _dst: &mut [u8],
        ) -> std::result::Result<usize, CodecError> {
            Ok(src.len())
        }
    }

    fn probe(reject_algorithm: bool) -> (Box<LifecycleProbe>, Arc<AtomicU32>, Arc<AtomicU32>) {
        let inits = Arc::new(AtomicU32::new(0));
        let shutdowns = Arc::new(AtomicU32::new(0));
        let engine = Box::new(LifecycleProbe {
            inits: inits.clone(),
            shutdowns: shutdowns.clone(),
            reject_algorithm,
        });
        (engine, inits, shutdowns)
    }

    #[test]
    fn drop_shuts_engine_down_exactly_once() {
        let (engine, inits, shutdowns) = probe(false);
        let session = CompressionSession::configure(engine, SessionConfig::default()).unwrap();
        assert_eq!(inits.load(Ordering::Relaxed), 1);
        assert_eq!(shutdowns.load(Ordering::Relaxed), 0);
        drop(session);
        assert_eq!(shutdowns.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn failed_configure_still_releases_engine() {
        let (engine, inits, shutdowns) = probe(true);
        let err = CompressionSession::configure(engine, SessionConfig::default()).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfiguration(_)));
        assert_eq!(inits.load(Ordering::Relaxed), 1);
        assert_eq!(shutdowns.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn level_out_of_range_rejected_before_init() {
        let (engine, inits, _) = probe(false);
        let config = SessionConfig {
            level: 10,
            ..SessionConfig::default()
        };
        let err = CompressionSession::configure(engine, config).unwrap_err();
        assert!(matches!(err, BenchError::InvalidConfiguration(_)));
        assert_eq!(inits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn zero_threads_rejected_before_init() {
        let (engine, inits, _) = probe(false);
        let config = SessionConfig {
            threads: 0,
            ..SessionConfig::default()
        };
        assert!(CompressionSession::configure(engine, config).is_err());
        assert_eq!(inits.load(Ordering::Relaxed), 0);
    }
}
