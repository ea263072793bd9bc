//! Harness behaviour against stub codec engines: accumulation totals, call
//! ordering, fail-fast error reporting, and precondition checks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use benchpress::bench::harness;
use benchpress::codec::{
    AlgorithmInfo, CodecEngine, CodecError, CompressionSession, SessionConfig,
};
use benchpress::error::BenchError;
use benchpress::frame::{FrameBuffer, FrameSequence};

/// Stub codec: returns `input_len / 2` for every frame, optionally failing at
/// one specific call, and records the first byte of every input it sees.
struct StubEngine {
    overhead: usize,
    calls: Arc<AtomicUsize>,
    first_bytes: Arc<Mutex<Vec<u8>>>,
    fail_at_call: Option<usize>,
    fail_code: i32,
}

impl StubEngine {
    fn new() -> (Box<Self>, Arc<AtomicUsize>, Arc<Mutex<Vec<u8>>>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let first_bytes = Arc::new(Mutex::new(Vec::new()));
        let engine = Box::new(StubEngine {
            overhead: 16,
            calls: calls.clone(),
            first_bytes: first_bytes.clone(),
            fail_at_call: None,
            fail_code: -7,
        });
        (engine, calls, first_bytes)
    }
}

impl CodecEngine for StubEngine {
    fn list_algorithms(&self) -> Vec<AlgorithmInfo> {
        Vec::new()
    }

    fn max_overhead(&self) -> usize {
        self.overhead
    }

    fn init(&mut self) {}

    fn shutdown(&mut self) {}

    fn set_thread_count(&mut self, _threads: usize) -> benchpress::Result<()> {
        Ok(())
    }

    fn set_algorithm(&mut self, _name: &str) -> benchpress::Result<()> {
        Ok(())
    }

    fn compress(
        &mut self,
        _level: u32,
        _shuffle: bool,
        _element_size: usize,
        src: &[u8],
        _dst: &mut [u8],
    ) -> Result<usize, CodecError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_at_call == Some(call) {
            return Err(CodecError::new(self.fail_code));
        }
        if let Some(&b) = src.first() {
            self.first_bytes.lock().unwrap().push(b);
        }
        Ok(src.len() / 2)
    }
}

/// A buffer of `frames` frames, each `frame_bytes` long and filled with its
/// own frame index.
fn indexed_buffer(frames: usize, frame_bytes: usize) -> FrameBuffer {
    let data: Vec<u8> = (0..frames)
        .flat_map(|i| std::iter::repeat(i as u8).take(frame_bytes))
        .collect();
    FrameBuffer::new(data, frames, frame_bytes, 1).unwrap()
}

fn stub_session(engine: Box<StubEngine>) -> CompressionSession {
    CompressionSession::configure(engine, SessionConfig::default()).unwrap()
}

#[test]
fn half_size_stub_accumulates_exact_total() {
    // iterations=4, frame_count=6, frame_bytes=128 -> total == 4*6*128/2.
    let buffer = indexed_buffer(6, 128);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, _, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let metrics = harness::run(&frames, &mut session, 4, 128 + 16, false).unwrap();
    assert_eq!(metrics.compressed_bytes, 4 * 6 * 128 / 2);
    assert_eq!(metrics.dataset_bytes, 4 * 6 * 128);
}

#[test]
fn data_rate_matches_wall_time() {
    let buffer = indexed_buffer(3, 1024);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, _, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let metrics = harness::run(&frames, &mut session, 2, 1024 + 16, false).unwrap();
    let rate = metrics.data_rate().unwrap();
    let expected = metrics.dataset_megabytes() / metrics.times.wall_seconds();
    assert!((rate - expected).abs() < 1e-9);
}

#[test]
fn six_calls_in_dataset_order() {
    // 3 frames x 100 bytes, iterations=2 -> exactly 6 calls: 0,1,2,0,1,2.
    let buffer = indexed_buffer(3, 100);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, calls, first_bytes) = StubEngine::new();
    let mut session = stub_session(engine);

    harness::run(&frames, &mut session, 2, 100 + 16, false).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 6);
    assert_eq!(*first_bytes.lock().unwrap(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn failure_reports_frame_and_iteration() {
    // Fail on the 4th call: frame index 3 of iteration 0.
    let buffer = indexed_buffer(5, 64);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (mut engine, _, _) = StubEngine::new();
    engine.fail_at_call = Some(3);
    let mut session = stub_session(engine);

    let err = harness::run(&frames, &mut session, 2, 64 + 16, false).unwrap_err();
    match err {
        BenchError::CompressionFailure {
            frame_index,
            iteration_index,
            code,
        } => {
            assert_eq!(frame_index, 3);
            assert_eq!(iteration_index, 0);
            assert_eq!(code, -7);
        }
        other => panic!("expected CompressionFailure, got {:?}", other),
    }
}

#[test]
fn failure_in_later_iteration_reports_its_index() {
    // 2 frames per iteration; failing on call 5 means frame 1 of iteration 2.
    let buffer = indexed_buffer(2, 32);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (mut engine, _, _) = StubEngine::new();
    engine.fail_at_call = Some(5);
    let mut session = stub_session(engine);

    let err = harness::run(&frames, &mut session, 3, 32 + 16, false).unwrap_err();
    match err {
        BenchError::CompressionFailure {
            frame_index,
            iteration_index,
            ..
        } => {
            assert_eq!(frame_index, 1);
            assert_eq!(iteration_index, 2);
        }
        other => panic!("expected CompressionFailure, got {:?}", other),
    }
}

#[test]
fn undersized_scratch_rejected_before_any_compress() {
    let buffer = indexed_buffer(3, 100);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, calls, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let err = harness::run(&frames, &mut session, 1, 100 + 15, false).unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfiguration(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0, "no compress call may run");
}

#[test]
fn zero_iterations_rejected() {
    let buffer = indexed_buffer(2, 50);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, calls, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let err = harness::run(&frames, &mut session, 0, 50 + 16, false).unwrap_err();
    assert!(matches!(err, BenchError::InvalidConfiguration(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn verbose_records_one_sample_per_frame() {
    let buffer = indexed_buffer(4, 20);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, _, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let metrics = harness::run(&frames, &mut session, 2, 20 + 16, true).unwrap();
    assert_eq!(metrics.samples.len(), 8);
    let first = &metrics.samples[0];
    assert_eq!(first.iteration, 0);
    assert_eq!(first.frame_index, 0);
    assert_eq!(first.compressed_bytes, 10);
    let last = &metrics.samples[7];
    assert_eq!(last.iteration, 1);
    assert_eq!(last.frame_index, 3);
}

#[test]
fn non_verbose_records_no_samples() {
    let buffer = indexed_buffer(2, 16);
    let frames = FrameSequence::new(&buffer).unwrap();
    let (engine, _, _) = StubEngine::new();
    let mut session = stub_session(engine);

    let metrics = harness::run(&frames, &mut session, 1, 16 + 16, false).unwrap();
    assert!(metrics.samples.is_empty());
}
