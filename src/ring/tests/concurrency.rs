//! One writer racing several readers over a small ring

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::error::RingBufferError;
use crate::ring::RingBuffer;
use crate::testing::{biased_channels, frame_is_silent, frame_matches, silent_channels};
use crate::types::{SampleTime, TimeBounds, frames_to_time};

const CHANNELS: usize = 2;
const CAPACITY: usize = 256;
const BLOCK: usize = 48;
const BLOCKS: i64 = 20_000;
const READERS: usize = 3;

fn check_block(block: &[Vec<f32>], start: SampleTime) {
    for frame in 0..block[0].len() {
        let time = start + frames_to_time(frame);
        assert!(
            frame_is_silent(block, frame) || frame_matches(block, frame, time, 1.0),
            "frame at time {time} is neither silence nor the stored value"
        );
    }
}

#[test]
fn test_readers_never_observe_torn_state() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(CHANNELS, CAPACITY).split();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..READERS)
        .map(|reader| {
            let consumer = consumer.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut last = TimeBounds::default();
                let mut block = silent_channels(CHANNELS, BLOCK * 2);
                loop {
                    let finished = done.load(Ordering::Acquire);

                    match consumer.time_bounds() {
                        Ok(bounds) => {
                            assert!(bounds.start <= bounds.end, "{bounds:?}");
                            assert!(bounds.frames() <= CAPACITY, "{bounds:?}");
                            assert!(bounds.start >= last.start && bounds.end >= last.end);
                            last = bounds;
                        }
                        Err(RingBufferError::CpuOverload { .. }) => {}
                        Err(err) => panic!("unexpected error: {err}"),
                    }

                    // Straddle the live end and reach back toward the oldest frames
                    let reach = frames_to_time(CAPACITY * (reader + 1) / READERS);
                    let start = last.end - reach;
                    match consumer.fetch(&mut block, BLOCK * 2, start) {
                        Ok(()) => check_block(&block, start),
                        Err(_) => {
                            assert!((0..BLOCK * 2).all(|f| frame_is_silent(&block, f)));
                        }
                    }

                    if finished {
                        break last;
                    }
                }
            })
        })
        .collect();

    for index in 0..BLOCKS {
        let start = index * frames_to_time(BLOCK);
        producer
            .store(&biased_channels(CHANNELS, BLOCK, start, 1.0), BLOCK, start)
            .unwrap();
    }
    done.store(true, Ordering::Release);

    let end = BLOCKS * frames_to_time(BLOCK);
    for reader in readers {
        let last = reader.join().unwrap();
        assert_eq!(last, TimeBounds::new(end - frames_to_time(CAPACITY), end));
    }
    assert_eq!(
        producer.time_bounds(),
        Ok(TimeBounds::new(end - frames_to_time(CAPACITY), end))
    );
}

/// Small enough to run under a data race checker
#[test]
fn test_store_and_fetch_overlap_on_same_cells() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(1, 8).split();

    let reader = thread::spawn(move || {
        let mut block = silent_channels(1, 8);
        for _ in 0..20 {
            // An overloaded fetch leaves silence, which also passes
            let _ = consumer.fetch(&mut block, 8, 0);
            check_block(&block, 0);
        }
    });

    for i in 0..20 {
        let start = i * 4;
        producer
            .store(&biased_channels(1, 4, start, 1.0), 4, start)
            .unwrap();
    }

    reader.join().unwrap();
}
