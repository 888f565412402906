//! Random store sequences checked against a simple map-based model

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::error::RingBufferError;
use crate::ring::RingBuffer;
use crate::testing::{biased_channels, frame_is_silent, frame_matches, silent_channels};
use crate::types::{SampleTime, TimeBounds, frames_to_time};

const CHANNELS: usize = 2;
const CAPACITY: usize = 16;

/// Resident bounds plus the bias stored at each time; `None` marks silence
#[derive(Default)]
struct Model {
    bounds: TimeBounds,
    biases: BTreeMap<SampleTime, Option<f32>>,
}

impl Model {
    fn store(&mut self, start: SampleTime, frames: usize, bias: f32) {
        if frames == 0 || frames > CAPACITY {
            return;
        }
        let end = start + frames_to_time(frames);
        let capacity = frames_to_time(CAPACITY);

        if start < self.bounds.end {
            self.bounds = TimeBounds::empty_at(start);
            self.biases.clear();
        }
        if end - self.bounds.start > capacity {
            let oldest = end - capacity;
            self.bounds = TimeBounds::new(oldest, oldest.max(self.bounds.end));
        }
        for time in self.bounds.end..start {
            self.biases.insert(time, None);
        }
        for time in start..end {
            self.biases.insert(time, Some(bias));
        }
        self.bounds.end = end;
    }
}

fn check_against_model(ring: &RingBuffer<f32>, model: &Model) {
    let window = 4;
    let start = model.bounds.start - frames_to_time(window);
    let frames = model.bounds.frames() + 2 * window;
    let mut block = vec![vec![-1.0f32; frames]; CHANNELS];
    ring.fetch(&mut block, frames, start).unwrap();

    for frame in 0..frames {
        let time = start + frames_to_time(frame);
        let bias = model
            .bounds
            .contains(time)
            .then(|| model.biases.get(&time).copied().flatten())
            .flatten();
        match bias {
            Some(bias) => assert!(
                frame_matches(&block, frame, time, bias),
                "time {time} should hold bias {bias}"
            ),
            None => assert!(frame_is_silent(&block, frame), "time {time} should be silent"),
        }
    }
}

proptest! {
    #[test]
    fn test_store_sequence_matches_model(
        ops in proptest::collection::vec((-24i64..40, 0usize..=CAPACITY + 4), 1..40)
    ) {
        let mut ring = RingBuffer::<f32>::new(CHANNELS, CAPACITY);
        let mut model = Model::default();

        for (index, (delta, frames)) in ops.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let bias = 1.0 + index as f32;
            let start = model.bounds.end + delta;
            let source = biased_channels(CHANNELS, frames, start, bias);

            let result = ring.store(&source, frames, start);
            if frames > CAPACITY {
                prop_assert_eq!(
                    result,
                    Err(RingBufferError::TooMuch { requested: frames, capacity: CAPACITY })
                );
            } else {
                prop_assert_eq!(result, Ok(()));
            }
            model.store(start, frames, bias);

            let bounds = ring.time_bounds().unwrap();
            prop_assert_eq!(bounds, model.bounds);
            prop_assert!(bounds.start <= bounds.end);
            prop_assert!(bounds.frames() <= CAPACITY);
            check_against_model(&ring, &model);
        }
    }

    #[test]
    fn test_fetch_anywhere_is_silence_or_data(
        first in -1000i64..1000,
        blocks in 1usize..12,
        offset in -64i64..64,
        frames in 0usize..48,
    ) {
        let mut ring = RingBuffer::<f32>::new(CHANNELS, CAPACITY);
        let block = 5;
        for i in 0..blocks {
            let start = first + frames_to_time(i * block);
            ring.store(&biased_channels(CHANNELS, block, start, 1.0), block, start).unwrap();
        }
        let bounds = ring.time_bounds().unwrap();

        let start = bounds.start + offset;
        let mut out = vec![vec![-1.0f32; frames]; CHANNELS];
        ring.fetch(&mut out, frames, start).unwrap();

        for frame in 0..frames {
            let time = start + frames_to_time(frame);
            if bounds.contains(time) {
                prop_assert!(frame_matches(&out, frame, time, 1.0));
            } else {
                prop_assert!(frame_is_silent(&out, frame));
            }
        }
    }

    #[test]
    fn test_wrapped_placement_is_invisible(
        shift in 0i64..64,
        frames in 1usize..=CAPACITY,
    ) {
        let mut ring = RingBuffer::<f32>::new(CHANNELS, CAPACITY);
        let source = biased_channels(CHANNELS, frames, shift, 2.0);
        ring.store(&source, frames, shift).unwrap();

        let mut out = silent_channels(CHANNELS, frames);
        ring.fetch(&mut out, frames, shift).unwrap();
        prop_assert_eq!(out, source);
    }
}
