use std::thread;

use crate::ring::{FetchMode, RingBuffer};
use crate::testing::{biased_channels, silent_channels};
use crate::types::TimeBounds;

#[test]
fn test_split_shares_state() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(2, 32).split();
    let source = biased_channels(2, 16, 8, 1.0);

    producer.store(&source, 16, 8).unwrap();

    assert_eq!(producer.time_bounds(), Ok(TimeBounds::new(8, 24)));
    assert_eq!(consumer.time_bounds(), Ok(TimeBounds::new(8, 24)));

    let mut block = silent_channels(2, 16);
    consumer.fetch(&mut block, 16, 8).unwrap();
    assert_eq!(block, source);
}

#[test]
fn test_handles_report_geometry() {
    let (producer, consumer) = RingBuffer::<i32>::new(3, 100).split();

    assert_eq!(producer.channels(), 3);
    assert_eq!(producer.capacity(), 128);
    assert_eq!(consumer.channels(), 3);
    assert_eq!(consumer.capacity(), 128);
}

#[test]
fn test_cloned_consumers_see_same_data() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(1, 16).split();
    let other = consumer.clone();
    producer.store(&vec![vec![1.0f32; 8]], 8, 0).unwrap();

    let mut copied = vec![vec![0.0f32; 8]];
    consumer.fetch(&mut copied, 8, 0).unwrap();
    let mut mixed = vec![vec![1.0f32; 8]];
    other
        .fetch_with_mode(&mut mixed, 8, 0, FetchMode::Mix)
        .unwrap();

    assert_eq!(copied, vec![vec![1.0f32; 8]]);
    assert_eq!(mixed, vec![vec![2.0f32; 8]]);
}

#[test]
fn test_consumer_outlives_producer() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(2, 16).split();
    producer.store(&biased_channels(2, 4, 0, 1.0), 4, 0).unwrap();
    drop(producer);

    let mut block = silent_channels(2, 4);
    consumer.fetch(&mut block, 4, 0).unwrap();
    assert_eq!(block, biased_channels(2, 4, 0, 1.0));
}

#[test]
fn test_handles_move_across_threads() {
    let (mut producer, consumer) = RingBuffer::<f32>::new(2, 64).split();

    let writer = thread::spawn(move || {
        for block in 0..4 {
            let start = block * 16;
            producer
                .store(&biased_channels(2, 16, start, 1.0), 16, start)
                .unwrap();
        }
        producer
    });
    let producer = writer.join().unwrap();

    let reader = thread::spawn(move || {
        let mut block = silent_channels(2, 64);
        consumer.fetch(&mut block, 64, 0).unwrap();
        block
    });

    assert_eq!(reader.join().unwrap(), biased_channels(2, 64, 0, 1.0));
    assert_eq!(producer.time_bounds(), Ok(TimeBounds::new(0, 64)));
}
