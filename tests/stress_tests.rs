//! Stress tests: many producers, one writer
//!
//! These verify the ordering and no-loss guarantees under volume:
//! - every enqueued record reaches the destination exactly once
//! - each producer's records appear in its program order
//! - message ids stay pairwise distinct under contention

use deferlog::{Destination, LogLevel, Logger};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const PRODUCERS: usize = 8;
const PER_PRODUCER: usize = 250;

#[test]
fn test_no_message_lost_under_concurrent_load() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("volume.log");

    let logger = Arc::new(Logger::new());
    logger.set_level(LogLevel::Trace);
    logger.set_format_str("%(MSG)");
    logger.set_destination(Destination::file(&path).expect("open"));

    let mut handles = Vec::new();
    for producer in 0..PRODUCERS {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for seq in 0..PER_PRODUCER {
                logger.log_with(LogLevel::Info, file!(), "stress::produce", line!(), || {
                    format!("p{} s{}", producer, seq)
                });
            }
        }));
    }
    for handle in handles {
        handle.join().expect("producer");
    }
    logger.flush();

    let content = fs::read_to_string(&path).expect("read");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), PRODUCERS * PER_PRODUCER);

    // Per-producer program order is preserved in the output
    for producer in 0..PRODUCERS {
        let prefix = format!("p{} ", producer);
        let seqs: Vec<usize> = lines
            .iter()
            .filter(|l| l.starts_with(&prefix))
            .map(|l| l.split(" s").nth(1).expect("seq").parse().expect("number"))
            .collect();
        assert_eq!(seqs.len(), PER_PRODUCER);
        assert!(
            seqs.windows(2).all(|w| w[0] < w[1]),
            "producer {} out of order",
            producer
        );
    }
}

#[test]
fn test_message_ids_distinct_under_contention() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("ids.log");

    let logger = Arc::new(Logger::new());
    logger.set_level(LogLevel::Trace);
    logger.set_format_str("%(MSG_ID)");
    logger.set_destination(Destination::file(&path).expect("open"));

    let mut handles = Vec::new();
    for _ in 0..PRODUCERS {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for _ in 0..PER_PRODUCER {
                logger.log_with(LogLevel::Info, file!(), "stress::ids", line!(), || {
                    String::new()
                });
            }
        }));
    }
    for handle in handles {
        handle.join().expect("producer");
    }
    logger.flush();

    let content = fs::read_to_string(&path).expect("read");
    let mut ids: Vec<u64> = content
        .lines()
        .map(|l| l.parse().expect("message id"))
        .collect();
    assert_eq!(ids.len(), PRODUCERS * PER_PRODUCER);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), PRODUCERS * PER_PRODUCER, "duplicate message id");
}

#[test]
fn test_threshold_filtering_under_load() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("filtered.log");

    let logger = Arc::new(Logger::new());
    logger.set_level(LogLevel::Critical);
    logger.set_format_str("[%(LEVEL)]");
    logger.set_destination(Destination::file(&path).expect("open"));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let logger = Arc::clone(&logger);
        handles.push(std::thread::spawn(move || {
            for _ in 0..100 {
                logger.log_with(LogLevel::Info, file!(), "stress::filter", line!(), || {
                    unreachable!("filtered closure must not run")
                });
                logger.log_with(LogLevel::Critical, file!(), "stress::filter", line!(), || {
                    String::new()
                });
            }
        }));
    }
    for handle in handles {
        handle.join().expect("producer");
    }
    logger.flush();

    let content = fs::read_to_string(&path).expect("read");
    assert_eq!(content.lines().count(), 400);
    assert!(content.lines().all(|l| l == "[CRT]"));
}

#[test]
fn test_repeated_flush_cycles_under_load() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = temp_dir.path().join("cycles.log");

    let logger = Logger::new();
    logger.set_level(LogLevel::Trace);
    logger.set_format_str("%(MSG)");
    logger.set_destination(Destination::file(&path).expect("open"));

    let mut expected = 0;
    for round in 0..20 {
        for seq in 0..25 {
            logger.log_with(LogLevel::Debug, file!(), "stress::cycles", line!(), || {
                format!("r{} s{}", round, seq)
            });
        }
        logger.flush();
        expected += 25;
        let written = fs::read_to_string(&path).expect("read").lines().count();
        assert_eq!(written, expected, "flush returned before round {} drained", round);
    }
}
