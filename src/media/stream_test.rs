// ============================================================================
// RawSinkSource Tests
// ============================================================================

use std::sync::Arc;

use bytes::Bytes;
use futures::{SinkExt, StreamExt};

use super::RawSinkSource;
use crate::media::types::RawVideoUnit;

#[test]
fn test_raw_sink_source_creation() {
    let sink = RawSinkSource::new();
    assert!(sink.writer.capacity() > 0);
}

#[test]
fn test_raw_sink_source_with_capacity() {
    let sink = RawSinkSource::with_capacity(64);
    assert_eq!(sink.writer.capacity(), 64);
}

#[tokio::test]
async fn test_send_receive_through_arc_stream() {
    let sink = Arc::new(RawSinkSource::new());
    let unit = RawVideoUnit::new(Bytes::from_static(&[1, 2, 3, 4, 5]), 640, 480, 0);

    sink.writer.send(unit).await.unwrap();

    let mut stream = RawSinkSource::as_stream(sink);
    let received = stream.next().await.unwrap();

    assert_eq!(received.data(), &[1, 2, 3, 4, 5]);
    assert_eq!(received.width, 640);
    assert_eq!(received.height, 480);
}

#[tokio::test]
async fn test_sink_side_delivers_to_stream_side() {
    let mut sink = RawSinkSource::new();
    sink.send(RawVideoUnit::new(Bytes::from_static(b"abc"), 2, 2, 7))
        .await
        .unwrap();

    let received = sink.next().await.unwrap();
    assert_eq!(received.data(), b"abc");
    assert_eq!(received.timestamp_ns, 7);
}

#[tokio::test]
async fn test_units_preserve_order() {
    let sink = Arc::new(RawSinkSource::new());
    for i in 0u8..4 {
        sink.writer
            .send(RawVideoUnit::new(Bytes::copy_from_slice(&[i]), 1, 1, i as i64))
            .await
            .unwrap();
    }

    let mut stream = RawSinkSource::as_stream(sink);
    for i in 0u8..4 {
        let unit = stream.next().await.unwrap();
        assert_eq!(unit.data(), &[i]);
    }
}
