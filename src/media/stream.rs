use std::{
    pin::Pin,
    sync::{Arc, Mutex},
    task::{Context, Poll},
};

use futures::{Sink, Stream};

use crate::media::types::RawVideoUnit;

/// Bounded channel carrying complete raw video units from a capture worker
/// to a consumer. The producer side writes through `writer`; the consumer
/// side reads it as a `Stream`.
pub struct RawSinkSource {
    pub writer: tokio::sync::mpsc::Sender<RawVideoUnit>,
    inner: Mutex<tokio::sync::mpsc::Receiver<RawVideoUnit>>,
}

impl RawSinkSource {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(buffer_size: usize) -> Self {
        let (writer, receiver) = tokio::sync::mpsc::channel(buffer_size);
        Self {
            writer,
            inner: Mutex::new(receiver),
        }
    }
}

impl Default for RawSinkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Stream for RawSinkSource {
    type Item = RawVideoUnit;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut guard = self.get_mut().inner.lock().unwrap();
        guard.poll_recv(cx)
    }
}

/// Wrapper to use `Arc<RawSinkSource>` as Stream (orphan rule workaround).
pub struct RawUnitStream(pub Arc<RawSinkSource>);

impl Stream for RawUnitStream {
    type Item = RawVideoUnit;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let source = &self.0;
        let mut guard = source.inner.lock().unwrap();
        guard.poll_recv(cx)
    }
}

impl RawSinkSource {
    /// Returns a stream of units. Use this when you have `Arc<RawSinkSource>`.
    pub fn as_stream(this: Arc<Self>) -> RawUnitStream {
        RawUnitStream(this)
    }
}

impl Sink<RawVideoUnit> for RawSinkSource {
    type Error = std::io::Error;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.get_mut().writer.capacity() > 0 {
            Poll::Ready(Ok(()))
        } else {
            Poll::Pending
        }
    }

    fn start_send(self: Pin<&mut Self>, item: RawVideoUnit) -> Result<(), Self::Error> {
        self.get_mut()
            .writer
            .try_send(item)
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::BrokenPipe, "channel closed"))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
#[path = "stream_test.rs"]
mod stream_test;
