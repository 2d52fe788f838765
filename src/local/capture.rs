use std::{sync::Arc, time::Instant};

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::media::{stream::RawSinkSource, types::RawVideoUnit};

/// Annex B start code opening a new unit.
const START_CODE: [u8; 4] = [0, 0, 0, 1];
/// NAL unit type carrying a sequence parameter set.
const NAL_SPS: u8 = 7;

/// Accumulates submitted chunks into complete Annex B units.
///
/// A chunk opening with the 4-byte start code closes whatever was buffered so
/// far. The first SPS unit is retained as the stream parameter set instead of
/// being emitted; completed units flow downstream only once the parameter set
/// is known.
#[derive(Default)]
pub struct NalAccumulator {
    pending: Vec<u8>,
    sps: Option<Bytes>,
    awaiting_sps: bool,
}

impl NalAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The retained sequence parameter set, once one has been seen.
    pub fn parameter_set(&self) -> Option<&Bytes> {
        self.sps.as_ref()
    }

    /// Feeds one submitted chunk. Returns a completed unit ready for
    /// downstream delivery if this chunk closed one.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Option<Bytes> {
        let mut completed = None;
        if starts_new_unit(chunk) {
            completed = self.take_pending(chunk[4]);
        }
        self.pending.extend_from_slice(chunk);
        completed
    }

    fn take_pending(&mut self, next_header: u8) -> Option<Bytes> {
        let unit = std::mem::take(&mut self.pending);
        if next_header & 0x1f == NAL_SPS && self.sps.is_none() {
            // The chunk now starting is the SPS; anything buffered before it
            // predates the parameter set and is dropped.
            self.awaiting_sps = true;
            return None;
        }
        if self.awaiting_sps {
            self.awaiting_sps = false;
            self.sps = Some(Bytes::from(unit));
            return None;
        }
        if self.sps.is_none() || unit.is_empty() {
            return None;
        }
        Some(Bytes::from(unit))
    }
}

fn starts_new_unit(chunk: &[u8]) -> bool {
    chunk.len() >= 5 && chunk[..4] == START_CODE
}

/// Handle to the running capture worker of one raw stream. Feeds decoded
/// payload bytes in, delivers completed units through a [`RawSinkSource`].
pub struct RawCapture {
    feed: mpsc::Sender<Bytes>,
    cancel: CancellationToken,
    source: Arc<RawSinkSource>,
    stream_id: String,
    width: u32,
    height: u32,
}

impl RawCapture {
    pub fn start(stream_id: String, width: u32, height: u32) -> Self {
        let (feed, mut chunks) = mpsc::channel::<Bytes>(32);
        let cancel = CancellationToken::new();
        let source = Arc::new(RawSinkSource::new());

        let worker_cancel = cancel.clone();
        let worker_source = Arc::clone(&source);
        let worker_stream = stream_id.clone();
        tokio::spawn(async move {
            let mut accumulator = NalAccumulator::new();
            let started = Instant::now();
            loop {
                tokio::select! {
                    _ = worker_cancel.cancelled() => break,
                    chunk = chunks.recv() => {
                        let Some(chunk) = chunk else { break };
                        let Some(data) = accumulator.push_chunk(&chunk) else { continue };
                        let unit = RawVideoUnit::new(
                            data,
                            width,
                            height,
                            started.elapsed().as_nanos() as i64,
                        );
                        if worker_source.writer.send(unit).await.is_err() {
                            log::warn!("raw capture: consumer for stream {} dropped", worker_stream);
                            break;
                        }
                    },
                }
            }
            log::info!("raw capture: stream {} ended", worker_stream);
        });

        Self {
            feed,
            cancel,
            source,
            stream_id,
            width,
            height,
        }
    }

    /// Hands one decoded frame payload to the worker.
    pub async fn send_frame(&self, buffer: Bytes) -> anyhow::Result<()> {
        self.feed
            .send(buffer)
            .await
            .map_err(|_| anyhow::anyhow!("raw video source for stream {} is gone", self.stream_id))
    }

    pub fn source(&self) -> Arc<RawSinkSource> {
        Arc::clone(&self.source)
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for RawCapture {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "capture_test.rs"]
mod capture_test;
