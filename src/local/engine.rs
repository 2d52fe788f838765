use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    engine::MediaEngine,
    local::capture::RawCapture,
    media::{
        stream::RawSinkSource,
        types::{RawStreamDescriptor, TrackDescriptor},
    },
};

/// In-process engine. Owns at most one active raw source; acquiring a new
/// stream replaces and stops the previous one.
pub struct LocalEngine {
    active: RwLock<Option<RawCapture>>,
}

impl LocalEngine {
    pub fn new() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    /// Unit source of the active raw stream, if any.
    pub async fn frame_source(&self) -> Option<Arc<RawSinkSource>> {
        self.active.read().await.as_ref().map(RawCapture::source)
    }
}

impl Default for LocalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaEngine for LocalEngine {
    async fn create_raw_stream(
        &self,
        width: u32,
        height: u32,
    ) -> anyhow::Result<RawStreamDescriptor> {
        if width == 0 || height == 0 {
            return Err(anyhow::anyhow!(
                "invalid raw stream dimensions {}x{}",
                width,
                height
            ));
        }

        let stream_id = Uuid::new_v4().to_string();
        let track_id = Uuid::new_v4().to_string();
        log::info!(
            "local engine: creating raw stream {} ({}x{})",
            stream_id,
            width,
            height
        );

        let capture = RawCapture::start(stream_id.clone(), width, height);
        if let Some(previous) = self.active.write().await.replace(capture) {
            log::warn!(
                "local engine: replacing active raw stream {}",
                previous.stream_id()
            );
            previous.stop();
        }

        Ok(RawStreamDescriptor {
            stream_id,
            track: TrackDescriptor {
                id: track_id,
                kind: "video".to_string(),
            },
        })
    }

    async fn send_raw_frame(
        &self,
        payload: String,
        size: usize,
        width: u32,
        height: u32,
    ) -> anyhow::Result<()> {
        let buffer = STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| anyhow::anyhow!("frame payload is not valid base64: {}", e))?;
        log::debug!(
            "local engine: frame payload {} bytes (declared size={}, {}x{})",
            buffer.len(),
            size,
            width,
            height
        );

        let active = self.active.read().await;
        let Some(capture) = active.as_ref() else {
            return Err(anyhow::anyhow!("no raw video source available"));
        };
        capture.send_frame(Bytes::from(buffer)).await
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
