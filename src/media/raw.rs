use crate::engine::MediaEngine;
use crate::media::types::{FrameBuffer, MediaStreamHandle};

/// Adapter exposing the two raw-media operations over an injected engine.
///
/// Holds no shared mutable state; all lifecycle lives on the engine side.
pub struct RawMedia<E> {
    engine: E,
}

impl<E: MediaEngine> RawMedia<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Acquires a raw-input-backed video stream of the given dimensions.
    ///
    /// Issues exactly one creation request. Any engine failure, whatever its
    /// underlying cause, surfaces as [`MediaAcquisitionError`] with the
    /// engine error recorded as cause; nothing is retried.
    pub async fn get_raw_media(
        &self,
        width: u32,
        height: u32,
    ) -> Result<MediaStreamHandle, MediaAcquisitionError> {
        let descriptor = self
            .engine
            .create_raw_stream(width, height)
            .await
            .map_err(MediaAcquisitionError::new)?;
        log::debug!(
            "raw media: acquired stream {} (track {})",
            descriptor.stream_id,
            descriptor.track.id
        );
        Ok(MediaStreamHandle::from_descriptor(descriptor))
    }

    /// Submits one frame to the active raw stream.
    ///
    /// Byte buffers are converted to their canonical textual form; text
    /// passes through unchanged. `size`, `width` and `height` are forwarded
    /// uninspected, and engine rejections propagate unwrapped.
    pub async fn send_raw_frame(
        &self,
        buffer: impl Into<FrameBuffer>,
        size: usize,
        width: u32,
        height: u32,
    ) -> anyhow::Result<()> {
        let payload = buffer.into().into_payload();
        self.engine
            .send_raw_frame(payload, size, width, height)
            .await
    }
}

/// Uniform error for stream acquisition. Wraps whatever the engine raised
/// without further local classification.
#[derive(Debug)]
pub struct MediaAcquisitionError(anyhow::Error);

impl MediaAcquisitionError {
    pub(crate) fn new(cause: anyhow::Error) -> Self {
        Self(cause)
    }

    /// The underlying engine error.
    pub fn cause(&self) -> &anyhow::Error {
        &self.0
    }

    pub fn into_cause(self) -> anyhow::Error {
        self.0
    }
}

impl std::fmt::Display for MediaAcquisitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to acquire raw media stream")
    }
}

impl std::error::Error for MediaAcquisitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

#[cfg(test)]
#[path = "raw_test.rs"]
mod raw_test;
