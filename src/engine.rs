use crate::media::types::RawStreamDescriptor;

/// Boundary to the native media engine. The engine owns actual track and
/// resource lifecycle; this layer only issues requests and awaits responses.
///
/// The engine is a long-lived injected capability. Its futures can be awaited
/// but not aborted; once a request crosses this boundary there is no way to
/// cancel it, and any timeout policy is the engine's.
#[allow(async_fn_in_trait)]
pub trait MediaEngine {
    /// Allocates a raw-input-backed video stream of the given dimensions and
    /// returns its descriptor. Dimension validation beyond what the engine
    /// itself enforces is not performed here.
    async fn create_raw_stream(
        &self,
        width: u32,
        height: u32,
    ) -> anyhow::Result<RawStreamDescriptor>;

    /// Pushes one frame payload, already in canonical textual form, into the
    /// ingestion entry point of the active raw stream. No stream id is
    /// carried; the engine addresses its single active raw source.
    async fn send_raw_frame(
        &self,
        payload: String,
        size: usize,
        width: u32,
        height: u32,
    ) -> anyhow::Result<()>;
}
