use std::fmt::{Display, Formatter};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Track descriptor returned by the engine. `kind` is `"video"` for raw
/// streams.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub id: String,
    pub kind: String,
}

/// Engine response to a stream-creation request. Produced once per
/// acquisition; immutable after creation. Wire shape at the engine boundary
/// is camelCase JSON (`streamId`, `track`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStreamDescriptor {
    pub stream_id: String,
    pub track: TrackDescriptor,
}

/// Caller-facing handle for an acquired raw stream. Dropped implicitly; the
/// native source it refers to is not released by this layer.
#[derive(Clone, Debug)]
pub struct MediaStreamHandle {
    pub stream_id: String,
    /// Display/tag field, always equal to the stream id.
    pub display_tag: String,
    pub tracks: Vec<TrackDescriptor>,
}

impl MediaStreamHandle {
    pub fn from_descriptor(descriptor: RawStreamDescriptor) -> Self {
        Self {
            display_tag: descriptor.stream_id.clone(),
            stream_id: descriptor.stream_id,
            tracks: vec![descriptor.track],
        }
    }
}

/// One frame's payload as supplied by the producer. Transient; exists only
/// for the duration of one submission.
#[derive(Clone, Debug)]
pub enum FrameBuffer {
    /// Already-textual payload, forwarded unchanged.
    Text(String),
    /// Raw pixel/bitstream bytes, encoded to text before transmission.
    Bytes(Bytes),
}

impl FrameBuffer {
    /// Canonical textual form sent to the engine. Bytes use standard no-wrap
    /// base64, which is what the engine's ingestion path decodes; the raw
    /// byte sequence itself never crosses the boundary.
    pub fn into_payload(self) -> String {
        match self {
            FrameBuffer::Text(text) => text,
            FrameBuffer::Bytes(bytes) => STANDARD.encode(&bytes),
        }
    }
}

impl From<String> for FrameBuffer {
    fn from(text: String) -> Self {
        FrameBuffer::Text(text)
    }
}

impl From<&str> for FrameBuffer {
    fn from(text: &str) -> Self {
        FrameBuffer::Text(text.to_string())
    }
}

impl From<Bytes> for FrameBuffer {
    fn from(bytes: Bytes) -> Self {
        FrameBuffer::Bytes(bytes)
    }
}

impl From<Vec<u8>> for FrameBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        FrameBuffer::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for FrameBuffer {
    fn from(bytes: &[u8]) -> Self {
        FrameBuffer::Bytes(Bytes::copy_from_slice(bytes))
    }
}

/// One complete Annex B unit delivered by the local engine's capture worker.
#[derive(Clone, Debug, Default)]
pub struct RawVideoUnit {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    pub timestamp_ns: i64,
}

impl RawVideoUnit {
    pub fn new(data: Bytes, width: u32, height: u32, timestamp_ns: i64) -> Self {
        Self {
            data,
            width,
            height,
            timestamp_ns,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Display for RawVideoUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "RawVideoUnit {{ data: {}, {}x{} }}",
            self.data.len(),
            self.width,
            self.height
        )
    }
}
