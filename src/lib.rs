pub mod engine;
pub mod local;
pub mod media;

pub use engine::MediaEngine;
pub use local::engine::LocalEngine;
pub use media::raw::{MediaAcquisitionError, RawMedia};
pub use media::types::{FrameBuffer, MediaStreamHandle, RawStreamDescriptor, TrackDescriptor};
