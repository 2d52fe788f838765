//! Raw media core: acquire a raw-input-backed stream from the engine, then
//! push frame payloads into it.
//!
//! Data flow:
//! ```text
//! caller ──► RawMedia::get_raw_media ──► MediaEngine::create_raw_stream ──► MediaStreamHandle
//!    │
//!    └─────► RawMedia::send_raw_frame ──► MediaEngine::send_raw_frame   (one frame per call)
//! ```
//!
//! The core holds no state between calls beyond the identifiers the engine
//! handed back; every submission targets the engine's single active raw
//! source.

pub mod raw;
pub mod stream;
pub mod types;
