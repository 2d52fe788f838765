//! In-process media engine: owns the single active raw source, decodes
//! submitted payloads and splits them into Annex B units for consumers.

pub mod capture;
pub mod engine;
