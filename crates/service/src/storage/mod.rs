//! Storage abstractions for service layer
//!
//! A backend owns the bytes of exactly one JSON document. It knows nothing
//! about records; `records::RecordStore` does the decoding and merging.

pub mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
