//! Service layer for the city record store.
//! - `storage` holds the pluggable backends that own the raw document bytes.
//! - `records` applies get/merge/purge on top of a backend, one writer at a time.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod records;
