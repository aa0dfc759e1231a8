//! Repository layer: storage media and the persistence adapter.
//!
//! # Responsibility
//! - Define the key-value contract every storage medium implements.
//! - Isolate serialization and SQL details from the note manager.
//!
//! # Invariants
//! - Adapter reads recover from malformed data as "no data".
//! - Adapter writes swallow failures after logging them.

pub mod kv_repo;
pub mod note_repo;
