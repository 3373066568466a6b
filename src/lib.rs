//! Public library API for decoding Firestore event values into Rust destinations.

/// Event envelope types, wire tags, and the type-directed decode engine.
pub mod firestore;
