//! Core types for the orb object model.
//!
//! This crate contains the leaf types shared by the runtime and its
//! collaborators:
//! - `ObjectId` - Handle to a heap-allocated object
//! - `Trace` - Outgoing-reference enumeration used by the collector
//! - `ObjectType` - The closed set of object type tags
//! - `FastHashMap` - Deterministic ahash-backed map

pub mod gc;
pub mod map;
pub mod object_type;

pub use gc::{ObjectId, Trace};
pub use map::{FastHashMap, fast_map_new};
pub use object_type::ObjectType;
