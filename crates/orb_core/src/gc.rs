//! Garbage collection infrastructure - base types.

use std::fmt;

/// Handle to a heap-allocated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.0)
    }
}

/// Traversal contract between heap objects and the collector.
///
/// Implementors report every object they reference so the collector can
/// trace liveness without knowing their layout. Each reference is reported
/// once per call; order is unspecified.
pub trait Trace {
    fn trace(&self, visit: &mut dyn FnMut(ObjectId));
}
