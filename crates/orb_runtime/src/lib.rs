//! orb runtime: the object/class metamodel.
//!
//! Creates, links and bootstraps classes, singleton classes and the
//! self-referential `Class` anchor, and cooperates with a collector through
//! the structural-mutation lock and the `Trace` contract.

#![allow(clippy::new_without_default)]
#![allow(clippy::len_without_is_empty)]

pub mod core;
pub mod errors;
mod runtime;

// Re-exports from core/
pub use self::core::heap;
pub use self::core::{ClassRecord, GcStats, Heap, ManagedObject, ObjectHeader, ObjectRecord};

// Re-exports from the core crate
pub use orb_core::{ObjectId, ObjectType, Trace};

pub use errors::{ClassError, ClassResult};

// Runtime structs
pub use runtime::ClassBody;
pub use runtime::Runtime;
pub use runtime::RuntimeConfig;
pub use runtime::{GcLock, StructureGuard};
