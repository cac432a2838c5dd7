//! Bootstrap sequence.
//!
//! Runs on a heap that is not yet shared, before the structural lock
//! exists, so nothing here takes it.

use orb_core::{ObjectId, ObjectType};

use crate::core::{ClassRecord, Heap};
use crate::errors::ClassResult;

/// Placeholder owning class for the anchor until its own id is known.
const UNPATCHED: ObjectId = ObjectId(usize::MAX);

/// Create `Class`, the class whose owning class is itself.
pub(crate) fn bootstrap_metaclass_anchor(heap: &mut Heap) -> ClassResult<ObjectId> {
    let anchor = heap.alloc_class(ClassRecord::new(UNPATCHED));
    let name = heap.alloc_str("Class");

    let record = heap.class_mut(anchor)?;
    record.header.klass = anchor;
    record.object_type = ObjectType::Class;
    record.is_initialized = true;
    record.name = Some(name);

    tracing::debug!(id = anchor.0, "bootstrapped metaclass anchor");
    Ok(anchor)
}

/// Create `BasicObject` and its singleton class.
pub(crate) fn bootstrap_root_class(heap: &mut Heap, anchor: ObjectId) -> ClassResult<ObjectId> {
    let name = heap.alloc_str("BasicObject");
    let mut record = ClassRecord::new(anchor);
    record.superclass = None;
    record.is_initialized = true;
    record.name = Some(name);
    let root = heap.alloc_class(record);

    // The anchor has no singleton class yet, so linking under it is just
    // steps 2-5 of the ordinary rule.
    debug_assert!(heap.class(anchor)?.singleton_class().is_none());
    let singleton = heap.alloc_class(ClassRecord::new(anchor));
    heap.finish_link(anchor, singleton, "", None)?;
    heap.attach_singleton(root, singleton)?;

    tracing::debug!(id = root.0, singleton = singleton.0, "bootstrapped root class");
    Ok(root)
}
