//! Singleton class access.

use orb_core::ObjectId;

use super::core::Runtime;
use super::link::link_subclass;
use crate::core::ClassRecord;
use crate::errors::{ClassError, ClassResult};

/// Where a new singleton class gets linked.
enum SingletonParent {
    /// Plain object: its class.
    Class(ObjectId),
    /// Class: the singleton class of its superclass, or the anchor for the root.
    SingletonOf(Option<ObjectId>),
}

impl Runtime {
    /// The private per-object class of `object`, created on first request.
    pub fn singleton_class_of(&self, object: ObjectId) -> ClassResult<ObjectId> {
        let guard = self.lock.structure();
        let parent = {
            let heap = guard.heap();
            let header = heap.header(object)?;
            if let Some(existing) = header.singleton_class() {
                return Ok(existing);
            }
            match heap.as_class(object) {
                Some(record) if !record.is_initialized() => {
                    return Err(ClassError::UninitializedClass);
                }
                Some(record) => SingletonParent::SingletonOf(record.superclass()),
                None => SingletonParent::Class(header.klass()),
            }
        };

        let superclass = match parent {
            SingletonParent::Class(klass) => klass,
            SingletonParent::SingletonOf(Some(superclass)) => self.singleton_class_of(superclass)?,
            SingletonParent::SingletonOf(None) => self.anchor,
        };

        let (klass, object_type) = {
            let heap = guard.heap();
            let record = heap.class(superclass)?;
            (record.klass(), record.object_type())
        };
        let singleton = guard.heap_mut().alloc_class(ClassRecord::new(klass));
        link_subclass(&self.lock, superclass, singleton, "", Some(object_type))?;
        guard.heap_mut().attach_singleton(object, singleton)?;

        tracing::trace!(
            object = object.0,
            singleton = singleton.0,
            superclass = superclass.0,
            "singleton class created"
        );
        Ok(singleton)
    }
}
