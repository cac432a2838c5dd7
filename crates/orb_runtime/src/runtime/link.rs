//! Subclass creation and structural linking.

use orb_core::{ObjectId, ObjectType};

use super::core::{ClassBody, Runtime};
use super::gc_lock::{GcLock, StructureGuard};
use crate::core::ClassRecord;
use crate::errors::{ClassError, ClassResult};

impl Runtime {
    /// Derive a new class beneath `receiver`.
    ///
    /// The new class shares `receiver`'s owning class. An empty `name`
    /// leaves it anonymous.
    pub fn subclass(
        &self,
        receiver: ObjectId,
        name: &str,
        object_type: Option<ObjectType>,
    ) -> ClassResult<ObjectId> {
        let guard = self.lock.structure();
        let klass = self.check_subclassable(&guard, receiver)?;
        let subclass = guard.heap_mut().alloc_class(ClassRecord::new(klass));
        link_subclass(&self.lock, receiver, subclass, name, object_type)?;
        tracing::trace!(receiver = receiver.0, subclass = subclass.0, name, "subclass created");
        Ok(subclass)
    }

    /// Explicit class declaration: link an allocated class under
    /// `superclass` (the root by default) and run `body` on it.
    pub fn initialize(
        &self,
        class: ObjectId,
        superclass: Option<ObjectId>,
        body: Option<ClassBody<'_>>,
    ) -> ClassResult<ObjectId> {
        {
            let guard = self.lock.structure();
            if guard.heap().class(class)?.is_initialized() {
                return Err(ClassError::AlreadyInitialized);
            }
            let superclass = superclass.unwrap_or(self.root);
            let object_type = self.check_superclass(&guard, superclass)?;
            link_subclass(&self.lock, superclass, class, "", Some(object_type))?;
            tracing::trace!(class = class.0, superclass = superclass.0, "class initialized");
        }
        self.run_body(class, body)
    }

    /// `allocate_class` followed by `initialize`. The superclass is checked
    /// first, so a rejected call allocates nothing.
    pub fn new_class(
        &self,
        superclass: Option<ObjectId>,
        body: Option<ClassBody<'_>>,
    ) -> ClassResult<ObjectId> {
        let class = {
            let guard = self.lock.structure();
            let superclass = superclass.unwrap_or(self.root);
            let object_type = self.check_superclass(&guard, superclass)?;
            let class = guard.heap_mut().alloc_class(ClassRecord::new(self.anchor));
            link_subclass(&self.lock, superclass, class, "", Some(object_type))?;
            tracing::trace!(class = class.0, superclass = superclass.0, "class created");
            class
        };
        self.run_body(class, body)
    }

    /// Runs outside the structural lock.
    fn run_body(&self, class: ObjectId, body: Option<ClassBody<'_>>) -> ClassResult<ObjectId> {
        if let Some(body) = body {
            body(self, class)?;
        }
        Ok(class)
    }

    /// Returns the instance type tag a class declared under `superclass` gets.
    fn check_superclass(&self, guard: &StructureGuard<'_>, superclass: ObjectId) -> ClassResult<ObjectType> {
        let object_type = {
            let heap = guard.heap();
            match heap.as_class(superclass) {
                Some(record) => record.object_type(),
                None => {
                    return Err(ClassError::InvalidSuperclass {
                        given: heap.class_display_of(superclass)?,
                    });
                }
            }
        };
        self.check_subclassable(guard, superclass)?;
        Ok(object_type)
    }

    /// Returns the owning class a subclass of `receiver` gets.
    fn check_subclassable(&self, guard: &StructureGuard<'_>, receiver: ObjectId) -> ClassResult<ObjectId> {
        let heap = guard.heap();
        let record = heap.class(receiver)?;
        if receiver == self.anchor {
            return Err(ClassError::ForbiddenSubclassOfAnchor);
        }
        if record.is_singleton() {
            return Err(ClassError::ForbiddenSubclassOfSingleton);
        }
        if !record.is_initialized() {
            return Err(ClassError::InheritUninitialized);
        }
        Ok(record.klass())
    }
}

/// Link `subclass` beneath `receiver`, mirroring `receiver`'s singleton
/// class onto it first.
pub(crate) fn link_subclass(
    lock: &GcLock,
    receiver: ObjectId,
    subclass: ObjectId,
    name: &str,
    object_type: Option<ObjectType>,
) -> ClassResult<()> {
    link(lock, receiver, subclass, name, object_type, true)
}

fn link(
    lock: &GcLock,
    receiver: ObjectId,
    subclass: ObjectId,
    name: &str,
    object_type: Option<ObjectType>,
    mirror_singleton: bool,
) -> ClassResult<()> {
    let guard = lock.structure();
    if mirror_singleton {
        let receiver_singleton = guard.heap().class(receiver)?.singleton_class();
        if let Some(receiver_singleton) = receiver_singleton {
            let singleton_type = guard.heap().class(receiver_singleton)?.object_type();
            // Owned by the singleton it mirrors.
            let singleton = guard.heap_mut().alloc_class(ClassRecord::new(receiver_singleton));
            // One level only: the mirrored singleton gets no singleton of its own.
            link(lock, receiver_singleton, singleton, "", Some(singleton_type), false)?;
            guard.heap_mut().attach_singleton(subclass, singleton)?;
            tracing::trace!(
                subclass = subclass.0,
                singleton = singleton.0,
                "mirrored singleton class"
            );
        }
    }
    guard.heap_mut().finish_link(receiver, subclass, name, object_type)
}
