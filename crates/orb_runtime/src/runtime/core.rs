use orb_core::{ObjectId, ObjectType};

use super::bootstrap;
use super::config::RuntimeConfig;
use super::gc_lock::GcLock;
use crate::core::{ClassRecord, Heap, ManagedObject, ObjectRecord};
use crate::errors::{ClassError, ClassResult};

/// A class declaration body, run in the context of the new class.
pub type ClassBody<'a> = &'a dyn Fn(&Runtime, ObjectId) -> ClassResult<()>;

pub struct Runtime {
    pub(crate) lock: GcLock,
    pub(crate) anchor: ObjectId,
    pub(crate) root: ObjectId,
    pub(crate) object_class: ObjectId,
    pub(crate) module_class: ObjectId,
    pub(crate) config: RuntimeConfig,
}

impl Runtime {
    pub fn new() -> ClassResult<Self> {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> ClassResult<Self> {
        let mut heap = Heap::with_config(&config);
        let anchor = bootstrap::bootstrap_metaclass_anchor(&mut heap)?;
        let root = bootstrap::bootstrap_root_class(&mut heap, anchor)?;

        let mut rt = Self {
            lock: GcLock::new(heap),
            anchor,
            root,
            object_class: root,
            module_class: root,
            config,
        };

        // From here on the ordinary engine builds the rest of the hierarchy.
        rt.object_class = rt.subclass(root, "Object", None)?;
        rt.module_class = rt.subclass(rt.object_class, "Module", Some(ObjectType::Module))?;
        {
            let guard = rt.lock.structure();
            guard.heap_mut().class_mut(anchor)?.superclass = Some(rt.module_class);
        }

        tracing::debug!(
            anchor = anchor.0,
            root = root.0,
            object = rt.object_class.0,
            module = rt.module_class.0,
            "core hierarchy ready"
        );
        Ok(rt)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The structural lock, for collectors that coordinate on it directly.
    pub fn gc_lock(&self) -> &GcLock {
        &self.lock
    }

    /// `Class`
    pub fn anchor(&self) -> ObjectId {
        self.anchor
    }

    /// `BasicObject`
    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn object_class(&self) -> ObjectId {
        self.object_class
    }

    pub fn module_class(&self) -> ObjectId {
        self.module_class
    }

    pub(crate) fn builtin_roots(&self) -> [ObjectId; 4] {
        [self.anchor, self.root, self.object_class, self.module_class]
    }

    /// A copy of the class record for `id`.
    pub fn class_record(&self, id: ObjectId) -> ClassResult<ClassRecord> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        heap.class(id).cloned()
    }

    pub fn class_of(&self, object: ObjectId) -> ClassResult<ObjectId> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.header(object)?.klass())
    }

    pub fn type_of(&self, object: ObjectId) -> ClassResult<ObjectType> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.header(object)?.object_type())
    }

    pub fn superclass_of(&self, class: ObjectId) -> ClassResult<Option<ObjectId>> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.class(class)?.superclass())
    }

    pub fn is_class(&self, object: ObjectId) -> bool {
        self.lock.structure().heap().is_class(object)
    }

    pub fn is_singleton(&self, class: ObjectId) -> ClassResult<bool> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.class(class)?.is_singleton())
    }

    /// The singleton class of `object` if one has been created.
    pub fn existing_singleton_class(&self, object: ObjectId) -> ClassResult<Option<ObjectId>> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.header(object)?.singleton_class())
    }

    pub fn name_of(&self, class: ObjectId) -> ClassResult<Option<String>> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        Ok(heap.class_name(class)?.map(str::to_owned))
    }

    pub fn display_name(&self, object: ObjectId) -> ClassResult<String> {
        self.lock.structure().heap().display_name(object)
    }

    pub fn backtrace_name(&self, class: ObjectId) -> ClassResult<String> {
        self.lock.structure().heap().backtrace_name(class)
    }

    /// Give an anonymous class a name. A class that already has one keeps it.
    ///
    /// This is metadata only; binding the name in a namespace is the caller's job.
    pub fn assign_name(&self, class: ObjectId, name: &str) -> ClassResult<()> {
        let guard = self.lock.structure();
        let mut heap = guard.heap_mut();
        let record = heap.class(class)?;
        if record.is_singleton() {
            return Err(ClassError::SingletonNaming);
        }
        if record.name_id().is_some() || name.is_empty() {
            return Ok(());
        }
        let name = heap.alloc_str(name);
        heap.class_mut(class)?.name = Some(name);
        Ok(())
    }

    /// An uninitialized, anonymous class owned by the anchor.
    pub fn allocate_class(&self) -> ObjectId {
        let guard = self.lock.structure();
        let mut heap = guard.heap_mut();
        heap.alloc_class(ClassRecord::new(self.anchor))
    }

    /// A plain instance of `class`, tagged with the class's instance type.
    pub fn new_object(&self, class: ObjectId) -> ClassResult<ObjectId> {
        let guard = self.lock.structure();
        let mut heap = guard.heap_mut();
        let record = heap.class(class)?;
        if record.is_singleton() {
            return Err(ClassError::InstantiateSingleton);
        }
        if !record.is_initialized() {
            return Err(ClassError::UninitializedClass);
        }
        let ty = record.object_type();
        Ok(heap.alloc(ManagedObject::Object(ObjectRecord::new(ty, class))))
    }

    /// The superclass chain from `class` up to and including the root.
    pub fn ancestors(&self, class: ObjectId) -> ClassResult<Vec<ObjectId>> {
        let guard = self.lock.structure();
        let heap = guard.heap();
        let mut chain = vec![class];
        let mut current = heap.class(class)?.superclass();
        while let Some(id) = current {
            debug_assert!(chain.len() <= heap.objects.len(), "superclass cycle at {id}");
            chain.push(id);
            current = heap.class(id)?.superclass();
        }
        Ok(chain)
    }

    /// The classes a method lookup on `object` visits, in order. With a
    /// singleton class that is the singleton's ancestry (which passes
    /// through the superclass singletons before reaching the owning class),
    /// otherwise the ancestors of its class.
    pub fn dispatch_chain(&self, object: ObjectId) -> ClassResult<Vec<ObjectId>> {
        let guard = self.lock.structure();
        let start = {
            let heap = guard.heap();
            let header = heap.header(object)?;
            header.singleton_class().unwrap_or(header.klass())
        };
        self.ancestors(start)
    }
}
