//! Garbage collection and heap management.

use orb_core::{FastHashMap, ObjectId, ObjectType, Trace, fast_map_new};
use smallvec::SmallVec;

use super::class::ClassRecord;
use super::object::{ObjectHeader, ObjectRecord};
use crate::errors::{ClassError, ClassResult};
use crate::runtime::RuntimeConfig;

/// Outgoing references of one heap object. Class records have at most five.
pub type Children = SmallVec<[ObjectId; 5]>;

#[derive(Debug, Clone)]
pub enum ManagedObject {
    Class(Box<ClassRecord>),
    Object(ObjectRecord),
    /// Name storage. Not a runtime-visible entity, so it has no header.
    Str(String),
}

impl ManagedObject {
    pub fn size(&self) -> usize {
        let base = std::mem::size_of::<ManagedObject>();
        let deep = match self {
            ManagedObject::Class(_) => std::mem::size_of::<ClassRecord>(),
            ManagedObject::Object(_) => 0,
            ManagedObject::Str(s) => s.capacity(),
        };
        base + deep
    }

    pub fn header(&self) -> Option<&ObjectHeader> {
        match self {
            ManagedObject::Class(c) => Some(&c.header),
            ManagedObject::Object(o) => Some(&o.header),
            ManagedObject::Str(_) => None,
        }
    }

    fn header_mut(&mut self) -> Option<&mut ObjectHeader> {
        match self {
            ManagedObject::Class(c) => Some(&mut c.header),
            ManagedObject::Object(o) => Some(&mut o.header),
            ManagedObject::Str(_) => None,
        }
    }
}

impl Trace for ManagedObject {
    fn trace(&self, visit: &mut dyn FnMut(ObjectId)) {
        match self {
            ManagedObject::Class(c) => c.trace(visit),
            ManagedObject::Object(o) => o.trace(visit),
            ManagedObject::Str(_) => {}
        }
    }
}

/// Outcome of one collection cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GcStats {
    pub live: usize,
    pub freed: usize,
}

pub struct Heap {
    pub(crate) objects: Vec<Option<ManagedObject>>,
    free_list: Vec<usize>,
    marks: Vec<u64>,
    pins: FastHashMap<ObjectId, usize>,
    pub(crate) alloc_count: usize,
    pub(crate) gc_threshold: usize,
    min_gc_threshold: usize,
}

impl Heap {
    pub fn with_config(config: &RuntimeConfig) -> Self {
        Self {
            objects: Vec::with_capacity(config.initial_capacity),
            free_list: Vec::new(),
            marks: Vec::new(),
            pins: fast_map_new(),
            alloc_count: 0,
            gc_threshold: config.gc_threshold,
            min_gc_threshold: config.min_gc_threshold,
        }
    }

    /// Allocate a managed object on the heap.
    pub fn alloc(&mut self, obj: ManagedObject) -> ObjectId {
        self.alloc_count += 1;

        if let Some(id) = self.free_list.pop() {
            self.objects[id] = Some(obj);
            ObjectId(id)
        } else {
            let id = self.objects.len();
            self.objects.push(Some(obj));
            ObjectId(id)
        }
    }

    pub fn alloc_class(&mut self, record: ClassRecord) -> ObjectId {
        self.alloc(ManagedObject::Class(Box::new(record)))
    }

    pub fn alloc_str(&mut self, s: &str) -> ObjectId {
        self.alloc(ManagedObject::Str(s.to_owned()))
    }

    #[inline]
    pub fn should_gc(&self) -> bool {
        self.alloc_count >= self.gc_threshold
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.iter().filter(|o| o.is_some()).count()
    }

    /// Allocated slots, live or free. Bounds every valid id.
    pub fn slot_count(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        matches!(self.objects.get(id.0), Some(Some(_)))
    }

    pub fn get(&self, id: ObjectId) -> ClassResult<&ManagedObject> {
        self.objects
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(ClassError::UnknownObject(id))
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> ClassResult<&mut ManagedObject> {
        self.objects
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(ClassError::UnknownObject(id))
    }

    pub fn header(&self, id: ObjectId) -> ClassResult<&ObjectHeader> {
        self.get(id)?
            .header()
            .ok_or(ClassError::UnknownObject(id))
    }

    pub(crate) fn header_mut(&mut self, id: ObjectId) -> ClassResult<&mut ObjectHeader> {
        self.get_mut(id)?
            .header_mut()
            .ok_or(ClassError::UnknownObject(id))
    }

    pub fn as_class(&self, id: ObjectId) -> Option<&ClassRecord> {
        match self.objects.get(id.0) {
            Some(Some(ManagedObject::Class(c))) => Some(c.as_ref()),
            _ => None,
        }
    }

    pub fn is_class(&self, id: ObjectId) -> bool {
        self.as_class(id).is_some()
    }

    pub fn class(&self, id: ObjectId) -> ClassResult<&ClassRecord> {
        match self.get(id)? {
            ManagedObject::Class(c) => Ok(c.as_ref()),
            _ => Err(ClassError::NotAClass(self.display_name(id)?)),
        }
    }

    pub(crate) fn class_mut(&mut self, id: ObjectId) -> ClassResult<&mut ClassRecord> {
        if !self.is_class(id) {
            return Err(match self.get(id) {
                Ok(_) => ClassError::NotAClass(self.display_name(id)?),
                Err(e) => e,
            });
        }
        match self.get_mut(id)? {
            ManagedObject::Class(c) => Ok(c.as_mut()),
            _ => Err(ClassError::UnknownObject(id)),
        }
    }

    pub fn str(&self, id: ObjectId) -> ClassResult<&str> {
        match self.get(id)? {
            ManagedObject::Str(s) => Ok(s),
            _ => Err(ClassError::UnknownObject(id)),
        }
    }

    /// Live class records in allocation-slot order.
    pub fn classes(&self) -> impl Iterator<Item = (ObjectId, &ClassRecord)> + '_ {
        self.objects.iter().enumerate().filter_map(|(i, o)| match o {
            Some(ManagedObject::Class(c)) => Some((ObjectId(i), c.as_ref())),
            _ => None,
        })
    }

    /// Outgoing references of `id`, as seen by the collector.
    pub fn children(&self, id: ObjectId) -> ClassResult<Children> {
        let mut out = Children::new();
        self.get(id)?.trace(&mut |child| out.push(child));
        Ok(out)
    }

    /// Steps 2-5 of linking: name, superclass, type tag, initialized flag.
    ///
    /// Singleton mirroring (step 1) needs re-entrant locking and lives in
    /// `runtime::link`.
    pub(crate) fn finish_link(
        &mut self,
        receiver: ObjectId,
        subclass: ObjectId,
        name: &str,
        object_type: Option<ObjectType>,
    ) -> ClassResult<()> {
        let receiver_type = self.class(receiver)?.object_type;
        self.class(subclass)?;
        let name = if name.is_empty() {
            None
        } else {
            Some(self.alloc_str(name))
        };
        let record = self.class_mut(subclass)?;
        if name.is_some() {
            record.name = name;
        }
        record.superclass = Some(receiver);
        record.object_type = object_type.unwrap_or(receiver_type);
        record.is_initialized = true;
        Ok(())
    }

    /// Make `singleton` the singleton class of `owner`.
    pub(crate) fn attach_singleton(&mut self, owner: ObjectId, singleton: ObjectId) -> ClassResult<()> {
        self.header(owner)?;
        let record = self.class_mut(singleton)?;
        record.is_singleton = true;
        record.attached = Some(owner);
        self.header_mut(owner)?.singleton_class = Some(singleton);
        Ok(())
    }

    pub(crate) fn pin(&mut self, id: ObjectId) -> ClassResult<()> {
        self.get(id)?;
        *self.pins.entry(id).or_insert(0) += 1;
        Ok(())
    }

    /// Returns false if `id` was not pinned.
    pub(crate) fn unpin(&mut self, id: ObjectId) -> bool {
        let Some(count) = self.pins.get_mut(&id) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.pins.remove(&id);
        }
        true
    }

    pub fn pinned(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.pins.keys().copied()
    }

    pub fn is_marked(&self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        self.marks
            .get(word)
            .is_some_and(|w| (w & (1 << bit)) != 0)
    }

    fn set_mark(&mut self, id: ObjectId) -> bool {
        let word = id.0 >> 6;
        let bit = id.0 & 63;
        if word >= self.marks.len() {
            self.marks.resize(word + 1, 0);
        }
        let w = &mut self.marks[word];
        let mask = 1 << bit;
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        true
    }

    /// Mark everything reachable from `roots`. Dangling roots are ignored.
    pub(crate) fn mark_all(&mut self, roots: &[ObjectId]) {
        self.marks.clear();

        let mut pending: Vec<ObjectId> = roots.to_vec();
        while let Some(id) = pending.pop() {
            if !self.contains(id) || !self.set_mark(id) {
                continue;
            }
            if let Some(obj) = &self.objects[id.0] {
                obj.trace(&mut |child| pending.push(child));
            }
        }
    }

    /// Sweep unreachable objects and update the threshold.
    pub(crate) fn sweep(&mut self) -> GcStats {
        let mut live = 0;
        let mut freed = 0;

        self.free_list.clear();

        for i in 0..self.objects.len() {
            if self.objects[i].is_some() {
                if self.is_marked(ObjectId(i)) {
                    live += 1;
                } else {
                    self.objects[i] = None;
                    self.free_list.push(i);
                    freed += 1;
                }
            } else {
                self.free_list.push(i);
            }
        }

        // Trailing empty slots are dropped; ids below the new length stay stable.
        while self.objects.last().is_some_and(|o| o.is_none()) {
            self.objects.pop();
        }
        let new_len = self.objects.len();
        self.free_list.retain(|&i| i < new_len);

        self.marks.clear();
        self.alloc_count = 0;
        self.gc_threshold = (live * 2).max(self.min_gc_threshold);

        GcStats { live, freed }
    }

    /// Get memory statistics by object kind
    pub fn memory_stats(&self) -> String {
        let mut named = 0usize;
        let mut anonymous = 0usize;
        let mut singleton = 0usize;
        let mut uninitialized = 0usize;
        let mut objects = 0usize;
        let mut strings = 0usize;
        let mut bytes = 0usize;

        for obj in self.objects.iter().flatten() {
            bytes += obj.size();
            match obj {
                ManagedObject::Class(c) if c.is_singleton => singleton += 1,
                ManagedObject::Class(c) if !c.is_initialized => uninitialized += 1,
                ManagedObject::Class(c) if c.name.is_some() => named += 1,
                ManagedObject::Class(_) => anonymous += 1,
                ManagedObject::Object(_) => objects += 1,
                ManagedObject::Str(_) => strings += 1,
            }
        }

        let classes = named + anonymous + singleton + uninitialized;
        format!(
            "=== Heap Memory Stats ===\n\
             Classes:  {:>8} ({} named, {} anonymous, {} singleton, {} uninitialized)\n\
             Objects:  {:>8}\n\
             Strings:  {:>8}\n\
             --------------------------\n\
             Total:    {:>8} objects, {:>12} bytes\n\
             Heap vec: {:>8} slots\n\
             Free:     {:>8} slots\n\
             Pinned:   {:>8}",
            classes,
            named,
            anonymous,
            singleton,
            uninitialized,
            objects,
            strings,
            classes + objects + strings,
            bytes,
            self.objects.len(),
            self.free_list.len(),
            self.pins.len(),
        )
    }
}
