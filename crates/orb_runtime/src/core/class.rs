//! Class records.

use orb_core::{ObjectId, ObjectType, Trace};

use super::object::ObjectHeader;

/// A class (or module) in the runtime's type system.
///
/// The header's type tag is always `Class`; `object_type` is the tag given
/// to instances, inherited from the superclass unless overridden.
#[derive(Debug, Clone)]
pub struct ClassRecord {
    pub(crate) header: ObjectHeader,
    /// Heap string holding the name. `None` for anonymous and singleton classes.
    pub(crate) name: Option<ObjectId>,
    pub(crate) superclass: Option<ObjectId>,
    pub(crate) object_type: ObjectType,
    pub(crate) is_initialized: bool,
    pub(crate) is_singleton: bool,
    /// For singleton classes, the object the class belongs to.
    pub(crate) attached: Option<ObjectId>,
}

impl ClassRecord {
    /// An uninitialized, anonymous, unlinked class owned by `klass`.
    pub fn new(klass: ObjectId) -> Self {
        Self {
            header: ObjectHeader::new(ObjectType::Class, klass),
            name: None,
            superclass: None,
            object_type: ObjectType::Object,
            is_initialized: false,
            is_singleton: false,
            attached: None,
        }
    }

    pub fn header(&self) -> &ObjectHeader {
        &self.header
    }

    #[inline]
    pub fn klass(&self) -> ObjectId {
        self.header.klass
    }

    #[inline]
    pub fn singleton_class(&self) -> Option<ObjectId> {
        self.header.singleton_class
    }

    #[inline]
    pub fn superclass(&self) -> Option<ObjectId> {
        self.superclass
    }

    #[inline]
    pub fn name_id(&self) -> Option<ObjectId> {
        self.name
    }

    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.is_initialized
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.is_singleton
    }

    #[inline]
    pub fn attached(&self) -> Option<ObjectId> {
        self.attached
    }
}

impl Trace for ClassRecord {
    fn trace(&self, visit: &mut dyn FnMut(ObjectId)) {
        self.header.trace(visit);
        if let Some(superclass) = self.superclass {
            visit(superclass);
        }
        if let Some(attached) = self.attached {
            visit(attached);
        }
        if let Some(name) = self.name {
            visit(name);
        }
    }
}
