//! Object identity layer.

use orb_core::{ObjectId, ObjectType, Trace};

/// Fields every runtime entity carries besides its identity.
#[derive(Debug, Clone)]
pub struct ObjectHeader {
    pub(crate) ty: ObjectType,
    /// Owning class. Not owning in the Rust sense: the collector traces it.
    pub(crate) klass: ObjectId,
    pub(crate) singleton_class: Option<ObjectId>,
}

impl ObjectHeader {
    pub fn new(ty: ObjectType, klass: ObjectId) -> Self {
        Self {
            ty,
            klass,
            singleton_class: None,
        }
    }

    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.ty
    }

    #[inline]
    pub fn klass(&self) -> ObjectId {
        self.klass
    }

    #[inline]
    pub fn singleton_class(&self) -> Option<ObjectId> {
        self.singleton_class
    }
}

impl Trace for ObjectHeader {
    fn trace(&self, visit: &mut dyn FnMut(ObjectId)) {
        visit(self.klass);
        if let Some(singleton) = self.singleton_class {
            visit(singleton);
        }
    }
}

/// A plain (non-class) instance.
#[derive(Debug, Clone)]
pub struct ObjectRecord {
    pub(crate) header: ObjectHeader,
}

impl ObjectRecord {
    pub fn new(ty: ObjectType, klass: ObjectId) -> Self {
        Self {
            header: ObjectHeader::new(ty, klass),
        }
    }

    pub fn header(&self) -> &ObjectHeader {
        &self.header
    }
}

impl Trace for ObjectRecord {
    fn trace(&self, visit: &mut dyn FnMut(ObjectId)) {
        self.header.trace(visit);
    }
}
