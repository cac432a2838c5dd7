//! Display names.
//!
//! Names are computed from the current graph on every request and never
//! cached, so a singleton class reflects its owner's name even when the
//! owner was named after the singleton was created.

use orb_core::{ObjectId, ObjectType};

use super::heap::{Heap, ManagedObject};
use crate::errors::ClassResult;

impl Heap {
    /// The stored name of a class, if it has one.
    pub fn class_name(&self, id: ObjectId) -> ClassResult<Option<&str>> {
        match self.class(id)?.name {
            Some(name) => Ok(Some(self.str(name)?)),
            None => Ok(None),
        }
    }

    pub fn display_name(&self, id: ObjectId) -> ClassResult<String> {
        match self.get(id)? {
            ManagedObject::Class(c) => {
                if let Some(attached) = c.attached.filter(|_| c.is_singleton) {
                    return Ok(format!("#<Class:{}>", self.display_name(attached)?));
                }
                if let Some(name) = c.name {
                    return Ok(self.str(name)?.to_owned());
                }
                Ok(format!("#<{}:{}>", self.display_name(c.header.klass)?, id))
            }
            ManagedObject::Object(o) => {
                Ok(format!("#<{}:{}>", self.display_name(o.header.klass)?, id))
            }
            ManagedObject::Str(s) => Ok(format!("{s:?}")),
        }
    }

    /// `<class:Name>` for named classes, the display name otherwise.
    pub fn backtrace_name(&self, id: ObjectId) -> ClassResult<String> {
        match self.class_name(id)? {
            Some(name) if !self.class(id)?.is_singleton => Ok(format!("<class:{name}>")),
            _ => self.display_name(id),
        }
    }

    /// Display name of the class `id` is an instance of, for diagnostics.
    pub fn class_display_of(&self, id: ObjectId) -> ClassResult<String> {
        match self.get(id)? {
            ManagedObject::Str(_) => Ok(ObjectType::String.as_str().to_owned()),
            obj => match obj.header() {
                Some(header) => self.display_name(header.klass),
                None => Ok(ObjectType::Object.as_str().to_owned()),
            },
        }
    }
}
