//! Object type tags.
//!
//! Every heap object carries one of these tags. Class records additionally
//! store the tag their instances receive, which subclasses inherit unless
//! they override it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Object,
    Class,
    Module,
    String,
    Symbol,
    Integer,
    Float,
    Array,
    Hash,
    Range,
    Proc,
    Exception,
    Encoding,
    Io,
    Enumerator,
}

impl ObjectType {
    pub const ALL: [ObjectType; 15] = [
        ObjectType::Object,
        ObjectType::Class,
        ObjectType::Module,
        ObjectType::String,
        ObjectType::Symbol,
        ObjectType::Integer,
        ObjectType::Float,
        ObjectType::Array,
        ObjectType::Hash,
        ObjectType::Range,
        ObjectType::Proc,
        ObjectType::Exception,
        ObjectType::Encoding,
        ObjectType::Io,
        ObjectType::Enumerator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Object => "Object",
            ObjectType::Class => "Class",
            ObjectType::Module => "Module",
            ObjectType::String => "String",
            ObjectType::Symbol => "Symbol",
            ObjectType::Integer => "Integer",
            ObjectType::Float => "Float",
            ObjectType::Array => "Array",
            ObjectType::Hash => "Hash",
            ObjectType::Range => "Range",
            ObjectType::Proc => "Proc",
            ObjectType::Exception => "Exception",
            ObjectType::Encoding => "Encoding",
            ObjectType::Io => "Io",
            ObjectType::Enumerator => "Enumerator",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<_> = ObjectType::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ObjectType::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(ObjectType::Io.to_string(), "Io");
        assert_eq!(format!("{}", ObjectType::Module), ObjectType::Module.as_str());
    }
}
