//! Errors raised by the class metamodel.
//!
//! Every error is produced at a precondition check, before the heap is
//! touched, so a failed call can be retried with corrected arguments.

use orb_core::ObjectId;
use thiserror::Error;

pub mod messages {
    pub const ALREADY_INITIALIZED: &str = "already initialized class";
    pub const SUBCLASS_OF_ANCHOR: &str = "can't make subclass of Class";
    pub const SUBCLASS_OF_SINGLETON: &str = "can't make subclass of singleton class";
    pub const UNINITIALIZED_CLASS: &str = "can't instantiate uninitialized class";
    pub const INHERIT_UNINITIALIZED: &str = "can't inherit uninitialized class";
    pub const INSTANTIATE_SINGLETON: &str = "can't create instance of singleton class";
    pub const SINGLETON_NAMING: &str = "can't name a singleton class";
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassError {
    #[error("{}", messages::ALREADY_INITIALIZED)]
    AlreadyInitialized,
    /// `given` is the display name of the offending value's class.
    #[error("superclass must be an instance of Class (given an instance of {given})")]
    InvalidSuperclass { given: String },
    #[error("{}", messages::SUBCLASS_OF_ANCHOR)]
    ForbiddenSubclassOfAnchor,
    #[error("{}", messages::SUBCLASS_OF_SINGLETON)]
    ForbiddenSubclassOfSingleton,
    #[error("{0} is not a class")]
    NotAClass(String),
    #[error("unknown object id {0}")]
    UnknownObject(ObjectId),
    #[error("{}", messages::UNINITIALIZED_CLASS)]
    UninitializedClass,
    #[error("{}", messages::INHERIT_UNINITIALIZED)]
    InheritUninitialized,
    #[error("{}", messages::INSTANTIATE_SINGLETON)]
    InstantiateSingleton,
    #[error("{}", messages::SINGLETON_NAMING)]
    SingletonNaming,
}

pub type ClassResult<T> = Result<T, ClassError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_display() {
        assert_eq!(ClassError::AlreadyInitialized.to_string(), messages::ALREADY_INITIALIZED);
        assert_eq!(
            ClassError::ForbiddenSubclassOfAnchor.to_string(),
            messages::SUBCLASS_OF_ANCHOR
        );
        assert_eq!(
            ClassError::ForbiddenSubclassOfSingleton.to_string(),
            messages::SUBCLASS_OF_SINGLETON
        );
        assert_eq!(ClassError::UninitializedClass.to_string(), messages::UNINITIALIZED_CLASS);
        assert_eq!(
            ClassError::InheritUninitialized.to_string(),
            messages::INHERIT_UNINITIALIZED
        );
        assert_eq!(
            ClassError::InstantiateSingleton.to_string(),
            messages::INSTANTIATE_SINGLETON
        );
        assert_eq!(ClassError::SingletonNaming.to_string(), messages::SINGLETON_NAMING);
    }

    #[test]
    fn invalid_superclass_names_the_given_class() {
        let err = ClassError::InvalidSuperclass { given: "Integer".into() };
        assert_eq!(
            err.to_string(),
            "superclass must be an instance of Class (given an instance of Integer)"
        );
    }
}
