//! Runtime module - the class engine.
//!
//! `Runtime` owns the structural lock (and through it the heap) plus the
//! ids of the built-in classes. Its methods are spread over submodules by
//! concern.

mod bootstrap;
pub mod config;
mod gc;
pub mod gc_lock;
mod link;
mod singleton;

pub use config::RuntimeConfig;
pub use gc_lock::{GcLock, StructureGuard};

// The main Runtime implementation is in core.rs
mod core;
pub use self::core::{ClassBody, Runtime};
