//! Core heap infrastructure.
//!
//! This module contains the data model the class engine operates on:
//! - `Heap` - Index-addressed arena with mark/sweep collection
//! - `ClassRecord` - Classes and singleton classes
//! - `ObjectRecord` / `ObjectHeader` - Plain instances and the shared header

pub mod class;
pub mod heap;
mod names;
pub mod object;

pub use class::ClassRecord;
pub use heap::{GcStats, Heap, ManagedObject};
pub use object::{ObjectHeader, ObjectRecord};
