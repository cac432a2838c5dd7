//! The structural-mutation lock.
//!
//! `GcLock` owns the heap behind a reentrant mutex. Every class-graph edit
//! holds a `StructureGuard` for its whole duration, so a collector that
//! takes the same lock never sees a record half linked. The owning thread
//! may re-acquire the lock (singleton synthesis recurses into linking).
//!
//! Heap borrows (`heap()` / `heap_mut()`) must be dropped before calling
//! anything that re-acquires the lock; the `RefCell` panics otherwise.

use std::cell::{Ref, RefCell, RefMut};

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

use crate::core::Heap;

pub struct GcLock {
    inner: ReentrantMutex<RefCell<Heap>>,
}

impl GcLock {
    pub fn new(heap: Heap) -> Self {
        Self {
            inner: ReentrantMutex::new(RefCell::new(heap)),
        }
    }

    /// Block until the lock is held by this thread.
    pub fn structure(&self) -> StructureGuard<'_> {
        StructureGuard {
            guard: self.inner.lock(),
        }
    }

    /// For collectors that would rather skip a cycle than wait.
    pub fn try_structure(&self) -> Option<StructureGuard<'_>> {
        self.inner.try_lock().map(|guard| StructureGuard { guard })
    }

    pub fn is_locked(&self) -> bool {
        self.inner.is_locked()
    }
}

pub struct StructureGuard<'a> {
    guard: ReentrantMutexGuard<'a, RefCell<Heap>>,
}

impl StructureGuard<'_> {
    pub fn heap(&self) -> Ref<'_, Heap> {
        self.guard.borrow()
    }

    pub(crate) fn heap_mut(&self) -> RefMut<'_, Heap> {
        self.guard.borrow_mut()
    }
}
