//! Collector cooperation for the Runtime.
//!
//! This module contains:
//! - gc: Full mark/sweep cycle under the structural lock
//! - maybe_gc: Conditional collection driven by the allocation threshold
//! - children_of: The traversal contract exposed per record
//! - pin/unpin: Counted external roots

use orb_core::ObjectId;

use super::core::Runtime;
use crate::core::GcStats;
use crate::core::heap::Children;
use crate::errors::ClassResult;

impl Runtime {
    /// Collect all GC roots: the built-in classes, pinned ids and `extra_roots`.
    fn collect_gc_roots(&self, pinned: impl Iterator<Item = ObjectId>, extra_roots: &[ObjectId]) -> Vec<ObjectId> {
        let mut roots: Vec<ObjectId> = Vec::with_capacity(extra_roots.len() + 16);
        roots.extend_from_slice(&self.builtin_roots());
        roots.extend(pinned);
        roots.extend_from_slice(extra_roots);
        roots
    }

    /// Perform a full garbage collection cycle.
    pub fn gc(&self, extra_roots: &[ObjectId]) -> GcStats {
        let guard = self.lock.structure();
        let mut heap = guard.heap_mut();
        let roots = self.collect_gc_roots(heap.pinned(), extra_roots);
        heap.mark_all(&roots);
        let stats = heap.sweep();
        tracing::debug!(
            live = stats.live,
            freed = stats.freed,
            next_threshold = heap.gc_threshold,
            "gc cycle complete"
        );
        stats
    }

    /// Perform garbage collection if the heap has grown enough.
    pub fn maybe_gc(&self, extra_roots: &[ObjectId]) -> Option<GcStats> {
        let guard = self.lock.structure();
        if !guard.heap().should_gc() {
            return None;
        }
        let stats = self.gc(extra_roots);
        drop(guard);
        Some(stats)
    }

    /// Outgoing references of one record: owning class, superclass,
    /// singleton class, attached object and name storage.
    pub fn children_of(&self, object: ObjectId) -> ClassResult<Children> {
        self.lock.structure().heap().children(object)
    }

    /// Keep `object` alive across collections until a matching `unpin`.
    pub fn pin(&self, object: ObjectId) -> ClassResult<()> {
        self.lock.structure().heap_mut().pin(object)
    }

    /// Returns false if `object` was not pinned.
    pub fn unpin(&self, object: ObjectId) -> bool {
        self.lock.structure().heap_mut().unpin(object)
    }

    pub fn memory_stats(&self) -> String {
        self.lock.structure().heap().memory_stats()
    }
}
