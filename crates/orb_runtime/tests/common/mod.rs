#![allow(dead_code)]

use orb_runtime::{Heap, ObjectId, Runtime};

pub fn runtime() -> Runtime {
    Runtime::new().expect("bootstrap")
}

/// Every structural invariant of the class graph, checked on a locked heap.
/// Records from `allocate_class` that were never initialized are allowed.
pub fn assert_graph_invariants(heap: &Heap, anchor: ObjectId, root: ObjectId) {
    check_graph(heap, anchor, root, false);
}

/// As `assert_graph_invariants`, but every class record must be fully
/// linked. For graphs no caller has run `allocate_class` on, where an
/// unlinked record can only be a half-finished edit.
pub fn assert_fully_linked(heap: &Heap, anchor: ObjectId, root: ObjectId) {
    check_graph(heap, anchor, root, true);
}

fn check_graph(heap: &Heap, anchor: ObjectId, root: ObjectId, strict: bool) {
    let limit = heap.slot_count();
    for (id, record) in heap.classes() {
        // Owning-class chain ends at the anchor.
        let mut klass = record.klass();
        let mut steps = 0;
        while klass != anchor {
            let next = heap
                .as_class(klass)
                .unwrap_or_else(|| panic!("owning class of {id} is not a class"));
            klass = next.klass();
            steps += 1;
            assert!(steps <= limit, "owning-class chain of {id} does not reach the anchor");
        }

        if record.is_singleton() {
            assert!(record.name_id().is_none(), "singleton {id} carries a name");
            assert!(record.attached().is_some(), "singleton {id} is detached");
        }

        if !record.is_initialized() {
            assert!(
                !strict,
                "class {id} is visible with owning class {} but is not linked",
                record.klass()
            );
            continue;
        }
        if id == root {
            assert_eq!(record.superclass(), None);
            continue;
        }
        // Initialized non-root classes are fully linked and reach the root.
        let mut current = record
            .superclass()
            .unwrap_or_else(|| panic!("initialized class {id} has no superclass"));
        let mut steps = 0;
        while current != root {
            current = heap
                .as_class(current)
                .and_then(|c| c.superclass())
                .unwrap_or_else(|| panic!("superclass chain of {id} stops before the root"));
            steps += 1;
            assert!(steps <= limit, "superclass chain of {id} is cyclic");
        }
    }
}

pub fn check_runtime(rt: &Runtime) {
    let guard = rt.gc_lock().structure();
    assert_graph_invariants(&guard.heap(), rt.anchor(), rt.root());
}
