mod common;

use common::{check_runtime, runtime};
use orb_runtime::{ClassError, ObjectType};

#[test]
fn singleton_class_is_created_once() {
    let rt = runtime();
    let a = rt.subclass(rt.object_class(), "A", None).unwrap();
    let obj = rt.new_object(a).unwrap();
    assert_eq!(rt.existing_singleton_class(obj).unwrap(), None);

    let first = rt.singleton_class_of(obj).unwrap();
    let second = rt.singleton_class_of(obj).unwrap();
    assert_eq!(first, second);
    assert_eq!(rt.existing_singleton_class(obj).unwrap(), Some(first));
    check_runtime(&rt);
}

#[test]
fn object_singleton_sits_above_its_class() {
    let rt = runtime();
    let array = rt.subclass(rt.object_class(), "Array", Some(ObjectType::Array)).unwrap();
    let obj = rt.new_object(array).unwrap();
    let singleton = rt.singleton_class_of(obj).unwrap();

    let record = rt.class_record(singleton).unwrap();
    assert!(record.is_singleton());
    assert!(record.is_initialized());
    assert_eq!(record.superclass(), Some(array));
    assert_eq!(record.klass(), rt.anchor());
    assert_eq!(record.attached(), Some(obj));
    assert_eq!(record.object_type(), ObjectType::Array);
    assert_eq!(record.name_id(), None);
    // The object's own class does not change.
    assert_eq!(rt.class_of(obj).unwrap(), array);
}

#[test]
fn dispatch_chain_starts_at_the_singleton() {
    let rt = runtime();
    let a = rt.subclass(rt.object_class(), "A", None).unwrap();
    let obj = rt.new_object(a).unwrap();
    assert_eq!(
        rt.dispatch_chain(obj).unwrap(),
        vec![a, rt.object_class(), rt.root()]
    );

    let singleton = rt.singleton_class_of(obj).unwrap();
    assert_eq!(
        rt.dispatch_chain(obj).unwrap(),
        vec![singleton, a, rt.object_class(), rt.root()]
    );
}

#[test]
fn class_dispatch_passes_through_superclass_singletons() {
    let rt = runtime();
    let a = rt.subclass(rt.object_class(), "A", None).unwrap();
    let a_singleton = rt.singleton_class_of(a).unwrap();
    let object_singleton = rt.singleton_class_of(rt.object_class()).unwrap();
    let root_singleton = rt.singleton_class_of(rt.root()).unwrap();

    let expected = vec![
        a_singleton,
        object_singleton,
        root_singleton,
        rt.anchor(),
        rt.module_class(),
        rt.object_class(),
        rt.root(),
    ];
    assert_eq!(rt.dispatch_chain(a).unwrap(), expected);
    assert_eq!(rt.dispatch_chain(a).unwrap(), rt.ancestors(a_singleton).unwrap());

    let names: Vec<String> = expected
        .iter()
        .map(|&id| rt.display_name(id).unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "#<Class:A>",
            "#<Class:Object>",
            "#<Class:BasicObject>",
            "Class",
            "Module",
            "Object",
            "BasicObject"
        ]
    );
}

#[test]
fn class_singleton_tracks_superclass_singleton() {
    let rt = runtime();
    let class = rt.allocate_class();
    rt.initialize(class, Some(rt.object_class()), None).unwrap();
    let singleton = rt.singleton_class_of(class).unwrap();
    let object_singleton = rt.singleton_class_of(rt.object_class()).unwrap();
    assert_eq!(rt.superclass_of(singleton).unwrap(), Some(object_singleton));
    assert_eq!(rt.class_of(singleton).unwrap(), object_singleton);
}

#[test]
fn anchor_singleton_is_created_on_demand() {
    let rt = runtime();
    let singleton = rt.singleton_class_of(rt.anchor()).unwrap();
    let module_singleton = rt.singleton_class_of(rt.module_class()).unwrap();
    assert_eq!(rt.superclass_of(singleton).unwrap(), Some(module_singleton));
    // Created on demand, so it shares the owning class of its superclass.
    assert_eq!(rt.class_of(singleton).unwrap(), rt.class_of(module_singleton).unwrap());
    assert_eq!(rt.display_name(singleton).unwrap(), "#<Class:Class>");
    check_runtime(&rt);
}

#[test]
fn singleton_of_a_singleton_recurses_upward() {
    let rt = runtime();
    let object_singleton = rt.singleton_class_of(rt.object_class()).unwrap();
    let meta = rt.singleton_class_of(object_singleton).unwrap();
    let root_meta = rt
        .existing_singleton_class(rt.existing_singleton_class(rt.root()).unwrap().unwrap())
        .unwrap()
        .unwrap();

    assert_eq!(rt.superclass_of(meta).unwrap(), Some(root_meta));
    assert_eq!(rt.display_name(meta).unwrap(), "#<Class:#<Class:Object>>");
    // The root singleton's superclass is the anchor, so its singleton forces
    // the anchor's singleton into existence.
    let anchor_singleton = rt.existing_singleton_class(rt.anchor()).unwrap().unwrap();
    assert_eq!(rt.superclass_of(root_meta).unwrap(), Some(anchor_singleton));
    check_runtime(&rt);
}

#[test]
fn singleton_names_follow_late_naming() {
    let rt = runtime();
    let anon = rt.subclass(rt.object_class(), "", None).unwrap();
    let singleton = rt.singleton_class_of(anon).unwrap();

    let before = rt.display_name(singleton).unwrap();
    assert!(before.starts_with("#<Class:#<Class:0x"), "{before}");

    rt.assign_name(anon, "Named").unwrap();
    assert_eq!(rt.display_name(singleton).unwrap(), "#<Class:Named>");
    assert_eq!(rt.backtrace_name(singleton).unwrap(), "#<Class:Named>");
    assert_eq!(rt.name_of(singleton).unwrap(), None);
}

#[test]
fn singleton_of_instance_reports_instance() {
    let rt = runtime();
    let a = rt.subclass(rt.object_class(), "Thing", None).unwrap();
    let obj = rt.new_object(a).unwrap();
    let singleton = rt.singleton_class_of(obj).unwrap();
    let display = rt.display_name(singleton).unwrap();
    assert!(display.starts_with("#<Class:#<Thing:0x"), "{display}");
}

#[test]
fn uninitialized_classes_have_no_singleton() {
    let rt = runtime();
    let class = rt.allocate_class();
    assert_eq!(rt.singleton_class_of(class), Err(ClassError::UninitializedClass));
    assert_eq!(rt.existing_singleton_class(class).unwrap(), None);
}

#[test]
fn singletons_cannot_be_subclassed_or_instantiated() {
    let rt = runtime();
    let a = rt.subclass(rt.object_class(), "A", None).unwrap();
    let obj = rt.new_object(a).unwrap();
    let singleton = rt.singleton_class_of(obj).unwrap();
    assert_eq!(
        rt.subclass(singleton, "B", None),
        Err(ClassError::ForbiddenSubclassOfSingleton)
    );
    assert_eq!(rt.new_object(singleton), Err(ClassError::InstantiateSingleton));
}
