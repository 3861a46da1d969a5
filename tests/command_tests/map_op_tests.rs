//! Map Operation Tests
//!
//! Flattening pending operations into wire updates and rebuilding fetched
//! maps from wire entries.

use riak_command::command::{parse, populate};
use riak_command::protocol::pb::{FlagOp, MapEntry, MapField, MapFieldType, MapOp, MapUpdate};
use riak_command::MapOperation;

fn entry(name: &str, kind: i32) -> MapEntry {
    MapEntry {
        field: MapField {
            name: name.as_bytes().to_vec(),
            r#type: kind,
        },
        ..Default::default()
    }
}

fn find_update<'a>(wire: &'a MapOp, name: &str, kind: MapFieldType) -> Option<&'a MapUpdate> {
    wire.updates
        .iter()
        .find(|u| u.field.name == name.as_bytes() && u.field.r#type == kind as i32)
}

fn has_remove(wire: &MapOp, name: &str, kind: MapFieldType) -> bool {
    wire.removes
        .iter()
        .any(|f| f.name == name.as_bytes() && f.r#type == kind as i32)
}

// =============================================================================
// Populate Tests
// =============================================================================

#[test]
fn test_counter_increments_accumulate() {
    let mut op = MapOperation::new();
    op.increment_counter("c", 3).increment_counter("c", -1);

    let wire = populate(op);
    let update = find_update(&wire, "c", MapFieldType::Counter).unwrap();

    assert_eq!(update.counter_op.as_ref().unwrap().increment, Some(2));
    assert_eq!(wire.updates.len(), 1);
}

#[test]
fn test_remove_after_set_wins() {
    let mut op = MapOperation::new();
    op.set_register("r", "value").remove_register("r");

    let wire = populate(op);

    assert!(has_remove(&wire, "r", MapFieldType::Register));
    assert!(find_update(&wire, "r", MapFieldType::Register).is_none());
}

#[test]
fn test_set_after_remove_wins() {
    let mut op = MapOperation::new();
    op.remove_register("r").set_register("r", "value");

    let wire = populate(op);

    assert!(!has_remove(&wire, "r", MapFieldType::Register));
    let update = find_update(&wire, "r", MapFieldType::Register).unwrap();
    assert_eq!(update.register_op.as_deref(), Some(&b"value"[..]));
}

#[test]
fn test_exclusion_for_every_kind() {
    let mut op = MapOperation::new();
    op.increment_counter("c", 1)
        .remove_counter("c")
        .add_to_set("s", "a")
        .remove_set("s")
        .set_flag("f", true)
        .remove_flag("f");
    op.map("m").set_flag("inner", true);
    op.remove_map("m");

    let wire = populate(op);

    assert!(wire.updates.is_empty());
    assert_eq!(wire.removes.len(), 4);
}

#[test]
fn test_set_adds_and_removes_in_one_update() {
    let mut op = MapOperation::new();
    op.add_to_set("s", "a")
        .add_to_set("s", "b")
        .remove_from_set("s", "c");

    let wire = populate(op);
    let set_op = find_update(&wire, "s", MapFieldType::Set)
        .unwrap()
        .set_op
        .as_ref()
        .unwrap();

    assert_eq!(set_op.adds, vec![b"a".to_vec(), b"b".to_vec()]);
    assert_eq!(set_op.removes, vec![b"c".to_vec()]);
    assert_eq!(wire.updates.len(), 1);
}

#[test]
fn test_flag_enable_disable() {
    let mut op = MapOperation::new();
    op.set_flag("on", true).set_flag("off", false);

    let wire = populate(op);

    let on = find_update(&wire, "on", MapFieldType::Flag).unwrap();
    let off = find_update(&wire, "off", MapFieldType::Flag).unwrap();
    assert_eq!(on.flag_op, Some(FlagOp::Enable as i32));
    assert_eq!(off.flag_op, Some(FlagOp::Disable as i32));
}

#[test]
fn test_nested_populate() {
    let mut op = MapOperation::new();
    op.map("outer").increment_counter("hits", 4);
    op.map("outer").map("inner").remove_register("gone");

    let wire = populate(op);
    let outer = find_update(&wire, "outer", MapFieldType::Map)
        .unwrap()
        .map_op
        .as_ref()
        .unwrap();

    let hits = find_update(outer, "hits", MapFieldType::Counter).unwrap();
    assert_eq!(hits.counter_op.as_ref().unwrap().increment, Some(4));

    let inner = find_update(outer, "inner", MapFieldType::Map)
        .unwrap()
        .map_op
        .as_ref()
        .unwrap();
    assert!(has_remove(inner, "gone", MapFieldType::Register));
    assert!(inner.updates.is_empty());
}

#[test]
fn test_same_name_across_kinds() {
    let mut op = MapOperation::new();
    op.increment_counter("x", 1).set_register("x", "v").set_flag("x", true);

    let wire = populate(op);

    assert_eq!(wire.updates.len(), 3);
    assert!(find_update(&wire, "x", MapFieldType::Counter).is_some());
    assert!(find_update(&wire, "x", MapFieldType::Register).is_some());
    assert!(find_update(&wire, "x", MapFieldType::Flag).is_some());
}

#[test]
fn test_populate_empty() {
    let wire = populate(MapOperation::new());

    assert!(wire.removes.is_empty());
    assert!(wire.updates.is_empty());
}

#[test]
fn test_requires_context() {
    let mut op = MapOperation::new();
    op.increment_counter("c", 1).add_to_set("s", "a");
    assert!(!op.requires_context());

    op.remove_from_set("s", "b");
    assert!(op.requires_context());

    let mut nested = MapOperation::new();
    nested.map("a").map("b").remove_counter("c");
    assert!(nested.requires_context());
}

// =============================================================================
// Parse Tests
// =============================================================================

#[test]
fn test_parse_fields_by_kind() {
    let mut counter = entry("c", MapFieldType::Counter as i32);
    counter.counter_value = Some(5);

    let mut set = entry("s", MapFieldType::Set as i32);
    set.set_value = vec![vec![0x01]];

    let mut flag = entry("f", MapFieldType::Flag as i32);
    flag.flag_value = Some(true);
    let mut child = entry("m", MapFieldType::Map as i32);
    child.map_value = vec![flag];

    let map = parse(vec![counter, set, child]);

    assert_eq!(map.counters.get("c"), Some(&5));
    assert_eq!(map.sets.get("s"), Some(&vec![vec![0x01]]));
    assert_eq!(map.maps.get("m").unwrap().flags.get("f"), Some(&true));
    assert!(map.registers.is_empty());
}

#[test]
fn test_parse_register() {
    let mut register = entry("r", MapFieldType::Register as i32);
    register.register_value = Some(b"hello".to_vec());

    let map = parse(vec![register]);

    assert_eq!(map.registers.get("r"), Some(&b"hello".to_vec()));
}

#[test]
fn test_parse_skips_unknown_kind() {
    let mut counter = entry("c", MapFieldType::Counter as i32);
    counter.counter_value = Some(1);
    let unknown = entry("mystery", 99);

    let map = parse(vec![unknown, counter]);

    assert_eq!(map.counters.len(), 1);
    assert!(map.sets.is_empty());
    assert!(map.registers.is_empty());
    assert!(map.flags.is_empty());
    assert!(map.maps.is_empty());
}

#[test]
fn test_parse_empty() {
    let map = parse(Vec::new());
    assert!(map.is_empty());
}

#[test]
fn test_parse_same_name_across_kinds() {
    let mut counter = entry("x", MapFieldType::Counter as i32);
    counter.counter_value = Some(7);
    let mut flag = entry("x", MapFieldType::Flag as i32);
    flag.flag_value = Some(false);

    let map = parse(vec![counter, flag]);

    assert_eq!(map.counters.get("x"), Some(&7));
    assert_eq!(map.flags.get("x"), Some(&false));
}
