//! Map operations
//!
//! A [`MapOperation`] records pending mutations to a map data type, including
//! mutations to nested maps. [`populate`] flattens it into the wire
//! [`MapOp`]; [`parse`] rebuilds a typed [`Map`] from fetched wire entries.
//!
//! ## Field Invariants
//! For a given field name and kind, setting a value and removing the whole
//! field are mutually exclusive: the later call wins. Set-element additions
//! and removals are independent of each other, but removing the whole set
//! field discards both.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::protocol::pb::{
    CounterOp, FlagOp, MapEntry, MapField, MapFieldType, MapOp, MapUpdate, SetOp,
};

/// Pending element changes to one set field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct SetDelta {
    adds: Vec<Vec<u8>>,
    removes: Vec<Vec<u8>>,
}

/// Pending mutations to a map, built incrementally and consumed by [`populate`]
///
/// Child maps are owned outright; the structure is a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOperation {
    counters: BTreeMap<String, i64>,
    sets: BTreeMap<String, SetDelta>,
    registers: BTreeMap<String, Vec<u8>>,
    flags: BTreeMap<String, bool>,
    maps: BTreeMap<String, MapOperation>,

    /// Whole-field removals, keyed by kind then name
    removals: BTreeSet<(MapFieldType, String)>,
}

impl MapOperation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `increment` to a counter field; repeated calls accumulate
    pub fn increment_counter(&mut self, name: impl Into<String>, increment: i64) -> &mut Self {
        let name = name.into();
        self.unmark_removal(MapFieldType::Counter, &name);
        *self.counters.entry(name).or_insert(0) += increment;
        self
    }

    pub fn remove_counter(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.counters.remove(&name);
        self.mark_removal(MapFieldType::Counter, name);
        self
    }

    pub fn add_to_set(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> &mut Self {
        let name = name.into();
        self.unmark_removal(MapFieldType::Set, &name);
        self.sets.entry(name).or_default().adds.push(value.into());
        self
    }

    /// Remove a single element from a set field
    pub fn remove_from_set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) -> &mut Self {
        let name = name.into();
        self.unmark_removal(MapFieldType::Set, &name);
        self.sets.entry(name).or_default().removes.push(value.into());
        self
    }

    /// Remove the whole set field, discarding pending element changes
    pub fn remove_set(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.sets.remove(&name);
        self.mark_removal(MapFieldType::Set, name);
        self
    }

    pub fn set_register(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> &mut Self {
        let name = name.into();
        self.unmark_removal(MapFieldType::Register, &name);
        self.registers.insert(name, value.into());
        self
    }

    pub fn remove_register(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.registers.remove(&name);
        self.mark_removal(MapFieldType::Register, name);
        self
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        let name = name.into();
        self.unmark_removal(MapFieldType::Flag, &name);
        self.flags.insert(name, value);
        self
    }

    pub fn remove_flag(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.flags.remove(&name);
        self.mark_removal(MapFieldType::Flag, name);
        self
    }

    /// Operation on the nested map `name`, created on first use
    pub fn map(&mut self, name: impl Into<String>) -> &mut MapOperation {
        let name = name.into();
        self.unmark_removal(MapFieldType::Map, &name);
        self.maps.entry(name).or_default()
    }

    pub fn remove_map(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.maps.remove(&name);
        self.mark_removal(MapFieldType::Map, name);
        self
    }

    /// True if nothing is pending at this level or below
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
            && self.sets.is_empty()
            && self.registers.is_empty()
            && self.flags.is_empty()
            && self.maps.is_empty()
            && self.removals.is_empty()
    }

    /// Whether the server needs a causal context to apply this operation
    ///
    /// Any removal, whole-field or set-element, at any depth requires one.
    /// Set-element removals inside nested maps count as well, which is
    /// stricter than checking set removals at the top level only.
    pub fn requires_context(&self) -> bool {
        self.has_removals(true)
    }

    /// Whole-field removals here or in any nested map, optionally counting
    /// set-element removals as well
    fn has_removals(&self, include_set_removes: bool) -> bool {
        if !self.removals.is_empty() {
            return true;
        }
        if include_set_removes && self.sets.values().any(|delta| !delta.removes.is_empty()) {
            return true;
        }
        self.maps
            .values()
            .any(|child| child.has_removals(include_set_removes))
    }

    fn mark_removal(&mut self, kind: MapFieldType, name: String) {
        self.removals.insert((kind, name));
    }

    fn unmark_removal(&mut self, kind: MapFieldType, name: &str) {
        self.removals.remove(&(kind, name.to_string()));
    }
}

// =============================================================================
// Encoding
// =============================================================================

fn field(name: String, kind: MapFieldType) -> MapField {
    MapField {
        name: name.into_bytes(),
        r#type: kind as i32,
    }
}

fn update(name: String, kind: MapFieldType) -> MapUpdate {
    MapUpdate {
        field: field(name, kind),
        ..Default::default()
    }
}

/// Flatten a map operation into its wire form
///
/// Takes the operation by value: it is consumed exactly once. Entries are
/// emitted removals first, then counters, sets, registers, flags and nested
/// maps, each in name order.
pub fn populate(op: MapOperation) -> MapOp {
    let MapOperation {
        counters,
        sets,
        registers,
        flags,
        maps,
        removals,
    } = op;

    let mut wire = MapOp {
        removes: removals
            .into_iter()
            .map(|(kind, name)| field(name, kind))
            .collect(),
        updates: Vec::new(),
    };

    for (name, increment) in counters {
        let mut u = update(name, MapFieldType::Counter);
        u.counter_op = Some(CounterOp {
            increment: Some(increment),
        });
        wire.updates.push(u);
    }

    for (name, delta) in sets {
        let mut u = update(name, MapFieldType::Set);
        u.set_op = Some(SetOp {
            adds: delta.adds,
            removes: delta.removes,
        });
        wire.updates.push(u);
    }

    for (name, value) in registers {
        let mut u = update(name, MapFieldType::Register);
        u.register_op = Some(value);
        wire.updates.push(u);
    }

    for (name, enabled) in flags {
        let mut u = update(name, MapFieldType::Flag);
        let flag_op = if enabled {
            FlagOp::Enable
        } else {
            FlagOp::Disable
        };
        u.flag_op = Some(flag_op as i32);
        wire.updates.push(u);
    }

    for (name, child) in maps {
        let mut u = update(name, MapFieldType::Map);
        u.map_op = Some(populate(child));
        wire.updates.push(u);
    }

    tracing::trace!(
        removes = wire.removes.len(),
        updates = wire.updates.len(),
        "populated map operation"
    );
    wire
}

// =============================================================================
// Decoding
// =============================================================================

/// A fetched map value, partitioned by field kind
///
/// Rebuilt from scratch on every response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Map {
    pub counters: HashMap<String, i64>,
    pub sets: HashMap<String, Vec<Vec<u8>>>,
    pub registers: HashMap<String, Vec<u8>>,
    pub flags: HashMap<String, bool>,
    pub maps: HashMap<String, Map>,
}

impl Map {
    /// True if no field of any kind is present
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
            && self.sets.is_empty()
            && self.registers.is_empty()
            && self.flags.is_empty()
            && self.maps.is_empty()
    }
}

/// Rebuild a typed map from wire entries
///
/// Entries with an unrecognised kind tag are skipped.
pub fn parse(entries: Vec<MapEntry>) -> Map {
    let mut map = Map::default();

    for entry in entries {
        let name = String::from_utf8_lossy(&entry.field.name).into_owned();
        let Ok(kind) = MapFieldType::try_from(entry.field.r#type) else {
            tracing::debug!(field = %name, tag = entry.field.r#type, "skipping unknown map field type");
            continue;
        };

        match kind {
            MapFieldType::Counter => {
                map.counters
                    .insert(name, entry.counter_value.unwrap_or_default());
            }
            MapFieldType::Set => {
                map.sets.insert(name, entry.set_value);
            }
            MapFieldType::Register => {
                map.registers
                    .insert(name, entry.register_value.unwrap_or_default());
            }
            MapFieldType::Flag => {
                map.flags.insert(name, entry.flag_value.unwrap_or_default());
            }
            MapFieldType::Map => {
                map.maps.insert(name, parse(entry.map_value));
            }
        }
    }

    map
}
