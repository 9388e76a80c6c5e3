//! Rankings, their slots, and the object universe they induce.
//!
//! A ranking is an ordered list of slots.  Each slot holds either a single
//! object or a tied-group of equally ranked objects.  The JSON encoding is the
//! natural one: scalars for single objects and flat arrays for tied-groups,
//! e.g. `[1, [2, 3], 4]`.

use crate::error::{ConsensusError, RankingSide};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Opaque ranked object.
///
/// Objects compare by equality and by a fixed total order (integers first,
/// then strings) that determines their index in the [`Universe`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Object {
    /// Integer identifier.
    Int(i64),
    /// String identifier.
    Str(String),
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Int(v) => write!(f, "{v}"),
            Object::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Object::Int(value)
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Object::Str(value.to_string())
    }
}

/// One rank position: a bare object or a tied-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    /// A single object holding the slot alone.
    Single(Object),
    /// Objects sharing the slot, unordered among themselves.
    Tied(Vec<Object>),
}

impl Slot {
    /// Returns the objects held by this slot.
    pub fn members(&self) -> &[Object] {
        match self {
            Slot::Single(obj) => std::slice::from_ref(obj),
            Slot::Tied(group) => group,
        }
    }

    /// Returns `true` if `object` occupies this slot.
    pub fn contains(&self, object: &Object) -> bool {
        self.members().contains(object)
    }
}

/// Ordered sequence of slots, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    slots: Vec<Slot>,
}

impl Ranking {
    /// Wraps an ordered list of slots.
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Decodes a ranking from its JSON encoding.
    pub fn from_json(input: &str, side: RankingSide) -> Result<Self, ConsensusError> {
        serde_json::from_str(input).map_err(|err| ConsensusError::Malformed {
            ranking: side,
            message: err.to_string(),
        })
    }

    /// Returns the slots in rank order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Number of slots (not objects).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the ranking has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates `(slot_index, object)` pairs in rank order.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &Object)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .flat_map(|(pos, slot)| slot.members().iter().map(move |obj| (pos, obj)))
    }

    /// Returns the index of the slot holding `object`, scanning from the top.
    pub fn slot_position(&self, object: &Object) -> Option<usize> {
        self.slots.iter().position(|slot| slot.contains(object))
    }

    /// Flattens the ranking into its sorted, deduplicated object universe.
    pub fn universe(&self) -> Universe {
        let mut objects: Vec<Object> = self.placements().map(|(_, obj)| obj.clone()).collect();
        objects.sort();
        objects.dedup();
        Universe { objects }
    }

    /// Builds the object → slot lookup, rejecting objects placed twice.
    pub fn position_index(&self, side: RankingSide) -> Result<PositionIndex, ConsensusError> {
        let mut positions = HashMap::new();
        for (pos, obj) in self.placements() {
            match positions.entry(obj.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
                Entry::Occupied(_) => {
                    return Err(ConsensusError::DuplicateObject {
                        ranking: side,
                        object: obj.to_string(),
                    })
                }
            }
        }
        Ok(PositionIndex {
            positions,
            slot_count: self.slots.len(),
        })
    }
}

/// Objects of the reference ranking, indexed `0..n` by their total order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Universe {
    objects: Vec<Object>,
}

impl Universe {
    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` for the empty universe.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in index order.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Object stored at `index`.
    pub fn object(&self, index: usize) -> &Object {
        &self.objects[index]
    }

    /// Index of `object`, if it belongs to the universe.
    pub fn index_of(&self, object: &Object) -> Option<usize> {
        self.objects.binary_search(object).ok()
    }
}

/// Slot lookup for one ranking.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    positions: HashMap<Object, usize>,
    slot_count: usize,
}

impl PositionIndex {
    /// Slot index of `object`, if the ranking places it.
    pub fn position(&self, object: &Object) -> Option<usize> {
        self.positions.get(object).copied()
    }

    /// Position used for objects this ranking does not place: one past its last slot.
    pub fn sentinel(&self) -> usize {
        self.slot_count
    }

    /// Slot index of every universe object, unplaced objects at the sentinel.
    pub fn over(&self, universe: &Universe) -> Vec<usize> {
        universe
            .objects()
            .iter()
            .map(|obj| self.position(obj).unwrap_or(self.slot_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Object> {
        values.iter().copied().map(Object::Int).collect()
    }

    #[test]
    fn test_decode_mixed_slots() {
        let ranking = Ranking::from_json("[1, [2, 3], \"x\"]", RankingSide::A).unwrap();
        assert_eq!(
            ranking.slots(),
            &[
                Slot::Single(Object::Int(1)),
                Slot::Tied(ints(&[2, 3])),
                Slot::Single(Object::from("x")),
            ]
        );
    }

    #[test]
    fn test_decode_rejects_nested_groups() {
        let err = Ranking::from_json("[1, [2, [3]]]", RankingSide::B).unwrap_err();
        assert!(matches!(
            err,
            ConsensusError::Malformed {
                ranking: RankingSide::B,
                ..
            }
        ));
    }

    #[test]
    fn test_decode_rejects_floats_and_objects() {
        assert!(Ranking::from_json("[1.5]", RankingSide::A).is_err());
        assert!(Ranking::from_json("[{\"a\": 1}]", RankingSide::A).is_err());
        assert!(Ranking::from_json("{}", RankingSide::A).is_err());
    }

    #[test]
    fn test_universe_is_sorted() {
        let ranking = Ranking::from_json("[[3, 1], 2, [5, 4]]", RankingSide::A).unwrap();
        assert_eq!(ranking.universe().objects(), ints(&[1, 2, 3, 4, 5]).as_slice());
    }

    #[test]
    fn test_integers_order_before_strings() {
        let ranking = Ranking::from_json("[\"b\", 7, \"a\"]", RankingSide::A).unwrap();
        let universe = ranking.universe();
        assert_eq!(universe.object(0), &Object::Int(7));
        assert_eq!(universe.index_of(&Object::from("b")), Some(2));
        assert_eq!(universe.index_of(&Object::Int(8)), None);
    }

    #[test]
    fn test_slot_position() {
        let ranking = Ranking::from_json("[1, [2, 3], 4]", RankingSide::A).unwrap();
        assert_eq!(ranking.slot_position(&Object::Int(3)), Some(1));
        assert_eq!(ranking.slot_position(&Object::Int(4)), Some(2));
        assert_eq!(ranking.slot_position(&Object::Int(9)), None);
    }

    #[test]
    fn test_empty_group_keeps_its_slot() {
        let ranking = Ranking::from_json("[1, [], 2]", RankingSide::A).unwrap();
        let index = ranking.position_index(RankingSide::A).unwrap();
        assert_eq!(index.position(&Object::Int(2)), Some(2));
        assert_eq!(ranking.universe().len(), 2);
    }

    #[test]
    fn test_duplicate_across_slots_rejected() {
        let ranking = Ranking::from_json("[1, [2, 1]]", RankingSide::A).unwrap();
        let err = ranking.position_index(RankingSide::A).unwrap_err();
        match err {
            ConsensusError::DuplicateObject { ranking, object } => {
                assert_eq!(ranking, RankingSide::A);
                assert_eq!(object, "1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_within_group_rejected() {
        let ranking = Ranking::from_json("[[\"a\", \"a\"]]", RankingSide::B).unwrap();
        assert!(ranking.position_index(RankingSide::B).is_err());
    }

    #[test]
    fn test_unplaced_objects_use_sentinel() {
        let a = Ranking::from_json("[1, 2, 3]", RankingSide::A).unwrap();
        let b = Ranking::from_json("[3, 1]", RankingSide::B).unwrap();
        let index = b.position_index(RankingSide::B).unwrap();
        assert_eq!(index.sentinel(), 2);
        assert_eq!(index.over(&a.universe()), vec![1, 2, 0]);
    }

    #[test]
    fn test_round_trip_encoding() {
        let text = "[1,[2,3],\"z\"]";
        let ranking = Ranking::from_json(text, RankingSide::A).unwrap();
        assert_eq!(serde_json::to_string(&ranking).unwrap(), text);
    }
}
