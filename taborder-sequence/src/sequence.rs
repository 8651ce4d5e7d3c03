//! Doubly linked id sequence with an id-to-link side index.
//!
//! Relative order lives only in the `prev`/`next` links; no element stores its
//! own index, so removing or moving an id never needs to renumber anything.

use crate::SequenceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Neighbours of one id in the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link<Id> {
    prev: Option<Id>,
    next: Option<Id>,
}

/// Ordered sequence of unique ids
///
/// - Append and remove are O(1)
/// - Positional insert and position lookup walk from the nearer end, O(n)
/// - Positions past the end clamp to an append
#[derive(Clone)]
pub struct IdSequence<Id = i64> {
    links: HashMap<Id, Link<Id>>,
    head: Option<Id>,
    tail: Option<Id>,
}

impl<Id> Default for IdSequence<Id> {
    fn default() -> Self {
        Self {
            links: HashMap::new(),
            head: None,
            tail: None,
        }
    }
}

impl<Id> IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence whose order is exactly `ids`
    ///
    /// Returns `DuplicateId` for the first id that appears twice.
    pub fn from_slice(ids: &[Id]) -> Result<Self, SequenceError<Id>> {
        let mut sequence = Self::new();
        for &id in ids {
            sequence.push_back(id)?;
        }
        Ok(sequence)
    }

    /// Number of ids in the sequence
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the sequence holds no ids
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Whether `id` is in the sequence
    pub fn contains(&self, id: Id) -> bool {
        self.links.contains_key(&id)
    }

    /// First id in order
    pub fn first(&self) -> Option<Id> {
        self.head
    }

    /// Last id in order
    pub fn last(&self) -> Option<Id> {
        self.tail
    }

    /// Append `id` at the end
    pub fn push_back(&mut self, id: Id) -> Result<(), SequenceError<Id>> {
        if self.contains(id) {
            return Err(SequenceError::DuplicateId(id));
        }

        match self.tail {
            Some(tail) => self.set_next(tail, Some(id)),
            None => self.head = Some(id),
        }
        self.links.insert(
            id,
            Link {
                prev: self.tail,
                next: None,
            },
        );
        self.tail = Some(id);
        Ok(())
    }

    /// Insert `id` so that it ends up at `position`
    ///
    /// A position at or past the end appends. Returns the position the id
    /// actually landed on.
    pub fn insert(&mut self, id: Id, position: usize) -> Result<usize, SequenceError<Id>> {
        if self.contains(id) {
            return Err(SequenceError::DuplicateId(id));
        }

        let Some(at) = self.get(position) else {
            let landed = self.len();
            self.push_back(id)?;
            return Ok(landed);
        };

        let prev = self.links.get(&at).and_then(|link| link.prev);
        match prev {
            Some(prev) => self.set_next(prev, Some(id)),
            None => self.head = Some(id),
        }
        self.set_prev(at, Some(id));
        self.links.insert(
            id,
            Link {
                prev,
                next: Some(at),
            },
        );
        Ok(position)
    }

    /// Remove `id`, returning whether it was present
    pub fn remove(&mut self, id: Id) -> bool {
        let Some(link) = self.links.remove(&id) else {
            return false;
        };

        match link.prev {
            Some(prev) => self.set_next(prev, link.next),
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => self.set_prev(next, link.prev),
            None => self.tail = link.prev,
        }
        true
    }

    /// Move `id` to `position`
    ///
    /// Equivalent to `remove` followed by `insert`; the clamp applies to the
    /// length after removal.
    pub fn move_to(&mut self, id: Id, position: usize) -> Result<usize, SequenceError<Id>> {
        if !self.remove(id) {
            return Err(SequenceError::NotFound(id));
        }
        self.insert(id, position)
    }

    /// Id currently at `position`
    pub fn get(&self, position: usize) -> Option<Id> {
        let len = self.len();
        if position >= len {
            return None;
        }
        if position <= len / 2 {
            self.iter().nth(position)
        } else {
            self.iter().rev().nth(len - 1 - position)
        }
    }

    /// Current position of `id`
    pub fn position(&self, id: Id) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.iter().position(|candidate| candidate == id)
    }

    /// Iterate ids in order
    pub fn iter(&self) -> Iter<'_, Id> {
        Iter {
            links: &self.links,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Fresh snapshot of the order
    pub fn to_vec(&self) -> Vec<Id> {
        self.iter().collect()
    }

    /// Remove every id
    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    fn set_next(&mut self, id: Id, next: Option<Id>) {
        if let Some(link) = self.links.get_mut(&id) {
            link.next = next;
        }
    }

    fn set_prev(&mut self, id: Id, prev: Option<Id>) {
        if let Some(link) = self.links.get_mut(&id) {
            link.prev = prev;
        }
    }
}

/// In-order iterator over an [`IdSequence`]
pub struct Iter<'a, Id> {
    links: &'a HashMap<Id, Link<Id>>,
    front: Option<Id>,
    back: Option<Id>,
    remaining: usize,
}

impl<Id> Iterator for Iter<'_, Id>
where
    Id: Copy + Eq + Hash,
{
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.links.get(&id).and_then(|link| link.next);
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<Id> DoubleEndedIterator for Iter<'_, Id>
where
    Id: Copy + Eq + Hash,
{
    fn next_back(&mut self) -> Option<Id> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.links.get(&id).and_then(|link| link.prev);
        self.remaining -= 1;
        Some(id)
    }
}

impl<Id> ExactSizeIterator for Iter<'_, Id> where Id: Copy + Eq + Hash {}

impl<'a, Id> IntoIterator for &'a IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    type Item = Id;
    type IntoIter = Iter<'a, Id>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<Id> PartialEq for IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<Id> Eq for IdSequence<Id> where Id: Copy + Eq + Hash + fmt::Debug {}

impl<Id> fmt::Debug for IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<Id> Serialize for IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, Id> Deserialize<'de> for IdSequence<Id>
where
    Id: Copy + Eq + Hash + fmt::Debug + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Vec::<Id>::deserialize(deserializer)?;
        Self::from_slice(&ids).map_err(serde::de::Error::custom)
    }
}
