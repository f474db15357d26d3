//! Addressable binary min-heap ordered by (cost, duration)
//!
//! A side table maps each ride id to its current slot so that any ride,
//! not only the root, can be removed in O(log n). Every element move goes
//! through `place` or `swap`, which update the slot and the table together.

use std::collections::HashMap;

use super::errors::{IndexError, IndexResult};
use crate::ride::{RideId, RideRecord};

/// Min-heap of ride records with O(log n) removal by id.
#[derive(Debug, Clone, Default)]
pub struct PriorityIndex {
    entries: Vec<RideRecord>,
    positions: HashMap<RideId, usize>,
}

impl PriorityIndex {
    /// Creates an empty heap
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rides queued
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a ride with `id` is queued
    pub fn contains(&self, id: RideId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Current slot of `id`, if queued
    pub fn position(&self, id: RideId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// The minimum record without removing it
    pub fn peek(&self) -> Option<&RideRecord> {
        self.entries.first()
    }

    /// Push a record and restore heap order.
    ///
    /// Returns false (and changes nothing) if its id is already queued.
    pub fn insert(&mut self, record: RideRecord) -> bool {
        if self.positions.contains_key(&record.id()) {
            return false;
        }
        let slot = self.entries.len();
        self.entries.push(record);
        self.positions.insert(record.id(), slot);
        self.sift_up(slot);
        true
    }

    /// Remove and return the record with the smallest (cost, duration).
    pub fn pop_min(&mut self) -> Option<RideRecord> {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.take(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(min)
    }

    /// Remove the record for `id` from anywhere in the heap.
    pub fn remove(&mut self, id: RideId) -> Option<RideRecord> {
        let slot = self.position(id)?;
        let removed = self.take(slot);

        // The tail element now sits at `slot`; it may belong above or below.
        if slot < self.entries.len() {
            self.sift_up(slot);
            self.sift_down(slot);
        }
        Some(removed)
    }

    /// Check heap order and that the position map matches every slot.
    pub fn verify(&self) -> IndexResult<()> {
        if self.positions.len() != self.entries.len() {
            return Err(IndexError::heap(format!(
                "position map has {} ids for {} slots",
                self.positions.len(),
                self.entries.len()
            )));
        }

        for (slot, record) in self.entries.iter().enumerate() {
            match self.positions.get(&record.id()) {
                Some(&mapped) if mapped == slot => {}
                Some(&mapped) => {
                    return Err(IndexError::heap_at(
                        record.id(),
                        format!("position map points at slot {} but ride sits at {}", mapped, slot),
                    ))
                }
                None => return Err(IndexError::heap_at(record.id(), "missing from position map")),
            }

            if slot > 0 {
                let parent = &self.entries[(slot - 1) / 2];
                if parent.priority() > record.priority() {
                    return Err(IndexError::heap_at(
                        record.id(),
                        format!("ordered before its parent ride {}", parent.id()),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Queued records in slot order
    pub fn records(&self) -> &[RideRecord] {
        &self.entries
    }

    /// Swap-remove the record at `slot`, keeping the position map in step.
    fn take(&mut self, slot: usize) -> RideRecord {
        let removed = self.entries.swap_remove(slot);
        self.positions.remove(&removed.id());
        if slot < self.entries.len() {
            let moved = self.entries[slot];
            self.place(slot, moved);
        }
        removed
    }

    fn place(&mut self, slot: usize, record: RideRecord) {
        self.entries[slot] = record;
        self.positions.insert(record.id(), slot);
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (first, second) = (self.entries[a], self.entries[b]);
        self.place(a, second);
        self.place(b, first);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.entries[parent].priority() <= self.entries[slot].priority() {
                break;
            }
            self.swap(parent, slot);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut smallest = slot;

            if left < len && self.entries[left].priority() < self.entries[smallest].priority() {
                smallest = left;
            }
            if right < len && self.entries[right].priority() < self.entries[smallest].priority() {
                smallest = right;
            }
            if smallest == slot {
                break;
            }
            self.swap(slot, smallest);
            slot = smallest;
        }
    }
}
