//! Insertion Order Module
//!
//! Tracks the order in which keys were written, for FIFO eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Records keys by write time.
///
/// Keys are stored in a VecDeque where:
/// - Front = oldest write (next eviction candidate)
/// - Back = most recent write
///
/// Reads never reorder keys; only `record` does.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record ==
    /// Marks a key as most recently written.
    ///
    /// An existing occurrence is removed first, so each key appears once.
    pub fn record(&mut self, key: &str) {
        self.remove(key);
        self.order.push_back(key.to_string());
    }

    // == Remove ==
    /// Removes a key from the tracker. No-op if absent.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest written key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    // == Peek Oldest ==
    /// Returns the oldest written key without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.front()
    }

    /// Clears all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    /// Keys from oldest to newest.
    pub fn keys(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}
