//! Per-hand detector state
//!
//! Each tracked hand gets its own filters, phase and debounce so two hands
//! never share a pinch or a hold timer.

use std::collections::HashMap;

pub struct PerHand<S> {
    states: HashMap<usize, S>,
}

impl<S> PerHand<S> {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
        }
    }

    /// State for `hand`, created with `make` on first use
    pub fn entry(&mut self, hand: usize, make: impl FnOnce() -> S) -> &mut S {
        self.states.entry(hand).or_insert_with(make)
    }

    pub fn get(&self, hand: usize) -> Option<&S> {
        self.states.get(&hand)
    }

    pub fn remove(&mut self, hand: usize) {
        self.states.remove(&hand);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S> Default for PerHand<S> {
    fn default() -> Self {
        Self::new()
    }
}
