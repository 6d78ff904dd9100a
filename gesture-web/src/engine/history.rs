//! Bounded per-hand frame history

use std::collections::VecDeque;

use crate::landmarks::HandFrame;

/// Frames kept per hand-track index
pub const HISTORY_CAPACITY: usize = 30;

/// Most recent frames for one hand, oldest first
#[derive(Clone, Debug)]
pub struct HandHistory {
    frames: VecDeque<HandFrame>,
    capacity: usize,
}

impl HandHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append, evicting the oldest frame on overflow
    pub fn push(&mut self, frame: HandFrame) {
        self.frames.push_back(frame);
        while self.frames.len() > self.capacity {
            self.frames.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&HandFrame> {
        self.frames.back()
    }

    /// The frame before the latest one
    pub fn previous(&self) -> Option<&HandFrame> {
        self.frames.len().checked_sub(2).and_then(|i| self.frames.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandFrame> {
        self.frames.iter()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for HandHistory {
    fn default() -> Self {
        Self::new()
    }
}
