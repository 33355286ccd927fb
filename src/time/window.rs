use std::collections::{vec_deque, VecDeque};

/// Fixed-capacity FIFO of raw delays, oldest first.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: VecDeque<i64>,
    capacity: usize,
}

impl SampleWindow {
    /// A zero capacity is raised to one; the window always keeps the newest sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `delay` as the newest entry, evicting the oldest when full.
    pub fn push(&mut self, delay: i64) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(delay);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, i64> {
        self.samples.iter()
    }
}
