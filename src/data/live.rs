//! Bounded live series fed by the refresh timer.

use std::collections::VecDeque;

/// Append-only series that forgets its oldest samples beyond `capacity`.
#[derive(Debug, Clone)]
pub struct LiveSeries<T> {
    samples: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> LiveSeries<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::new(),
            capacity,
        }
    }

    /// Seed from existing samples, keeping the newest `capacity` of them.
    pub fn from_samples(samples: impl IntoIterator<Item = T>, capacity: usize) -> Self {
        let mut series = Self::new(capacity);
        for sample in samples {
            series.push(sample);
        }
        series
    }

    /// Append a sample and return how many old samples were dropped.
    pub fn push(&mut self, sample: T) -> usize {
        self.samples.push_back(sample);
        self.trim()
    }

    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.max(1);
        self.trim()
    }

    fn trim(&mut self) -> usize {
        let excess = self.samples.len().saturating_sub(self.capacity);
        self.samples.drain(..excess);
        excess
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn last(&self) -> Option<&T> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}
