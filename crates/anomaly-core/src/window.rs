//! Fixed-capacity rolling buffer with global index bookkeeping
//!
//! The window keeps the most recent `capacity` values of a stream and the
//! global index of the oldest one (`base_index`). The value at local
//! position `j` always belongs to global index `base_index + j`; detectors
//! must translate positions through [`RollingWindow::global_index_of`] or
//! [`WindowSnapshot::global_index_of`] rather than re-deriving them from the
//! caller's counter.

use crate::{Error, Result};
use std::collections::VecDeque;

/// Bounded, most-recent suffix of a stream
#[derive(Debug, Clone)]
pub struct RollingWindow {
    values: VecDeque<f64>,
    capacity: usize,
    base_index: u64,
}

impl RollingWindow {
    /// Create an empty window whose first sample will carry global index 0
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_origin(capacity, 0)
    }

    /// Create an empty window whose first sample will carry global index `origin`
    pub fn with_origin(capacity: usize, origin: u64) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("capacity", "must be a positive integer, got 0"));
        }
        Ok(Self {
            values: VecDeque::with_capacity(capacity),
            capacity,
            base_index: origin,
        })
    }

    /// Append a value, evicting and returning the oldest one when full
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.values.len() == self.capacity {
            self.base_index += 1;
            self.values.pop_front()
        } else {
            None
        };
        self.values.push_back(value);
        evicted
    }

    /// Read-only view of the current contents
    pub fn snapshot(&self) -> WindowSnapshot<'_> {
        let (front, back) = self.values.as_slices();
        WindowSnapshot {
            front,
            back,
            base_index: self.base_index,
        }
    }

    /// Contiguous slice of the current contents, oldest first
    ///
    /// Rearranges the ring storage in place when it wraps; the logical
    /// contents and `base_index` are unchanged.
    pub fn as_slice(&mut self) -> &[f64] {
        self.values.make_contiguous()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Global index of the oldest retained value
    pub fn base_index(&self) -> u64 {
        self.base_index
    }

    /// Global index the next pushed value will occupy
    pub fn next_index(&self) -> u64 {
        self.base_index + self.values.len() as u64
    }

    /// Global index of local position `j`
    pub fn global_index_of(&self, j: usize) -> u64 {
        self.base_index + j as u64
    }

    pub fn value_at(&self, j: usize) -> Option<f64> {
        self.values.get(j).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Drop all values; the next push will carry global index `origin`
    pub fn reset(&mut self, origin: u64) {
        self.values.clear();
        self.base_index = origin;
    }
}

/// Borrowed, ordered view of a [`RollingWindow`]
#[derive(Debug, Clone, Copy)]
pub struct WindowSnapshot<'a> {
    front: &'a [f64],
    back: &'a [f64],
    base_index: u64,
}

impl<'a> WindowSnapshot<'a> {
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn base_index(&self) -> u64 {
        self.base_index
    }

    pub fn global_index_of(&self, j: usize) -> u64 {
        self.base_index + j as u64
    }

    pub fn value_at(&self, j: usize) -> Option<f64> {
        if j < self.front.len() {
            Some(self.front[j])
        } else {
            self.back.get(j - self.front.len()).copied()
        }
    }

    /// Values oldest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + 'a {
        let (front, back) = (self.front, self.back);
        front.iter().chain(back.iter()).copied()
    }

    /// `(global_index, value)` pairs oldest first
    pub fn indexed(&self) -> impl Iterator<Item = (u64, f64)> + 'a {
        let base = self.base_index;
        self.iter()
            .enumerate()
            .map(move |(j, v)| (base + j as u64, v))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(self.front);
        out.extend_from_slice(self.back);
        out
    }
}
