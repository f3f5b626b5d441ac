//! Fixed-capacity rolling sample history
//!
//! Retains the most recent *N* samples as the pre-trigger record. At the
//! default 1 kHz tick rate a capacity of 1000 holds one second of history,
//! enough to show the operating point the unit was at when a transient
//! began.
//!
//! `push` is a total function: it never fails and never grows the buffer
//! past its capacity — the oldest sample is evicted instead. `snapshot`
//! hands out an owned copy so a capture session stays independent of
//! later buffer mutation.

use std::collections::VecDeque;

use crate::types::Sample;

/// FIFO buffer of the last `capacity` samples.
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    ring: VecDeque<Sample>,
    capacity: usize,
}

impl RollingBuffer {
    /// Create an empty buffer holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero — a zero-length history is a caller
    /// configuration error, not a runtime condition.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling buffer capacity must be non-zero");
        Self {
            ring: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the buffer is full.
    pub fn push(&mut self, sample: Sample) {
        if self.ring.len() == self.capacity {
            self.ring.pop_front();
        }
        self.ring.push_back(sample);
        debug_assert!(self.ring.len() <= self.capacity);
    }

    /// Owned copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.ring.iter().copied().collect()
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// `true` if no samples have been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Maximum number of samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all retained samples, keeping the capacity.
    pub fn clear(&mut self) {
        self.ring.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_at(t: f64) -> Sample {
        Sample {
            timestamp_s: t,
            speed_pct: 100.0,
            pressure_bar: 100.0,
            breaker_open: false,
            load_mw: 50.0,
        }
    }

    #[test]
    fn test_capacity_five_keeps_last_five() {
        // Capacity 5, push 1..=6 — snapshot must be [2, 3, 4, 5, 6].
        let mut buf = RollingBuffer::with_capacity(5);
        for t in 1..=6 {
            buf.push(sample_at(t as f64));
        }
        let snap = buf.snapshot();
        let times: Vec<f64> = snap.iter().map(|s| s.timestamp_s).collect();
        assert_eq!(times, vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_length_never_exceeds_capacity() {
        let mut buf = RollingBuffer::with_capacity(8);
        for t in 0..100 {
            buf.push(sample_at(t as f64));
            assert!(buf.len() <= 8);
        }
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn test_contains_most_recent_in_order() {
        let mut buf = RollingBuffer::with_capacity(3);
        for t in 0..50 {
            buf.push(sample_at(t as f64));
        }
        let times: Vec<f64> = buf.snapshot().iter().map(|s| s.timestamp_s).collect();
        assert_eq!(times, vec![47.0, 48.0, 49.0]);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut buf = RollingBuffer::with_capacity(4);
        buf.push(sample_at(1.0));
        let snap = buf.snapshot();
        buf.push(sample_at(2.0));
        buf.push(sample_at(3.0));
        // The earlier snapshot is unaffected by later pushes.
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].timestamp_s, 1.0);
    }

    #[test]
    fn test_partial_fill() {
        let mut buf = RollingBuffer::with_capacity(10);
        buf.push(sample_at(0.0));
        buf.push(sample_at(1.0));
        assert_eq!(buf.len(), 2);
        assert!(!buf.is_empty());
        assert_eq!(buf.capacity(), 10);
    }

    #[test]
    fn test_clear() {
        let mut buf = RollingBuffer::with_capacity(4);
        buf.push(sample_at(0.0));
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    #[should_panic(expected = "capacity must be non-zero")]
    fn test_zero_capacity_panics() {
        let _ = RollingBuffer::with_capacity(0);
    }
}
