//! Fixed-Size Sample Window with Running Sum
//!
//! ## Overview
//!
//! Ring buffer of `f32` samples sized at compile time through const generics.
//! It backs the moving average filter: while filling it grows, once full every
//! push evicts the oldest sample. The running sum is maintained on every push
//! so the mean is O(1) regardless of window length.
//!
//! ### Memory Layout
//!
//! ```text
//! SampleWindow<5> after 7 pushes (s0..s6):
//! ┌────┬────┬────┬────┬────┐
//! │ s5 │ s6 │ s2 │ s3 │ s4 │  ← Array indices 0..5
//! └────┴────┴────┴────┴────┘
//!             ↑
//!             └── write_pos = 2 (oldest sample, next to be evicted)
//!
//! sum = s2 + s3 + s4 + s5 + s6
//! ```
//!
//! A 360 sample window is 1440 bytes of samples plus three words of state.
//!
//! ## Usage Example
//!
//! ```rust
//! use sm300d2_core::window::SampleWindow;
//!
//! let mut window: SampleWindow<3> = SampleWindow::new();
//! window.push(1.0);
//! window.push(2.0);
//! window.push(3.0);
//!
//! // Full: the fourth push evicts 1.0
//! assert_eq!(window.push(4.0), Some(1.0));
//! assert_eq!(window.mean(), Some(3.0));
//! ```

/// Fixed-size FIFO of samples with a running sum
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - `sum` equals the sum of the `len` stored samples, up to float rounding
/// - when full, `data[write_pos]` is the oldest sample
#[derive(Debug, Clone)]
pub struct SampleWindow<const N: usize> {
    /// Sample storage; slots at or beyond `len` are unused until full
    data: [f32; N],

    /// Index of the next write, wraps to 0 at N
    write_pos: usize,

    /// Number of stored samples, saturates at N
    len: usize,

    /// Sum of stored samples
    sum: f32,
}

impl<const N: usize> SampleWindow<N> {
    const CAPACITY_OK: () = assert!(N >= 1, "sample window needs room for one sample");

    /// Creates an empty window
    ///
    /// A zero capacity window is rejected at compile time:
    ///
    /// ```compile_fail
    /// use sm300d2_core::window::SampleWindow;
    ///
    /// let mut window: SampleWindow<0> = SampleWindow::new();
    /// window.push(1.0);
    /// ```
    pub const fn new() -> Self {
        let () = Self::CAPACITY_OK;

        Self {
            data: [0.0; N],
            write_pos: 0,
            len: 0,
            sum: 0.0,
        }
    }

    /// Appends a sample, evicting and returning the oldest one when full
    pub fn push(&mut self, sample: f32) -> Option<f32> {
        let evicted = if self.len == N {
            let oldest = self.data[self.write_pos];
            self.sum -= oldest;
            Some(oldest)
        } else {
            self.len += 1;
            None
        };

        self.data[self.write_pos] = sample;
        self.sum += sample;
        self.write_pos = (self.write_pos + 1) % N;

        evicted
    }

    /// Number of stored samples
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if window is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if window is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of samples held
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Running sum of stored samples
    pub fn sum(&self) -> f32 {
        self.sum
    }

    /// Mean over the stored samples, `None` when empty
    ///
    /// Divides by the fill count, not by N, so a warming-up window reports
    /// the true mean of what it has seen.
    pub fn mean(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum / self.len as f32)
        }
    }

    /// Most recently pushed sample
    pub fn last(&self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        Some(self.data[idx])
    }

    /// Iterate over samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        // Before the first wrap the oldest sample sits at 0
        let start = if self.is_full() { self.write_pos } else { 0 };
        (0..self.len).map(move |i| self.data[(start + i) % N])
    }

    /// Drop every sample
    pub fn clear(&mut self) {
        self.write_pos = 0;
        self.len = 0;
        self.sum = 0.0;
    }
}

impl<const N: usize> Default for SampleWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window() {
        let window: SampleWindow<5> = SampleWindow::new();
        assert!(window.is_empty());
        assert_eq!(window.len(), 0);
        assert!(window.mean().is_none());
        assert!(window.last().is_none());
    }

    #[test]
    fn grows_until_full() {
        let mut window = SampleWindow::<4>::new();
        for i in 0..4 {
            assert_eq!(window.push(i as f32), None);
        }
        assert!(window.is_full());
        assert_eq!(window.sum(), 6.0);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut window = SampleWindow::<3>::new();
        for i in 0..5 {
            window.push(i as f32);
        }

        assert_eq!(window.len(), 3);
        let samples: Vec<f32> = window.iter().collect();
        assert_eq!(samples, vec![2.0, 3.0, 4.0]);
        assert_eq!(window.sum(), 9.0);
        assert_eq!(window.last(), Some(4.0));
    }

    #[test]
    fn clear_resets_sum() {
        let mut window = SampleWindow::<3>::new();
        window.push(7.0);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.sum(), 0.0);
        window.push(2.0);
        assert_eq!(window.mean(), Some(2.0));
    }

    #[test]
    fn single_slot_window() {
        let mut window = SampleWindow::<1>::new();
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.push(3.0), None);
        assert_eq!(window.push(5.0), Some(3.0));
        assert_eq!(window.mean(), Some(5.0));
        assert_eq!(window.last(), Some(5.0));
    }
}
