//! Fixed-length sample windows for plants with recurrent observations.
use std::collections::VecDeque;

/// A fixed-capacity window over past samples, most recent first.
///
/// Pushing shifts the window: the new sample becomes index 0 and the oldest
/// one is dropped. Two fill policies cover the plants that use windows:
/// [`History::zeros`] starts an episode from an all-zero window, while
/// [`History::deferred`] leaves the window empty until the first sample
/// arrives and then seeds every slot with it.
#[derive(Clone, Debug)]
pub struct History {
    window: VecDeque<f64>,
    capacity: usize,
}

impl History {
    /// A window of `capacity` slots filled with zeros.
    pub fn zeros(capacity: usize) -> Self {
        Self {
            window: std::iter::repeat(0.0).take(capacity).collect(),
            capacity,
        }
    }

    /// An empty window that seeds itself from the first pushed sample.
    pub fn deferred(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Shifts `sample` into the window, dropping the oldest entry.
    ///
    /// A deferred window that is still empty fills every slot with `sample`
    /// instead.
    pub fn push(&mut self, sample: f64) {
        if self.window.is_empty() {
            while self.window.len() < self.capacity {
                self.window.push_front(sample);
            }
            return;
        }
        self.window.push_front(sample);
        self.window.pop_back();
    }

    /// The sample `ix` pushes in the past; 0 is the most recent.
    ///
    /// Panics when `ix` is out of range or a deferred window has not seen a
    /// sample yet.
    pub fn get(&self, ix: usize) -> f64 {
        self.window[ix]
    }

    /// Number of slots in the window.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::History;

    #[test]
    fn zero_filled_window_shifts_oldest_out() {
        let mut h = History::zeros(3);
        assert_eq!(h.get(0), 0.0);
        assert_eq!(h.get(2), 0.0);

        h.push(1.0);
        assert_eq!(h.get(0), 1.0);
        assert_eq!(h.get(1), 0.0);

        h.push(2.0);
        h.push(3.0);
        h.push(4.0);
        assert_eq!(h.get(0), 4.0);
        assert_eq!(h.get(1), 3.0);
        assert_eq!(h.get(2), 2.0);
    }

    #[test]
    fn deferred_window_seeds_from_first_sample() {
        let mut h = History::deferred(3);
        h.push(7.0);
        assert_eq!(h.get(0), 7.0);
        assert_eq!(h.get(1), 7.0);
        assert_eq!(h.get(2), 7.0);

        h.push(8.0);
        assert_eq!(h.get(0), 8.0);
        assert_eq!(h.get(1), 7.0);
        assert_eq!(h.get(2), 7.0);
    }

    #[test]
    fn capacity_is_fixed() {
        let mut h = History::zeros(5);
        for ix in 0..100 {
            h.push(ix as f64);
        }
        assert_eq!(h.capacity(), 5);
        assert_eq!(h.get(0), 99.0);
        assert_eq!(h.get(4), 95.0);
    }
}
