use std::collections::VecDeque;

/// Number of samples kept per device unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 100;

/// Rolling, index-aligned history of one device's telemetry.
///
/// Three parallel series are kept: timestamps, primary metric and secondary
/// metric. Index `i` in each series describes the same sample, and a metric
/// that was not reported is stored as `None` so the series never drift apart.
///
/// `append` is the only mutator and takes `&mut self`, so readers holding a
/// [`Series`] snapshot can never observe a half-applied append.
#[derive(Debug, Clone)]
pub struct SlidingWindowBuffer<T> {
    timestamps: VecDeque<T>,
    primary:    VecDeque<Option<f64>>,
    secondary:  VecDeque<Option<f64>>,
    capacity:   usize,
}

/// One aligned sample, borrowed from a buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample<'a, T> {
    pub timestamp: &'a T,
    pub primary:   Option<f64>,
    pub secondary: Option<f64>,
}

/// Point-in-time copy of a buffer's three series, oldest sample first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Series<T> {
    pub timestamps: Vec<T>,
    pub primary:    Vec<Option<f64>>,
    pub secondary:  Vec<Option<f64>>,
}

impl<T> Series<T> {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

impl<T: Clone> SlidingWindowBuffer<T> {
    /// Create an empty buffer. A zero capacity is clamped to one sample.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            timestamps: VecDeque::with_capacity(capacity),
            primary:    VecDeque::with_capacity(capacity),
            secondary:  VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest one if the window is full.
    pub fn append(&mut self, timestamp: T, primary: Option<f64>, secondary: Option<f64>) {
        self.timestamps.push_back(timestamp);
        self.primary.push_back(primary);
        self.secondary.push_back(secondary);

        if self.timestamps.len() > self.capacity {
            self.timestamps.pop_front();
            self.primary.pop_front();
            self.secondary.pop_front();
        }

        debug_assert_eq!(self.timestamps.len(), self.primary.len());
        debug_assert_eq!(self.timestamps.len(), self.secondary.len());
    }

    /// Copy the current contents out, oldest first.
    pub fn snapshot(&self) -> Series<T> {
        Series {
            timestamps: self.timestamps.iter().cloned().collect(),
            primary:    self.primary.iter().copied().collect(),
            secondary:  self.secondary.iter().copied().collect(),
        }
    }

    /// Most recently appended sample.
    pub fn latest(&self) -> Option<Sample<'_, T>> {
        Some(Sample {
            timestamp: self.timestamps.back()?,
            primary:   *self.primary.back()?,
            secondary: *self.secondary.back()?,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> Default for SlidingWindowBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(i: usize) -> String {
        format!("t{i}")
    }

    #[test]
    fn new_buffer_is_empty() {
        let buffer: SlidingWindowBuffer<String> = SlidingWindowBuffer::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
        assert!(buffer.latest().is_none());
        assert!(buffer.snapshot().is_empty());
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut buffer = SlidingWindowBuffer::new(0);
        buffer.append(ts(1), Some(1.0), None);
        buffer.append(ts(2), Some(2.0), None);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot().timestamps, vec![ts(2)]);
    }

    #[test]
    fn series_stay_aligned_and_bounded() {
        let mut buffer = SlidingWindowBuffer::new(5);
        for i in 0..23 {
            let secondary = (i % 3 == 0).then_some(i as f64);
            buffer.append(ts(i), Some(i as f64), secondary);

            let series = buffer.snapshot();
            assert_eq!(series.timestamps.len(), series.primary.len());
            assert_eq!(series.timestamps.len(), series.secondary.len());
            assert!(series.len() <= 5);
            assert_eq!(series.len(), (i + 1).min(5));
        }
    }

    #[test]
    fn evicts_oldest_in_arrival_order() {
        let capacity = 4;
        let k = 3;
        let mut buffer = SlidingWindowBuffer::new(capacity);
        for i in 0..capacity + k {
            buffer.append(ts(i), Some(i as f64), Some(-(i as f64)));
        }

        let series = buffer.snapshot();
        let expected: Vec<usize> = (k..capacity + k).collect();
        assert_eq!(series.timestamps, expected.iter().map(|&i| ts(i)).collect::<Vec<_>>());
        assert_eq!(series.primary, expected.iter().map(|&i| Some(i as f64)).collect::<Vec<_>>());
        assert_eq!(
            series.secondary,
            expected.iter().map(|&i| Some(-(i as f64))).collect::<Vec<_>>()
        );
    }

    #[test]
    fn keeps_arrival_order_not_timestamp_order() {
        let mut buffer = SlidingWindowBuffer::new(3);
        buffer.append(ts(9), Some(9.0), None);
        buffer.append(ts(1), Some(1.0), None);
        buffer.append(ts(5), Some(5.0), None);
        assert_eq!(buffer.snapshot().timestamps, vec![ts(9), ts(1), ts(5)]);
    }

    #[test]
    fn missing_metric_is_stored_as_no_value() {
        let mut buffer = SlidingWindowBuffer::new(3);
        buffer.append(ts(1), Some(10.0), None);
        buffer.append(ts(2), None, Some(0.0));

        let series = buffer.snapshot();
        assert_eq!(series.primary, vec![Some(10.0), None]);
        assert_eq!(series.secondary, vec![None, Some(0.0)]);
    }

    #[test]
    fn snapshot_is_detached_from_later_appends() {
        let mut buffer = SlidingWindowBuffer::new(2);
        buffer.append(ts(1), Some(1.0), None);
        let before = buffer.snapshot();
        buffer.append(ts(2), Some(2.0), None);
        buffer.append(ts(3), Some(3.0), None);

        assert_eq!(before.timestamps, vec![ts(1)]);
        assert_eq!(buffer.snapshot().timestamps, vec![ts(2), ts(3)]);
    }

    #[test]
    fn latest_returns_last_sample() {
        let mut buffer = SlidingWindowBuffer::new(2);
        buffer.append(ts(1), Some(1.0), None);
        buffer.append(ts(2), None, Some(7.5));

        let latest = buffer.latest().unwrap();
        assert_eq!(latest.timestamp, &ts(2));
        assert_eq!(latest.primary, None);
        assert_eq!(latest.secondary, Some(7.5));
    }
}
