use crate::buffer::{Series, SlidingWindowBuffer, DEFAULT_CAPACITY};
use indexmap::{map::Entry, IndexMap};

/// Timestamps are kept exactly as the device sent them.
pub type Timestamp = String;

/// Every device that has sent usable telemetry, in first-seen order.
///
/// Devices are never forgotten: the registry only grows, and each buffer
/// lives exactly as long as its entry.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    devices:  IndexMap<String, SlidingWindowBuffer<Timestamp>>,
    /// Capacity given to buffers created by this registry.
    capacity: usize,
}

impl DeviceRegistry {
    /// A zero capacity is clamped to one sample, like the buffers themselves.
    pub fn new(capacity: usize) -> Self {
        Self {
            devices:  IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Look up the buffer for `device_id`, creating an empty one on first
    /// sighting. The flag is `true` when the entry was created by this call.
    pub fn resolve_or_create(
        &mut self,
        device_id: &str,
    ) -> (&mut SlidingWindowBuffer<Timestamp>, bool) {
        match self.devices.entry(device_id.to_owned()) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(SlidingWindowBuffer::new(self.capacity)), true),
        }
    }

    pub fn get(&self, device_id: &str) -> Option<&SlidingWindowBuffer<Timestamp>> {
        self.devices.get(device_id)
    }

    /// Snapshot of one device's series, if the device is known.
    pub fn series(&self, device_id: &str) -> Option<Series<Timestamp>> {
        self.get(device_id).map(SlidingWindowBuffer::snapshot)
    }

    /// Number of distinct devices seen.
    pub fn count(&self) -> usize {
        self.devices.len()
    }

    /// Device ids in first-seen order.
    pub fn list(&self) -> Vec<String> {
        self.devices.keys().cloned().collect()
    }

    pub fn contains(&self, device_id: &str) -> bool {
        self.devices.contains_key(device_id)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
