//! Default values and functions for configuration

/// Coalescing window used by the reference driver
pub(crate) const DEFAULT_INTERVAL_MS: u64 = 500;

/// Raw notifications buffered between the OS backend and the filter loop
pub(crate) const DEFAULT_SOURCE_QUEUE_CAPACITY: usize = 4096;

/// Batches and errors waiting for the consumer. Kept at one so emission
/// suspends until the consumer catches up.
pub(crate) const DEFAULT_OUTPUT_CAPACITY: usize = 1;

pub(crate) fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

pub(crate) fn default_source_queue_capacity() -> usize {
    DEFAULT_SOURCE_QUEUE_CAPACITY
}

pub(crate) fn default_output_capacity() -> usize {
    DEFAULT_OUTPUT_CAPACITY
}
