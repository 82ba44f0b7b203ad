//! Specialized data structures for graph algorithms.
//!
//! # Available Structures
//!
//! - [`MinQueue`]: Binary-heap min-priority queue keyed by `f64` priorities

mod min_queue;

pub use min_queue::MinQueue;
