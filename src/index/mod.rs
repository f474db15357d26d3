//! Ride index structures
//!
//! Both indexes are derived state over the registry's attribute table and
//! are never the source of truth.
//!
//! # Structures
//!
//! - `OrderedIndex`: red-black tree keyed by ride id (lookup, range scan)
//! - `PriorityIndex`: addressable min-heap keyed by (cost, duration)
//!
//! # Invariants
//!
//! - Tree: root black, no red-red edge, uniform black-height, ascending keys
//! - Heap: parent priority <= child priority, position map matches slots
//!
//! Invariants hold by construction. `verify()` exists for diagnostics only.

mod errors;
mod heap;
mod rbtree;

pub use errors::{IndexError, IndexErrorCode, IndexResult, Severity};
pub use heap::PriorityIndex;
pub use rbtree::OrderedIndex;
