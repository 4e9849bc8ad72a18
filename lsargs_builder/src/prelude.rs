//! Traits which, typically, may be imported without concern: `use lsargs::prelude::*`.

// Needs to be imported in order to implement a custom allocator.
pub use crate::allocator::Allocator;
