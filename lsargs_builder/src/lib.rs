//! Builder module for `lsargs`.
//! See the `lsargs` crate root for full details.
#![deny(missing_docs)]
mod allocator;
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
mod tokens;
#[allow(missing_docs)]
pub mod prelude;

pub use allocator::*;
pub use api::*;
pub use model::*;
pub use parser::ParseError;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
