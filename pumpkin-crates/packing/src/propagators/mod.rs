//! Contains the propagators which are available in the crate.
mod all_different;
pub mod bin_packing;
mod binary_not_equals;

pub use all_different::*;
pub use binary_not_equals::*;
