//! Power-law model evaluation.
//!
//! Kept as small, pure functions so reporting and plotting code can share them.

pub mod model;

pub use model::*;
