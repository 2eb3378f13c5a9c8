//! Parsers for the `/proc` files consulted while probing partitions.

pub mod mountinfo;
pub mod partitions;
pub mod swaps;
