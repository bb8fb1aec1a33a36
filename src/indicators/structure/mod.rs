//! Market structure: pivot point levels

pub mod pivots;

pub use pivots::*;
