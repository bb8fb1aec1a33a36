//! Normalization, category aggregation, weighting and signal classification.

pub mod aggregation;
pub mod categories;
pub mod decision;
pub mod engine;
pub mod scoring;
pub mod weights;

pub use aggregation::*;
pub use categories::*;
pub use decision::*;
pub use engine::*;
pub use scoring::*;
pub use weights::*;
