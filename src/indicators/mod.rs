pub mod calculator;
pub mod error;
pub mod parser;
pub mod registry;
pub mod validation;

pub mod momentum;
pub mod strength;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use calculator::IndicatorCalculator;
pub use error::IndicatorError;
pub use parser::*;
pub use registry::*;
pub use validation::*;
