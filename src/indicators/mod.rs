pub mod derive;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod returns;
pub mod validation;

pub mod momentum;
pub mod structure;
pub mod trend;

pub use error::IndicatorError;
pub use normalize::*;
pub use parser::*;
pub use returns::*;
pub use validation::*;
