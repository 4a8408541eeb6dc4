//! Upstream market data: provider trait, Polygon client, fetch pipeline.

pub mod error;
pub mod market_data;
pub mod polygon;

pub use error::{DataError, DataResult};
pub use market_data::*;
pub use polygon::PolygonClient;
