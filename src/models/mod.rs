//! Shared data models spanning the analysis layers.

pub mod analysis;
pub mod series;

pub use analysis::{
    AnalysisInput, LevelCluster, PeriodReturn, PriceLevels, RecentSwings, SwingKind, SwingPoint,
    TechnicalAnalysis, TurningPoints,
};
pub use series::{IndicatorKind, IndicatorPoint, MacdPoint, PriceBar, Timestamped};
