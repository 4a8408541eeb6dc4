//! Market structure: swing points, support/resistance, extremes and breaks

pub mod breaks;
pub mod extremes;
pub mod support_resistance;
pub mod swing;

pub use breaks::*;
pub use extremes::*;
pub use support_resistance::*;
pub use swing::{find_swing_points, recent_swings};
