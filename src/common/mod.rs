//! Small numeric and calendar helpers shared by the indicator modules.

pub mod math;
pub mod time;
