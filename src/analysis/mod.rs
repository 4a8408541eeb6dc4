//! Turning-point analysis over one ticker's series.

pub mod engine;

pub use engine::*;
