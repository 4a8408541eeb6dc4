//! HTTP surface for the analysis service

pub mod http;

pub use http::*;
