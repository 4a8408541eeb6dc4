//! Polygon.io market data provider

pub mod client;
pub mod types;

pub use client::PolygonClient;
