//! Support and resistance levels from clustered swing points
//!
//! Swing points from several overlapping lookbacks are pooled, so a swing
//! seen by more than one lookback adds a touch per lookback. Clusters are
//! ranked by recency, then touch count, then distance from the price.

use std::cmp::Ordering;

use crate::common::math::round_to_increment;
use crate::common::time::days_to_ms;
use crate::config::AnalysisConfig;
use crate::indicators::normalize::sort_series;
use crate::indicators::structure::swing::find_swing_points;
use crate::models::{LevelCluster, PriceBar, PriceLevels, SwingKind, SwingPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSide {
    Support,
    Resistance,
}

/// Swing points of every trailing lookback, pooled without de-duplication.
/// `bars` must be sorted.
pub fn pooled_swing_points(bars: &[PriceBar], window: usize, lookbacks: &[usize]) -> Vec<SwingPoint> {
    lookbacks
        .iter()
        .flat_map(|&lookback| {
            let start = bars.len().saturating_sub(lookback);
            find_swing_points(&bars[start..], window)
        })
        .collect()
}

/// Group swing prices lying within `tolerance` of a cluster's running average.
/// Each point joins the first matching cluster in creation order.
pub fn cluster_levels(points: &[SwingPoint], tolerance: f64) -> Vec<LevelCluster> {
    let mut clusters: Vec<LevelCluster> = Vec::new();
    for point in points {
        match clusters
            .iter_mut()
            .find(|c| (c.price - point.price).abs() <= tolerance)
        {
            Some(cluster) => cluster.absorb(point),
            None => clusters.push(LevelCluster::new(point)),
        }
    }
    clusters
}

/// Best level on one side of `current_price`, rounded to `config.level_rounding`.
///
/// A cluster qualifies when it lies on the requested side within
/// `level_proximity_pct` of the price and its rounded value stays strictly on
/// that side.
pub fn select_level(
    clusters: &[LevelCluster],
    current_price: f64,
    side: LevelSide,
    latest_timestamp: i64,
    config: &AnalysisConfig,
) -> Option<f64> {
    let max_distance = current_price * config.level_proximity_pct;
    let recent_cutoff = latest_timestamp - days_to_ms(config.level_recency_days);

    let mut candidates: Vec<(&LevelCluster, f64)> = clusters
        .iter()
        .filter_map(|cluster| {
            let rounded = round_to_increment(cluster.price, config.level_rounding);
            let on_side = match side {
                LevelSide::Resistance => cluster.price > current_price && rounded > current_price,
                LevelSide::Support => cluster.price < current_price && rounded < current_price,
            };
            let near = (cluster.price - current_price).abs() <= max_distance;
            (on_side && near).then_some((cluster, rounded))
        })
        .collect();

    candidates.sort_by(|(a, _), (b, _)| {
        let a_recent = a.most_recent_timestamp >= recent_cutoff;
        let b_recent = b.most_recent_timestamp >= recent_cutoff;
        b_recent
            .cmp(&a_recent)
            .then_with(|| b.touches.cmp(&a.touches))
            .then_with(|| {
                let a_dist = (a.price - current_price).abs();
                let b_dist = (b.price - current_price).abs();
                a_dist.partial_cmp(&b_dist).unwrap_or(Ordering::Equal)
            })
    });

    candidates.first().map(|(_, rounded)| *rounded)
}

/// Nearest actionable support below and resistance above `current_price`.
pub fn support_resistance(
    bars: &[PriceBar],
    current_price: f64,
    config: &AnalysisConfig,
) -> PriceLevels {
    let bars = sort_series(bars);
    if bars.len() < config.level_min_bars || !current_price.is_finite() || current_price <= 0.0 {
        return PriceLevels::default();
    }
    let Some(latest) = bars.last() else {
        return PriceLevels::default();
    };

    let pooled = pooled_swing_points(&bars, config.level_swing_window, &config.level_lookbacks);
    let (highs, lows): (Vec<SwingPoint>, Vec<SwingPoint>) =
        pooled.into_iter().partition(|p| p.kind == SwingKind::High);

    let resistance_clusters = cluster_levels(&highs, config.cluster_tolerance);
    let support_clusters = cluster_levels(&lows, config.cluster_tolerance);

    PriceLevels {
        support: select_level(
            &support_clusters,
            current_price,
            LevelSide::Support,
            latest.timestamp,
            config,
        ),
        resistance: select_level(
            &resistance_clusters,
            current_price,
            LevelSide::Resistance,
            latest.timestamp,
            config,
        ),
    }
}
