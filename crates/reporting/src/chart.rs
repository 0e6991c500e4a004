//! Bar-chart layout: impacts ranked by magnitude with scaled bar widths.

use revlens_core::types::ImpactResult;
use serde::{Deserialize, Serialize};

/// Whether a bar adds revenue or costs it. Gains render green, losses
/// red; flat factors land on the loss side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Gain,
    Loss,
}

/// One row of the impact chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    pub label: String,
    pub amount: f64,
    pub direction: Direction,
    /// Bar length in cells, scaled against the largest magnitude.
    pub width: usize,
}

/// Lay out the chart: bars ranked by descending absolute impact, widths
/// scaled so the largest magnitude fills `max_width` cells. An all-zero
/// result yields five zero-width bars.
pub fn build_chart(result: &ImpactResult, max_width: usize) -> Vec<ChartBar> {
    let ranked = result.ranked();
    let scale = ranked.first().map(|i| i.amount.abs()).unwrap_or(0.0);

    ranked
        .into_iter()
        .map(|impact| {
            let width = if scale > 0.0 {
                (impact.amount.abs() / scale * max_width as f64).round() as usize
            } else {
                0
            };
            ChartBar {
                label: impact.factor.label().to_string(),
                amount: impact.amount,
                direction: if impact.amount > 0.0 {
                    Direction::Gain
                } else {
                    Direction::Loss
                },
                width,
            }
        })
        .collect()
}
