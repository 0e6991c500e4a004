//! KPI snapshots and decomposition result types shared across Revenue Lens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{RevlensError, RevlensResult};

/// KPI readings for a single timeframe. Fields are plain real numbers;
/// no range constraint is enforced here (see [`SnapshotPair::validate`]
/// for the API-boundary finiteness check).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiSnapshot {
    /// Count of ad impressions shown.
    pub impressions: f64,
    /// Ad revenue per 1000 impressions, in currency units.
    pub cpm: f64,
    /// Average price per in-app-purchase unit.
    pub iap_price: f64,
    /// In-app-purchase units sold. May be fractional or negative to
    /// represent net adjustments.
    pub iap_sales: f64,
    /// Net refund amount in currency units, typically non-positive.
    /// Already a currency total, not a per-unit value.
    pub iap_refund: f64,
}

impl KpiSnapshot {
    /// Field name/value pairs in declaration order. Drives boundary
    /// validation and the dashboard form layout.
    pub fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("impressions", self.impressions),
            ("cpm", self.cpm),
            ("iap_price", self.iap_price),
            ("iap_sales", self.iap_sales),
            ("iap_refund", self.iap_refund),
        ]
    }
}

/// Old/new snapshot pair, the wire shape of a decomposition request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SnapshotPair {
    pub old: KpiSnapshot,
    pub new: KpiSnapshot,
}

impl SnapshotPair {
    /// Seed pair used by the dashboard form, the demo endpoint, and the
    /// CLI when no input file is given.
    pub fn demo() -> Self {
        Self {
            old: KpiSnapshot {
                impressions: 200_000.0,
                cpm: 7.0,
                iap_price: 4.0,
                iap_sales: 150.0,
                iap_refund: -25.0,
            },
            new: KpiSnapshot {
                impressions: 150_000.0,
                cpm: 1.0,
                iap_price: 3.0,
                iap_sales: 200.0,
                iap_refund: -60.0,
            },
        }
    }

    /// Boundary check: every field must be a finite number. The engine
    /// accepts any real input, so callers taking untrusted data run this
    /// before handing the pair over.
    pub fn validate(&self) -> RevlensResult<()> {
        for (timeframe, snapshot) in [("old", &self.old), ("new", &self.new)] {
            for (field, value) in snapshot.fields() {
                if !value.is_finite() {
                    return Err(RevlensError::Validation(format!(
                        "{timeframe}.{field} must be a finite number, got {value}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The five revenue factors, in the fixed order the detailed breakdown
/// reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Impressions,
    Cpm,
    IapPrice,
    IapSales,
    IapRefund,
}

impl Factor {
    /// Declaration order. Breakdown renderers iterate this; the chart
    /// re-sorts by magnitude on its own.
    pub const ALL: [Factor; 5] = [
        Factor::Impressions,
        Factor::Cpm,
        Factor::IapPrice,
        Factor::IapSales,
        Factor::IapRefund,
    ];

    /// Fixed display label.
    pub fn label(&self) -> &'static str {
        match self {
            Factor::Impressions => "Impressions",
            Factor::Cpm => "CPM",
            Factor::IapPrice => "IAP Price",
            Factor::IapSales => "IAP Sales",
            Factor::IapRefund => "IAP Refund",
        }
    }
}

/// Signed currency contribution of a single factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FactorImpact {
    pub factor: Factor,
    pub amount: f64,
}

/// Output of one decomposition run. Transient value object, recomputed
/// fresh on every call; nothing is cached between invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImpactResult {
    pub revenue_old: f64,
    pub revenue_new: f64,
    /// `revenue_new - revenue_old`.
    pub difference_observed: f64,
    /// Per-factor contributions in [`Factor::ALL`] order.
    pub impacts: Vec<FactorImpact>,
    /// Sum of the five impact amounts.
    pub difference_explained: f64,
    /// Observed/explained ratio as a percentage; 0 when nothing is
    /// explained, to avoid dividing by zero.
    pub model_quality: f64,
}

impl ImpactResult {
    /// Contribution of a single factor, 0 if absent.
    pub fn impact(&self, factor: Factor) -> f64 {
        self.impacts
            .iter()
            .find(|i| i.factor == factor)
            .map(|i| i.amount)
            .unwrap_or(0.0)
    }

    /// Impacts ranked by descending absolute value. The sort is stable,
    /// so equal magnitudes keep declaration order.
    pub fn ranked(&self) -> Vec<FactorImpact> {
        let mut ranked = self.impacts.clone();
        ranked.sort_by(|a, b| b.amount.abs().total_cmp(&a.amount.abs()));
        ranked
    }
}
