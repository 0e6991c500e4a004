//! Average-value decomposition of a revenue change into per-KPI impacts.
//!
//! Revenue is a sum of two bilinear terms (ad revenue and net IAP revenue)
//! plus a linear refund term. Each bilinear factor's impact holds the
//! co-varying factor at the average of its old and new values, so the five
//! impacts sum to the observed change without residual.

use revlens_core::types::{Factor, FactorImpact, ImpactResult, KpiSnapshot};

/// Total revenue for one timeframe:
/// ad revenue (impressions × CPM, per-1000 basis) plus net IAP revenue
/// (unit price × units sold, plus the refund total).
pub fn revenue(snapshot: &KpiSnapshot) -> f64 {
    snapshot.impressions * snapshot.cpm / 1000.0
        + (snapshot.iap_price * snapshot.iap_sales + snapshot.iap_refund)
}

fn avg(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Decompose the revenue change between `old` and `new` into signed
/// per-factor contributions.
///
/// Pure and deterministic: no validation, no side effects, constant time.
/// The one guarded edge is a zero explained difference, which yields a
/// model quality of 0 instead of a division fault.
pub fn compute(old: &KpiSnapshot, new: &KpiSnapshot) -> ImpactResult {
    let revenue_old = revenue(old);
    let revenue_new = revenue(new);
    let difference_observed = revenue_new - revenue_old;

    let impact_impressions =
        avg(old.cpm, new.cpm) / 1000.0 * (new.impressions - old.impressions);
    let impact_cpm = avg(old.impressions, new.impressions) / 1000.0 * (new.cpm - old.cpm);
    let impact_iap_price = avg(old.iap_sales, new.iap_sales) * (new.iap_price - old.iap_price);
    let impact_iap_sales = avg(old.iap_price, new.iap_price) * (new.iap_sales - old.iap_sales);
    let impact_iap_refund = new.iap_refund - old.iap_refund;

    let impacts = vec![
        FactorImpact {
            factor: Factor::Impressions,
            amount: impact_impressions,
        },
        FactorImpact {
            factor: Factor::Cpm,
            amount: impact_cpm,
        },
        FactorImpact {
            factor: Factor::IapPrice,
            amount: impact_iap_price,
        },
        FactorImpact {
            factor: Factor::IapSales,
            amount: impact_iap_sales,
        },
        FactorImpact {
            factor: Factor::IapRefund,
            amount: impact_iap_refund,
        },
    ];

    let difference_explained: f64 = impacts.iter().map(|i| i.amount).sum();
    let model_quality = if difference_explained != 0.0 {
        difference_observed / difference_explained * 100.0
    } else {
        0.0
    };

    ImpactResult {
        revenue_old,
        revenue_new,
        difference_observed,
        impacts,
        difference_explained,
        model_quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revlens_core::types::SnapshotPair;

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    fn snapshot(
        impressions: f64,
        cpm: f64,
        iap_price: f64,
        iap_sales: f64,
        iap_refund: f64,
    ) -> KpiSnapshot {
        KpiSnapshot {
            impressions,
            cpm,
            iap_price,
            iap_sales,
            iap_refund,
        }
    }

    #[test]
    fn test_demo_scenario() {
        let pair = SnapshotPair::demo();
        let result = compute(&pair.old, &pair.new);

        assert_eq!(result.revenue_old, 1975.0);
        assert_eq!(result.revenue_new, 690.0);
        assert_eq!(result.difference_observed, -1285.0);
        assert_eq!(result.impact(Factor::Impressions), -200.0);
        assert_eq!(result.impact(Factor::Cpm), -1050.0);
        assert_eq!(result.impact(Factor::IapPrice), -175.0);
        assert_eq!(result.impact(Factor::IapSales), 175.0);
        assert_eq!(result.impact(Factor::IapRefund), -35.0);
        assert_eq!(result.difference_explained, -1285.0);
        assert_eq!(result.model_quality, 100.0);
    }

    #[test]
    fn test_explained_equals_sum_of_impacts() {
        let old = snapshot(52_341.0, 3.17, 2.49, 812.5, -114.2);
        let new = snapshot(61_020.0, 2.84, 2.99, 640.0, -98.6);
        let result = compute(&old, &new);

        let sum: f64 = result.impacts.iter().map(|i| i.amount).sum();
        assert_close(result.difference_explained, sum);
    }

    #[test]
    fn test_decomposition_has_no_residual() {
        // Negative, fractional, and zero-crossing inputs all close exactly.
        let cases = [
            (
                snapshot(1000.0, 5.0, 2.0, 10.0, 0.0),
                snapshot(2000.0, 4.0, 2.5, 8.0, -3.0),
            ),
            (
                snapshot(0.0, 0.0, 9.99, -4.0, -1.5),
                snapshot(350.5, 12.25, 0.0, 4.0, 2.5),
            ),
            (
                snapshot(-100.0, 3.0, -2.0, 5.0, 10.0),
                snapshot(100.0, -3.0, 2.0, -5.0, -10.0),
            ),
        ];

        for (old, new) in cases {
            let result = compute(&old, &new);
            assert_close(result.difference_explained, result.difference_observed);
            assert_close(result.model_quality, 100.0);
        }
    }

    #[test]
    fn test_identical_snapshots_hit_zero_guard() {
        let snap = snapshot(200_000.0, 7.0, 4.0, 150.0, -25.0);
        let result = compute(&snap, &snap);

        for impact in &result.impacts {
            assert_eq!(impact.amount, 0.0);
        }
        assert_eq!(result.difference_observed, 0.0);
        assert_eq!(result.difference_explained, 0.0);
        assert_eq!(result.model_quality, 0.0);
    }

    #[test]
    fn test_all_zero_snapshots() {
        let zero = snapshot(0.0, 0.0, 0.0, 0.0, 0.0);
        let result = compute(&zero, &zero);

        assert_eq!(result.revenue_old, 0.0);
        assert_eq!(result.revenue_new, 0.0);
        for impact in &result.impacts {
            assert_eq!(impact.amount, 0.0);
        }
        assert_eq!(result.model_quality, 0.0);
    }

    #[test]
    fn test_refund_impact_is_plain_difference() {
        let mut old = snapshot(500.0, 2.0, 1.0, 40.0, -12.5);
        let mut new = old;
        new.iap_refund = -80.25;
        let result = compute(&old, &new);
        assert_eq!(result.impact(Factor::IapRefund), -80.25 - (-12.5));

        // Refund credit takes no averaging factor even when everything moves.
        old = snapshot(10.0, 20.0, 30.0, 40.0, 7.0);
        new = snapshot(11.0, 19.0, 31.0, 39.0, -7.0);
        let result = compute(&old, &new);
        assert_eq!(result.impact(Factor::IapRefund), -14.0);
    }

    #[test]
    fn test_impacts_keep_declaration_order() {
        let pair = SnapshotPair::demo();
        let result = compute(&pair.old, &pair.new);
        let order: Vec<Factor> = result.impacts.iter().map(|i| i.factor).collect();
        assert_eq!(order, Factor::ALL.to_vec());
    }

    #[test]
    fn test_ranked_by_descending_magnitude() {
        let pair = SnapshotPair::demo();
        let result = compute(&pair.old, &pair.new);
        let ranked = result.ranked();

        let magnitudes: Vec<f64> = ranked.iter().map(|i| i.amount.abs()).collect();
        for window in magnitudes.windows(2) {
            assert!(window[0] >= window[1]);
        }
        assert_eq!(ranked[0].factor, Factor::Cpm);
        assert_eq!(ranked[1].factor, Factor::Impressions);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let pair = SnapshotPair::demo();
        let first = compute(&pair.old, &pair.new);
        let second = compute(&pair.old, &pair.new);
        assert_eq!(first, second);
    }
}
