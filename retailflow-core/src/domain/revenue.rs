// retailflow-core/src/domain/revenue.rs
//
// Per-customer revenue rollup. The rollup itself runs inside the store
// (see the DuckDB adapter); this module holds its row type and statistics.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRevenue {
    pub customer_id: i64,
    pub total_amount: f64,
    pub transaction_count: i64,
}

/// avg / min / max / sum over `customer_revenue.total_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RevenueMetrics {
    pub avg_customer_revenue: f64,
    pub max_customer_revenue: f64,
    pub min_customer_revenue: f64,
    pub total_revenue: f64,
}

impl RevenueMetrics {
    /// Builds rounded metrics from raw aggregates. `None` (empty relation) reads as zero.
    pub fn from_aggregates(
        avg: Option<f64>,
        max: Option<f64>,
        min: Option<f64>,
        sum: Option<f64>,
    ) -> Self {
        Self {
            avg_customer_revenue: round2(avg.unwrap_or(0.0)),
            max_customer_revenue: round2(max.unwrap_or(0.0)),
            min_customer_revenue: round2(min.unwrap_or(0.0)),
            total_revenue: round2(sum.unwrap_or(0.0)),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_relation_yields_zeros() {
        let metrics = RevenueMetrics::from_aggregates(None, None, None, None);
        assert_eq!(metrics, RevenueMetrics::default());
    }

    #[test]
    fn test_metrics_are_rounded_to_cents() {
        let metrics = RevenueMetrics::from_aggregates(
            Some(33.333_333),
            Some(50.0),
            Some(10.004),
            Some(100.0),
        );
        assert_eq!(metrics.avg_customer_revenue, 33.33);
        assert_eq!(metrics.min_customer_revenue, 10.0);
        assert_eq!(metrics.total_revenue, 100.0);
    }
}
