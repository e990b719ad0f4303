//! Property Test: Sensor Chart Bounds
//!
//! This property test verifies that for any non-empty series:
//! - every plotted value lies inside [min_y, max_y] with at least the padding
//! - the Y interval follows the range step table
//! - X positions are the sequence indices 0..n-1

use proptest::prelude::*;
use sahool_models::test_utils::generators;
use sahool_models::{build_chart, y_interval, ChartSpec};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_bounds_enclose_values(series in generators::reading_series(1..50)) {
        let ChartSpec::Line(chart) = build_chart(&series, "temperature", "°C") else {
            return Err(TestCaseError::fail("non-empty series produced no chart"));
        };

        let min = series.iter().map(|s| s.0).fold(f64::INFINITY, f64::min);
        let max = series.iter().map(|s| s.0).fold(f64::NEG_INFINITY, f64::max);

        prop_assert_eq!(chart.bounds.min_y, (min - 5.0).floor());
        prop_assert_eq!(chart.bounds.max_y, (max + 5.0).ceil());
        prop_assert!(chart.bounds.min_y <= min - 5.0);
        prop_assert!(chart.bounds.max_y >= max + 5.0);
        prop_assert_eq!(
            chart.bounds.y_interval,
            y_interval(chart.bounds.max_y - chart.bounds.min_y)
        );
    }

    #[test]
    fn prop_x_is_sequence_index(series in generators::reading_series(1..50)) {
        let ChartSpec::Line(chart) = build_chart(&series, "humidity", "%") else {
            return Err(TestCaseError::fail("non-empty series produced no chart"));
        };

        prop_assert_eq!(chart.points.len(), series.len());
        prop_assert_eq!(chart.x_labels.len(), series.len());
        prop_assert_eq!(chart.bounds.min_x, 0.0);
        prop_assert_eq!(chart.bounds.max_x, (series.len() - 1) as f64);
        for (i, point) in chart.points.iter().enumerate() {
            prop_assert_eq!(point.x, i as f64);
            prop_assert_eq!(point.y, series[i].0);
        }
    }

    #[test]
    fn prop_ticks_span_bounds(series in generators::reading_series(1..50)) {
        let ChartSpec::Line(chart) = build_chart(&series, "ph", "") else {
            return Err(TestCaseError::fail("non-empty series produced no chart"));
        };

        prop_assert_eq!(chart.y_ticks.first().copied(), Some(chart.bounds.min_y));
        prop_assert!(chart.y_ticks.iter().all(|t| *t <= chart.bounds.max_y));
        prop_assert!(chart
            .y_ticks
            .windows(2)
            .all(|w| w[1] - w[0] == chart.bounds.y_interval));
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;

    #[test]
    fn test_interval_table_boundaries() {
        assert_eq!(y_interval(0.0), 5.0);
        assert_eq!(y_interval(21.0), 10.0);
        assert_eq!(y_interval(51.0), 20.0);
        assert_eq!(y_interval(101.0), 50.0);
        assert_eq!(y_interval(10_000.0), 50.0);
    }
}
