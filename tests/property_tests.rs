//! Property-based tests for windowing and reconciliation.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated series and hierarchies.

use hierarchy_forecast::core::numeric_values;
use hierarchy_forecast::hierarchy::{bottom_up, prop_averages, Hierarchy};
use hierarchy_forecast::transform::{
    create_dataset, restructure, variable_order, DatasetConfig, FeatureGroup,
};
use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

/// Strategy for generating series values.
fn values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0_f64, min_len..max_len)
}

/// Strategy for generating a store-level reference table with non-negative sales.
///
/// Returns `(states, stores, periods)` where `periods[t][row]` is a sale.
fn reference_strategy() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<Vec<f64>>)> {
    (2usize..12, 1usize..8).prop_flat_map(|(rows, periods)| {
        (
            prop::collection::vec(0usize..3, rows),
            prop::collection::vec(prop::collection::vec(0.0..500.0_f64, rows), periods),
        )
            .prop_map(move |(state_codes, values)| {
                let states = state_codes.iter().map(|c| format!("S{c}")).collect();
                let stores = (0..rows).map(|r| format!("store_{r}")).collect();
                (states, stores, values)
            })
    })
}

fn reference_frame(states: &[String], stores: &[String], periods: &[Vec<f64>]) -> DataFrame {
    let mut columns = vec![
        Column::new("state_id".into(), states),
        Column::new("store_id".into(), stores),
    ];
    for (t, values) in periods.iter().enumerate() {
        columns.push(Column::new(format!("d_{}", t + 1).into(), values));
    }
    DataFrame::new(columns).unwrap()
}

// =============================================================================
// Property: window count and widths
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn window_count_matches_formula(
        values in values_strategy(0, 60),
        lookback in 1usize..10,
        step in 1usize..10,
        delay in 0usize..5
    ) {
        let (x, y) = restructure(&values, lookback, step, delay);
        let expected = (values.len() as i64 - (lookback + step + delay) as i64 + 1).max(0) as usize;

        prop_assert_eq!(x.nrows(), expected);
        prop_assert_eq!(y.nrows(), expected);
        prop_assert_eq!(x.ncols(), lookback);
        prop_assert_eq!(y.ncols(), step);
    }

    #[test]
    fn target_starts_delay_after_predictor(
        values in values_strategy(20, 60),
        lookback in 1usize..6,
        step in 1usize..6,
        delay in 0usize..4
    ) {
        let (x, y) = restructure(&values, lookback, step, delay);

        for i in 0..x.nrows() {
            for j in 0..lookback {
                prop_assert_eq!(x[[i, j]], values[i + j]);
            }
            for j in 0..step {
                prop_assert_eq!(y[[i, j]], values[i + lookback + delay + j]);
            }
        }
    }
}

// =============================================================================
// Property: column order does not depend on caller order
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn exogenous_order_is_deterministic(
        num in Just(vec!["price", "promo", "discount"]).prop_shuffle(),
        cat in Just(vec!["month", "weekday", "snap"]).prop_shuffle(),
        values in values_strategy(20, 40)
    ) {
        let n = values.len();
        let names = ["price", "promo", "discount", "month", "weekday", "snap"];
        let mut columns = vec![Column::new("sales".into(), &values)];
        for (k, name) in names.iter().enumerate() {
            let exo: Vec<f64> = (0..n).map(|i| (k * 100 + i) as f64).collect();
            columns.push(Column::new((*name).into(), exo));
        }
        let frame = DataFrame::new(columns).unwrap();

        let config = DatasetConfig::default()
            .with_windows(3, 2)
            .with_group(FeatureGroup::LookbackExoCat, true)
            .with_group(FeatureGroup::LookaheadExoNum, true);

        let shuffled = create_dataset(&frame, "sales", &num, &cat, &config).unwrap();
        let sorted = create_dataset(
            &frame,
            "sales",
            &["discount", "price", "promo"],
            &["month", "snap", "weekday"],
            &config,
        )
        .unwrap();

        prop_assert_eq!(
            variable_order("sales", &num, &cat),
            vec!["sales", "discount", "price", "promo", "month", "snap", "weekday"]
        );
        prop_assert_eq!(shuffled, sorted);
    }
}

// =============================================================================
// Property: reconciliation invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn bottom_up_is_idempotent((states, stores, periods) in reference_strategy()) {
        let hierarchy = Hierarchy::m5();
        let frame = reference_frame(&states, &stores, &periods);

        let once = bottom_up(&hierarchy, "Level2", &frame).unwrap();
        let twice = bottom_up(&hierarchy, "Level2", &once).unwrap();
        prop_assert!(once.equals(&twice));

        let total = bottom_up(&hierarchy, "Level1", &frame).unwrap();
        prop_assert!(bottom_up(&hierarchy, "Level1", &total).unwrap().equals(&total));
    }

    #[test]
    fn bottom_up_preserves_totals((states, stores, periods) in reference_strategy()) {
        let hierarchy = Hierarchy::m5();
        let frame = reference_frame(&states, &stores, &periods);
        let by_state = bottom_up(&hierarchy, "Level2", &frame).unwrap();

        for t in 0..periods.len() {
            let name = format!("d_{}", t + 1);
            let before: f64 = numeric_values(&frame, &name).unwrap().iter().sum();
            let after: f64 = numeric_values(&by_state, &name).unwrap().iter().sum();
            prop_assert!((before - after).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_averages_sum_to_one((states, stores, mut periods) in reference_strategy()) {
        // guarantee a positive grand total
        periods[0][0] += 1.0;
        let frame = reference_frame(&states, &stores, &periods);

        for level in ["Level2", "Level3"] {
            let p = prop_averages(&Hierarchy::m5(), level, &frame, periods.len()).unwrap();
            prop_assert!((p.sum() - 1.0).abs() < 1e-9);
            prop_assert!(p.values().iter().all(|v| *v >= 0.0));
        }
    }
}
