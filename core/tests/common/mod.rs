//! Warehouse fixtures shared by the integration tests.
#![allow(dead_code)]

use pulse_core::{
    schema::{InsuranceTransaction, MapUserAggregate, TransactionAggregate, UserAggregate},
    PulseStore, ReportResult, Value,
};

pub fn empty_store() -> PulseStore {
    let store = PulseStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

pub fn txn(store: &PulseStore, state: &str, year: i64, quarter: i64, kind: &str, count: i64, amount: f64) {
    store
        .insert_transaction_aggregate(&TransactionAggregate {
            state: state.into(),
            year,
            quarter,
            transaction_type: kind.into(),
            transaction_count: count,
            transaction_amount: amount,
        })
        .expect("insert agg_transaction");
}

#[allow(clippy::too_many_arguments)]
pub fn user(
    store: &PulseStore,
    state: &str,
    year: i64,
    quarter: i64,
    brand: &str,
    registered: i64,
    opens: i64,
    brand_count: i64,
    brand_pct: f64,
) {
    store
        .insert_user_aggregate(&UserAggregate {
            state: state.into(),
            year,
            quarter,
            brand: brand.into(),
            registered_users: registered,
            app_opens: opens,
            brand_count,
            brand_percentage: brand_pct,
        })
        .expect("insert agg_user");
}

pub fn district(store: &PulseStore, state: &str, name: &str, year: i64, quarter: i64, registered: i64, opens: i64) {
    store
        .insert_map_user_aggregate(&MapUserAggregate {
            state: state.into(),
            district: name.into(),
            year,
            quarter,
            registered_users: registered,
            app_opens: opens,
        })
        .expect("insert map_user");
}

pub fn insurance(store: &PulseStore, state: &str, year: i64, quarter: i64, count: i64, amount: f64) {
    store
        .insert_insurance_transaction(&InsuranceTransaction {
            state: state.into(),
            year,
            quarter,
            insurance_txn_count: count,
            insurance_txn_amount: amount,
        })
        .expect("insert insurance_transaction");
}

// ── Result helpers ───────────────────────────────────────────────────────────

pub fn texts(result: &ReportResult, column: &str) -> Vec<String> {
    result
        .column(column)
        .expect("column present")
        .into_iter()
        .map(|v| v.as_str().expect("text cell").to_string())
        .collect()
}

pub fn numbers(result: &ReportResult, column: &str) -> Vec<f64> {
    result
        .column(column)
        .expect("column present")
        .into_iter()
        .map(|v| v.as_f64().expect("numeric cell"))
        .collect()
}

pub fn columns(result: &ReportResult) -> Vec<&str> {
    result.columns().iter().map(String::as_str).collect()
}

/// Numeric value of `column` in the row whose `key_column` equals `key`.
pub fn value_for(result: &ReportResult, key_column: &str, key: &str, column: &str) -> Option<f64> {
    result
        .rows()
        .find(|r| r.get(key_column).and_then(Value::as_str) == Some(key))
        .and_then(|r| r.get(column))
        .and_then(Value::as_f64)
}

pub fn assert_non_increasing(values: &[f64], what: &str) {
    for pair in values.windows(2) {
        assert!(pair[0] >= pair[1], "{what} not descending: {values:?}");
    }
}

pub fn assert_non_decreasing(values: &[f64], what: &str) {
    for pair in values.windows(2) {
        assert!(pair[0] <= pair[1], "{what} not ascending: {values:?}");
    }
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}
