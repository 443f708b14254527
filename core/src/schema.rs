//! Warehouse schema model: the column contract every report reads from.
//!
//! RULE: Table and column names here are part of the output contract.
//! Presentation code binds to them by string key; never rename them.

use crate::types::{Quarter, StateName, Year};
use serde::{Deserialize, Serialize};

// ── Tables ───────────────────────────────────────────────────────────────────

pub const AGG_TRANSACTION: &str = "agg_transaction";
pub const AGG_USER: &str = "agg_user";
pub const MAP_USER: &str = "map_user";
pub const INSURANCE_TRANSACTION: &str = "insurance_transaction";

/// Every table the catalog reads, in migration order.
pub const TABLES: [&str; 4] = [AGG_TRANSACTION, AGG_USER, MAP_USER, INSURANCE_TRANSACTION];

// ── Columns ──────────────────────────────────────────────────────────────────

pub mod col {
    pub const STATE: &str = "State";
    pub const DISTRICT: &str = "District";
    pub const YEAR: &str = "Year";
    pub const QUARTER: &str = "Quarter";
    pub const TRANSACTION_TYPE: &str = "Transaction_type";
    pub const TRANSACTION_COUNT: &str = "Transaction_count";
    pub const TRANSACTION_AMOUNT: &str = "Transaction_amount";
    pub const BRAND: &str = "Brand";
    pub const REGISTERED_USERS: &str = "Registered_users";
    pub const APP_OPENS: &str = "App_opens";
    pub const BRAND_COUNT: &str = "Brand_count";
    pub const BRAND_PERCENTAGE: &str = "Brand_percentage";
    pub const INSURANCE_TXN_COUNT: &str = "Insurance_txn_count";
    pub const INSURANCE_TXN_AMOUNT: &str = "Insurance_txn_amount";
}

// ── Rows ─────────────────────────────────────────────────────────────────────

/// One row of `agg_transaction`: grain (State, Year, Quarter, Transaction_type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionAggregate {
    pub state: StateName,
    pub year: Year,
    pub quarter: Quarter,
    pub transaction_type: String,
    pub transaction_count: i64,
    pub transaction_amount: f64,
}

/// One row of `agg_user`: grain (State, Year, Quarter, Brand).
///
/// `registered_users` and `app_opens` are state-period totals, repeated
/// on each brand row of the same period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAggregate {
    pub state: StateName,
    pub year: Year,
    pub quarter: Quarter,
    pub brand: String,
    pub registered_users: i64,
    pub app_opens: i64,
    pub brand_count: i64,
    pub brand_percentage: f64,
}

/// One row of `map_user`: grain (State, District, Year, Quarter).
/// District names are unique only within a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapUserAggregate {
    pub state: StateName,
    pub district: String,
    pub year: Year,
    pub quarter: Quarter,
    pub registered_users: i64,
    pub app_opens: i64,
}

/// One row of `insurance_transaction`: grain (State, Year, Quarter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceTransaction {
    pub state: StateName,
    pub year: Year,
    pub quarter: Quarter,
    pub insurance_txn_count: i64,
    pub insurance_txn_amount: f64,
}
