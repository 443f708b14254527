//! Row inserts for fixtures and loaders. Reports never call these.

use crate::{
    error::PulseResult,
    schema::{InsuranceTransaction, MapUserAggregate, TransactionAggregate, UserAggregate},
};
use rusqlite::params;

use super::PulseStore;

impl PulseStore {
    pub fn insert_transaction_aggregate(&self, r: &TransactionAggregate) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO agg_transaction
                (State, Year, Quarter, Transaction_type, Transaction_count, Transaction_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                r.state,
                r.year,
                r.quarter,
                r.transaction_type,
                r.transaction_count,
                r.transaction_amount,
            ],
        )?;
        Ok(())
    }

    pub fn insert_user_aggregate(&self, r: &UserAggregate) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO agg_user
                (State, Year, Quarter, Brand, Registered_users, App_opens,
                 Brand_count, Brand_percentage)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                r.state,
                r.year,
                r.quarter,
                r.brand,
                r.registered_users,
                r.app_opens,
                r.brand_count,
                r.brand_percentage,
            ],
        )?;
        Ok(())
    }

    pub fn insert_map_user_aggregate(&self, r: &MapUserAggregate) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO map_user
                (State, District, Year, Quarter, Registered_users, App_opens)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                r.state,
                r.district,
                r.year,
                r.quarter,
                r.registered_users,
                r.app_opens,
            ],
        )?;
        Ok(())
    }

    pub fn insert_insurance_transaction(&self, r: &InsuranceTransaction) -> PulseResult<()> {
        self.conn.execute(
            "INSERT INTO insurance_transaction
                (State, Year, Quarter, Insurance_txn_count, Insurance_txn_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                r.state,
                r.year,
                r.quarter,
                r.insurance_txn_count,
                r.insurance_txn_amount,
            ],
        )?;
        Ok(())
    }
}
