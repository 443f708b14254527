//! Transaction dynamics reports over `agg_transaction`.

use crate::{error::PulseResult, report::ReportResult};

use super::PulseStore;

impl PulseStore {
    /// National volume and value per (Year, Quarter).
    pub fn transaction_growth(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Year,
                 Quarter,
                 SUM(Transaction_count)  AS Total_volume,
                 SUM(Transaction_amount) AS Total_value
             FROM agg_transaction
             GROUP BY Year, Quarter
             ORDER BY Year, Quarter",
            [],
        )
    }

    /// Volume and value per payment category per year.
    pub fn payment_category_growth(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Year,
                 Transaction_type,
                 SUM(Transaction_count)  AS Total_Volume,
                 SUM(Transaction_amount) AS Total_Value
             FROM agg_transaction
             GROUP BY Transaction_type, Year
             ORDER BY Transaction_type, Year",
            [],
        )
    }

    /// Same rollup as `transaction_growth`, ordered quarter-first so
    /// festive quarters line up across years.
    pub fn seasonal_transaction_spikes(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Year,
                 Quarter,
                 SUM(Transaction_count)  AS Total_volume,
                 SUM(Transaction_amount) AS Total_value
             FROM agg_transaction
             GROUP BY Year, Quarter
             ORDER BY Quarter, Year",
            [],
        )
    }

    pub fn top_contributing_states(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Transaction_count)  AS Total_volume,
                 SUM(Transaction_amount) AS Total_value
             FROM agg_transaction
             GROUP BY State
             ORDER BY Total_value DESC
             LIMIT 10",
            [],
        )
    }

    /// Ten states with the lowest all-time volume.
    pub fn state_transaction_trends(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Transaction_count) AS Total_Volume
             FROM agg_transaction
             GROUP BY State
             ORDER BY Total_Volume ASC
             LIMIT 10",
            [],
        )
    }
}
