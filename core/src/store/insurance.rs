//! Insurance penetration reports.
//!
//! Adoption compares `insurance_transaction` against the user base in
//! `agg_user`. Both sides are reduced to one row per (State, Year, Quarter)
//! before the inner join: `agg_user` carries one row per brand with the
//! state totals repeated, and joining it raw would multiply insurance
//! counts by the number of brands. Both sides are restricted to the most
//! recent year the two tables share (the earlier of their latest years),
//! and only periods present in both contribute.

use crate::{config::InsuranceThresholds, error::PulseResult, report::ReportResult};
use rusqlite::params;

use super::PulseStore;

const ADOPTION_PERIODS: &str = "
    WITH shared_year AS (
        SELECT MIN(
            (SELECT MAX(Year) FROM insurance_transaction),
            (SELECT MAX(Year) FROM agg_user)
        ) AS Year
    ),
    ins AS (
        SELECT State, Year, Quarter,
               SUM(Insurance_txn_count) AS Txn_count
        FROM insurance_transaction
        WHERE Year = (SELECT Year FROM shared_year)
        GROUP BY State, Year, Quarter
    ),
    users AS (
        SELECT State, Year, Quarter,
               MAX(Registered_users) AS Registered_users,
               MAX(App_opens)        AS App_opens
        FROM agg_user
        WHERE Year = (SELECT Year FROM shared_year)
        GROUP BY State, Year, Quarter
    )";

const JOIN_USERS: &str = "
    FROM ins i
    JOIN users u
        ON  i.State   = u.State
        AND i.Year    = u.Year
        AND i.Quarter = u.Quarter
    GROUP BY i.State";

impl PulseStore {
    /// Insurance transactions per 100 registered users, every state.
    pub fn insurance_adoption_by_state(&self) -> PulseResult<ReportResult> {
        let sql = format!(
            "{ADOPTION_PERIODS}
             SELECT
                 i.State AS State,
                 SUM(i.Txn_count)        AS Total_Insurance_Transactions,
                 MAX(u.Registered_users) AS Total_Registered_Users,
                 ROUND(SUM(i.Txn_count) * 100.0 / NULLIF(MAX(u.Registered_users), 0), 4)
                     AS Insurance_Adoption_Rate_Percentage
             {JOIN_USERS}
             HAVING Insurance_Adoption_Rate_Percentage IS NOT NULL
             ORDER BY Insurance_Adoption_Rate_Percentage DESC"
        );
        self.query_report(&sql, [])
    }

    /// Large user bases with low adoption, biggest first.
    pub fn lagging_insurance_penetration(
        &self,
        thresholds: &InsuranceThresholds,
    ) -> PulseResult<ReportResult> {
        let sql = format!(
            "{ADOPTION_PERIODS}
             SELECT
                 i.State AS State,
                 MAX(u.Registered_users) AS Total_Registered_Users,
                 SUM(i.Txn_count)        AS Total_Insurance_Transactions,
                 ROUND(SUM(i.Txn_count) * 100.0 / NULLIF(MAX(u.Registered_users), 0), 4)
                     AS Insurance_Adoption_Rate_Percentage
             {JOIN_USERS}
             HAVING Total_Registered_Users > ?1
                AND Insurance_Adoption_Rate_Percentage IS NOT NULL
             ORDER BY Total_Registered_Users DESC, Insurance_Adoption_Rate_Percentage ASC"
        );
        self.query_report(&sql, params![thresholds.lagging_min_registered_users])
    }

    pub fn insurance_quarterly_growth(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Year,
                 Quarter,
                 SUM(Insurance_txn_count)  AS Transaction_Volume,
                 SUM(Insurance_txn_amount) AS Transaction_Value
             FROM insurance_transaction
             GROUP BY Year, Quarter
             ORDER BY Year, Quarter",
            [],
        )
    }

    pub fn top_insurance_adoption_states(&self) -> PulseResult<ReportResult> {
        self.ranked_adoption("DESC")
    }

    pub fn bottom_insurance_adoption_states(&self) -> PulseResult<ReportResult> {
        self.ranked_adoption("ASC")
    }

    fn ranked_adoption(&self, direction: &'static str) -> PulseResult<ReportResult> {
        let sql = format!(
            "{ADOPTION_PERIODS}
             SELECT
                 i.State AS State,
                 MAX(u.Registered_users) AS Total_Registered_Users,
                 SUM(i.Txn_count)        AS Total_Insurance_Transactions,
                 ROUND(SUM(i.Txn_count) * 100.0 / NULLIF(MAX(u.Registered_users), 0), 2)
                     AS Insurance_Adoption_Rate_Percentage
             {JOIN_USERS}
             HAVING Insurance_Adoption_Rate_Percentage IS NOT NULL
             ORDER BY Insurance_Adoption_Rate_Percentage {direction}
             LIMIT 10"
        );
        self.query_report(&sql, [])
    }

    /// Users not yet reached by insurance, in states large enough to matter.
    pub fn insurance_untapped_opportunities(
        &self,
        thresholds: &InsuranceThresholds,
    ) -> PulseResult<ReportResult> {
        let sql = format!(
            "{ADOPTION_PERIODS}
             SELECT
                 i.State AS State,
                 MAX(u.Registered_users) AS Total_Registered_Users,
                 SUM(u.App_opens)        AS App_Engagement,
                 SUM(i.Txn_count)        AS Total_Insurance_Transactions,
                 ROUND(SUM(i.Txn_count) * 100.0 / NULLIF(MAX(u.Registered_users), 0), 2)
                     AS Insurance_Adoption_Rate_Percentage,
                 MAX(u.Registered_users) - SUM(i.Txn_count) AS Untapped_Users
             {JOIN_USERS}
             HAVING Total_Registered_Users > ?1
                AND Insurance_Adoption_Rate_Percentage < ?2
             ORDER BY Untapped_Users DESC, App_Engagement DESC"
        );
        self.query_report(
            &sql,
            params![
                thresholds.untapped_min_registered_users,
                thresholds.untapped_max_adoption_rate,
            ],
        )
    }
}
