//! Market expansion reports over `agg_transaction`.

use crate::{error::PulseResult, report::ReportResult};

use super::PulseStore;

/// Per-state value in the most recent year, the year before it, and overall.
/// A state with no rows in a year gets 0.0 for that year.
const YEARLY_STATE_VALUE: &str = "
    WITH yearly AS (
        SELECT
            State,
            SUM(CASE WHEN Year = (SELECT MAX(Year) FROM agg_transaction)
                     THEN Transaction_amount ELSE 0.0 END) AS Recent_Year_Value,
            SUM(CASE WHEN Year = (SELECT MAX(Year) - 1 FROM agg_transaction)
                     THEN Transaction_amount ELSE 0.0 END) AS Previous_Year_Value,
            SUM(Transaction_amount) AS Total_Overall_Value,
            AVG(Transaction_amount / NULLIF(Transaction_count, 0)) AS Avg_Size
        FROM agg_transaction
        GROUP BY State
    )";

impl PulseStore {
    /// Every state with volume, value and mean transaction size.
    pub fn states_contribution(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Transaction_count)  AS Total_Transaction_Volume,
                 SUM(Transaction_amount) AS Total_Transaction_Value,
                 ROUND(AVG(Transaction_amount / NULLIF(Transaction_count, 0)), 2)
                     AS Avg_Transaction_Value
             FROM agg_transaction
             GROUP BY State
             HAVING Avg_Transaction_Value IS NOT NULL
             ORDER BY Total_Transaction_Value DESC, Total_Transaction_Volume DESC",
            [],
        )
    }

    /// Share of value and volume held by the five largest states against
    /// everyone else. Ranking is by total value; ties fall to ROW_NUMBER order.
    pub fn top5_states_dominance(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "WITH state_totals AS (
                 SELECT
                     State,
                     SUM(Transaction_count)  AS Total_Volume,
                     SUM(Transaction_amount) AS Total_Value
                 FROM agg_transaction
                 GROUP BY State
             ),
             ranked_states AS (
                 SELECT
                     State,
                     Total_Volume,
                     Total_Value,
                     ROW_NUMBER() OVER (ORDER BY Total_Value DESC) AS State_rank
                 FROM state_totals
             )
             SELECT
                 CASE WHEN State_rank <= 5 THEN 'Top 5 States' ELSE 'Rest of India' END
                     AS Category,
                 SUM(Total_Volume) AS Total_Transaction_Volume,
                 SUM(Total_Value)  AS Total_Transaction_Value,
                 COUNT(*)          AS Number_of_States,
                 ROUND(SUM(Total_Value) * 100.0
                       / NULLIF((SELECT SUM(Total_Value) FROM state_totals), 0), 2)
                     AS Percentage_of_Total_Value,
                 ROUND(SUM(Total_Volume) * 100.0
                       / NULLIF((SELECT SUM(Total_Volume) FROM state_totals), 0), 2)
                     AS Percentage_of_Total_Volume
             FROM ranked_states
             GROUP BY Category
             HAVING Percentage_of_Total_Value IS NOT NULL
                AND Percentage_of_Total_Volume IS NOT NULL
             ORDER BY Total_Transaction_Value DESC",
            [],
        )
    }

    /// Year-over-year value growth, best ten. States with nothing in the
    /// previous year are left out.
    pub fn underperforming_growth_states(&self) -> PulseResult<ReportResult> {
        let sql = format!(
            "{YEARLY_STATE_VALUE}
             SELECT
                 State,
                 Recent_Year_Value,
                 Previous_Year_Value,
                 Total_Overall_Value,
                 ROUND((Recent_Year_Value - Previous_Year_Value) * 100.0
                       / NULLIF(Previous_Year_Value, 0), 2) AS Growth_Rate
             FROM yearly
             WHERE Previous_Year_Value > 0
             ORDER BY Growth_Rate DESC
             LIMIT 10"
        );
        self.query_report(&sql, [])
    }

    pub fn market_status(&self) -> PulseResult<ReportResult> {
        let sql = format!(
            "{YEARLY_STATE_VALUE}
             SELECT
                 State,
                 Total_Overall_Value     AS Total_Value,
                 ROUND(Avg_Size, 2)      AS Avg_Transaction_Size,
                 ROUND((Recent_Year_Value - Previous_Year_Value) * 100.0
                       / NULLIF(Previous_Year_Value, 0), 2) AS Growth_Percentage
             FROM yearly
             WHERE Previous_Year_Value > 0
               AND Avg_Size IS NOT NULL
             ORDER BY Total_Value DESC"
        );
        self.query_report(&sql, [])
    }

    pub fn top_transaction_volume_states(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Transaction_count) AS Total_Transaction_Volume
             FROM agg_transaction
             GROUP BY State
             ORDER BY Total_Transaction_Volume DESC
             LIMIT 10",
            [],
        )
    }

    pub fn top_transaction_value_states(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Transaction_amount) AS Total_Transaction_Value
             FROM agg_transaction
             GROUP BY State
             ORDER BY Total_Transaction_Value DESC
             LIMIT 10",
            [],
        )
    }
}
