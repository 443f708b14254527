//! User engagement reports. Engagement ratio = app opens per registered
//! user, expressed as a percentage.

use crate::{error::PulseResult, report::ReportResult};

use super::PulseStore;

impl PulseStore {
    pub fn top_states_by_registered_users(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Registered_users) AS Total_Users
             FROM agg_user
             WHERE Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY State
             ORDER BY Total_Users DESC
             LIMIT 10",
            [],
        )
    }

    pub fn top_districts_by_registered_users(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 District,
                 SUM(Registered_users) AS Total_Users
             FROM map_user
             WHERE Year = (SELECT MAX(Year) FROM map_user)
             GROUP BY State, District
             ORDER BY Total_Users DESC
             LIMIT 10",
            [],
        )
    }

    pub fn state_engagement_ratio(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Registered_users) AS Total_Registered,
                 SUM(App_opens)        AS Total_App_Opens,
                 ROUND(SUM(App_opens) * 100.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Engagement_Ratio_Percent
             FROM agg_user
             WHERE Registered_users > 0
               AND Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY State
             HAVING Engagement_Ratio_Percent IS NOT NULL
             ORDER BY Engagement_Ratio_Percent DESC
             LIMIT 10",
            [],
        )
    }

    /// Ten most engaged districts.
    pub fn district_engagement_ratio(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 District,
                 SUM(Registered_users) AS Total_Registered,
                 SUM(App_opens)        AS Total_App_Opens,
                 ROUND(SUM(App_opens) * 100.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Engagement_Ratio_Percent
             FROM map_user
             WHERE Registered_users > 0
               AND Year = (SELECT MAX(Year) FROM map_user)
             GROUP BY State, District
             HAVING Engagement_Ratio_Percent IS NOT NULL
             ORDER BY Engagement_Ratio_Percent DESC
             LIMIT 10",
            [],
        )
    }

    /// Large registered bases with weak engagement.
    pub fn dormant_user_regions(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 SUM(Registered_users) AS Total_Registered,
                 SUM(App_opens)        AS Total_App_Opens,
                 ROUND(SUM(App_opens) * 100.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Engagement_Ratio_Percent,
                 'Dormant Region' AS Category
             FROM agg_user
             WHERE Registered_users > 0
               AND Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY State
             HAVING Engagement_Ratio_Percent IS NOT NULL
             ORDER BY Total_Registered DESC, Engagement_Ratio_Percent ASC
             LIMIT 10",
            [],
        )
    }

    /// Engagement per state per year, across all years.
    pub fn growth_states_by_engagement(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 Year,
                 ROUND(SUM(App_opens) * 100.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Yearly_Engagement_Percent
             FROM agg_user
             GROUP BY State, Year
             HAVING Yearly_Engagement_Percent IS NOT NULL
             ORDER BY Yearly_Engagement_Percent DESC",
            [],
        )
    }

    /// Twenty least engaged districts with any engagement at all.
    pub fn target_districts_low_engagement(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 District,
                 SUM(Registered_users) AS Total_Registered,
                 SUM(App_opens)        AS Total_App_Opens,
                 ROUND(SUM(App_opens) * 100.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Engagement_Ratio_Percent
             FROM map_user
             WHERE Year = (SELECT MAX(Year) FROM map_user)
             GROUP BY State, District
             HAVING Engagement_Ratio_Percent > 0
             ORDER BY Engagement_Ratio_Percent ASC
             LIMIT 20",
            [],
        )
    }
}
