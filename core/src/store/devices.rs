//! Device dominance reports over `agg_user` and `map_user`.
//! All of them look at the most recent year only.

use crate::{config::BrandCategories, error::PulseResult, report::ReportResult};
use rusqlite::params_from_iter;
use std::collections::BTreeSet;

use super::{placeholders, PulseStore};

impl PulseStore {
    pub fn device_brand_dominance(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Brand,
                 SUM(Brand_count) AS Total_users
             FROM agg_user
             WHERE Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY Brand
             ORDER BY Total_users DESC",
            [],
        )
    }

    /// Ten districts with the most app opens per registered user.
    pub fn top_district_user_engagement(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 State,
                 District,
                 SUM(Registered_users) AS Total_users,
                 SUM(App_opens)        AS Total_opens,
                 ROUND(SUM(App_opens) * 1.0 / NULLIF(SUM(Registered_users), 0), 2)
                     AS Engagement_score
             FROM map_user
             WHERE Registered_users > 0
               AND Year = (SELECT MAX(Year) FROM map_user)
             GROUP BY State, District
             HAVING Engagement_score IS NOT NULL
             ORDER BY Engagement_score DESC
             LIMIT 10",
            [],
        )
    }

    /// Users per state for each classified brand, tagged Premium or Budget.
    /// Brands in neither list are left out.
    pub fn region_brand_preference(&self, brands: &BrandCategories) -> PulseResult<ReportResult> {
        let premium = placeholders(1, brands.premium.len());
        let budget = placeholders(1 + brands.premium.len(), brands.budget.len());
        let all = placeholders(1, brands.premium.len() + brands.budget.len());
        let sql = format!(
            "SELECT
                 State,
                 Brand,
                 SUM(Brand_count) AS Total_users,
                 CASE
                     WHEN Brand IN ({premium}) THEN 'Premium'
                     WHEN Brand IN ({budget})  THEN 'Budget'
                 END AS Brand_category
             FROM agg_user
             WHERE Brand IN ({all})
               AND Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY State, Brand, Brand_category
             ORDER BY State, Total_users DESC"
        );
        self.query_report(&sql, params_from_iter(brands.all()))
    }

    /// Brand reach in the latest year, ranked by average market share.
    pub fn underperforming_brands(&self) -> PulseResult<ReportResult> {
        self.query_report(
            "SELECT
                 Brand,
                 SUM(Brand_count)      AS Total_brand_users,
                 AVG(Brand_percentage) AS Avg_market_share,
                 COUNT(DISTINCT State) AS States_present
             FROM agg_user
             WHERE Year = (SELECT MAX(Year) FROM agg_user)
             GROUP BY Brand
             ORDER BY Avg_market_share DESC",
            [],
        )
    }

    /// Per-district engagement with a Metro / Non-Metro tag taken from
    /// the configured district set.
    pub fn engagement_metro_vs_nonmetro(
        &self,
        metro_districts: &BTreeSet<String>,
    ) -> PulseResult<ReportResult> {
        let metro = placeholders(1, metro_districts.len());
        let sql = format!(
            "SELECT
                 State,
                 District,
                 ROUND(AVG(Registered_users), 0) AS Avg_users,
                 ROUND(AVG(App_opens * 1.0 / NULLIF(Registered_users, 0)), 2)
                     AS Engagement_score,
                 CASE
                     WHEN District IN ({metro}) THEN 'Metro'
                     ELSE 'Non-Metro'
                 END AS Area_type
             FROM map_user
             WHERE Registered_users > 0
               AND Year = (SELECT MAX(Year) FROM map_user)
             GROUP BY State, District, Area_type
             HAVING Engagement_score IS NOT NULL
             ORDER BY Engagement_score DESC"
        );
        self.query_report(&sql, params_from_iter(metro_districts.iter()))
    }
}
