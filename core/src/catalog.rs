//! The report catalog: every named report, in fixed order.
//!
//! CATALOG ORDER (fixed, documented, never reordered):
//!   1. Transaction dynamics
//!   2. Device dominance
//!   3. Insurance penetration
//!   4. Market expansion
//!   5. User engagement
//!
//! RULES:
//!   - Each report is exactly one read-only statement against the store.
//!   - "Most recent year" is resolved inside the statement, per call.
//!   - Reports whose ratio has no denominator leave that group out.
//!   - An empty warehouse yields empty results, never an error.

use crate::{
    config::ReportConfig,
    error::{PulseError, PulseResult},
    report::ReportResult,
    store::PulseStore,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    TransactionDynamics,
    DeviceDominance,
    InsurancePenetration,
    MarketExpansion,
    UserEngagement,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::TransactionDynamics,
        Section::DeviceDominance,
        Section::InsurancePenetration,
        Section::MarketExpansion,
        Section::UserEngagement,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::TransactionDynamics  => "transaction_dynamics",
            Section::DeviceDominance      => "device_dominance",
            Section::InsurancePenetration => "insurance_penetration",
            Section::MarketExpansion      => "market_expansion",
            Section::UserEngagement       => "user_engagement",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::TransactionDynamics  => "Transaction Dynamics",
            Section::DeviceDominance      => "Device Dominance and User Engagement",
            Section::InsurancePenetration => "Insurance Penetration and Growth Potential",
            Section::MarketExpansion      => "Transaction Analysis for Market Expansion",
            Section::UserEngagement       => "User Engagement and Growth Strategy",
        }
    }

    pub fn reports(&self) -> impl Iterator<Item = ReportId> + '_ {
        ReportId::ALL.iter().copied().filter(move |r| r.section() == *self)
    }
}

impl FromStr for Section {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|sec| sec.key() == s)
            .ok_or_else(|| PulseError::UnknownSection { key: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportId {
    // Transaction dynamics
    TransactionGrowth,
    PaymentCategoryGrowth,
    SeasonalTransactionSpikes,
    TopContributingStates,
    StateTransactionTrends,
    // Device dominance
    DeviceBrandDominance,
    TopDistrictUserEngagement,
    RegionBrandPreference,
    UnderperformingBrands,
    EngagementMetroVsNonmetro,
    // Insurance penetration
    InsuranceAdoptionByState,
    LaggingInsurancePenetration,
    InsuranceQuarterlyGrowth,
    TopInsuranceAdoptionStates,
    BottomInsuranceAdoptionStates,
    InsuranceUntappedOpportunities,
    // Market expansion
    StatesContribution,
    Top5StatesDominance,
    UnderperformingGrowthStates,
    MarketStatus,
    TopTransactionVolumeStates,
    TopTransactionValueStates,
    // User engagement
    TopStatesByRegisteredUsers,
    TopDistrictsByRegisteredUsers,
    StateEngagementRatio,
    DistrictEngagementRatio,
    DormantUserRegions,
    GrowthStatesByEngagement,
    TargetDistrictsLowEngagement,
}

impl ReportId {
    pub const ALL: [ReportId; 29] = [
        ReportId::TransactionGrowth,
        ReportId::PaymentCategoryGrowth,
        ReportId::SeasonalTransactionSpikes,
        ReportId::TopContributingStates,
        ReportId::StateTransactionTrends,
        ReportId::DeviceBrandDominance,
        ReportId::TopDistrictUserEngagement,
        ReportId::RegionBrandPreference,
        ReportId::UnderperformingBrands,
        ReportId::EngagementMetroVsNonmetro,
        ReportId::InsuranceAdoptionByState,
        ReportId::LaggingInsurancePenetration,
        ReportId::InsuranceQuarterlyGrowth,
        ReportId::TopInsuranceAdoptionStates,
        ReportId::BottomInsuranceAdoptionStates,
        ReportId::InsuranceUntappedOpportunities,
        ReportId::StatesContribution,
        ReportId::Top5StatesDominance,
        ReportId::UnderperformingGrowthStates,
        ReportId::MarketStatus,
        ReportId::TopTransactionVolumeStates,
        ReportId::TopTransactionValueStates,
        ReportId::TopStatesByRegisteredUsers,
        ReportId::TopDistrictsByRegisteredUsers,
        ReportId::StateEngagementRatio,
        ReportId::DistrictEngagementRatio,
        ReportId::DormantUserRegions,
        ReportId::GrowthStatesByEngagement,
        ReportId::TargetDistrictsLowEngagement,
    ];

    /// Stable snake_case key used on the command line and in JSON.
    pub fn key(&self) -> &'static str {
        use ReportId::*;
        match self {
            TransactionGrowth              => "transaction_growth",
            PaymentCategoryGrowth          => "payment_category_growth",
            SeasonalTransactionSpikes      => "seasonal_transaction_spikes",
            TopContributingStates          => "top_contributing_states",
            StateTransactionTrends         => "state_transaction_trends",
            DeviceBrandDominance           => "device_brand_dominance",
            TopDistrictUserEngagement      => "top_district_user_engagement",
            RegionBrandPreference          => "region_brand_preference",
            UnderperformingBrands          => "underperforming_brands",
            EngagementMetroVsNonmetro      => "engagement_metro_vs_nonmetro",
            InsuranceAdoptionByState       => "insurance_adoption_by_state",
            LaggingInsurancePenetration    => "lagging_insurance_penetration",
            InsuranceQuarterlyGrowth       => "insurance_quarterly_growth",
            TopInsuranceAdoptionStates     => "top_insurance_adoption_states",
            BottomInsuranceAdoptionStates  => "bottom_insurance_adoption_states",
            InsuranceUntappedOpportunities => "insurance_untapped_opportunities",
            StatesContribution             => "states_contribution",
            Top5StatesDominance            => "top5_states_dominance",
            UnderperformingGrowthStates    => "underperforming_growth_states",
            MarketStatus                   => "market_status",
            TopTransactionVolumeStates     => "top_transaction_volume_states",
            TopTransactionValueStates      => "top_transaction_value_states",
            TopStatesByRegisteredUsers     => "top_states_by_registered_users",
            TopDistrictsByRegisteredUsers  => "top_districts_by_registered_users",
            StateEngagementRatio           => "state_engagement_ratio",
            DistrictEngagementRatio        => "district_engagement_ratio",
            DormantUserRegions             => "dormant_user_regions",
            GrowthStatesByEngagement       => "growth_states_by_engagement",
            TargetDistrictsLowEngagement   => "target_districts_low_engagement",
        }
    }

    pub fn section(&self) -> Section {
        use ReportId::*;
        match self {
            TransactionGrowth
            | PaymentCategoryGrowth
            | SeasonalTransactionSpikes
            | TopContributingStates
            | StateTransactionTrends => Section::TransactionDynamics,

            DeviceBrandDominance
            | TopDistrictUserEngagement
            | RegionBrandPreference
            | UnderperformingBrands
            | EngagementMetroVsNonmetro => Section::DeviceDominance,

            InsuranceAdoptionByState
            | LaggingInsurancePenetration
            | InsuranceQuarterlyGrowth
            | TopInsuranceAdoptionStates
            | BottomInsuranceAdoptionStates
            | InsuranceUntappedOpportunities => Section::InsurancePenetration,

            StatesContribution
            | Top5StatesDominance
            | UnderperformingGrowthStates
            | MarketStatus
            | TopTransactionVolumeStates
            | TopTransactionValueStates => Section::MarketExpansion,

            TopStatesByRegisteredUsers
            | TopDistrictsByRegisteredUsers
            | StateEngagementRatio
            | DistrictEngagementRatio
            | DormantUserRegions
            | GrowthStatesByEngagement
            | TargetDistrictsLowEngagement => Section::UserEngagement,
        }
    }

    pub fn description(&self) -> &'static str {
        use ReportId::*;
        match self {
            TransactionGrowth              => "Total volume and value per year and quarter",
            PaymentCategoryGrowth          => "Volume and value per payment category per year",
            SeasonalTransactionSpikes      => "Quarterly totals ordered quarter-first to expose festive spikes",
            TopContributingStates          => "Ten states contributing the most transaction value",
            StateTransactionTrends         => "Ten states with the lowest transaction volume",
            DeviceBrandDominance           => "Registered users per device brand, latest year",
            TopDistrictUserEngagement      => "Ten districts with the highest app opens per user",
            RegionBrandPreference          => "Premium vs budget brand users per state",
            UnderperformingBrands          => "Brand users, average market share and state reach",
            EngagementMetroVsNonmetro      => "District engagement tagged metro or non-metro",
            InsuranceAdoptionByState       => "Insurance transactions per 100 registered users",
            LaggingInsurancePenetration    => "Large user bases with low insurance adoption",
            InsuranceQuarterlyGrowth       => "Insurance volume and value per quarter",
            TopInsuranceAdoptionStates     => "Ten states with the highest insurance adoption",
            BottomInsuranceAdoptionStates  => "Ten states with the lowest insurance adoption",
            InsuranceUntappedOpportunities => "Users not yet reached by insurance in large states",
            StatesContribution             => "Volume, value and average size for every state",
            Top5StatesDominance            => "Share of the five largest states against the rest",
            UnderperformingGrowthStates    => "Year-over-year value growth, top ten",
            MarketStatus                   => "Value, average size and year-over-year growth per state",
            TopTransactionVolumeStates     => "Ten states by transaction volume",
            TopTransactionValueStates      => "Ten states by transaction value",
            TopStatesByRegisteredUsers     => "Ten states by registered users, latest year",
            TopDistrictsByRegisteredUsers  => "Ten districts by registered users, latest year",
            StateEngagementRatio           => "Ten states by app opens per registered user",
            DistrictEngagementRatio        => "Ten districts by app opens per registered user",
            DormantUserRegions             => "Large registered bases with weak engagement",
            GrowthStatesByEngagement       => "Engagement percentage per state per year",
            TargetDistrictsLowEngagement   => "Twenty least engaged districts",
        }
    }

    /// Row cap for ranked reports, `None` for unbounded ones.
    pub fn row_limit(&self) -> Option<usize> {
        use ReportId::*;
        match self {
            TopContributingStates
            | StateTransactionTrends
            | TopDistrictUserEngagement
            | TopInsuranceAdoptionStates
            | BottomInsuranceAdoptionStates
            | UnderperformingGrowthStates
            | TopTransactionVolumeStates
            | TopTransactionValueStates
            | TopStatesByRegisteredUsers
            | TopDistrictsByRegisteredUsers
            | StateEngagementRatio
            | DistrictEngagementRatio
            | DormantUserRegions => Some(10),
            TargetDistrictsLowEngagement => Some(20),
            _ => None,
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ReportId {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportId::ALL
            .iter()
            .copied()
            .find(|r| r.key() == s)
            .ok_or_else(|| PulseError::UnknownReport { key: s.to_string() })
    }
}

/// Dispatches report ids to store queries, carrying the classification
/// tables the catalog needs. Holds no connection: the store is passed
/// into every call.
#[derive(Debug, Clone, Default)]
pub struct ReportCatalog {
    config: ReportConfig,
}

impl ReportCatalog {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Build from the classification file in `data_dir`.
    pub fn from_data_dir(data_dir: &str) -> PulseResult<Self> {
        Ok(Self::new(ReportConfig::load(data_dir)?))
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn reports(&self) -> impl Iterator<Item = ReportId> {
        ReportId::ALL.into_iter()
    }

    /// Run one report. Failures propagate unchanged; nothing is retried.
    pub fn run(&self, store: &PulseStore, id: ReportId) -> PulseResult<ReportResult> {
        use ReportId::*;
        let result = match id {
            TransactionGrowth              => store.transaction_growth(),
            PaymentCategoryGrowth          => store.payment_category_growth(),
            SeasonalTransactionSpikes      => store.seasonal_transaction_spikes(),
            TopContributingStates          => store.top_contributing_states(),
            StateTransactionTrends         => store.state_transaction_trends(),
            DeviceBrandDominance           => store.device_brand_dominance(),
            TopDistrictUserEngagement      => store.top_district_user_engagement(),
            RegionBrandPreference          => {
                store.region_brand_preference(&self.config.brand_categories)
            }
            UnderperformingBrands          => store.underperforming_brands(),
            EngagementMetroVsNonmetro      => {
                store.engagement_metro_vs_nonmetro(&self.config.metro_districts)
            }
            InsuranceAdoptionByState       => store.insurance_adoption_by_state(),
            LaggingInsurancePenetration    => {
                store.lagging_insurance_penetration(&self.config.insurance)
            }
            InsuranceQuarterlyGrowth       => store.insurance_quarterly_growth(),
            TopInsuranceAdoptionStates     => store.top_insurance_adoption_states(),
            BottomInsuranceAdoptionStates  => store.bottom_insurance_adoption_states(),
            InsuranceUntappedOpportunities => {
                store.insurance_untapped_opportunities(&self.config.insurance)
            }
            StatesContribution             => store.states_contribution(),
            Top5StatesDominance            => store.top5_states_dominance(),
            UnderperformingGrowthStates    => store.underperforming_growth_states(),
            MarketStatus                   => store.market_status(),
            TopTransactionVolumeStates     => store.top_transaction_volume_states(),
            TopTransactionValueStates      => store.top_transaction_value_states(),
            TopStatesByRegisteredUsers     => store.top_states_by_registered_users(),
            TopDistrictsByRegisteredUsers  => store.top_districts_by_registered_users(),
            StateEngagementRatio           => store.state_engagement_ratio(),
            DistrictEngagementRatio        => store.district_engagement_ratio(),
            DormantUserRegions             => store.dormant_user_regions(),
            GrowthStatesByEngagement       => store.growth_states_by_engagement(),
            TargetDistrictsLowEngagement   => store.target_districts_low_engagement(),
        }?;
        log::debug!("report {id}: {} rows", result.len());
        Ok(result)
    }

    /// Run a report by its key.
    pub fn run_key(&self, store: &PulseStore, key: &str) -> PulseResult<ReportResult> {
        self.run(store, key.parse()?)
    }

    /// Run every report of a section, in catalog order.
    pub fn run_section(
        &self,
        store: &PulseStore,
        section: Section,
    ) -> PulseResult<Vec<(ReportId, ReportResult)>> {
        section
            .reports()
            .map(|id| self.run(store, id).map(|r| (id, r)))
            .collect()
    }
}
