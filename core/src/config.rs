use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Brand → category table used by the brand preference report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandCategories {
    pub premium: Vec<String>,
    pub budget: Vec<String>,
}

impl Default for BrandCategories {
    fn default() -> Self {
        Self {
            premium: vec!["Apple".into(), "OnePlus".into()],
            budget: vec!["Xiaomi".into(), "Vivo".into(), "Samsung".into()],
        }
    }
}

impl BrandCategories {
    /// All classified brands, premium first. Brands outside this list are
    /// excluded from the preference report.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.premium.iter().chain(self.budget.iter()).map(String::as_str)
    }
}

/// Thresholds for the insurance penetration reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceThresholds {
    /// Registered users above which a lagging state is reported.
    pub lagging_min_registered_users: i64,
    /// Registered users above which a state counts as an untapped market.
    pub untapped_min_registered_users: i64,
    /// Adoption rate (percent) below which a state counts as untapped.
    pub untapped_max_adoption_rate: f64,
}

impl Default for InsuranceThresholds {
    fn default() -> Self {
        Self {
            lagging_min_registered_users: 10_000_000,
            untapped_min_registered_users: 1_000_000,
            untapped_max_adoption_rate: 10.0,
        }
    }
}

/// Classification and threshold tables the catalog reads.
/// Everything here can change without touching report code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub metro_districts: BTreeSet<String>,
    pub brand_categories: BrandCategories,
    pub insurance: InsuranceThresholds,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            metro_districts: DEFAULT_METRO_DISTRICTS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            brand_categories: BrandCategories::default(),
            insurance: InsuranceThresholds::default(),
        }
    }
}

impl ReportConfig {
    /// Load from the data/ directory.
    /// In tests, use ReportConfig::default().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/reports/classification.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid report config {path}: {e}"))?;

        if config.metro_districts.is_empty() {
            log::warn!("{path}: metro_districts is empty, every district will be Non-Metro");
        }
        if config.brand_categories.all().next().is_none() {
            log::warn!("{path}: no brands classified, brand preference report will be empty");
        }
        log::info!(
            "report config loaded: {} metro districts, {} classified brands",
            config.metro_districts.len(),
            config.brand_categories.all().count()
        );
        Ok(config)
    }
}

const DEFAULT_METRO_DISTRICTS: [&str; 28] = [
    "Ahmedabad District",
    "Bengaluru Urban District",
    "Chennai District",
    "Hyderabad District",
    "Kolkata District",
    "Mumbai District",
    "Mumbai Suburban District",
    "Pune District",
    "Thane District",
    "Gautam Buddha Nagar District",
    "Ghaziabad District",
    "Gurugram District",
    "Faridabad District",
    "Kamrup Metropolitan District",
    "New Delhi District",
    "South East Delhi District",
    "North East District",
    "South West District",
    "North West District",
    "Sas Nagar District",
    "Chandigarh District",
    "Rangareddy District",
    "Medchal Malkajgiri District",
    "Sangareddy District",
    "North Twenty Four Parganas District",
    "South Twenty Four Parganas District",
    "Howrah District",
    "Hooghly District",
];
