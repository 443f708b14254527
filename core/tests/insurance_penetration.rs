//! Insurance penetration reports: adoption against the registered user base.

mod common;

use common::*;
use pulse_core::{config::InsuranceThresholds, PulseStore};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// agg_user repeats state totals on every brand row; Kerala has two brands
/// per quarter so a raw join would double its insurance counts.
fn seeded() -> PulseStore {
    let store = empty_store();
    user(&store, "Kerala", 2022, 1, "Xiaomi", 1_000_000, 40_000, 10, 50.0);
    user(&store, "Kerala", 2023, 1, "Xiaomi", 2_000_000, 50_000, 10, 50.0);
    user(&store, "Kerala", 2023, 1, "Apple", 2_000_000, 50_000, 10, 50.0);
    user(&store, "Kerala", 2023, 2, "Xiaomi", 2_100_000, 60_000, 10, 50.0);
    user(&store, "Kerala", 2023, 2, "Apple", 2_100_000, 60_000, 10, 50.0);
    user(&store, "Goa", 2023, 1, "Xiaomi", 400_000, 10_000, 10, 100.0);
    user(&store, "Bihar", 2023, 1, "Xiaomi", 20_000_000, 100_000, 10, 100.0);
    user(&store, "Lakshadweep", 2023, 1, "Xiaomi", 0, 0, 0, 0.0);

    insurance(&store, "Kerala", 2022, 1, 99_999, 1.0);
    insurance(&store, "Kerala", 2023, 1, 1_000, 10.0);
    insurance(&store, "Kerala", 2023, 2, 1_100, 11.0);
    insurance(&store, "Goa", 2023, 1, 4_000, 40.0);
    insurance(&store, "Bihar", 2023, 1, 10_000, 100.0);
    insurance(&store, "Tripura", 2023, 1, 50, 0.5);
    insurance(&store, "Lakshadweep", 2023, 1, 5, 0.05);
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn adoption_by_state_does_not_multiply_by_brand_rows() {
    let store = seeded();
    let result = store.insurance_adoption_by_state().unwrap();

    assert_eq!(
        columns(&result),
        [
            "State",
            "Total_Insurance_Transactions",
            "Total_Registered_Users",
            "Insurance_Adoption_Rate_Percentage"
        ]
    );
    assert_eq!(
        value_for(&result, "State", "Kerala", "Total_Insurance_Transactions"),
        Some(2_100.0)
    );
    assert_eq!(
        value_for(&result, "State", "Kerala", "Total_Registered_Users"),
        Some(2_100_000.0)
    );
    let rate = value_for(&result, "State", "Kerala", "Insurance_Adoption_Rate_Percentage").unwrap();
    assert_close(rate, 0.1, "Kerala adoption rate");
}

/// Only states present on both sides contribute; zero user bases are excluded
/// rather than reported with an undefined rate.
#[test]
fn adoption_by_state_inner_joins_and_skips_zero_denominators() {
    let store = seeded();
    let result = store.insurance_adoption_by_state().unwrap();

    assert_eq!(texts(&result, "State"), ["Goa", "Kerala", "Bihar"]);
    assert!(result
        .column("Insurance_Adoption_Rate_Percentage")
        .unwrap()
        .iter()
        .all(|v| !v.is_null()));
}

/// User data that stops a year early still joins: both sides use the latest
/// year they have in common, and the extra insurance year is ignored.
#[test]
fn adoption_uses_latest_shared_year() {
    let store = empty_store();
    for quarter in 1..=4 {
        user(&store, "Kerala", 2022, quarter, "Xiaomi", 1_000, 100, 1, 100.0);
        user(&store, "Kerala", 2022, quarter, "Apple", 1_000, 100, 1, 100.0);
        insurance(&store, "Kerala", 2022, quarter, 10, 1.0);
    }
    insurance(&store, "Kerala", 2023, 1, 500, 50.0);

    let result = store.insurance_adoption_by_state().unwrap();
    assert_eq!(texts(&result, "State"), ["Kerala"]);
    assert_eq!(
        value_for(&result, "State", "Kerala", "Total_Insurance_Transactions"),
        Some(40.0),
        "2023 insurance has no user rows to compare against"
    );
    let rate = value_for(&result, "State", "Kerala", "Insurance_Adoption_Rate_Percentage").unwrap();
    assert_close(rate, 4.0, "Kerala adoption rate");

    assert_eq!(store.top_insurance_adoption_states().unwrap().len(), 1);
    assert_eq!(store.bottom_insurance_adoption_states().unwrap().len(), 1);
    let lowered = InsuranceThresholds {
        lagging_min_registered_users: 500,
        untapped_min_registered_users: 500,
        ..InsuranceThresholds::default()
    };
    assert_eq!(store.lagging_insurance_penetration(&lowered).unwrap().len(), 1);
    let untapped = store.insurance_untapped_opportunities(&lowered).unwrap();
    assert_eq!(numbers(&untapped, "Untapped_Users"), [960.0]);
}

/// Only one table populated: no shared year, nothing to report.
#[test]
fn adoption_without_user_data_is_empty() {
    let store = empty_store();
    insurance(&store, "Kerala", 2023, 1, 10, 1.0);

    assert!(store.insurance_adoption_by_state().unwrap().is_empty());
    assert!(store.top_insurance_adoption_states().unwrap().is_empty());
}

#[test]
fn lagging_penetration_applies_user_threshold() {
    let store = seeded();
    let defaults = store
        .lagging_insurance_penetration(&InsuranceThresholds::default())
        .unwrap();
    assert_eq!(texts(&defaults, "State"), ["Bihar"]);

    let lowered = InsuranceThresholds {
        lagging_min_registered_users: 1_000_000,
        ..InsuranceThresholds::default()
    };
    let result = store.lagging_insurance_penetration(&lowered).unwrap();
    assert_eq!(texts(&result, "State"), ["Bihar", "Kerala"]);
    assert_non_increasing(&numbers(&result, "Total_Registered_Users"), "Total_Registered_Users");
}

/// Quarterly growth is a plain rollup over every year and state.
#[test]
fn quarterly_growth_conserves_totals() {
    let store = seeded();
    let result = store.insurance_quarterly_growth().unwrap();

    assert_eq!(
        columns(&result),
        ["Year", "Quarter", "Transaction_Volume", "Transaction_Value"]
    );
    assert_eq!(result.len(), 3);
    assert_eq!(numbers(&result, "Transaction_Volume"), [99_999.0, 15_055.0, 1_100.0]);
    assert_eq!(result.sum_column("Transaction_Volume").unwrap(), 116_154.0);
}

#[test]
fn top_and_bottom_adoption_are_mirrored() {
    let store = seeded();
    let top = store.top_insurance_adoption_states().unwrap();
    let bottom = store.bottom_insurance_adoption_states().unwrap();

    assert_eq!(texts(&top, "State"), ["Goa", "Kerala", "Bihar"]);
    assert_eq!(texts(&bottom, "State"), ["Bihar", "Kerala", "Goa"]);
    assert_non_increasing(&numbers(&top, "Insurance_Adoption_Rate_Percentage"), "top rate");
    assert_non_decreasing(&numbers(&bottom, "Insurance_Adoption_Rate_Percentage"), "bottom rate");
}

#[test]
fn ranked_adoption_caps_at_ten() {
    let store = empty_store();
    for i in 1..=12 {
        let state = format!("State {i:02}");
        user(&store, &state, 2023, 1, "Xiaomi", 1_000, 10, 1, 100.0);
        insurance(&store, &state, 2023, 1, i, 1.0);
    }

    let top = store.top_insurance_adoption_states().unwrap();
    let bottom = store.bottom_insurance_adoption_states().unwrap();
    assert_eq!(top.len(), 10);
    assert_eq!(bottom.len(), 10);
    assert_close(numbers(&top, "Insurance_Adoption_Rate_Percentage")[0], 1.2, "best rate");
    assert_close(numbers(&bottom, "Insurance_Adoption_Rate_Percentage")[0], 0.1, "worst rate");
}

#[test]
fn untapped_opportunities_rank_by_unreached_users() {
    let store = seeded();
    let result = store
        .insurance_untapped_opportunities(&InsuranceThresholds::default())
        .unwrap();

    assert_eq!(
        columns(&result),
        [
            "State",
            "Total_Registered_Users",
            "App_Engagement",
            "Total_Insurance_Transactions",
            "Insurance_Adoption_Rate_Percentage",
            "Untapped_Users"
        ]
    );
    assert_eq!(texts(&result, "State"), ["Bihar", "Kerala"], "Goa is below the user floor");
    assert_eq!(numbers(&result, "Untapped_Users"), [19_990_000.0, 2_097_900.0]);
    assert_eq!(value_for(&result, "State", "Kerala", "App_Engagement"), Some(110_000.0));
}

#[test]
fn untapped_opportunities_respect_rate_ceiling() {
    let store = seeded();
    let strict = InsuranceThresholds {
        untapped_max_adoption_rate: 0.08,
        ..InsuranceThresholds::default()
    };
    let result = store.insurance_untapped_opportunities(&strict).unwrap();
    assert_eq!(texts(&result, "State"), ["Bihar"]);
}
