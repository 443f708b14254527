//! User engagement reports: app opens per registered user, state and district.

mod common;

use common::*;
use pulse_core::PulseStore;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn seeded() -> PulseStore {
    let store = empty_store();
    user(&store, "Kerala", 2022, 1, "Xiaomi", 100, 100, 10, 100.0);
    user(&store, "Ladakh", 2022, 1, "Xiaomi", 0, 0, 0, 0.0);
    user(&store, "Kerala", 2023, 1, "Xiaomi", 1_000, 5_000, 10, 100.0);
    user(&store, "Kerala", 2023, 2, "Apple", 1_000, 3_000, 10, 100.0);
    user(&store, "Goa", 2023, 1, "Xiaomi", 500, 500, 10, 100.0);
    user(&store, "Bihar", 2023, 1, "Xiaomi", 5_000, 1_000, 10, 100.0);
    user(&store, "Ladakh", 2023, 1, "Xiaomi", 0, 10, 0, 0.0);

    district(&store, "Bihar", "Patna", 2022, 1, 9_999, 1);
    district(&store, "Karnataka", "Bengaluru Urban", 2023, 1, 1_000, 50_000);
    district(&store, "Karnataka", "Mysuru", 2023, 1, 1_000, 2_000);
    district(&store, "Kerala", "Wayanad", 2023, 1, 1_000, 0);
    district(&store, "Bihar", "Patna", 2023, 1, 2_000, 1_000);
    district(&store, "Ladakh", "Ghost", 2023, 1, 0, 5);
    store
}

/// `n` states and districts in 2023 with strictly increasing sizes.
fn wide(n: i64) -> PulseStore {
    let store = empty_store();
    for i in 1..=n {
        let state = format!("State {i:02}");
        user(&store, &state, 2023, 1, "Xiaomi", 100 * i, 10 * i * i, 1, 100.0);
        district(&store, &state, &format!("District {i:02}"), 2023, 1, 100 * i, 10 * i * i);
    }
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn top_states_use_latest_year_only() {
    let store = seeded();
    let result = store.top_states_by_registered_users().unwrap();

    assert_eq!(columns(&result), ["State", "Total_Users"]);
    assert_eq!(texts(&result, "State"), ["Bihar", "Kerala", "Goa", "Ladakh"]);
    assert_eq!(value_for(&result, "State", "Kerala", "Total_Users"), Some(2_000.0));
}

#[test]
fn top_districts_use_latest_year_only() {
    let store = seeded();
    let result = store.top_districts_by_registered_users().unwrap();

    assert_eq!(columns(&result), ["State", "District", "Total_Users"]);
    assert_eq!(result.len(), 5);
    assert_eq!(value_for(&result, "District", "Patna", "Total_Users"), Some(2_000.0));
    assert_non_increasing(&numbers(&result, "Total_Users"), "Total_Users");
}

#[test]
fn state_engagement_ratio_skips_empty_user_bases() {
    let store = seeded();
    let result = store.state_engagement_ratio().unwrap();

    assert_eq!(
        columns(&result),
        ["State", "Total_Registered", "Total_App_Opens", "Engagement_Ratio_Percent"]
    );
    assert_eq!(texts(&result, "State"), ["Kerala", "Goa", "Bihar"]);
    assert_eq!(numbers(&result, "Engagement_Ratio_Percent"), [400.0, 100.0, 20.0]);
}

/// A zero-open district is still a valid ratio; only zero user bases drop out.
#[test]
fn district_engagement_ratio_keeps_zero_engagement() {
    let store = seeded();
    let result = store.district_engagement_ratio().unwrap();

    assert_eq!(
        texts(&result, "District"),
        ["Bengaluru Urban", "Mysuru", "Patna", "Wayanad"]
    );
    assert_eq!(value_for(&result, "District", "Wayanad", "Engagement_Ratio_Percent"), Some(0.0));
}

#[test]
fn dormant_regions_are_tagged_and_ranked_by_size() {
    let store = seeded();
    let result = store.dormant_user_regions().unwrap();

    assert_eq!(texts(&result, "State"), ["Bihar", "Kerala", "Goa"]);
    assert!(texts(&result, "Category").iter().all(|c| c == "Dormant Region"));
    assert_non_increasing(&numbers(&result, "Total_Registered"), "Total_Registered");
}

/// Years with no registered users have no ratio and are excluded, not zeroed.
#[test]
fn growth_by_engagement_spans_years_and_skips_undefined() {
    let store = seeded();
    let result = store.growth_states_by_engagement().unwrap();

    assert_eq!(columns(&result), ["State", "Year", "Yearly_Engagement_Percent"]);
    assert_eq!(result.len(), 4);
    assert!(!texts(&result, "State").contains(&"Ladakh".to_string()));
    assert_eq!(numbers(&result, "Yearly_Engagement_Percent")[0], 400.0);
    assert_non_increasing(
        &numbers(&result, "Yearly_Engagement_Percent"),
        "Yearly_Engagement_Percent",
    );
}

#[test]
fn low_engagement_targets_exclude_zero_and_ascend() {
    let store = seeded();
    let result = store.target_districts_low_engagement().unwrap();

    assert_eq!(
        texts(&result, "District"),
        ["Patna", "Mysuru", "Bengaluru Urban"]
    );
    let ratios = numbers(&result, "Engagement_Ratio_Percent");
    assert!(ratios.iter().all(|r| *r > 0.0), "ratios: {ratios:?}");
    assert_non_decreasing(&ratios, "Engagement_Ratio_Percent");
}

#[test]
fn engagement_reports_respect_row_caps() {
    let store = wide(25);

    assert_eq!(store.top_states_by_registered_users().unwrap().len(), 10);
    assert_eq!(store.top_districts_by_registered_users().unwrap().len(), 10);
    assert_eq!(store.state_engagement_ratio().unwrap().len(), 10);
    assert_eq!(store.district_engagement_ratio().unwrap().len(), 10);
    assert_eq!(store.dormant_user_regions().unwrap().len(), 10);
    assert_eq!(store.target_districts_low_engagement().unwrap().len(), 20);
    assert_eq!(store.growth_states_by_engagement().unwrap().len(), 25);
}
