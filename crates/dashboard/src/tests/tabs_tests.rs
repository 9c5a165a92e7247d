// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DashboardError, QueryParams, TAB_PARAM, TabPersistence};

fn overview_tabs() -> TabPersistence {
    TabPersistence::new("overview", &["overview", "tasks"]).unwrap()
}

#[test]
fn test_invalid_tab_resolves_to_default_and_url_is_corrected() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("?tab=bogus");

    assert_eq!(tabs.resolve(&params), "overview");

    tabs.sync_url(&mut params);

    assert_eq!(tabs.active_tab(), "overview");
    assert_eq!(params.get(TAB_PARAM), Some("overview"));
    assert_eq!(params.to_query_string(), "?tab=overview");
}

#[test]
fn test_valid_tab_is_adopted_unchanged() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("tab=tasks&page=2");

    tabs.sync_url(&mut params);

    assert_eq!(tabs.active_tab(), "tasks");
    assert_eq!(params.to_query_string(), "?page=2&tab=tasks");
}

#[test]
fn test_missing_tab_uses_default_without_touching_url() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("");

    tabs.sync_url(&mut params);

    assert_eq!(tabs.active_tab(), "overview");
    assert_eq!(params.get(TAB_PARAM), None);
    assert_eq!(params.to_query_string(), "");
}

#[test]
fn test_empty_tab_is_treated_as_missing() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("?tab=&page=2");

    assert_eq!(tabs.resolve(&params), "overview");
    tabs.sync_url(&mut params);

    assert_eq!(tabs.active_tab(), "overview");
    assert_eq!(params.get(TAB_PARAM), Some(""));
    assert_eq!(params.to_query_string(), "?page=2&tab=");
}

#[test]
fn test_percent_encoded_tab_is_decoded() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("?tab=task%73");

    tabs.sync_url(&mut params);

    assert_eq!(tabs.active_tab(), "tasks");
    assert_eq!(params.get(TAB_PARAM), Some("tasks"));
}

#[test]
fn test_query_values_round_trip_through_encoding() {
    let params: QueryParams = QueryParams::parse("?q=jane+doe&team=r%26d");

    assert_eq!(params.get("q"), Some("jane doe"));
    assert_eq!(params.get("team"), Some("r&d"));
    assert_eq!(params.to_query_string(), "?q=jane%20doe&team=r%26d");
}

#[test]
fn test_set_active_tab_records_valid_tab() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::default();

    assert!(tabs.set_active_tab("tasks", &mut params));

    assert_eq!(tabs.active_tab(), "tasks");
    assert_eq!(params.get(TAB_PARAM), Some("tasks"));
}

#[test]
fn test_set_active_tab_ignores_invalid_tab() {
    let mut tabs: TabPersistence = overview_tabs();
    let mut params: QueryParams = QueryParams::parse("?tab=tasks");
    tabs.sync_url(&mut params);

    assert!(!tabs.set_active_tab("bogus", &mut params));

    assert_eq!(tabs.active_tab(), "tasks");
    assert_eq!(params.get(TAB_PARAM), Some("tasks"));
}

#[test]
fn test_default_must_be_a_valid_tab() {
    let result = TabPersistence::new("settings", &["overview", "tasks"]);

    assert!(matches!(result, Err(DashboardError::Validation(_))));
}
