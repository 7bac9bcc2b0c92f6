//! Tests for the dashboard state controller: query list management, saving
//! articles, and the per-query independence of a refresh cycle.

mod common;

use common::{items, Scripted, ScriptedProvider};
use std::sync::Arc;
use stormwatch::config::Config;
use stormwatch::dashboard::{Action, Dashboard, Slot};
use stormwatch::fetch::{Fetcher, RetrievedResult};

fn dashboard_with(queries: &[&str]) -> Dashboard {
    let config = Config {
        queries: queries.iter().map(|q| q.to_string()).collect(),
        ..Config::default()
    };
    Dashboard::new(&config)
}

fn sample_result() -> RetrievedResult {
    RetrievedResult {
        title: "Hurricane latest".to_string(),
        url: "https://example.com/hurricane".to_string(),
        description: "Landfall expected".to_string(),
        retrieved_at: chrono::Local::now(),
    }
}

#[test]
fn seeds_come_from_config_with_pending_slots() {
    let dashboard = dashboard_with(&["Hurricane", "Winter snowstorm"]);
    assert_eq!(dashboard.queries(), ["Hurricane", "Winter snowstorm"]);
    assert!(dashboard.slots().iter().all(|s| *s == Slot::Pending));
    assert!(dashboard.saved().is_empty());
}

#[test]
fn empty_seed_list_still_yields_one_query() {
    let dashboard = dashboard_with(&[]);
    assert_eq!(dashboard.queries().len(), 1);
}

#[test]
fn add_query_appends_placeholder() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    dashboard.apply(Action::AddQuery);

    assert_eq!(dashboard.queries(), ["Hurricane", "New Query"]);
    assert_eq!(dashboard.slots().len(), 2);
    assert_eq!(dashboard.slots()[1], Slot::Pending);
}

#[test]
fn remove_query_keeps_at_least_one() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    dashboard.apply(Action::RemoveQuery(0));

    assert_eq!(dashboard.queries(), ["Hurricane"]);
}

#[test]
fn remove_query_drops_the_matching_slot() {
    let mut dashboard = dashboard_with(&["A", "B", "C"]);
    dashboard.apply(Action::RemoveQuery(1));

    assert_eq!(dashboard.queries(), ["A", "C"]);
    assert_eq!(dashboard.slots().len(), 2);
}

#[test]
fn remove_query_out_of_range_is_a_noop() {
    let mut dashboard = dashboard_with(&["A", "B"]);
    dashboard.apply(Action::RemoveQuery(5));

    assert_eq!(dashboard.queries(), ["A", "B"]);
}

#[test]
fn set_query_text_overwrites_in_place() {
    let mut dashboard = dashboard_with(&["A", "B"]);
    dashboard.apply(Action::SetQueryText(1, "Tornado watch".to_string()));

    assert_eq!(dashboard.queries(), ["A", "Tornado watch"]);
}

#[test]
fn set_query_text_allows_empty_string() {
    let mut dashboard = dashboard_with(&["A"]);
    dashboard.apply(Action::SetQueryText(0, String::new()));

    assert_eq!(dashboard.queries(), [""]);
}

#[test]
fn set_query_text_out_of_range_is_a_noop() {
    let mut dashboard = dashboard_with(&["A"]);
    dashboard.apply(Action::SetQueryText(3, "nope".to_string()));

    assert_eq!(dashboard.queries(), ["A"]);
}

#[test]
fn saving_twice_appends_two_equal_entries() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    let result = sample_result();

    dashboard.apply(Action::SaveArticle(result.clone()));
    dashboard.apply(Action::SaveArticle(result));

    assert_eq!(dashboard.saved().len(), 2);
    assert_eq!(dashboard.saved()[0], dashboard.saved()[1]);
    assert_eq!(dashboard.saved()[0].title, "Hurricane latest");
}

#[test]
fn settings_actions_clamp_to_their_ranges() {
    let mut dashboard = dashboard_with(&["A"]);

    dashboard.apply(Action::SetRefreshInterval(0));
    assert_eq!(dashboard.refresh_interval_secs(), 1);
    dashboard.apply(Action::SetRefreshInterval(1000));
    assert_eq!(dashboard.refresh_interval_secs(), 300);

    dashboard.apply(Action::SetResultsPerQuery(0));
    assert_eq!(dashboard.results_per_query(), 1);
    dashboard.apply(Action::SetResultsPerQuery(50));
    assert_eq!(dashboard.results_per_query(), 10);
}

#[tokio::test(start_paused = true)]
async fn refresh_loads_results_sharing_one_timestamp() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    let provider = Arc::new(ScriptedProvider::new(vec![Scripted::Ok(items(3))]));
    let fetcher = Fetcher::new(provider);

    dashboard.refresh_all(&fetcher).await;

    let Slot::Loaded(results) = &dashboard.slots()[0] else {
        panic!("expected a loaded slot, got {:?}", dashboard.slots()[0]);
    };
    assert_eq!(results.len(), 3);
    let stamp = results[0].retrieved_at;
    assert!(results.iter().all(|r| r.retrieved_at == stamp));
}

#[tokio::test(start_paused = true)]
async fn one_failing_query_does_not_abort_the_cycle() {
    let mut dashboard = dashboard_with(&["A", "B"]);
    // Queries run in list order, so the script lines up per query.
    let provider = Arc::new(ScriptedProvider::new(vec![
        Scripted::Api("HTTP 500: boom".to_string()),
        Scripted::Ok(items(1)),
    ]));
    let fetcher = Fetcher::new(provider.clone());

    dashboard.refresh_all(&fetcher).await;

    assert!(matches!(&dashboard.slots()[0], Slot::Failed(msg) if msg.contains("boom")));
    assert!(matches!(&dashboard.slots()[1], Slot::Loaded(results) if results.len() == 1));
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn refresh_requests_the_configured_result_count() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    dashboard.apply(Action::SetResultsPerQuery(2));
    let provider = Arc::new(ScriptedProvider::new(vec![Scripted::Ok(items(5))]));
    let fetcher = Fetcher::new(provider);

    dashboard.refresh_all(&fetcher).await;

    assert!(matches!(&dashboard.slots()[0], Slot::Loaded(results) if results.len() == 2));
}

#[tokio::test(start_paused = true)]
async fn a_new_cycle_replaces_the_previous_slot_contents() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    let provider = Arc::new(ScriptedProvider::new(vec![
        Scripted::Ok(items(3)),
        Scripted::Ok(items(1)),
    ]));
    let fetcher = Fetcher::new(provider);

    dashboard.refresh_all(&fetcher).await;
    dashboard.refresh_all(&fetcher).await;

    assert!(matches!(&dashboard.slots()[0], Slot::Loaded(results) if results.len() == 1));
}

#[tokio::test(start_paused = true)]
async fn a_failed_query_recovers_on_the_next_cycle() {
    let mut dashboard = dashboard_with(&["Hurricane"]);
    let provider = Arc::new(ScriptedProvider::new(vec![
        Scripted::Api("HTTP 503: unavailable".to_string()),
        Scripted::Ok(items(2)),
    ]));
    let fetcher = Fetcher::new(provider);

    dashboard.refresh_all(&fetcher).await;
    assert!(matches!(&dashboard.slots()[0], Slot::Failed(_)));

    dashboard.refresh_all(&fetcher).await;
    assert!(matches!(&dashboard.slots()[0], Slot::Loaded(results) if results.len() == 2));
}
