//! Integration tests for the map aggregate.
//!
//! These drive `Magma::aggregate` end to end over mock pages:
//! 1. Status table fetch
//! 2. One registry read
//! 3. Bounded detail fan-out
//! 4. Join by normalized name

use std::sync::Arc;
use std::time::Duration;

use magma::testing::{
    detail_link, map_summary_html, status_table_html, MemoryRegistry, MockFetcher,
};
use magma::{AggregateConfig, FailurePolicy, FetchError, Magma, ScrapeError, SourceConfig};

const STATUS_URL: &str = "https://magma.esdm.go.id/v1/gunung-api/tingkat-aktivitas";

/// Helper to serve a status table plus a summary page for every mountain.
fn fetcher_for(groups: &[(&str, u32, &[&str])]) -> MockFetcher {
    let fetcher = MockFetcher::new().with_page(STATUS_URL, status_table_html(groups));
    for (_, _, mounts) in groups {
        for name in mounts.iter() {
            fetcher.add_page(detail_link(name), map_summary_html(name));
        }
    }
    fetcher
}

fn magma(fetcher: &MockFetcher, registry: &Arc<MemoryRegistry>, config: AggregateConfig) -> Magma {
    Magma::new(
        Arc::new(fetcher.clone()),
        registry.clone(),
        SourceConfig::default(),
    )
    .with_aggregate_config(config)
}

#[tokio::test]
async fn test_registered_mountain_is_enriched_others_kept_bare() {
    let fetcher = fetcher_for(&[
        ("Level II (Waspada)", 3, &["Merapi", "Semeru", "Ibu"][..]),
        ("Level I (Normal)", 0, &[][..]),
    ]);
    let registry = Arc::new(MemoryRegistry::new());
    registry.insert("Merapi", -7.5, 110.4, None);

    let report = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap();

    assert_eq!(report.groups.len(), 2);
    assert_eq!(report.groups[0].count, 3);
    assert_eq!(report.groups[1].count, 0);
    assert!(report.groups[1].mounts.is_empty());
    assert!(report.failures.is_empty());

    let merapi = report.find("Merapi").unwrap();
    let location = merapi.geolocation().unwrap();
    assert_eq!((location.latitude, location.longitude), (-7.5, 110.4));
    assert_eq!(
        merapi.enrichment.as_ref().map(|e| e.status.as_str()),
        Some("Level II (Waspada)")
    );

    assert!(report.find("Semeru").unwrap().enrichment.is_none());
    assert!(report.find("Ibu").unwrap().enrichment.is_none());

    let json = serde_json::to_value(&report).unwrap();
    let mounts = &json["aktivitas"][0]["mounts"];
    assert_eq!(mounts[0]["latitude"], -7.5);
    assert_eq!(mounts[0]["laporan"]["visual"], "Asap kawah putih tipis.");
    assert_eq!(mounts[1]["name"], "Semeru");
    assert!(mounts[1].get("latitude").is_none());
    assert!(mounts[2].get("longitude").is_none());
}

#[tokio::test]
async fn test_fan_out_fetches_each_mountain_once_and_registry_once() {
    let fetcher = fetcher_for(&[
        ("Level III (Siaga)", 2, &["Ibu", "Lewotobi Laki-laki"][..]),
        ("Level II (Waspada)", 3, &["Merapi", "Semeru", "Dempo"][..]),
    ]);
    let registry = Arc::new(MemoryRegistry::new());
    registry.insert("Semeru", -8.108, 112.92, Some("SMR"));

    let report = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap();

    // 1 status table + 5 detail pages
    assert_eq!(fetcher.call_count(), 6);
    for name in ["Ibu", "Lewotobi Laki-laki", "Merapi", "Semeru", "Dempo"] {
        assert_eq!(fetcher.calls_to(&detail_link(name)), 1, "{name}");
    }
    assert_eq!(registry.query_count(), 1);
    assert_eq!(report.mounts().count(), 5);

    let semeru = report.find("Semeru").unwrap();
    assert_eq!(
        semeru.geolocation().and_then(|g| g.code.as_deref()),
        Some("SMR")
    );
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let names = ["Merapi", "Semeru", "Ibu", "Dempo", "Marapi", "Karangetang"];
    let fetcher = fetcher_for(&[("Level II (Waspada)", 6, &names[..])])
        .with_default_delay(Duration::from_millis(20));
    let registry = Arc::new(MemoryRegistry::new());

    let config = AggregateConfig::new().with_concurrency(2);
    let report = magma(&fetcher, &registry, config).aggregate().await.unwrap();

    assert_eq!(report.mounts().count(), 6);
    assert!(fetcher.max_in_flight() <= 2);
    assert_eq!(fetcher.max_in_flight(), 2);
}

#[tokio::test]
async fn test_order_follows_listing_not_completion() {
    let names = ["Merapi", "Semeru", "Ibu"];
    let fetcher = fetcher_for(&[("Level II (Waspada)", 3, &names[..])])
        .with_delay(detail_link("Merapi"), Duration::from_millis(60))
        .with_delay(detail_link("Semeru"), Duration::from_millis(30));
    let registry = Arc::new(MemoryRegistry::new());

    let report = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap();

    let order: Vec<&str> = report.mounts().map(|m| m.mount.name.as_str()).collect();
    assert_eq!(order, names);
}

#[tokio::test]
async fn test_failures_are_isolated_under_best_effort() {
    let fetcher = fetcher_for(&[("Level II (Waspada)", 3, &["Merapi", "Semeru", "Ibu"][..])]);
    fetcher.add_status(detail_link("Semeru"), 502);
    fetcher.add_page(detail_link("Ibu"), "<html><body>Sedang pemeliharaan</body></html>");

    let registry = Arc::new(MemoryRegistry::new());
    registry.insert("Merapi", -7.5, 110.4, None);
    registry.insert("Semeru", -8.1, 112.9, None);

    let report = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap();

    assert_eq!(report.mounts().count(), 3);
    assert!(report.find("Merapi").unwrap().enrichment.is_some());
    assert!(report.find("Semeru").unwrap().enrichment.is_none());
    assert!(report.find("Ibu").unwrap().enrichment.is_none());

    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].name, "Semeru");
    assert!(report.failures[0].error.is_fetch());
    assert_eq!(report.failures[1].name, "Ibu");
    assert!(report.failures[1].error.is_parse());
}

#[tokio::test]
async fn test_slow_detail_times_out() {
    let fetcher = fetcher_for(&[("Level III (Siaga)", 2, &["Ibu", "Merapi"][..])])
        .with_delay(detail_link("Ibu"), Duration::from_secs(5));
    let registry = Arc::new(MemoryRegistry::new());
    registry.insert("Merapi", -7.5, 110.4, None);

    let config = AggregateConfig::new().with_fetch_timeout(Duration::from_millis(50));
    let report = magma(&fetcher, &registry, config).aggregate().await.unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        ScrapeError::Fetch(FetchError::Timeout { .. })
    ));
    assert!(report.find("Merapi").unwrap().enrichment.is_some());
}

#[tokio::test]
async fn test_fail_fast_returns_first_error() {
    let fetcher = fetcher_for(&[("Level II (Waspada)", 2, &["Merapi", "Semeru"][..])]);
    fetcher.add_status(detail_link("Semeru"), 500);
    let registry = Arc::new(MemoryRegistry::new());

    let config = AggregateConfig::new().with_policy(FailurePolicy::FailFast);
    let err = magma(&fetcher, &registry, config).aggregate().await.unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Fetch(FetchError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_status_table_failure_aborts() {
    let fetcher = MockFetcher::new().with_status(STATUS_URL, 503);
    let registry = Arc::new(MemoryRegistry::new());

    let err = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap_err();

    assert!(err.is_fetch());
    assert_eq!(registry.query_count(), 0);
}

#[tokio::test]
async fn test_foreign_link_is_never_fetched() {
    let html = r#"<table><tbody>
        <tr><td><a>Level II (Waspada)</a><span>Waspada</span></td><td>1</td></tr>
        <tr><td>Merapi - Jawa Tengah <a href="http://10.0.0.1/admin">Laporan</a></td></tr>
    </tbody></table>"#;
    let fetcher = MockFetcher::new().with_page(STATUS_URL, html);
    let registry = Arc::new(MemoryRegistry::new());

    let report = magma(&fetcher, &registry, AggregateConfig::new())
        .aggregate()
        .await
        .unwrap();

    assert_eq!(fetcher.calls(), vec![STATUS_URL.to_string()]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, ScrapeError::Source(_)));
    assert_eq!(report.find("Merapi").unwrap().mount.location, "Jawa Tengah");
}
