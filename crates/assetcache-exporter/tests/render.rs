//! Registry exposition format tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use assetcache_core::catalog::{catalog, MetricDef, MetricKind};
use assetcache_core::error::ErrorKind;
use assetcache_exporter::registry::MetricRegistry;

fn gauge(name: &'static str, help: &'static str) -> MetricDef {
    MetricDef {
        name,
        kind: MetricKind::Gauge,
        help,
        extract: |_| Ok(Vec::new()),
    }
}

#[test]
fn renders_help_type_and_samples() {
    let registry =
        MetricRegistry::from_catalog(&[gauge("assetcache_bytes_limit", "cache size limit")])
            .unwrap();
    registry
        .set("assetcache_bytes_limit", &[("server_guid", "abc")], 1000.0)
        .unwrap();

    let out = registry.render();
    assert!(out.contains("# HELP assetcache_bytes_limit cache size limit\n"));
    assert!(out.contains("# TYPE assetcache_bytes_limit gauge\n"));
    // Integral values render without a fractional part.
    assert!(out.contains("assetcache_bytes_limit{server_guid=\"abc\"} 1000\n"));
}

#[test]
fn counter_families_render_their_kind() {
    let def = MetricDef {
        name: "assetcache_bytes_dropped",
        kind: MetricKind::Counter,
        help: "number of bytes dropped from cache since the service was started",
        extract: |_| Ok(Vec::new()),
    };
    let registry = MetricRegistry::from_catalog(&[def]).unwrap();
    assert!(registry.render().contains("# TYPE assetcache_bytes_dropped counter\n"));
}

#[test]
fn families_render_in_registration_order() {
    let registry = MetricRegistry::from_catalog(&catalog()).unwrap();
    let out = registry.render();

    let first = out.find("# TYPE assetcache_bytes_limit ").unwrap();
    let mid = out.find("# TYPE assetcache_start_time_seconds ").unwrap();
    let last = out.find("# TYPE assetcache_bytes_stored ").unwrap();
    assert!(first < mid && mid < last);
}

#[test]
fn label_values_are_escaped() {
    let registry = MetricRegistry::from_catalog(&[gauge("m", "help")]).unwrap();
    registry
        .set("m", &[("server_guid", "a\"b\\c\nd")], 1.0)
        .unwrap();

    assert!(registry
        .render()
        .contains(r#"m{server_guid="a\"b\\c\nd"} 1"#));
}

#[test]
fn label_order_does_not_change_sample_identity() {
    let registry = MetricRegistry::from_catalog(&[gauge("m", "help")]).unwrap();
    registry
        .set("m", &[("to", "clients"), ("server_guid", "abc")], 5.0)
        .unwrap();

    assert_eq!(
        registry.get("m", &[("server_guid", "abc"), ("to", "clients")]),
        Some(5.0)
    );
    // Keys render in their canonical sorted order.
    assert!(registry
        .render()
        .contains(r#"m{server_guid="abc",to="clients"} 5"#));
}

#[test]
fn latest_write_wins() {
    let registry = MetricRegistry::from_catalog(&[gauge("m", "help")]).unwrap();
    registry.set("m", &[("server_guid", "abc")], 1.0).unwrap();
    registry.set("m", &[("server_guid", "abc")], 2.0).unwrap();

    assert_eq!(registry.get("m", &[("server_guid", "abc")]), Some(2.0));
    assert_eq!(registry.render().matches("\nm{").count(), 1);
}

#[test]
fn unknown_metric_update_is_an_error() {
    let registry = MetricRegistry::from_catalog(&[gauge("m", "help")]).unwrap();
    let err = registry.set("nope", &[], 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownMetric);
}

#[test]
fn duplicate_registration_is_a_config_error() {
    let mut registry = MetricRegistry::new();
    registry.register(&gauge("m", "help")).unwrap();
    let err = registry.register(&gauge("m", "help")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
