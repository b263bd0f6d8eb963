//! End-to-end scenarios over the built-in adapters with a mock transport

use buildlight_core::test_support::{CapturedSink, MockTransport};
use buildlight_core::{
    BuildActivity, BuildOutcome, BuildProvider, ProviderConfig, TransportError,
};
use buildlight_providers::{TravisProvider, builtin_registry};
use std::sync::Arc;

/// Six repositories: number 4 finished passing, number 6 finished failing,
/// the rest are mid-build with no outcome yet.
fn six_builds_payload() -> String {
    let mut repositories = Vec::new();
    for i in 1..=6 {
        let entry = match i {
            4 => format!(
                r#"{{"slug": "acme/project-{i}", "last_build_id": {i}0,
                     "last_build_status": 0,
                     "last_build_finished_at": "2026-02-13T10:0{i}:00Z"}}"#
            ),
            6 => format!(
                r#"{{"slug": "acme/project-{i}", "last_build_id": {i}0,
                     "last_build_status": 1,
                     "last_build_finished_at": "2026-02-13T10:0{i}:00Z"}}"#
            ),
            _ => format!(
                r#"{{"slug": "acme/project-{i}", "last_build_id": {i}0,
                     "last_build_status": null,
                     "last_build_finished_at": null}}"#
            ),
        };
        repositories.push(entry);
    }
    format!("[{}]", repositories.join(","))
}

#[test]
fn six_build_scenario() {
    let transport = MockTransport::with_response(200, six_builds_payload());
    let provider = TravisProvider::with_transport(
        ProviderConfig::new("http://ci.example.org"),
        Arc::new(transport),
        Arc::new(CapturedSink::default()),
    )
    .unwrap();

    assert!(provider.refresh().is_some());
    let projects = provider.projects().unwrap();

    assert_eq!(projects.len(), 6);
    assert_eq!(projects[3].last_build_status, BuildOutcome::Passed);
    assert_eq!(projects[3].current_status, BuildActivity::Done);
    assert_eq!(projects[5].last_build_status, BuildOutcome::Failed);
    assert_eq!(projects[5].current_status, BuildActivity::Done);

    // The in-flight repositories are fully populated too.
    assert_eq!(projects[0].name, "project-1");
    assert_eq!(projects[0].current_status, BuildActivity::Building);
    assert_eq!(projects[0].last_build_status, BuildOutcome::Unknown);
}

#[test]
fn unreachable_upstream_degrades_to_no_data() {
    let transport = MockTransport::with_error(TransportError::ConnectionFailed {
        message: "connection refused".to_string(),
    });
    let sink = Arc::new(CapturedSink::default());
    let provider = TravisProvider::with_transport(
        ProviderConfig::new("http://ci.example.org"),
        Arc::new(transport),
        sink.clone(),
    )
    .unwrap();

    assert!(provider.refresh().is_none());
    assert!(provider.projects().unwrap().is_empty());

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("http://ci.example.org/repositories.json"));
}

#[test]
fn recovery_after_outage() {
    let transport = MockTransport::with_response(503, "maintenance");
    let sink = Arc::new(CapturedSink::default());
    let provider = TravisProvider::with_transport(
        ProviderConfig::new("http://ci.example.org"),
        Arc::new(transport.clone()),
        sink,
    )
    .unwrap();

    assert!(provider.refresh().is_none());

    transport.set_response(200, six_builds_payload());
    assert!(provider.refresh().is_some());
    assert_eq!(provider.projects().unwrap().len(), 6);
}

#[test]
fn registry_driven_construction() {
    let registry = builtin_registry();
    let table: buildlight_core::toml::Table =
        buildlight_core::toml::from_str(r#"url = "http://ci.example.org""#).unwrap();

    let provider = registry.create("travis", &table).unwrap();
    assert_eq!(provider.provider_name(), "travis");
    // Freshly constructed, never refreshed: no data, not an error.
    assert!(provider.projects().unwrap().is_empty());
}
