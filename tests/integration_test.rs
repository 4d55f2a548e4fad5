/// Integration tests for the application layer
mod test_utilities;

use chrono::{TimeZone, Utc};
use fleet_inventory::prelude::*;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::rc::Rc;
use test_utilities::mocks::*;

fn fixed_clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap())
}

fn demo_store() -> InMemoryInventory {
    InMemoryInventory::from_snapshot(
        InventorySnapshot::demo().unwrap(),
        IdStrategy::Sequential,
        Box::new(fixed_clock()),
    )
    .unwrap()
}

fn duplicate_urns(store: &InMemoryInventory) -> BTreeSet<String> {
    let platforms: Vec<Platform> = store.records().unwrap();
    AggregationService::find_duplicate_keys(&platforms, |p| p.urn.clone())
}

#[test]
fn test_duplicate_urn_lifecycle() {
    let mut store = InMemoryInventory::new();
    let project = store
        .insert(ProjectDraft::new("P1", ProjectStatus::Active))
        .unwrap();

    let a = store
        .insert(PlatformDraft::new(
            "Platform A",
            "1111111",
            PlatformType::HqServer,
            &project.id,
        ))
        .unwrap();
    store
        .insert(PlatformDraft::new(
            "Platform B",
            "1111111",
            PlatformType::MountedStation,
            &project.id,
        ))
        .unwrap();

    let expected: BTreeSet<String> = ["1111111".to_string()].into_iter().collect();
    assert_eq!(duplicate_urns(&store), expected);

    store.remove::<Platform>(&a.id).unwrap();
    assert!(duplicate_urns(&store).is_empty());
}

#[test]
fn test_second_delete_is_not_found() {
    let mut store = InMemoryInventory::new();
    let project = store
        .insert(ProjectDraft::new("FDC", ProjectStatus::Active))
        .unwrap();

    store.remove::<Project>(&project.id).unwrap();

    let error = store.remove::<Project>(&project.id).unwrap_err();
    assert!(error.is_not_found());

    let error = store
        .replace(&project.id, ProjectDraft::new("FDC", ProjectStatus::Completed))
        .unwrap_err();
    assert!(error.is_not_found());
}

#[test]
fn test_ids_are_not_reused_after_deletes() {
    let mut store = InMemoryInventory::new();
    let first = store
        .insert(ProjectDraft::new("One", ProjectStatus::Active))
        .unwrap();
    let second = store
        .insert(ProjectDraft::new("Two", ProjectStatus::Active))
        .unwrap();
    store.remove::<Project>(&first.id).unwrap();

    let third = store
        .insert(ProjectDraft::new("Three", ProjectStatus::Active))
        .unwrap();
    assert_ne!(third.id, first.id);
    assert_ne!(third.id, second.id);
}

#[test]
fn test_dangling_project_reference_is_rejected() {
    let mut store = InMemoryInventory::new();
    let error = store
        .insert(PlatformDraft::new(
            "Orphan",
            "3000001",
            PlatformType::HqServer,
            "missing",
        ))
        .unwrap_err();

    assert!(error.is_validation());
    assert!(store.records::<Platform>().unwrap().is_empty());
}

#[test]
fn test_project_delete_leaves_platforms_in_place() {
    let mut store = demo_store();
    store.remove::<Project>("3").unwrap();

    let platforms: Vec<Platform> = store.records().unwrap();
    assert_eq!(platforms.len(), 6);

    let use_case = DashboardUseCase::new(store, fixed_clock(), MockProgressReporter::new());
    let response = use_case
        .execute(ReportRequest::new(ReportView::Summary))
        .unwrap();

    match response.report {
        InventoryReport::Summary(view) => {
            assert!(view
                .platforms_by_project
                .iter()
                .any(|count| count.label == "Unknown Project"));
            assert!(view
                .critical_issues
                .iter()
                .any(|issue| issue.kind == "orphaned_platform"));
        }
        other => panic!("expected summary, got {:?}", other),
    }
}

#[test]
fn test_change_events_follow_mutations() {
    let mut store = InMemoryInventory::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let subscription = store.subscribe(Box::new(move |event: &ChangeEvent| {
        sink.borrow_mut()
            .push(format!("{} {} {}", event.kind, event.id, event.op))
    }));

    let project = store
        .insert(ProjectDraft::new("FDC", ProjectStatus::Active))
        .unwrap();
    store
        .replace(&project.id, ProjectDraft::new("FDC", ProjectStatus::Completed))
        .unwrap();

    // Rejected writes announce nothing
    let _ = store.remove::<Platform>("9");

    store.remove::<Project>(&project.id).unwrap();
    assert!(store.unsubscribe(subscription));
    store
        .insert(ProjectDraft::new("DITA", ProjectStatus::Pending))
        .unwrap();

    assert_eq!(
        *events.borrow(),
        vec![
            "Project 1 created".to_string(),
            "Project 1 updated".to_string(),
            "Project 1 deleted".to_string(),
        ]
    );
}

#[test]
fn test_summary_from_seed_reader() {
    let reader = MockSeedReader::new(InventorySnapshot::demo().unwrap());
    let snapshot = reader.read_snapshot(Path::new("fleet.json")).unwrap();
    let store =
        InMemoryInventory::from_snapshot(snapshot, IdStrategy::Uuid, Box::new(fixed_clock()))
            .unwrap();
    let reporter = MockProgressReporter::new();

    let use_case = DashboardUseCase::new(store, fixed_clock(), reporter.clone());
    let response = use_case
        .execute(ReportRequest::new(ReportView::Summary))
        .unwrap();

    assert_eq!(response.critical_issue_count, 2);
    match &response.report {
        InventoryReport::Summary(view) => {
            assert_eq!(view.total_platforms, 6);
            assert_eq!(view.active_deployments, 7);
            assert_eq!(view.recent_deployments, 3);
        }
        other => panic!("expected summary, got {:?}", other),
    }

    let messages = reporter.get_messages();
    assert!(messages.iter().any(|m| m.starts_with("Progress: 1/3")));
    assert!(messages
        .iter()
        .any(|m| m.starts_with("Error: ") && m.contains("2 critical issue")));
    assert!(messages.last().unwrap().starts_with("Completed: "));
}

#[test]
fn test_seed_reader_failure_propagates() {
    let reader = MockSeedReader::with_failure();
    let error = reader
        .read_snapshot(Path::new("fleet.json"))
        .unwrap_err();
    assert!(error.to_string().contains("Mock seed read failure"));
}

#[test]
fn test_filtered_platform_report_renders_json() {
    let use_case = DashboardUseCase::new(demo_store(), fixed_clock(), MockProgressReporter::new());
    let request = ReportRequest::new(ReportView::Platforms {
        filter: fleet_inventory::inventory::services::PlatformFilter::new()
            .with_type(Selector::Only(PlatformType::MountedStation)),
        grouping: Some(PlatformGrouping::Project),
    });

    let response = use_case.build_report(request).unwrap();
    let output = JsonFormatter::new().format(&response.report).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["report"], "platforms");
    for group in json["data"].as_array().unwrap() {
        for platform in group["platforms"].as_array().unwrap() {
            assert_eq!(platform["platform_type"], "Mounted Station");
        }
    }
}

#[test]
fn test_registration_warns_on_duplicate_urn() {
    let mut registry = PlatformRegistryUseCase::new(demo_store());

    let registration = registry
        .register_platform(PlatformDraft::new(
            "Relay Node",
            "2000001",
            PlatformType::MountedStation,
            "2",
        ))
        .unwrap();

    let warning = registration.warning.unwrap();
    assert_eq!(warning.urn, "2000001");
    assert_eq!(warning.existing_platform_ids.len(), 2);
    assert_eq!(registration.platform.id, "7");
    assert_eq!(
        registry.store().records::<Platform>().unwrap().len(),
        7
    );
}

#[test]
fn test_api_client_uses_injected_token_store() {
    let client = ApiClient::new(
        "https://api.example.com/",
        "/login",
        MockTokenStore::with_token("secret"),
    )
    .unwrap();

    assert_eq!(client.base_url(), "https://api.example.com");
    assert_eq!(
        client.tokens().load().unwrap(),
        Some("secret".to_string())
    );
}

proptest! {
    #[test]
    fn prop_ids_stay_unique_across_deletes(ops in proptest::collection::vec(any::<bool>(), 1..40)) {
        let mut store = InMemoryInventory::new();
        let mut live: Vec<String> = Vec::new();
        let mut issued: HashSet<String> = HashSet::new();

        for create in ops {
            if create || live.is_empty() {
                let project = store
                    .insert(ProjectDraft::new("P", ProjectStatus::Active))
                    .unwrap();
                prop_assert!(issued.insert(project.id.clone()));
                live.push(project.id);
            } else {
                let id = live.remove(0);
                store.remove::<Project>(&id).unwrap();
            }
        }

        let projects: Vec<Project> = store.records().unwrap();
        prop_assert_eq!(projects.len(), live.len());
    }
}
