// yard-zones/tests/classifier.rs
// Zone classifier against the in-memory fleet API

use fleet_client::{InMemoryFleet, Method};
use shared::{AlertLevel, RecordingAlerts, Zone, ZoneType, ZoneTypeRef};
use std::time::Duration;
use yard_zones::{LoadOutcome, MoveError, ZoneClassifier, ZoneList};

type Classifier = ZoneClassifier<InMemoryFleet, RecordingAlerts>;

fn scenario_fleet() -> InMemoryFleet {
    let fleet = InMemoryFleet::new();
    fleet.insert(&ZoneType::new("z1", "Yard Move Zones")).unwrap();
    fleet.insert(&Zone::new("a", "North")).unwrap();
    fleet
        .insert(&Zone::new("b", "South").with_zone_type(ZoneTypeRef::custom("z1")))
        .unwrap();
    fleet
}

async fn activate(fleet: &InMemoryFleet) -> (Classifier, RecordingAlerts) {
    let alerts = RecordingAlerts::new();
    let classifier = ZoneClassifier::activate(fleet.clone(), alerts.clone())
        .await
        .unwrap();
    alerts.take();
    (classifier, alerts)
}

fn names(classifier: &Classifier, list: ZoneList) -> Vec<String> {
    classifier.zones(list).into_iter().map(|z| z.name).collect()
}

fn assert_disjoint_cover(classifier: &Classifier, fleet: &InMemoryFleet) {
    let partition = classifier.partition();
    for zone in partition.regular() {
        assert!(!partition.yard_move().iter().any(|z| z.id == zone.id));
    }
    let mut local: Vec<String> = partition.iter().map(|(_, z)| z.id.clone()).collect();
    let mut remote: Vec<String> = fleet
        .records::<Zone>()
        .unwrap()
        .into_iter()
        .map(|z| z.id)
        .collect();
    local.sort();
    remote.sort();
    assert_eq!(local, remote);
}

#[tokio::test]
async fn test_initial_partition() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;

    assert_eq!(names(&classifier, ZoneList::Regular), ["North"]);
    assert_eq!(names(&classifier, ZoneList::YardMove), ["South"]);
    assert_disjoint_cover(&classifier, &fleet);
}

#[tokio::test]
async fn test_move_into_yard_move_appends_and_persists() {
    let fleet = scenario_fleet();
    let (classifier, alerts) = activate(&fleet).await;

    let outcome = classifier
        .move_zone("a", ZoneList::YardMove)
        .await
        .unwrap();
    assert_eq!(outcome.from, ZoneList::Regular);
    assert_eq!(outcome.zone_name, "North");

    assert!(names(&classifier, ZoneList::Regular).is_empty());
    assert_eq!(names(&classifier, ZoneList::YardMove), ["South", "North"]);
    assert!(classifier.find("a").unwrap().1.has_zone_type("z1"));

    let stored: Zone = fleet.record("a").unwrap().unwrap();
    assert!(stored.has_zone_type("z1"));

    let success = alerts.of_level(AlertLevel::Success);
    assert_eq!(success.len(), 1);
    assert!(success[0].message.contains("North"));
    assert_disjoint_cover(&classifier, &fleet);
}

#[tokio::test]
async fn test_failed_update_leaves_state_unchanged() {
    let fleet = scenario_fleet();
    let (classifier, alerts) = activate(&fleet).await;
    let before = classifier.partition();

    fleet.fail_next::<Zone>(Method::Set, "database offline");
    let err = classifier
        .move_zone("a", ZoneList::YardMove)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::Update { .. }));

    assert_eq!(classifier.partition(), before);
    assert_eq!(names(&classifier, ZoneList::Regular), ["North"]);
    assert_eq!(names(&classifier, ZoneList::YardMove), ["South"]);

    let errors = alerts.of_level(AlertLevel::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("North"));

    let stored: Zone = fleet.record("a").unwrap().unwrap();
    assert!(!stored.has_zone_type("z1"));
}

#[tokio::test]
async fn test_failed_refetch_leaves_state_unchanged() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;
    let before = classifier.partition();

    fleet.fail_next::<Zone>(Method::Get, "timeout");
    let err = classifier
        .move_zone("b", ZoneList::Regular)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::Fetch { .. }));
    assert_eq!(classifier.partition(), before);
    assert_eq!(fleet.call_count(Method::Set), 0);
}

#[tokio::test]
async fn test_zone_deleted_remotely() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;
    let before = classifier.partition();

    fleet.remove::<Zone>("a");
    let err = classifier
        .move_zone("a", ZoneList::YardMove)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::Vanished { .. }));
    assert_eq!(classifier.partition(), before);
}

#[tokio::test]
async fn test_move_uses_fresh_version_token() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;

    // Someone else edited the zone after our load
    fleet.bump_version::<Zone>("a");

    classifier
        .move_zone("a", ZoneList::YardMove)
        .await
        .unwrap();
    assert_eq!(classifier.find("a").unwrap().0, ZoneList::YardMove);
}

#[tokio::test]
async fn test_round_trip_restores_zone_types() {
    let fleet = InMemoryFleet::new();
    fleet.insert(&ZoneType::new("z1", "Yard Move Zones")).unwrap();
    let original = Zone::new("a", "North")
        .with_zone_type(ZoneTypeRef::Builtin("ZoneTypeCustomerId".into()))
        .with_zone_type(ZoneTypeRef::custom("t9"));
    fleet.insert(&original).unwrap();
    let (classifier, _) = activate(&fleet).await;

    classifier.add_to_yard_move("a").await.unwrap();
    classifier.remove_from_yard_move("a").await.unwrap();

    let (list, zone) = classifier.find("a").unwrap();
    assert_eq!(list, ZoneList::Regular);
    assert_eq!(zone.zone_types, original.zone_types);
    let stored: Zone = fleet.record("a").unwrap().unwrap();
    assert_eq!(stored.zone_types, original.zone_types);
}

#[tokio::test]
async fn test_unmodeled_fields_survive_a_move() {
    let fleet = scenario_fleet();
    let mut zone = Zone::new("c", "Depot");
    zone.extra
        .insert("externalReference".into(), serde_json::json!("yard-7"));
    fleet.insert(&zone).unwrap();
    let (classifier, _) = activate(&fleet).await;

    classifier
        .move_zone("c", ZoneList::YardMove)
        .await
        .unwrap();

    let stored: Zone = fleet.record("c").unwrap().unwrap();
    assert_eq!(
        stored.extra.get("externalReference"),
        Some(&serde_json::json!("yard-7"))
    );
}

#[tokio::test]
async fn test_missing_category_degrades_to_regular_only() {
    let fleet = InMemoryFleet::new();
    fleet.insert(&ZoneType::new("t1", "Customers")).unwrap();
    fleet.insert(&Zone::new("a", "North")).unwrap();
    fleet
        .insert(&Zone::new("b", "South").with_zone_type(ZoneTypeRef::custom("z1")))
        .unwrap();

    let alerts = RecordingAlerts::new();
    let classifier = ZoneClassifier::activate(fleet.clone(), alerts.clone())
        .await
        .unwrap();

    assert_eq!(names(&classifier, ZoneList::Regular), ["North", "South"]);
    assert!(classifier.zones(ZoneList::YardMove).is_empty());
    assert_eq!(alerts.of_level(AlertLevel::Warning).len(), 1);

    // No mutation without the category, and no network call either
    let calls = fleet.calls().len();
    let err = classifier
        .move_zone("a", ZoneList::YardMove)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::CategoryMissing));
    assert!(err.is_precondition());
    assert_eq!(fleet.calls().len(), calls);

    // One warning per load
    alerts.take();
    classifier.refresh().await.unwrap();
    assert_eq!(alerts.of_level(AlertLevel::Warning).len(), 1);
}

#[tokio::test]
async fn test_move_into_own_list_is_rejected_without_network() {
    let fleet = scenario_fleet();
    let (classifier, alerts) = activate(&fleet).await;
    let calls = fleet.calls().len();

    let err = classifier
        .move_zone("b", ZoneList::YardMove)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::AlreadyInList { .. }));

    let err = classifier
        .move_zone("zz", ZoneList::YardMove)
        .await
        .unwrap_err();
    assert!(matches!(err, MoveError::UnknownZone(_)));

    assert_eq!(fleet.calls().len(), calls);
    assert!(alerts.alerts().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_second_move_of_same_zone_rejected_while_first_in_flight() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;

    // Slow re-fetch keeps the first move in flight
    fleet.delay_next_calls([Duration::from_millis(200)]);
    let (first, second) = tokio::join!(
        classifier.move_zone("a", ZoneList::YardMove),
        classifier.move_zone("a", ZoneList::YardMove),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(MoveError::InFlight { .. })));
    assert!(!classifier.is_moving("a"));
    assert_eq!(fleet.call_count(Method::Set), 1);
    assert_eq!(names(&classifier, ZoneList::YardMove), ["South", "North"]);
}

#[tokio::test(start_paused = true)]
async fn test_moves_of_different_zones_overlap() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;

    fleet.delay_next_calls([Duration::from_millis(200)]);
    let (north, south) = tokio::join!(
        classifier.move_zone("a", ZoneList::YardMove),
        classifier.move_zone("b", ZoneList::Regular),
    );
    assert!(north.is_ok());
    assert!(south.is_ok());

    // South finished first, then North
    assert_eq!(names(&classifier, ZoneList::Regular), ["South"]);
    assert_eq!(names(&classifier, ZoneList::YardMove), ["North"]);
    assert_disjoint_cover(&classifier, &fleet);
}

#[tokio::test(start_paused = true)]
async fn test_superseded_load_is_discarded() {
    let fleet = scenario_fleet();
    let classifier = ZoneClassifier::new(fleet.clone(), RecordingAlerts::new());

    // First load's two fetches are slow; second load sees a new zone
    fleet.delay_next_calls([Duration::from_millis(200), Duration::from_millis(200)]);
    let fast = async {
        fleet.insert(&Zone::new("c", "East")).unwrap();
        classifier.refresh().await
    };
    let (slow, fast) = tokio::join!(classifier.refresh(), fast);

    assert_eq!(slow.unwrap(), LoadOutcome::Superseded);
    assert!(matches!(
        fast.unwrap(),
        LoadOutcome::Loaded { zones: 3, .. }
    ));
    assert_eq!(names(&classifier, ZoneList::Regular), ["North", "East"]);
}

#[tokio::test(start_paused = true)]
async fn test_load_overtaken_by_move_is_discarded() {
    let fleet = scenario_fleet();
    let (classifier, _) = activate(&fleet).await;

    // Both load fetches answer from the store as it was before the move
    fleet.delay_next_calls([Duration::from_millis(200), Duration::from_millis(200)]);
    let moved = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        classifier.move_zone("a", ZoneList::YardMove).await
    };
    let (load, moved) = tokio::join!(classifier.refresh(), moved);

    assert!(moved.is_ok());
    assert_eq!(load.unwrap(), LoadOutcome::Superseded);

    let remote: Zone = fleet.record("a").unwrap().unwrap();
    assert!(remote.has_zone_type("z1"));
    let (list, local) = classifier.find("a").unwrap();
    assert_eq!(list, ZoneList::YardMove);
    assert!(local.has_zone_type("z1"));

    // A load issued after the move is applied again
    assert!(matches!(
        classifier.refresh().await.unwrap(),
        LoadOutcome::Loaded { yard_move_zones: 2, .. }
    ));
    assert_eq!(names(&classifier, ZoneList::YardMove), ["North", "South"]);
}

#[tokio::test]
async fn test_refresh_announces_loading() {
    let fleet = scenario_fleet();
    let (classifier, alerts) = activate(&fleet).await;

    classifier.refresh().await.unwrap();
    let messages: Vec<_> = alerts.take().into_iter().map(|a| a.message).collect();
    assert_eq!(messages, ["Loading zones...", "Successfully loaded 2 zones"]);
}

#[tokio::test]
async fn test_snapshot_reflects_search_and_moves() {
    let fleet = scenario_fleet();
    fleet.insert(&Zone::new("c", "Northeast")).unwrap();
    let (classifier, _) = activate(&fleet).await;

    classifier.set_search(ZoneList::Regular, "east");
    let snapshot = classifier.snapshot();
    assert_eq!(snapshot.regular.total, 2);
    assert_eq!(snapshot.regular.rows.len(), 1);
    assert_eq!(snapshot.regular.rows[0].name, "Northeast");
    assert_eq!(snapshot.yard_move.title, "Yard Move Zones");

    classifier
        .move_zone("c", ZoneList::YardMove)
        .await
        .unwrap();
    let snapshot = classifier.snapshot();
    assert!(snapshot.regular.rows.is_empty());
    assert_eq!(snapshot.stats.yard_move, 2);
    assert_eq!(snapshot.stats.visible_regular, 0);
}
