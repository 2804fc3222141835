// yard-zones/tests/export.rs

use fleet_client::InMemoryFleet;
use shared::{AlertLevel, RecordingAlerts, Zone, ZoneType};
use yard_zones::{ExportError, ExportFormat, ZoneClassifier};

#[tokio::test]
async fn test_export_to_dir_writes_dated_file() {
    let fleet = InMemoryFleet::new();
    fleet.insert(&ZoneType::new("z1", "Yard Move Zones")).unwrap();
    fleet.insert(&Zone::new("a", "North")).unwrap();
    let alerts = RecordingAlerts::new();
    let classifier = ZoneClassifier::activate(fleet, alerts.clone()).await.unwrap();
    alerts.take();

    let dir = tempfile::tempdir().unwrap();
    let path = classifier
        .export_to_dir(ExportFormat::Csv, dir.path())
        .unwrap();

    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("yard-move-zones-") && name.ends_with(".csv"));
    let body = std::fs::read_to_string(&path).unwrap();
    assert!(body.contains("\"North\",\"a\",\"Regular Zones\""));
    assert_eq!(alerts.of_level(AlertLevel::Success).len(), 1);
}

#[tokio::test]
async fn test_empty_export_is_refused() {
    let alerts = RecordingAlerts::new();
    let classifier = ZoneClassifier::activate(InMemoryFleet::new(), alerts.clone())
        .await
        .unwrap();
    alerts.take();

    let err = classifier.export(ExportFormat::Json).unwrap_err();
    assert!(matches!(err, ExportError::Empty));
    let info = alerts.of_level(AlertLevel::Info);
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].message, "No data to export");
}
