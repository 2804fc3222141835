// asset-mappings/tests/viewer.rs

use asset_mappings::{AssetMappingViewer, ExportError, NOT_AVAILABLE};
use fleet_client::{InMemoryFleet, Method};
use shared::{AddInData, AlertLevel, RecordingAlerts};
use serde_json::json;

fn mapping(id: &str, details: serde_json::Value) -> AddInData {
    serde_json::from_value(json!({ "id": id, "details": details })).unwrap()
}

fn fleet() -> InMemoryFleet {
    let fleet = InMemoryFleet::new();
    fleet
        .insert(&mapping(
            "m1",
            json!({
                "type": "ri-device",
                "name": "Truck 12",
                "ri-device": "RI-881",
                "ri-driver": "D. Ortiz",
                "ri-token": "tok-1",
                "gt-device": "b2C"
            }),
        ))
        .unwrap();
    fleet
        .insert(&mapping("m2", json!({ "type": "ri-device", "name": "Loader 3" })))
        .unwrap();
    // Other add-in data is not a mapping
    fleet
        .insert(&mapping("x1", json!({ "type": "settings", "theme": "dark" })))
        .unwrap();
    fleet
}

#[tokio::test]
async fn test_load_fetches_only_mappings() {
    let alerts = RecordingAlerts::new();
    let viewer = AssetMappingViewer::new(fleet(), alerts.clone());

    assert_eq!(viewer.load().await, 2);
    let rows = viewer.rows();
    assert_eq!(rows[0].asset_name, "Truck 12");
    assert_eq!(rows[0].gt_device.as_deref(), Some("b2C"));
    assert_eq!(rows[1].ri_driver, NOT_AVAILABLE);
    assert_eq!(viewer.summary(), "Showing 2 assets");

    let messages: Vec<_> = alerts.alerts().into_iter().map(|a| a.message).collect();
    assert_eq!(
        messages,
        ["Loading Ruckit assets...", "Successfully loaded 2 Ruckit assets"]
    );
}

#[tokio::test]
async fn test_fetch_error_shows_empty_table() {
    let fleet = fleet();
    fleet.fail_next::<AddInData>(Method::Get, "offline");
    let alerts = RecordingAlerts::new();
    let viewer = AssetMappingViewer::new(fleet, alerts.clone());

    assert_eq!(viewer.load().await, 0);
    assert!(viewer.is_empty());
    assert_eq!(viewer.summary(), "Showing 0 assets");
    assert_eq!(alerts.of_level(AlertLevel::Error).len(), 1);
    assert_eq!(
        alerts.alerts().last().unwrap().message,
        "No Ruckit assets found"
    );
}

#[tokio::test]
async fn test_csv_export() {
    let viewer = AssetMappingViewer::new(fleet(), RecordingAlerts::new());
    viewer.load().await;

    let csv = viewer.to_csv().unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines,
        [
            "Asset Name,Ruckit Device,Ruckit Driver,Ruckit Token,GT Device ID",
            "\"Truck 12\",\"RI-881\",\"D. Ortiz\",\"tok-1\",\"b2C\"",
            "\"Loader 3\",\"N/A\",\"N/A\",\"N/A\",\"N/A\"",
        ]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = viewer.export_to_dir(dir.path()).unwrap();
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("ruckit-assets-") && name.ends_with(".csv"));
    assert_eq!(std::fs::read_to_string(path).unwrap(), csv);
}

#[tokio::test]
async fn test_empty_export_is_refused() {
    let alerts = RecordingAlerts::new();
    let viewer = AssetMappingViewer::new(InMemoryFleet::new(), alerts.clone());
    viewer.load().await;
    alerts.take();

    assert!(matches!(viewer.to_csv(), Err(ExportError::Empty)));
    assert_eq!(alerts.alerts()[0].message, "No data to export");
}

#[tokio::test]
async fn test_single_asset_summary() {
    let fleet = InMemoryFleet::new();
    fleet
        .insert(&mapping("m1", json!({ "type": "ri-device", "name": "Truck 12" })))
        .unwrap();
    let viewer = AssetMappingViewer::new(fleet, RecordingAlerts::new());
    viewer.load().await;
    assert_eq!(viewer.summary(), "Showing 1 asset");
}
