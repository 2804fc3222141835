//! Display rows

use fleet_client::SessionContext;
use serde::Serialize;
use shared::AddInData;
use shared::export::csv_row;

/// Placeholder for a missing value
pub const NOT_AVAILABLE: &str = "N/A";

pub const CSV_HEADER: [&str; 5] = [
    "Asset Name",
    "Ruckit Device",
    "Ruckit Driver",
    "Ruckit Token",
    "GT Device ID",
];

/// One mapping as shown in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    pub asset_name: String,
    pub ri_device: String,
    pub ri_driver: String,
    pub ri_token: String,
    /// Platform device id; without it the row has no asset link
    pub gt_device: Option<String>,
}

impl MappingRow {
    pub fn from_record(record: &AddInData) -> Self {
        let or_na = |key: &str| record.detail(key).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            asset_name: or_na("name"),
            ri_device: or_na("ri-device"),
            ri_driver: or_na("ri-driver"),
            ri_token: or_na("ri-token"),
            gt_device: record.detail("gt-device"),
        }
    }

    /// Link to the mapped device's page
    pub fn device_url(&self, session: &SessionContext) -> Option<String> {
        self.gt_device.as_deref().map(|id| session.device_url(id))
    }

    pub fn to_csv_line(&self) -> String {
        csv_row([
            self.asset_name.as_str(),
            self.ri_device.as_str(),
            self.ri_driver.as_str(),
            self.ri_token.as_str(),
            self.gt_device.as_deref().unwrap_or(NOT_AVAILABLE),
        ])
    }
}
