//! Zone export (CSV / JSON)

use crate::partition::{ZoneList, ZonePartition};
use crate::{ExportError, ZoneClassifier};
use chrono::NaiveDate;
use fleet_client::FleetApi;
use serde::Serialize;
use shared::export::{csv_document, csv_row, dated_file_name};
use shared::{AlertSink, GeoPoint};
use std::path::{Path, PathBuf};

/// File name prefix of zone exports
pub const EXPORT_PREFIX: &str = "yard-move-zones";

const CSV_HEADER: [&str; 5] = ["Zone Name", "Zone ID", "Classification", "Zone Types", "Points"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// `yard-move-zones-YYYY-MM-DD.{csv,json}`
    pub fn file_name(self, date: NaiveDate) -> String {
        dated_file_name(EXPORT_PREFIX, date, self.extension())
    }
}

/// One exported zone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneExportRow {
    pub id: String,
    pub name: String,
    pub classification: ZoneList,
    pub zone_types: Vec<String>,
    pub points: Vec<GeoPoint>,
}

/// Every zone, regular list first, each list in its own order
pub fn export_rows(partition: &ZonePartition) -> Vec<ZoneExportRow> {
    partition
        .iter()
        .map(|(list, zone)| ZoneExportRow {
            id: zone.id.clone(),
            name: zone.name.clone(),
            classification: list,
            zone_types: zone.zone_type_ids().map(str::to_string).collect(),
            points: zone.points.clone(),
        })
        .collect()
}

pub fn to_csv(rows: &[ZoneExportRow]) -> String {
    csv_document(
        &CSV_HEADER,
        rows.iter().map(|row| {
            csv_row([
                row.name.as_str(),
                row.id.as_str(),
                row.classification.title(),
                row.zone_types.join(";").as_str(),
                row.points.len().to_string().as_str(),
            ])
        }),
    )
}

pub fn to_json(rows: &[ZoneExportRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

pub fn render(rows: &[ZoneExportRow], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => Ok(to_csv(rows)),
        ExportFormat::Json => to_json(rows),
    }
}

impl<A: FleetApi, N: AlertSink> ZoneClassifier<A, N> {
    /// Export all loaded zones; refuses an empty set
    pub fn export(&self, format: ExportFormat) -> Result<String, ExportError> {
        let rows = export_rows(&self.state.read().partition);
        if rows.is_empty() {
            self.alerts.info("No data to export");
            return Err(ExportError::Empty);
        }
        render(&rows, format)
    }

    /// Write an export into `dir` under today's dated file name
    pub fn export_to_dir(&self, format: ExportFormat, dir: &Path) -> Result<PathBuf, ExportError> {
        let body = self.export(format)?;
        let path = dir.join(format.file_name(chrono::Local::now().date_naive()));
        if let Err(err) = std::fs::write(&path, body) {
            tracing::error!(path = %path.display(), error = %err, "Export failed");
            self.alerts.error(format!("Export failed: {}", err));
            return Err(err.into());
        }
        tracing::info!(path = %path.display(), "Zones exported");
        self.alerts.success("Data exported successfully");
        Ok(path)
    }
}
