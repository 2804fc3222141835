//! Asset-mapping viewer state

use crate::row::{CSV_HEADER, MappingRow};
use crate::{ExportError, ExportResult};
use fleet_client::FleetApi;
use parking_lot::RwLock;
use shared::export::{csv_document, dated_file_name};
use shared::{AddInData, AlertSink, Search, TracingAlerts};
use std::path::{Path, PathBuf};

/// Server-side filter selecting mapping records
pub const MAPPING_WHERE_CLAUSE: &str = "type = \"ri-device\"";

/// File name prefix of mapping exports
pub const EXPORT_PREFIX: &str = "ruckit-assets";

/// Mapping records of one session
pub struct AssetMappingViewer<A, N = TracingAlerts> {
    api: A,
    alerts: N,
    mappings: RwLock<Vec<AddInData>>,
}

impl<A: FleetApi, N: AlertSink> AssetMappingViewer<A, N> {
    pub fn new(api: A, alerts: N) -> Self {
        Self {
            api,
            alerts,
            mappings: RwLock::new(Vec::new()),
        }
    }

    /// (Re)load mapping records. A fetch error is reported and shown as an
    /// empty table; it never propagates.
    pub async fn load(&self) -> usize {
        self.alerts.info("Loading Ruckit assets...");

        let search = Search::where_clause(MAPPING_WHERE_CLAUSE);
        let mappings = match self.api.get::<AddInData>(Some(&search)).await {
            Ok(mappings) => mappings,
            Err(err) => {
                tracing::error!(error = %err, "Error fetching Ruckit mappings");
                self.alerts
                    .error(format!("Error fetching Ruckit mappings: {}", err));
                Vec::new()
            }
        };

        let count = mappings.len();
        *self.mappings.write() = mappings;

        if count > 0 {
            tracing::info!(count, "Ruckit mappings loaded");
            self.alerts
                .success(format!("Successfully loaded {} Ruckit assets", count));
        } else {
            self.alerts.info("No Ruckit assets found");
        }
        count
    }

    pub fn mappings(&self) -> Vec<AddInData> {
        self.mappings.read().clone()
    }

    pub fn rows(&self) -> Vec<MappingRow> {
        self.mappings
            .read()
            .iter()
            .map(MappingRow::from_record)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Footer line under the table
    pub fn summary(&self) -> String {
        let count = self.len();
        format!(
            "Showing {} asset{}",
            count,
            if count == 1 { "" } else { "s" }
        )
    }

    /// CSV of all mappings; refuses an empty table
    pub fn to_csv(&self) -> ExportResult<String> {
        let rows = self.rows();
        if rows.is_empty() {
            self.alerts.info("No data to export");
            return Err(ExportError::Empty);
        }
        Ok(csv_document(
            &CSV_HEADER,
            rows.iter().map(MappingRow::to_csv_line),
        ))
    }

    /// Write the CSV into `dir` as `ruckit-assets-YYYY-MM-DD.csv`
    pub fn export_to_dir(&self, dir: &Path) -> ExportResult<PathBuf> {
        let body = self.to_csv()?;
        let path = dir.join(dated_file_name(
            EXPORT_PREFIX,
            chrono::Local::now().date_naive(),
            "csv",
        ));
        if let Err(err) = std::fs::write(&path, body) {
            tracing::error!(path = %path.display(), error = %err, "Export failed");
            self.alerts.error(format!("Export failed: {}", err));
            return Err(err.into());
        }
        self.alerts.success("Data exported successfully");
        Ok(path)
    }
}
