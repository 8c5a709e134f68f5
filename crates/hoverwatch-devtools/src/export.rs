//! Record export
//!
//! One-shot dump of everything the panel has accumulated.

use crate::error::Result;
use crate::panel::{Panel, Records, Summary};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// RFC 3339 time the export was taken
    pub export_time: String,
    pub records: Records,
    pub summary: Summary,
    #[serde(skip)]
    taken_at_ms: u64,
}

impl ExportDocument {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name the export is saved under
    pub fn file_name(&self) -> String {
        format!("debug-helper-{}.json", self.taken_at_ms)
    }

    /// Write the export into `dir`, returning the file path
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.to_json()?)?;
        tracing::info!("Exported {} records to {}", self.summary.total_records, path.display());
        Ok(path)
    }
}

impl Panel {
    /// Snapshot every record with a summary and the current time
    pub fn export(&self) -> ExportDocument {
        let taken_at_ms = self.now_ms();
        let export_time = DateTime::<Utc>::from_timestamp_millis(taken_at_ms as i64)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        ExportDocument {
            export_time,
            records: self.records().clone(),
            summary: self.summary(),
            taken_at_ms,
        }
    }
}
