//! JSON export of a finished search.
//!
//! Writes a [`SearchReport`] (request, `tbs` token, timestamp and results) as
//! pretty-printed JSON. Parent directories are created as needed.

use crate::models::SearchReport;
use crate::utils::ensure_writable_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `report` to `path`, replacing any existing file.
///
/// # Arguments
///
/// * `report` - The finished search to serialize
/// * `path` - Destination file; its parent directory is created if missing
///
/// # Returns
///
/// `Ok(())` once the pretty-printed JSON is on disk.
///
/// # Errors
///
/// Returns an error if the parent directory is not writable, serialization
/// fails, or the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_report(report: &SearchReport, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(dir = %dir.display(), error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    fs::write(path, json).await?;
    info!(results = report.results.len(), "Wrote JSON report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResultRecord, ResultSet, SearchRequest};

    #[tokio::test]
    async fn test_write_report_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reports").join("acme.json");

        let request = SearchRequest::new("acme", 48).unwrap();
        let results = ResultSet::from_candidates(
            vec![ResultRecord::new("Acme story", "https://example.com/a")],
            10,
        );
        write_report(&SearchReport::new(&request, results), &path)
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let report: SearchReport = serde_json::from_str(&written).unwrap();
        assert_eq!(report.query, "acme");
        assert_eq!(report.lookback_hours, 48);
        assert_eq!(report.time_window, "qdr:d2");
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results.records()[0].source, "Unknown");
    }
}
