//! Report and series storage API.

use crate::types::{AnalysisReport, SeriesRow};
use crate::{ResultsError, ResultsResult};
use std::fs;
use std::path::{Path, PathBuf};
use ta_analysis::SessionSignals;

pub fn save_report(path: &Path, report: &AnalysisReport) -> ResultsResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), sessions = report.sessions.len(), "report written");
    Ok(())
}

pub fn load_report(path: &Path) -> ResultsResult<AnalysisReport> {
    let content = fs::read_to_string(path)?;
    let report = serde_json::from_str(&content)?;
    Ok(report)
}

/// Directory of per-session series CSV files.
#[derive(Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if root_dir.is_file() {
            return Err(ResultsError::InvalidPath {
                message: format!("{} is a file, expected a directory", root_dir.display()),
            });
        }
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn series_path(&self, session_num: usize) -> PathBuf {
        self.root_dir.join(format!("session_{:02}.csv", session_num))
    }

    pub fn has_series(&self, session_num: usize) -> bool {
        self.series_path(session_num).exists()
    }

    pub fn save_series(&self, session_num: usize, signals: &SessionSignals) -> ResultsResult<PathBuf> {
        let path = self.series_path(session_num);
        let mut writer = csv::Writer::from_path(&path)?;
        for row in SeriesRow::rows(signals) {
            writer.serialize(row)?;
        }
        writer.flush()?;
        tracing::debug!(path = %path.display(), samples = signals.len(), "series written");
        Ok(path)
    }

    pub fn load_series(&self, session_num: usize) -> ResultsResult<Vec<SeriesRow>> {
        let path = self.series_path(session_num);
        if !path.exists() {
            return Err(ResultsError::SeriesNotFound { session_num });
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Session numbers with a series file, ascending.
    pub fn list_series(&self) -> ResultsResult<Vec<usize>> {
        let mut sessions = Vec::new();
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(num) = name
                .strip_prefix("session_")
                .and_then(|rest| rest.strip_suffix(".csv"))
                .and_then(|n| n.parse().ok())
            {
                sessions.push(num);
            }
        }
        sessions.sort_unstable();
        Ok(sessions)
    }
}
