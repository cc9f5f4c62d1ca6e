//! Log analysis and export service.

use std::path::{Path, PathBuf};

use ta_analysis::{Analysis, analyze};
use ta_config::{AlignModel, AnalysisConfig};
use ta_core::timing::{StageTimings, Timer};
use ta_core::LogData;
use ta_results::{AnalysisReport, ReportManifest, ReportStore, compute_report_id, save_report};

use crate::error::AppResult;

/// Request to analyze one log file.
pub struct AnalysisRequest<'a> {
    pub log_path: &'a Path,
    pub model: AlignModel,
    /// YAML or JSON analysis settings; defaults when `None`
    pub config_path: Option<&'a Path>,
    /// Write the JSON report here
    pub export_path: Option<&'a Path>,
    /// Write one series CSV per session into this directory
    pub series_dir: Option<&'a Path>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(log_path: &'a Path, model: AlignModel) -> Self {
        Self {
            log_path,
            model,
            config_path: None,
            export_path: None,
            series_dir: None,
        }
    }
}

/// Response from an analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResponse {
    pub report_id: String,
    pub config: AnalysisConfig,
    pub analysis: Analysis,
    pub report: AnalysisReport,
    pub exported_report: Option<PathBuf>,
    pub series_files: Vec<PathBuf>,
    pub timing: StageTimings,
}

pub fn load_analysis_config(path: Option<&Path>) -> AppResult<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = ta_config::load_config(path)?;
            tracing::info!(path = %path.display(), "loaded analysis config");
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Load, analyze and optionally export one log.
pub fn run_analysis(request: &AnalysisRequest) -> AppResult<AnalysisResponse> {
    let mut timing = StageTimings::default();

    let load_timer = Timer::start("load");
    let config = load_analysis_config(request.config_path)?;
    let loaded = ta_log::read_log(request.log_path)?;
    timing.load_s = load_timer.stop();

    let analyze_timer = Timer::start("analyze");
    let analysis = analyze(&loaded.data, request.model, &config);
    timing.analyze_s = analyze_timer.stop();

    let report_id = compute_report_id(&loaded.bytes, request.model, &config);
    let manifest = ReportManifest::new(
        report_id.clone(),
        request.log_path.display().to_string(),
        request.model,
    );
    let report = AnalysisReport::from_analysis(manifest, &analysis);

    let export_timer = Timer::start("export");
    let exported_report = match request.export_path {
        Some(path) => {
            save_report(path, &report)?;
            Some(path.to_path_buf())
        }
        None => None,
    };
    let series_files = match request.series_dir {
        Some(dir) => export_series(dir, &analysis)?,
        None => Vec::new(),
    };
    timing.export_s = export_timer.stop();

    tracing::info!(
        report_id = %report_id,
        sessions = analysis.sessions().len(),
        total_s = timing.total_s(),
        "analysis finished"
    );

    Ok(AnalysisResponse {
        report_id,
        config,
        analysis,
        report,
        exported_report,
        series_files,
        timing,
    })
}

/// Write every session's resampled signals as `session_NN.csv` under `dir`.
pub fn export_series(dir: &Path, analysis: &Analysis) -> AppResult<Vec<PathBuf>> {
    let store = ReportStore::new(dir.to_path_buf())?;
    let mut files = Vec::with_capacity(analysis.sessions().len());
    for (i, session) in analysis.sessions().iter().enumerate() {
        files.push(store.save_series(i + 1, &session.signals)?);
    }
    Ok(files)
}

/// One channel of a loaded log.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub name: String,
    pub samples: usize,
    pub time_range: Option<(f64, f64)>,
}

pub fn list_channels(log_path: &Path) -> AppResult<Vec<ChannelInfo>> {
    let data = ta_log::load_log(log_path)?;
    Ok(channel_infos(&data))
}

pub fn channel_infos(data: &LogData) -> Vec<ChannelInfo> {
    data.iter()
        .map(|ch| ChannelInfo {
            name: ch.name().to_string(),
            samples: ch.len(),
            time_range: ch.time_range(),
        })
        .collect()
}
