//! Shared application service layer for tagalign.
//!
//! Wires the log readers, analysis pipeline and report export together
//! behind a small request/response API, and formats console reports for
//! the CLI.

pub mod analysis_service;
pub mod error;
pub mod report;

// Re-export key types for convenience
pub use analysis_service::{
    AnalysisRequest, AnalysisResponse, ChannelInfo, channel_infos, export_series, list_channels,
    load_analysis_config, run_analysis,
};
pub use error::{AppError, AppResult};
