//! Content-based hashing for report IDs.

use sha2::{Digest, Sha256};
use ta_config::{AlignModel, AnalysisConfig};

/// Report id derived from the raw log bytes, the model and the analysis config.
///
/// Re-analysing the same log with the same settings yields the same id.
pub fn compute_report_id(log_bytes: &[u8], model: AlignModel, config: &AnalysisConfig) -> String {
    let mut hasher = Sha256::new();

    hasher.update(log_bytes);
    hasher.update(model.name().as_bytes());

    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
