//! Analysis thresholds.
//!
//! Defaults reproduce the tolerances the alignment command itself uses; a YAML
//! file only needs to list the values it changes.

use serde::{Deserialize, Serialize};
use ta_core::Axis;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub settling: SettlingConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
    #[serde(default)]
    pub signals: SignalConfig,
}

/// Tolerance band that counts as settled, and how long the data must extend past entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettlingConfig {
    /// Forward error tolerance (m)
    pub forward_tol_m: f64,
    /// Lateral error tolerance (m)
    pub lateral_tol_m: f64,
    /// Rotation error tolerance (deg)
    pub rotation_tol_deg: f64,
    /// Minimum time the data must continue past a settling candidate (s)
    pub hold_s: f64,
}

impl Default for SettlingConfig {
    fn default() -> Self {
        Self {
            forward_tol_m: 0.10,
            lateral_tol_m: 0.05,
            rotation_tol_deg: 2.0,
            hold_s: 0.5,
        }
    }
}

impl SettlingConfig {
    pub fn tolerance(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Forward => self.forward_tol_m,
            Axis::Lateral => self.lateral_tol_m,
            Axis::Rotation => self.rotation_tol_deg,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentationConfig {
    /// Sessions shorter than this are dropped (s)
    pub min_duration_s: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_duration_s: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignalConfig {
    /// Initial errors smaller than this report zero overshoot
    pub overshoot_guard: f64,
    /// Interpolated boolean values above this are true
    pub boolean_threshold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            overshoot_guard: 0.001,
            boolean_threshold: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.settling.tolerance(Axis::Forward), 0.10);
        assert_eq!(config.settling.tolerance(Axis::Lateral), 0.05);
        assert_eq!(config.settling.tolerance(Axis::Rotation), 2.0);
        assert_eq!(config.settling.hold_s, 0.5);
        assert_eq!(config.segmentation.min_duration_s, 0.1);
        assert_eq!(config.signals.overshoot_guard, 0.001);
        assert_eq!(config.signals.boolean_threshold, 0.5);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "settling:\n  rotation_tol_deg: 1.0\n";
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.settling.rotation_tol_deg, 1.0);
        assert_eq!(config.settling.forward_tol_m, 0.10);
        assert_eq!(config.segmentation, SegmentationConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yaml = "settling:\n  rotation_tol: 1.0\n";
        assert!(serde_yaml::from_str::<AnalysisConfig>(yaml).is_err());
    }
}
