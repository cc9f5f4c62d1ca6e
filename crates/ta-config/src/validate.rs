//! Config validation logic.

use crate::analysis::AnalysisConfig;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub fn validate_config(config: &AnalysisConfig) -> Result<(), ValidationError> {
    let s = &config.settling;
    positive("settling.forward_tol_m", s.forward_tol_m)?;
    positive("settling.lateral_tol_m", s.lateral_tol_m)?;
    positive("settling.rotation_tol_deg", s.rotation_tol_deg)?;
    non_negative("settling.hold_s", s.hold_s)?;

    non_negative(
        "segmentation.min_duration_s",
        config.segmentation.min_duration_s,
    )?;

    let sig = &config.signals;
    non_negative("signals.overshoot_guard", sig.overshoot_guard)?;
    if !(sig.boolean_threshold > 0.0 && sig.boolean_threshold < 1.0) {
        return Err(ValidationError::InvalidValue {
            field: "signals.boolean_threshold",
            value: sig.boolean_threshold,
            reason: "must lie strictly between 0 and 1",
        });
    }

    Ok(())
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            value,
            reason: "must be positive and finite",
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field,
            value,
            reason: "must be non-negative and finite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate_config(&AnalysisConfig::default()).unwrap();
    }

    #[test]
    fn zero_tolerance_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.settling.lateral_tol_m = 0.0;
        let err = validate_config(&config).unwrap_err();
        match err {
            ValidationError::InvalidValue { field, .. } => {
                assert_eq!(field, "settling.lateral_tol_m")
            }
        }
    }

    #[test]
    fn threshold_bounds() {
        let mut config = AnalysisConfig::default();
        config.signals.boolean_threshold = 1.0;
        assert!(validate_config(&config).is_err());
        config.signals.boolean_threshold = 0.25;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn nan_is_rejected() {
        let mut config = AnalysisConfig::default();
        config.segmentation.min_duration_s = f64::NAN;
        assert!(validate_config(&config).is_err());
    }
}
