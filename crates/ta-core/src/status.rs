//! Alignment command status labels.
//!
//! The alignment command publishes a short status string every loop. Only
//! four labels drive session segmentation; everything else is carried through
//! as [`AlignStatus::Other`] so that sample indices stay aligned with the
//! channel timestamps.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlignStatus {
    Idle,
    Started,
    Aligning,
    Completed,
    Interrupted,
    Other(String),
}

impl AlignStatus {
    /// Parse a published status label. Matching is exact.
    pub fn from_label(label: &str) -> Self {
        match label {
            "IDLE" => Self::Idle,
            "STARTED" => Self::Started,
            "ALIGNING" => Self::Aligning,
            "COMPLETED" => Self::Completed,
            "INTERRUPTED" => Self::Interrupted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Idle => "IDLE",
            Self::Started => "STARTED",
            Self::Aligning => "ALIGNING",
            Self::Completed => "COMPLETED",
            Self::Interrupted => "INTERRUPTED",
            Self::Other(label) => label,
        }
    }

    /// `STARTED` or `ALIGNING` opens a session.
    pub fn opens_session(&self) -> bool {
        matches!(self, Self::Started | Self::Aligning)
    }

    /// `COMPLETED` or `INTERRUPTED` closes a session.
    pub fn closes_session(&self) -> bool {
        matches!(self, Self::Completed | Self::Interrupted)
    }
}

impl From<&str> for AlignStatus {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl From<String> for AlignStatus {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<AlignStatus> for String {
    fn from(status: AlignStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for AlignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
