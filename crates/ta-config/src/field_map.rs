//! Channel bindings for each alignment model.
//!
//! Each alignment command variant logs under its own NetworkTables prefix and
//! publishes a different subset of quantities. [`AlignModel::field_map`] is the
//! single place that knows which channel carries which logical role.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ta_core::Axis;

use crate::ConfigError;

/// Channel published by the vision subsystem, shared by every model.
pub const VISION_HAS_TARGET: &str = "Vision/HasTarget";

/// Alignment command variant under analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AlignModel {
    /// Rotation only.
    #[serde(rename = "A")]
    A,
    /// Rotation plus range.
    #[serde(rename = "B")]
    B,
    /// Full three-axis alignment.
    #[serde(rename = "C")]
    C,
    /// Production `AlignToAprilTagCommand`.
    #[default]
    #[serde(rename = "main")]
    Main,
}

impl AlignModel {
    pub const ALL: [AlignModel; 4] = [AlignModel::A, AlignModel::B, AlignModel::C, AlignModel::Main];

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::Main => "main",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "rotation only",
            Self::B => "rotation + range",
            Self::C => "3-axis",
            Self::Main => "AlignToAprilTagCommand",
        }
    }

    /// NetworkTables prefix the model logs under.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::A => "VisionTest/ModelA",
            Self::B => "VisionTest/ModelB",
            Self::C => "VisionTest/ModelC",
            Self::Main => "AprilTagAlign",
        }
    }

    pub fn field_map(&self) -> FieldMap {
        let p = self.prefix();
        let ch = |suffix: &str| Some(format!("{p}/{suffix}"));
        let common = FieldMap {
            status: ch("Status"),
            forward_error: None,
            lateral_error: None,
            rotation_error: ch("TX"),
            forward_speed: None,
            lateral_speed: None,
            rotation_speed: ch("RotationSpeed"),
            fully_aligned: ch("FullyAligned"),
            tag_id: ch("TagID"),
            has_target: Some(VISION_HAS_TARGET.to_string()),
        };

        match self {
            Self::A => common,
            Self::B => FieldMap {
                forward_error: ch("DistanceError"),
                forward_speed: ch("ForwardSpeed"),
                ..common
            },
            Self::C => FieldMap {
                forward_error: ch("DistanceError"),
                lateral_error: ch("TY"),
                forward_speed: ch("ForwardSpeed"),
                lateral_speed: ch("LateralSpeed"),
                ..common
            },
            Self::Main => FieldMap {
                forward_error: ch("ForwardError"),
                lateral_error: ch("LateralError"),
                rotation_error: ch("RotationError"),
                forward_speed: ch("ForwardSpeed"),
                lateral_speed: ch("LateralSpeed"),
                ..common
            },
        }
    }
}

impl fmt::Display for AlignModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignModel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "MAIN" => Ok(Self::Main),
            _ => Err(ConfigError::UnknownModel {
                name: s.to_string(),
            }),
        }
    }
}

/// Logical quantity consumed by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Status,
    Error(Axis),
    Speed(Axis),
    FullyAligned,
    TagId,
    HasTarget,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::Status,
        Role::Error(Axis::Forward),
        Role::Error(Axis::Lateral),
        Role::Error(Axis::Rotation),
        Role::Speed(Axis::Forward),
        Role::Speed(Axis::Lateral),
        Role::Speed(Axis::Rotation),
        Role::FullyAligned,
        Role::TagId,
        Role::HasTarget,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Error(Axis::Forward) => "forward_error",
            Self::Error(Axis::Lateral) => "lateral_error",
            Self::Error(Axis::Rotation) => "rotation_error",
            Self::Speed(Axis::Forward) => "forward_speed",
            Self::Speed(Axis::Lateral) => "lateral_speed",
            Self::Speed(Axis::Rotation) => "rotation_speed",
            Self::FullyAligned => "fully_aligned",
            Self::TagId => "tag_id",
            Self::HasTarget => "has_target",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Channel name bound to each role; `None` when the model does not log it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    pub status: Option<String>,
    pub forward_error: Option<String>,
    pub lateral_error: Option<String>,
    pub rotation_error: Option<String>,
    pub forward_speed: Option<String>,
    pub lateral_speed: Option<String>,
    pub rotation_speed: Option<String>,
    pub fully_aligned: Option<String>,
    pub tag_id: Option<String>,
    pub has_target: Option<String>,
}

impl FieldMap {
    pub fn channel(&self, role: Role) -> Option<&str> {
        let name = match role {
            Role::Status => &self.status,
            Role::Error(Axis::Forward) => &self.forward_error,
            Role::Error(Axis::Lateral) => &self.lateral_error,
            Role::Error(Axis::Rotation) => &self.rotation_error,
            Role::Speed(Axis::Forward) => &self.forward_speed,
            Role::Speed(Axis::Lateral) => &self.lateral_speed,
            Role::Speed(Axis::Rotation) => &self.rotation_speed,
            Role::FullyAligned => &self.fully_aligned,
            Role::TagId => &self.tag_id,
            Role::HasTarget => &self.has_target,
        };
        name.as_deref()
    }

    /// Every role with its bound channel name, in [`Role::ALL`] order.
    pub fn bindings(&self) -> Vec<(Role, Option<&str>)> {
        Role::ALL.iter().map(|role| (*role, self.channel(*role))).collect()
    }
}
