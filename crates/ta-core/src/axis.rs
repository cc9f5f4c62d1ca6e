//! Per-axis value triples.

use serde::{Deserialize, Serialize};

/// Motion axis tracked by the alignment command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Forward,
    Lateral,
    Rotation,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Forward, Axis::Lateral, Axis::Rotation];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Lateral => "lateral",
            Self::Rotation => "rotation",
        }
    }
}

/// One value per axis. Serializes as `{forward, lateral, rotation}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues<T> {
    pub forward: T,
    pub lateral: T,
    pub rotation: T,
}

impl<T> AxisValues<T> {
    pub fn new(forward: T, lateral: T, rotation: T) -> Self {
        Self {
            forward,
            lateral,
            rotation,
        }
    }

    /// Build by evaluating `f` once per axis.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        Self {
            forward: f(Axis::Forward),
            lateral: f(Axis::Lateral),
            rotation: f(Axis::Rotation),
        }
    }

    pub fn get(&self, axis: Axis) -> &T {
        match axis {
            Axis::Forward => &self.forward,
            Axis::Lateral => &self.lateral,
            Axis::Rotation => &self.rotation,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> AxisValues<U> {
        AxisValues {
            forward: f(&self.forward),
            lateral: f(&self.lateral),
            rotation: f(&self.rotation),
        }
    }
}
