//! Field map resolution.
//!
//! Resolving a [`FieldMap`] against a log happens once per run and yields an
//! immutable bundle of typed channels. Roles the model does not log, and
//! channels absent from the log, both resolve to `None`.

use serde::{Deserialize, Serialize};
use ta_config::{FieldMap, Role};
use ta_core::{AlignStatus, Axis, AxisValues, Channel, ChannelSource};

/// Typed channels for every analysis role.
#[derive(Debug, Clone, Default)]
pub struct BoundChannels {
    pub status: Option<Channel<AlignStatus>>,
    pub error: AxisValues<Option<Channel<f64>>>,
    pub speed: AxisValues<Option<Channel<f64>>>,
    pub fully_aligned: Option<Channel<bool>>,
    pub has_target: Option<Channel<bool>>,
    pub tag_id: Option<Channel<f64>>,
}

impl BoundChannels {
    pub fn resolve<S: ChannelSource + ?Sized>(source: &S, map: &FieldMap) -> Self {
        let raw = |role: Role| map.channel(role).and_then(|name| source.channel(name));
        Self {
            status: raw(Role::Status).map(|ch| ch.to_status()),
            error: AxisValues::from_fn(|axis| raw(Role::Error(axis)).map(|ch| ch.to_numeric())),
            speed: AxisValues::from_fn(|axis| raw(Role::Speed(axis)).map(|ch| ch.to_numeric())),
            fully_aligned: raw(Role::FullyAligned).map(|ch| ch.to_boolean()),
            has_target: raw(Role::HasTarget).map(|ch| ch.to_boolean()),
            tag_id: raw(Role::TagId).map(|ch| ch.to_numeric()),
        }
    }

    pub fn error_channel(&self, axis: Axis) -> Option<&Channel<f64>> {
        self.error.get(axis).as_ref()
    }

    pub fn speed_channel(&self, axis: Axis) -> Option<&Channel<f64>> {
        self.speed.get(axis).as_ref()
    }
}

/// Whether a role's channel could be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BindingState {
    /// The model does not publish this role.
    Unmapped,
    /// The model publishes it but the log does not contain the channel.
    Missing,
    Present { samples: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelBinding {
    pub role: String,
    pub channel: Option<String>,
    #[serde(flatten)]
    pub state: BindingState,
}

/// Report which channel each role resolved to and how many samples it holds.
pub fn describe_bindings<S: ChannelSource + ?Sized>(source: &S, map: &FieldMap) -> Vec<ChannelBinding> {
    map.bindings()
        .into_iter()
        .map(|(role, name)| {
            let state = match name {
                None => BindingState::Unmapped,
                Some(name) => match source.channel(name) {
                    None => BindingState::Missing,
                    Some(ch) => BindingState::Present { samples: ch.len() },
                },
            };
            ChannelBinding {
                role: role.label().to_string(),
                channel: name.map(str::to_string),
                state,
            }
        })
        .collect()
}
