//! Timestamped telemetry channels.
//!
//! A channel is an immutable, named sequence of `(timestamp, value)` samples
//! with non-decreasing timestamps. Decoders produce [`RawChannel`]s holding
//! loosely typed [`ChannelValue`]s; analysis code works on typed views derived
//! with [`RawChannel::to_numeric`], [`RawChannel::to_boolean`] and
//! [`RawChannel::to_status`].

use std::collections::BTreeMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{AlignStatus, CoreError, CoreResult};

/// A single decoded sample value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ChannelValue {
    /// Numeric view. Booleans map to `0.0`/`1.0`; text has no numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// Boolean view. Numbers are true when non-zero.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(v) => Some(*v != 0.0),
            Self::Text(_) => None,
        }
    }

    pub fn as_status(&self) -> AlignStatus {
        match self {
            Self::Text(label) => AlignStatus::from_label(label),
            Self::Bool(b) => AlignStatus::Other(b.to_string()),
            Self::Number(v) => AlignStatus::Other(v.to_string()),
        }
    }
}

impl From<f64> for ChannelValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for ChannelValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for ChannelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Named, time-ordered sample sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel<T> {
    name: String,
    timestamps: Vec<f64>,
    values: Vec<T>,
}

/// Channel as produced by a log decoder.
pub type RawChannel = Channel<ChannelValue>;

impl<T> Channel<T> {
    /// Create a channel, validating lengths, finiteness and ordering.
    pub fn new(name: impl Into<String>, timestamps: Vec<f64>, values: Vec<T>) -> CoreResult<Self> {
        let name = name.into();
        if timestamps.len() != values.len() {
            return Err(CoreError::LengthMismatch {
                channel: name,
                timestamps: timestamps.len(),
                values: values.len(),
            });
        }
        for (index, t) in timestamps.iter().enumerate() {
            if !t.is_finite() {
                return Err(CoreError::NonFinite {
                    what: "channel timestamp",
                    value: *t,
                });
            }
            if index > 0 && *t < timestamps[index - 1] {
                return Err(CoreError::NonMonotonic {
                    channel: name,
                    index,
                    previous: timestamps[index - 1],
                    current: *t,
                });
            }
        }
        Ok(Self {
            name,
            timestamps,
            values,
        })
    }

    pub fn from_samples(
        name: impl Into<String>,
        samples: impl IntoIterator<Item = (f64, T)>,
    ) -> CoreResult<Self> {
        let (timestamps, values) = samples.into_iter().unzip();
        Self::new(name, timestamps, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Time span covered by the samples, if any.
    pub fn time_range(&self) -> Option<(f64, f64)> {
        Some((*self.timestamps.first()?, *self.timestamps.last()?))
    }

    /// Index range of samples with `start <= t <= end`.
    pub fn window_indices(&self, start: f64, end: f64) -> Range<usize> {
        let lo = self.timestamps.partition_point(|t| *t < start);
        let hi = self.timestamps.partition_point(|t| *t <= end).max(lo);
        lo..hi
    }

    /// Timestamps and values of samples with `start <= t <= end`.
    pub fn window(&self, start: f64, end: f64) -> (&[f64], &[T]) {
        let range = self.window_indices(start, end);
        (&self.timestamps[range.clone()], &self.values[range])
    }

    pub fn count_in(&self, start: f64, end: f64) -> usize {
        self.window_indices(start, end).len()
    }

    /// Derive a channel keeping only samples for which `f` yields a value.
    ///
    /// Ordering is preserved, so the result needs no re-validation.
    pub fn filter_map_values<U>(&self, mut f: impl FnMut(&T) -> Option<U>) -> Channel<U> {
        let mut timestamps = Vec::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.len());
        for (t, v) in self.timestamps.iter().zip(&self.values) {
            if let Some(u) = f(v) {
                timestamps.push(*t);
                values.push(u);
            }
        }
        Channel {
            name: self.name.clone(),
            timestamps,
            values,
        }
    }
}

impl RawChannel {
    pub fn to_numeric(&self) -> Channel<f64> {
        self.filter_map_values(ChannelValue::as_f64)
    }

    pub fn to_boolean(&self) -> Channel<bool> {
        self.filter_map_values(ChannelValue::as_bool)
    }

    /// Status view. Every sample is kept.
    pub fn to_status(&self) -> Channel<AlignStatus> {
        self.filter_map_values(|v| Some(v.as_status()))
    }
}

/// Lookup-by-name access to decoded channels.
pub trait ChannelSource {
    /// Get a channel by its full name, or `None` if the log does not contain it.
    fn channel(&self, name: &str) -> Option<&RawChannel>;

    /// Names of every channel available in the source.
    fn channel_names(&self) -> Vec<&str>;
}

/// In-memory set of decoded channels for one log.
#[derive(Debug, Clone, Default)]
pub struct LogData {
    channels: BTreeMap<String, RawChannel>,
}

impl LogData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_channels(channels: impl IntoIterator<Item = RawChannel>) -> CoreResult<Self> {
        let mut data = Self::new();
        for channel in channels {
            data.insert(channel)?;
        }
        Ok(data)
    }

    pub fn insert(&mut self, channel: RawChannel) -> CoreResult<()> {
        if self.channels.contains_key(channel.name()) {
            return Err(CoreError::DuplicateChannel {
                name: channel.name().to_string(),
            });
        }
        self.channels.insert(channel.name().to_string(), channel);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawChannel> {
        self.channels.values()
    }
}

impl ChannelSource for LogData {
    fn channel(&self, name: &str) -> Option<&RawChannel> {
        self.channels.get(name)
    }

    fn channel_names(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }
}
