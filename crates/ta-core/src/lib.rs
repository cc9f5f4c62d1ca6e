//! ta-core: stable foundation for tagalign.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - channel (timestamped channels, raw values, channel sources)
//! - status (alignment command status labels)
//! - axis (per-axis value triples)
//! - timing (stage timers)
//! - error (shared error types)

pub mod axis;
pub mod channel;
pub mod error;
pub mod numeric;
pub mod status;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use axis::{Axis, AxisValues};
pub use channel::{Channel, ChannelSource, ChannelValue, LogData, RawChannel};
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use status::AlignStatus;
