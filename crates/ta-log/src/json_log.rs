//! JSON channel dump reader.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;
use ta_core::{ChannelValue, LogData, RawChannel};

use crate::LogResult;

#[derive(Debug, Deserialize)]
struct JsonLog {
    #[serde(default)]
    channels: BTreeMap<String, Vec<(f64, ChannelValue)>>,
}

pub fn read_json<R: Read>(reader: R) -> LogResult<LogData> {
    let log: JsonLog = serde_json::from_reader(reader)?;
    into_log_data(log)
}

pub fn parse_json_str(content: &str) -> LogResult<LogData> {
    let log: JsonLog = serde_json::from_str(content)?;
    into_log_data(log)
}

fn into_log_data(log: JsonLog) -> LogResult<LogData> {
    let mut data = LogData::new();
    for (name, samples) in log.channels {
        data.insert(RawChannel::from_samples(name, samples)?)?;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::{AlignStatus, ChannelSource};

    #[test]
    fn parses_mixed_channels() {
        let json = r#"{
            "channels": {
                "AprilTagAlign/Status": [[0.0, "IDLE"], [0.2, "STARTED"]],
                "AprilTagAlign/ForwardError": [[0.2, 1.5], [0.4, 1]],
                "Vision/HasTarget": [[0.0, false], [0.1, true]]
            }
        }"#;
        let data = parse_json_str(json).unwrap();
        assert_eq!(data.len(), 3);

        let status = data.channel("AprilTagAlign/Status").unwrap().to_status();
        assert_eq!(status.values()[1], AlignStatus::Started);

        let fwd = data.channel("AprilTagAlign/ForwardError").unwrap().to_numeric();
        assert_eq!(fwd.values(), &[1.5, 1.0]);

        let target = data.channel("Vision/HasTarget").unwrap().to_boolean();
        assert_eq!(target.values(), &[false, true]);
    }

    #[test]
    fn empty_document_has_no_channels() {
        let data = parse_json_str("{}").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn out_of_order_samples_are_rejected() {
        let json = r#"{"channels": {"x": [[1.0, 0.0], [0.5, 1.0]]}}"#;
        let err = parse_json_str(json).unwrap_err();
        assert!(matches!(err, crate::LogError::Channel(_)));
    }
}
