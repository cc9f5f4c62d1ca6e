//! Long-format CSV reader.
//!
//! Expects a header row naming `timestamp`, `channel` and `value` columns (in
//! any order, extra columns ignored). Rows for different channels may be
//! interleaved; rows for one channel must appear in time order.

use std::collections::BTreeMap;
use std::io::Read;

use csv::ReaderBuilder;
use serde::Deserialize;
use ta_core::{ChannelValue, LogData, RawChannel};

use crate::LogResult;

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: f64,
    channel: String,
    value: String,
}

/// Interpret a CSV cell: booleans first, then numbers, otherwise text.
pub fn parse_csv_value(raw: &str) -> ChannelValue {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        return ChannelValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return ChannelValue::Bool(false);
    }
    match trimmed.parse::<f64>() {
        Ok(v) => ChannelValue::Number(v),
        Err(_) => ChannelValue::Text(trimmed.to_string()),
    }
}

pub fn read_csv<R: Read>(reader: R) -> LogResult<LogData> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut grouped: BTreeMap<String, Vec<(f64, ChannelValue)>> = BTreeMap::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize() {
        let row: CsvRow = result?;
        if row.value.is_empty() {
            skipped += 1;
            continue;
        }
        grouped
            .entry(row.channel)
            .or_default()
            .push((row.timestamp, parse_csv_value(&row.value)));
    }
    if skipped > 0 {
        tracing::debug!(skipped, "skipped CSV rows with empty values");
    }

    let mut data = LogData::new();
    for (name, samples) in grouped {
        data.insert(RawChannel::from_samples(name, samples)?)?;
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ta_core::{AlignStatus, ChannelSource};

    #[test]
    fn value_parsing() {
        assert_eq!(parse_csv_value("true"), ChannelValue::Bool(true));
        assert_eq!(parse_csv_value(" FALSE "), ChannelValue::Bool(false));
        assert_eq!(parse_csv_value("-0.25"), ChannelValue::Number(-0.25));
        assert_eq!(parse_csv_value("7"), ChannelValue::Number(7.0));
        assert_eq!(
            parse_csv_value("COMPLETED"),
            ChannelValue::Text("COMPLETED".to_string())
        );
    }

    #[test]
    fn reads_interleaved_rows() {
        let csv = "timestamp,channel,value\n\
                   0.0,AprilTagAlign/Status,IDLE\n\
                   0.0,AprilTagAlign/ForwardError,1.0\n\
                   0.2,AprilTagAlign/Status,STARTED\n\
                   0.2,AprilTagAlign/ForwardError,0.8\n\
                   0.2,Vision/HasTarget,true\n";
        let data = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(data.len(), 3);

        let status = data.channel("AprilTagAlign/Status").unwrap().to_status();
        assert_eq!(status.values(), &[AlignStatus::Idle, AlignStatus::Started]);

        let fwd = data.channel("AprilTagAlign/ForwardError").unwrap().to_numeric();
        assert_eq!(fwd.timestamps(), &[0.0, 0.2]);
        assert_eq!(fwd.values(), &[1.0, 0.8]);
    }

    #[test]
    fn columns_may_be_reordered() {
        let csv = "channel,value,timestamp\nx,1.5,0.1\n";
        let data = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(data.channel("x").unwrap().to_numeric().values(), &[1.5]);
    }

    #[test]
    fn empty_values_are_skipped() {
        let csv = "timestamp,channel,value\n0.0,x,\n0.1,x,2\n";
        let data = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(data.channel("x").unwrap().len(), 1);
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let csv = "timestamp,channel,value\nsoon,x,1\n";
        assert!(read_csv(csv.as_bytes()).is_err());
    }
}
