//! CSV loader
//!
//! Every row is rebuilt through `TelemetryRecord::new`, so the stored label
//! is re-derived and compared, never trusted.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::{Dataset, CSV_HEADER};
use crate::logic::error::{TwinError, TwinResult};
use crate::logic::telemetry::{Measurements, NodeId, TelemetryRecord};

const COLUMN_COUNT: usize = 9;

/// Load a CSV artifact from disk
pub fn load_dataset(path: &Path) -> TwinResult<Dataset> {
    let file = File::open(path)?;
    let dataset = read_dataset(BufReader::new(file))?;
    log::info!(
        "Loaded {} rows for {} nodes from {}",
        dataset.total_rows(),
        dataset.node_count(),
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV content from any buffered reader
pub fn read_dataset<R: BufRead>(reader: R) -> TwinResult<Dataset> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => return Err(TwinError::InvalidHeader("empty file".into())),
    };
    let header = header.trim_start_matches('\u{feff}').trim_end();
    if header != CSV_HEADER {
        return Err(TwinError::InvalidHeader(header.to_string()));
    }

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        // header is line 1
        records.push(parse_row(idx + 2, line)?);
    }

    Dataset::from_records(records)
}

fn parse_row(line_no: usize, line: &str) -> TwinResult<TelemetryRecord> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != COLUMN_COUNT {
        return Err(TwinError::parse(
            line_no,
            format!("expected {} columns, found {}", COLUMN_COUNT, fields.len()),
        ));
    }

    let node_id = NodeId::parse(fields[0])?;
    let timestamp = parse_timestamp(fields[1])
        .ok_or_else(|| TwinError::parse(line_no, format!("bad timestamp {:?}", fields[1])))?;

    let num = |col: usize| -> TwinResult<f64> {
        match fields[col].parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(TwinError::parse(
                line_no,
                format!("column {} is not a finite number: {:?}", col + 1, fields[col]),
            )),
        }
    };

    let measurements = Measurements {
        cpu_usage: num(2)?,
        latency: num(3)?,
        throughput: num(4)?,
        packet_loss: num(5)?,
        temperature: num(6)?,
        error_rate: num(7)?,
    };

    let stored: u8 = match fields[8] {
        "0" => 0,
        "1" => 1,
        other => {
            return Err(TwinError::parse(line_no, format!("failure_label must be 0 or 1, got {:?}", other)))
        }
    };

    let record = TelemetryRecord::new(node_id, timestamp, measurements);
    if record.failure_label() != stored {
        return Err(TwinError::LabelMismatch {
            line: line_no,
            stored,
            expected: record.failure_label(),
        });
    }

    Ok(record)
}

/// RFC 3339, or the naive `YYYY-MM-DD HH:MM:SS[.f]` form read as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
