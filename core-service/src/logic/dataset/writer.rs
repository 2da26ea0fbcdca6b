use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::{Dataset, CSV_HEADER};
use crate::constants::ARTIFACT_PREFIX;
use crate::logic::telemetry::TelemetryRecord;

/// Write the dataset as CSV to any sink
pub fn write_dataset<W: Write>(out: W, dataset: &Dataset) -> io::Result<usize> {
    let mut out = BufWriter::new(out);
    writeln!(out, "{}", CSV_HEADER)?;

    let mut rows = 0;
    for record in dataset.records() {
        write_row(&mut out, record)?;
        rows += 1;
    }

    out.flush()?;
    Ok(rows)
}

/// f64 `Display` is the shortest representation that parses back exactly
fn write_row<W: Write>(out: &mut W, record: &TelemetryRecord) -> io::Result<()> {
    let m = record.measurements();
    writeln!(
        out,
        "{},{},{},{},{},{},{},{},{}",
        record.node_id(),
        record.timestamp().to_rfc3339_opts(SecondsFormat::Micros, true),
        m.cpu_usage,
        m.latency,
        m.throughput,
        m.packet_loss,
        m.temperature,
        m.error_rate,
        record.failure_label()
    )
}

/// Write to a new timestamped file in `base_dir`, one file per run
pub fn write_new_artifact(base_dir: &Path, dataset: &Dataset) -> io::Result<PathBuf> {
    fs::create_dir_all(base_dir)?;
    let (file, path) = create_new_file(base_dir)?;
    let rows = discard_on_error(&path, write_dataset(file, dataset))?;
    log::debug!("Wrote {} rows to {}", rows, path.display());
    Ok(path)
}

/// Remove the artifact at `path` when its write failed
pub(super) fn discard_on_error<T>(path: &Path, result: io::Result<T>) -> io::Result<T> {
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            log::warn!("Could not remove partial artifact {}: {}", path.display(), e);
        }
    }
    result
}

fn create_new_file(base_dir: &Path) -> io::Result<(File, PathBuf)> {
    // timestamp format: YYYY-MM-DD-HHMMSS
    let stamp = Utc::now().format("%Y-%m-%d-%H%M%S").to_string();

    // never overwrite an artifact from a run in the same second
    let mut suffix = 0u32;
    loop {
        let filename = if suffix == 0 {
            format!("{}-{}.csv", ARTIFACT_PREFIX, stamp)
        } else {
            format!("{}-{}-{}.csv", ARTIFACT_PREFIX, stamp, suffix)
        };
        let path = base_dir.join(filename);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
            Err(e) => return Err(e),
        }
    }
}
