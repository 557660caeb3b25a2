//! Parsing of the basic statistics in FastQC `fastqc_data.txt` files.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::IngestError;
use crate::fastqc::read_lines_lossy;

/// The metric holding the number of sequences in a read file.
pub const TOTAL_SEQUENCES: &str = "Total Sequences";

/// The only metrics retained from a data file.
pub const RETAINED_METRICS: [&str; 7] = [
    "Filename",
    "File type",
    "Encoding",
    TOTAL_SEQUENCES,
    "Sequences flagged as poor quality",
    "Sequence length",
    "%GC",
];

/// Metric name → value for a single read, in file order.
pub type Metrics = IndexMap<String, String>;

/// Parses a data file, keeping only the [`RETAINED_METRICS`]. Keys and values
/// have trailing whitespace removed; lines with fewer than two tab-separated
/// fields are skipped.
pub fn parse<R: BufRead>(reader: R) -> io::Result<Metrics> {
    let mut metrics = Metrics::new();

    for line in read_lines_lossy(reader)? {
        let mut fields = line.split('\t');

        let (key, value) = match (fields.next(), fields.next()) {
            (Some(key), Some(value)) => (key.trim_end(), value.trim_end()),
            _ => continue,
        };

        if RETAINED_METRICS.contains(&key) {
            metrics.insert(key.to_string(), value.to_string());
        }
    }

    Ok(metrics)
}

/// Opens and parses a data file.
pub fn read(path: &Path) -> Result<Metrics, IngestError> {
    let io_error = |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    parse(BufReader::new(file)).map_err(io_error)
}
