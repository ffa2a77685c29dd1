// File: crates/lumen-core/src/data.rs
// Summary: CSV and GeoJSON loading into datasets and feature collections.

use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::geojson::FeatureCollection;
use crate::record::{Dataset, Record, Value};

/// Load a CSV file with a header row; cells are dynamically typed.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let data = read_csv(file)?;
    debug!(path = %path.display(), rows = data.len(), "loaded CSV");
    Ok(data)
}

/// Parse CSV from any reader. Rows whose every cell is empty are skipped.
pub fn read_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();

    let mut records = Vec::new();
    for (line, row) in rdr.records().enumerate() {
        let row = row?;
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        if row.len() != headers.len() {
            warn!(line = line + 2, cells = row.len(), columns = headers.len(), "ragged CSV row");
        }
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).map(Value::infer).unwrap_or(Value::Null)))
            .collect();
        records.push(record);
    }
    Ok(Dataset::new(records))
}

/// Load a GeoJSON FeatureCollection from a file.
pub fn load_geojson(path: impl AsRef<Path>) -> Result<FeatureCollection> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let fc = FeatureCollection::from_json_str(&text)?;
    debug!(path = %path.display(), features = fc.features.len(), "loaded GeoJSON");
    Ok(fc)
}
