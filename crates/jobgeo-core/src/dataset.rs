// crates/jobgeo-core/src/dataset.rs

//! Delimited job posting files: reading raw records and writing the
//! enriched, one-row-per-city output.

use crate::config::DatasetConfig;
use crate::error::{JobGeoError, Result};
use crate::loader::common_io::{create_sink, decode_field, encode_field, open_stream};
use crate::record::{EnrichedRecord, Field, RawRecord};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Columns appended to every output row, in this order.
pub const GEO_COLUMNS: [&str; 4] = ["Cleaned_City", "Latitude", "Longitude", "State"];

/// A parsed job posting file.
#[derive(Debug, Clone, Default)]
pub struct JobDataset {
    /// Source columns except the location column, in source order.
    pub columns: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl JobDataset {
    /// Header of the enriched output: pass-through columns then [`GEO_COLUMNS`].
    pub fn output_header(&self) -> Vec<String> {
        output_header(&self.columns)
    }
}

fn output_header(columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .cloned()
        .chain(GEO_COLUMNS.iter().map(|c| c.to_string()))
        .collect()
}

/// Read raw job records.
///
/// The configured location column feeds [`RawRecord::location`]; every
/// other column is passed through. If the file has no location column the
/// records are still returned, without locations.
pub fn read_records<R: Read>(reader: R, config: &DatasetConfig) -> Result<JobDataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode_field(h, config.encoding).trim().to_string())
        .collect();
    let location_idx = header.iter().position(|h| *h == config.location_column);
    if location_idx.is_none() {
        warn!(
            column = %config.location_column,
            "dataset has no location column, no record will resolve"
        );
    }

    let mut records = Vec::new();
    for row in rdr.byte_records() {
        let row = row?;
        let mut record = RawRecord::new();
        for (idx, name) in header.iter().enumerate() {
            let value = row
                .get(idx)
                .map(|v| decode_field(v, config.encoding))
                .unwrap_or_default();
            if Some(idx) == location_idx {
                record.location = Some(value);
            } else {
                record.fields.push(Field::new(name.clone(), value));
            }
        }
        records.push(record);
    }
    debug!(records = records.len(), "dataset read");

    let columns = header
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != location_idx)
        .map(|(_, name)| name)
        .collect();
    Ok(JobDataset { columns, records })
}

pub fn read_records_from_path(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<JobDataset> {
    let path = path.as_ref();
    let reader = open_stream(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => JobGeoError::NotFound(path.display().to_string()),
        _ => JobGeoError::Io(e),
    })?;
    read_records(reader, config)
}

/// Write a header and rows with the configured delimiter and encoding.
pub fn write_table<W, I, R>(writer: W, header: &[String], rows: I, config: &DatasetConfig) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .from_writer(writer);

    wtr.write_record(header.iter().map(|h| encode_field(h, config.encoding)))?;
    for row in rows {
        wtr.write_record(row.into_iter().map(|v| encode_field(&v, config.encoding)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write enriched records under `columns` + [`GEO_COLUMNS`].
///
/// Pass-through values are written in field order, which [`read_records`]
/// keeps aligned with `columns`. Repeated column names stay distinct.
pub fn write_enriched<W: Write>(
    writer: W,
    columns: &[String],
    records: &[EnrichedRecord],
    config: &DatasetConfig,
) -> Result<()> {
    let header = output_header(columns);
    let rows = records.iter().map(|r| {
        r.fields
            .iter()
            .map(|f| f.value.clone())
            .chain([
                r.city.clone(),
                r.latitude.to_string(),
                r.longitude.to_string(),
                r.region.clone(),
            ])
            .collect::<Vec<_>>()
    });
    write_table(writer, &header, rows, config)
}

pub fn write_enriched_to_path(
    path: impl AsRef<Path>,
    columns: &[String],
    records: &[EnrichedRecord],
    config: &DatasetConfig,
) -> Result<()> {
    let mut sink = create_sink(path.as_ref())?;
    write_enriched(&mut sink, columns, records, config)?;
    sink.finish()?;
    Ok(())
}
