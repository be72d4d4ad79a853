// crates/jobgeo-core/src/loader/reference.rs
use super::common_io::decode_field;
use crate::config::ReferenceConfig;
use crate::error::LoadError;
use crate::gazetteer::ReferenceRow;
use std::io::Read;

/// Position of each mapped column in the source header.
struct ColumnMap {
    name: usize,
    latitude: usize,
    longitude: usize,
    region: usize,
}

impl ColumnMap {
    fn resolve(header: &[String], config: &ReferenceConfig) -> Result<Self, LoadError> {
        let find = |column: &str| {
            header
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn(column.to_string()))
        };
        Ok(Self {
            name: find(&config.name_column)?,
            latitude: find(&config.latitude_column)?,
            longitude: find(&config.longitude_column)?,
            region: find(&config.region_column)?,
        })
    }
}

/// Parse a delimited reference table into [`ReferenceRow`]s.
///
/// The configured source columns are renamed onto name / latitude /
/// longitude / region; every other column is ignored. Blank cells become
/// `None`.
pub fn read_reference_rows<R: Read>(
    reader: R,
    config: &ReferenceConfig,
) -> Result<Vec<ReferenceRow>, LoadError> {
    let delimiter = config
        .delimiter_byte()
        .map_err(|e| LoadError::InvalidConfig(e.to_string()))?;

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| decode_field(h, config.encoding).trim().to_string())
        .collect();
    let columns = ColumnMap::resolve(&header, config)?;

    let cell = |record: &csv::ByteRecord, idx: usize| {
        record
            .get(idx)
            .map(|bytes| decode_field(bytes, config.encoding))
            .filter(|v| !v.trim().is_empty())
    };

    let mut rows = Vec::new();
    for record in rdr.byte_records() {
        let record = record?;
        rows.push(ReferenceRow {
            name: cell(&record, columns.name),
            latitude: cell(&record, columns.latitude),
            longitude: cell(&record, columns.longitude),
            region: cell(&record, columns.region),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextEncoding;

    #[test]
    fn renames_mapped_columns() {
        let data = "city;lat;lng;country;State/admin\nBerlin;52.5200;13.4050;Germany;Berlin\n";
        let config = ReferenceConfig {
            encoding: TextEncoding::Utf8,
            ..ReferenceConfig::default()
        };
        let rows = read_reference_rows(data.as_bytes(), &config).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Berlin"));
        assert_eq!(rows[0].latitude.as_deref(), Some("52.5200"));
        assert_eq!(rows[0].region.as_deref(), Some("Berlin"));
    }

    #[test]
    fn missing_column_is_reported() {
        let data = "city;lat;lng\nBerlin;52.52;13.40\n";
        let err = read_reference_rows(data.as_bytes(), &ReferenceConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(c) if c == "State/admin"));
    }

    #[test]
    fn blank_cells_are_none() {
        let data = "city;lat;lng;State/admin\n ;1;2;\n";
        let rows = read_reference_rows(data.as_bytes(), &ReferenceConfig::default()).unwrap();
        assert_eq!(rows[0].name, None);
        assert_eq!(rows[0].region, None);
    }
}
