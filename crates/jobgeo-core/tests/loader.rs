use jobgeo_core::config::{ReferenceConfig, TextEncoding};
use jobgeo_core::{Gazetteer, LoadError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, bytes: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn loads_latin1_reference_table() {
    let file = write_temp(
        ".csv",
        b"city;lat;lng;State/admin\nK\xF6ln;50.9422;6.9578;Nordrhein-Westfalen\nL\xFCbeck;53.8697;10.6864;Schleswig-Holstein\n",
    );
    let g = Gazetteer::load_from_path(file.path(), &ReferenceConfig::default()).unwrap();
    assert_eq!(g.lookup_candidates().collect::<Vec<_>>(), vec!["köln", "lübeck"]);
    assert_eq!(g.get("lübeck").unwrap().region, "Schleswig-Holstein");
}

#[test]
fn custom_column_mapping() {
    let file = write_temp(
        ".csv",
        "name,latitude,longitude,state\nJena,50.9272,11.5864,Thüringen\n".as_bytes(),
    );
    let config = ReferenceConfig {
        delimiter: ',',
        encoding: TextEncoding::Utf8,
        name_column: "name".into(),
        latitude_column: "latitude".into(),
        longitude_column: "longitude".into(),
        region_column: "state".into(),
    };
    let g = Gazetteer::load_from_path(file.path(), &config).unwrap();
    let jena = g.get("jena").unwrap();
    assert_eq!(jena.latitude, 50.9272);
    assert_eq!(jena.region, "Thüringen");
}

#[cfg(feature = "compact")]
#[test]
fn loads_gzipped_reference_table() {
    use flate2::{write::GzEncoder, Compression};

    let mut gz = GzEncoder::new(Vec::new(), Compression::default());
    gz.write_all(b"city;lat;lng;State/admin\nUlm;48.4;9.9833;Baden-W\xFCrttemberg\n")
        .unwrap();
    let file = write_temp(".csv.gz", &gz.finish().unwrap());

    let g = Gazetteer::load_from_path(file.path(), &ReferenceConfig::default()).unwrap();
    assert_eq!(g.get("ulm").unwrap().region, "Baden-Württemberg");
}

#[test]
fn missing_file_is_not_found() {
    let err = Gazetteer::load_from_path("/definitely/not/here.csv", &ReferenceConfig::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::NotFound(_)));
}

#[test]
fn header_only_table_is_empty() {
    let file = write_temp(".csv", b"city;lat;lng;State/admin\n");
    let err = Gazetteer::load_from_path(file.path(), &ReferenceConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Empty));
}

#[test]
fn table_without_mapped_column_is_rejected() {
    let file = write_temp(".csv", b"town;lat;lng;State/admin\nBonn;50.7;7.1;NRW\n");
    let err = Gazetteer::load_from_path(file.path(), &ReferenceConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::MissingColumn(c) if c == "city"));
}

#[test]
fn bundled_gazetteer_loads_once() {
    let first = Gazetteer::load().unwrap();
    let second = Gazetteer::load().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(first.get("münchen").is_some());
    assert_eq!(first.stats().regions, 16);
}
