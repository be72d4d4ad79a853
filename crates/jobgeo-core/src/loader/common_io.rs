// crates/jobgeo-core/src/loader/common_io.rs
use crate::config::TextEncoding;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(not(feature = "compact"))]
fn gzip_disabled() -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        "Gzip file requested but 'compact' feature is disabled",
    )
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when the path
/// ends in `.gz`. The caller reads plain bytes either way.
pub fn open_stream(path: &Path) -> io::Result<Box<dyn Read>> {
    let reader = BufReader::new(File::open(path)?);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(gzip_disabled());
        }
    }

    Ok(Box::new(reader))
}

/// Output file opened by [`create_sink`].
///
/// Call [`Sink::finish`] once writing is done: it flushes the buffer and, for
/// gzip output, writes the trailer, reporting any error on the way.
pub enum Sink {
    Plain(BufWriter<File>),
    #[cfg(feature = "compact")]
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Sink {
    pub fn finish(self) -> io::Result<()> {
        match self {
            Sink::Plain(mut w) => w.flush(),
            #[cfg(feature = "compact")]
            Sink::Gzip(enc) => enc.finish()?.flush(),
        }
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::Plain(w) => w.write(buf),
            #[cfg(feature = "compact")]
            Sink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Plain(w) => w.flush(),
            #[cfg(feature = "compact")]
            Sink::Gzip(w) => w.flush(),
        }
    }
}

/// Creates (truncating) a file for writing, gzip-compressed for `.gz` paths.
pub fn create_sink(path: &Path) -> io::Result<Sink> {
    let writer = BufWriter::new(File::create(path)?);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            return Ok(Sink::Gzip(GzEncoder::new(writer, Compression::default())));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(gzip_disabled());
        }
    }

    Ok(Sink::Plain(writer))
}

/// Decode one raw CSV field.
///
/// Latin-1 maps every byte to the code point of the same value. Invalid
/// UTF-8 is replaced rather than rejected.
pub fn decode_field(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Encode one field for writing. Characters outside Latin-1 become `?`.
pub fn encode_field(value: &str, encoding: TextEncoding) -> Vec<u8> {
    match encoding {
        TextEncoding::Utf8 => value.as_bytes().to_vec(),
        TextEncoding::Latin1 => value
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_round_trips_umlauts() {
        let bytes = encode_field("Köln", TextEncoding::Latin1);
        assert_eq!(bytes, vec![b'K', 0xF6, b'l', b'n']);
        assert_eq!(decode_field(&bytes, TextEncoding::Latin1), "Köln");
    }

    #[test]
    fn latin1_replaces_unmappable() {
        assert_eq!(encode_field("Łódź", TextEncoding::Latin1), b"?\xF3d?".to_vec());
    }

    #[cfg(feature = "compact")]
    #[test]
    fn gzip_sink_is_complete_after_finish() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv.gz");
        let mut sink = create_sink(&path).unwrap();
        assert!(matches!(sink, Sink::Gzip(_)));
        sink.write_all(b"city;lat\nkiel;54.32\n").unwrap();
        sink.finish().unwrap();

        let mut text = String::new();
        open_stream(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "city;lat\nkiel;54.32\n");
    }

    #[test]
    fn utf8_is_lossy() {
        assert_eq!(decode_field(b"K\xF6ln", TextEncoding::Utf8), "K\u{FFFD}ln");
    }
}
