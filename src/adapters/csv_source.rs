use crate::domain::model::SourceRow;
use crate::utils::error::{Result, UploadError};
use crate::utils::validation::has_allowed_extension;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

pub const CSV_EXTENSION: &str = "csv";

/// Bytes inspected when guessing the content type of an input file.
const SNIFF_LEN: usize = 8 * 1024;

/// Guesses the content type of a file from its leading bytes.
///
/// Any NUL, DEL or non-whitespace control byte marks the content as binary. Text
/// whose first line contains a comma is reported as `text/csv`, other text as
/// `text/plain`.
pub fn sniff_mime(sample: &[u8]) -> mime::Mime {
    let binary = sample
        .iter()
        .any(|&b| (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c)) || b == 0x7f);
    if binary {
        return mime::APPLICATION_OCTET_STREAM;
    }

    let first_line = sample.split(|&b| b == b'\n').next().unwrap_or_default();
    if first_line.contains(&b',') {
        mime::TEXT_CSV
    } else {
        mime::TEXT_PLAIN
    }
}

pub fn is_accepted_mime(mime: &mime::Mime) -> bool {
    mime.essence_str() == mime::TEXT_CSV.essence_str()
        || mime.essence_str() == mime::TEXT_PLAIN.essence_str()
}

/// Runs the pre-flight checks on `path` and opens it for reading.
///
/// Fails on a non-`.csv` extension, an unopenable file, or content that does
/// not look like text. No row is read here.
pub fn open(path: &str) -> Result<CsvRows<BufReader<File>>> {
    if !has_allowed_extension(path, &[CSV_EXTENSION]) {
        return Err(UploadError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let unreadable = |source| UploadError::UnreadableInput {
        path: path.to_string(),
        source,
    };

    let mut file = File::open(path).map_err(unreadable)?;

    let mut sample = Vec::with_capacity(SNIFF_LEN);
    (&mut file)
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut sample)
        .map_err(unreadable)?;
    let mime = sniff_mime(&sample);
    tracing::debug!(path, %mime, sniffed = sample.len(), "input content type");
    if !is_accepted_mime(&mime) {
        return Err(UploadError::InvalidMimeType {
            path: path.to_string(),
            mime,
        });
    }

    file.seek(SeekFrom::Start(0)).map_err(unreadable)?;
    Ok(CsvRows::from_reader(BufReader::new(file)))
}

/// Forward-only iterator over the records of a comma-separated stream, each
/// tagged with the file line it starts on. The header is yielded like any other
/// record, and a blank line is yielded as a record with no fields.
///
/// Lines end in `\n` or `\r\n`. A quoted field may span lines; the record then
/// keeps the number of its first line and the following lines are consumed
/// with it.
pub struct CsvRows<R: BufRead> {
    reader: R,
    line: usize,
}

impl<R: BufRead> CsvRows<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader, line: 0 }
    }

    /// Reads one physical line into `buf`, returning false at end of input.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> Result<bool> {
        let read = self.reader.read_until(b'\n', buf)?;
        if read > 0 {
            self.line += 1;
        }
        Ok(read > 0)
    }
}

impl<R: BufRead> Iterator for CsvRows<R> {
    type Item = Result<SourceRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.read_line(&mut buf) {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
        }

        let line = self.line;
        while ends_inside_quotes(&buf) {
            match self.read_line(&mut buf) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Some(Err(e)),
            }
        }

        Some(parse_record(&buf, line))
    }
}

/// Whether `bytes` stops inside a quoted field, meaning the record continues on
/// the next line. Quotes only open a field at its start; `""` inside a quoted
/// field is an escaped quote.
fn ends_inside_quotes(bytes: &[u8]) -> bool {
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut after_close = false;

    for &b in bytes {
        if in_quotes {
            if b == b'"' {
                in_quotes = false;
                after_close = true;
            }
            continue;
        }
        match b {
            b'"' if at_field_start || after_close => {
                in_quotes = true;
                at_field_start = false;
                after_close = false;
                continue;
            }
            b',' | b'\n' | b'\r' => {
                at_field_start = true;
                after_close = false;
                continue;
            }
            _ => {}
        }
        at_field_start = false;
        after_close = false;
    }

    in_quotes
}

fn parse_record(bytes: &[u8], line: usize) -> Result<SourceRow> {
    let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    if bytes.is_empty() {
        return Ok(SourceRow {
            line,
            fields: Vec::new(),
        });
    }

    if let Err(e) = std::str::from_utf8(bytes) {
        return Err(UploadError::RowDecodeError {
            line,
            message: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;

    Ok(SourceRow {
        line,
        fields: record.iter().map(str::to_string).collect(),
    })
}
