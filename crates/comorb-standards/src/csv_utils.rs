//! Shared helpers for reading delimited reference files.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Result, TableError};

/// Strip a UTF-8 byte order mark.
pub(crate) fn strip_bom(content: &str) -> &str {
    content.trim_start_matches('\u{feff}')
}

/// Drop a leading title line when the header does not start the file.
///
/// Published reference files carry a one-line title above the header. The
/// header is recognised by containing `header_marker`.
pub(crate) fn skip_title_line<'a>(content: &'a str, header_marker: &str) -> &'a str {
    let content = strip_bom(content);
    match content.split_once('\n') {
        Some((first, rest)) if !first.contains(header_marker) => rest,
        _ => content,
    }
}

/// A reader over in-memory delimited text with trimmed fields.
pub(crate) fn reader(content: &str, delimiter: u8, quote: u8) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .quote(quote)
        .trim(Trim::All)
        .from_reader(content.as_bytes())
}

/// Header row of a reader.
pub(crate) fn headers(reader: &mut csv::Reader<&[u8]>, file: &str) -> Result<StringRecord> {
    reader
        .headers()
        .cloned()
        .map_err(|e| TableError::csv(file, &e))
}

/// Position of a required column, matched case-insensitively.
pub(crate) fn column_index(headers: &StringRecord, column: &str, file: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| strip_bom(h).trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| TableError::MissingColumn {
            file: file.to_string(),
            column: column.to_string(),
        })
}

/// Read a reference file from disk.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))
}

/// Short name used for a file in errors and logs.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}
