//! Allow-list ingestion
//!
//! Organizers upload a CSV file; the first column of every row is a wallet
//! address. Blank rows and rows whose first column starts with `#` are
//! skipped. Quoted fields follow RFC 4180, so `"Addr,1"` is one identifier.

use std::{fs::File, io::Read, path::Path};

use csv::{Position, ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::AllowlistError;

/// Parse identifiers from a reader, one row per record.
///
/// Only trimming and comment filtering happen here. Duplicates are left for
/// the tree builder to collapse so the caller can report raw counts.
pub fn parse_allowlist<R: Read>(reader: R) -> Result<Vec<String>, AllowlistError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut identifiers = Vec::new();
    let mut record = StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(source) => {
                let line =
                    source.position().map_or_else(|| reader.position().line(), Position::line);
                return Err(AllowlistError::Read { line, source });
            }
        }

        if let Some(identifier) = first_column(&record) {
            identifiers.push(identifier.to_owned());
        }
    }

    if identifiers.is_empty() {
        return Err(AllowlistError::NoIdentifiers);
    }

    debug!(target: "allowlist", rows = identifiers.len(), "Parsed allow-list");
    Ok(identifiers)
}

/// Parse identifiers from an in-memory string
pub fn parse_allowlist_str(input: &str) -> Result<Vec<String>, AllowlistError> {
    parse_allowlist(input.as_bytes())
}

/// Open and parse an allow-list file
pub fn load_allowlist(path: impl AsRef<Path>) -> Result<Vec<String>, AllowlistError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|source| AllowlistError::Open { path: path.to_path_buf(), source })?;
    parse_allowlist(file)
}

fn first_column(record: &StringRecord) -> Option<&str> {
    let column = record.get(0)?.trim_start_matches('\u{feff}').trim();
    (!column.is_empty() && !column.starts_with('#')).then_some(column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_first_column_only() {
        let ids = parse_allowlist_str("Addr1,alice,42\nAddr2, bob\nAddr3").unwrap();
        assert_eq!(ids, vec!["Addr1", "Addr2", "Addr3"]);
    }

    #[test]
    fn test_skips_blank_and_comment_rows() {
        let input = "# attendees\n\n   \nAddr1\n  # trailing note\n,missing first column\nAddr2\n";
        let ids = parse_allowlist_str(input).unwrap();
        assert_eq!(ids, vec!["Addr1", "Addr2"]);
    }

    #[test]
    fn test_trims_and_unquotes() {
        let ids = parse_allowlist_str("\" Addr1 \",x\r\n\"Addr2\"\r\n  Addr3  ,y\n").unwrap();
        assert_eq!(ids, vec!["Addr1", "Addr2", "Addr3"]);
    }

    #[test]
    fn test_quoted_field_keeps_commas() {
        let ids = parse_allowlist_str("\"Addr,1\",x\n\"Addr \"\"2\"\"\"\n").unwrap();
        assert_eq!(ids, vec!["Addr,1", "Addr \"2\""]);
    }

    #[test]
    fn test_invalid_utf8_reports_line() {
        let err = parse_allowlist(&b"Addr1\nAddr\xff2\n"[..]).unwrap_err();
        assert!(matches!(err, AllowlistError::Read { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn test_keeps_duplicates_for_builder() {
        let ids = parse_allowlist_str("Addr1\nAddr1\n").unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let ids = parse_allowlist_str("\u{feff}Addr1\nAddr2").unwrap();
        assert_eq!(ids, vec!["Addr1", "Addr2"]);
    }

    #[test]
    fn test_no_identifiers() {
        assert!(matches!(parse_allowlist_str(""), Err(AllowlistError::NoIdentifiers)));
        assert!(matches!(
            parse_allowlist_str("# only comments\n\n"),
            Err(AllowlistError::NoIdentifiers)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "address,name").unwrap();
        writeln!(file, "Addr1,alice").unwrap();
        file.flush().unwrap();

        let ids = load_allowlist(file.path()).unwrap();
        assert_eq!(ids, vec!["address", "Addr1"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_allowlist(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, AllowlistError::Open { .. }));
    }
}
