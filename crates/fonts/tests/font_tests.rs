//! Integration tests for hershey-text-fonts crate.

use std::io::Write;

use hershey_text_core::{Error, LineFault};
use hershey_text_fonts::{DecodeOptions, FontTable, LineIssue, available_built_in_names};

#[test]
fn test_all_built_in_fonts_decode_strictly() {
    for name in available_built_in_names() {
        let table = FontTable::built_in(&name).unwrap();
        assert_eq!(table.name(), name);
        assert!(table.len() >= 96, "{name} has only {} glyphs", table.len());
        assert!(table.issues().is_empty(), "{name} has skipped lines");
    }
}

#[test]
fn test_built_in_decode_is_stable() {
    let first = FontTable::built_in("timesr").unwrap();
    let second = FontTable::built_in("timesr").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_built_in_codes_are_contiguous_from_space() {
    let table = FontTable::built_in("futural").unwrap();
    let codes: Vec<u32> = table.glyphs().map(|g| g.code).collect();
    let expected: Vec<u32> = (32..32 + codes.len() as u32).collect();
    assert_eq!(codes, expected);

    let space = table.lookup_char(' ').unwrap();
    assert!(space.strokes.is_empty());
    assert_eq!(space.char_width(), 16);
}

#[test]
fn test_built_in_metrics_from_header() {
    let table = FontTable::built_in("futural").unwrap();
    assert_eq!(table.metrics().cap_line, -12.0);
    assert_eq!(table.metrics().base_line, 9.0);
    assert_eq!(table.metrics().bottom_line, 16.0);
}

#[test]
fn test_unknown_built_in() {
    let result = FontTable::built_in("nonexistent");
    assert!(matches!(
        result,
        Err(Error::UnknownFontIdentifier { ref name }) if name == "nonexistent"
    ));
}

#[test]
fn test_default_built_in_is_listed() {
    let table = FontTable::default_built_in().unwrap();
    assert!(available_built_in_names().contains(&table.name().to_string()));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".jhf").tempfile().unwrap();
    writeln!(file, "12345  1JZ").unwrap();
    writeln!(file, "12345  3RRRRKK").unwrap();
    writeln!(file, "12345  4RRRRKK").unwrap();

    let table = FontTable::from_file(file.path(), &DecodeOptions::default()).unwrap();
    let stem = file.path().file_stem().unwrap().to_string_lossy();
    assert_eq!(table.name(), stem);
    assert_eq!(table.len(), 2);
    assert!(table.lookup(34).is_none());
    assert_eq!(
        table.issues(),
        &[LineIssue::Glyph {
            line: 3,
            code: 34,
            fault: LineFault::PointCountMismatch {
                declared: 4,
                available: 3
            },
        }]
    );

    let strict = FontTable::from_file(file.path(), &DecodeOptions::strict());
    assert!(matches!(
        strict,
        Err(Error::MalformedGlyphLine { line: 3, .. })
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jhf");

    let result = FontTable::from_file(&path, &DecodeOptions::default());
    match result {
        Err(Error::FileAccessFailure { path: failed, source }) => {
            assert_eq!(failed, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected FileAccessFailure, got {other:?}"),
    }
}

#[test]
fn test_custom_first_code() {
    let options = DecodeOptions {
        first_code: 65,
        ..DecodeOptions::default()
    };
    let table = FontTable::from_lines("caps", ["12345  3RRRRKK"], &options).unwrap();
    assert!(table.lookup_char('A').is_some());
    assert!(table.lookup_char(' ').is_none());
}
