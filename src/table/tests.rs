use super::*;
use crate::ids::{PeakIndex, SpectrumIndex};
use std::io::Cursor;

const BACKEND: &str = "# MsBackendMzR\n\"msLevel\"\t\"rtime\"\t\"dataOrigin\"\n\"1\"\t1\t0.275\t\"/data/ko15.mzML\"\n\"2\"\t1\t1.84\t\"/data/ko15.mzML\"\n";

#[test]
fn test_read_preserves_header_lines() {
    let table = RowTableCodec::new(1).read(Cursor::new(BACKEND)).unwrap();

    assert_eq!(table.preamble, vec!["# MsBackendMzR".to_string()]);
    assert_eq!(table.column_names(), vec!["msLevel", "rtime", "dataOrigin"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[1].label, "\"2\"");
    assert!(table.index_label.is_none());
    assert!(table.quoted_labels);
}

#[test]
fn test_roundtrip_is_byte_exact() {
    let codec = RowTableCodec::new(1);
    let table = codec.read(Cursor::new(BACKEND)).unwrap();

    let mut out = Vec::new();
    codec.write(&table, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), BACKEND);
}

#[test]
fn test_relabel_with_prefix_and_offset() {
    let text = "## header\n\"mz\"\t\"mzmin\"\t\"mzmax\"\n\"CP1\"\t1\t2\t3\n\"CP2\"\t4\t5\t6\n";
    let mut table = RowTableCodec::new(1).read(Cursor::new(text)).unwrap();
    table.relabel(PeakIndex::after(7));

    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["\"CP8\"", "\"CP9\""]);
}

#[test]
fn test_unquoted_labels_stay_unquoted() {
    let text = "a\tb\nrow1\t1\t3\nrow2\t2\t4\n";
    let mut table = RowTableCodec::new(0).read(Cursor::new(text)).unwrap();
    assert!(!table.quoted_labels);

    table.relabel(SpectrumIndex::after(0));
    let mut out = Vec::new();
    RowTableCodec::new(0).write(&table, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a\tb\n1\t1\t3\n2\t2\t4\n");
}

#[test]
fn test_header_with_label_column() {
    let text = "id\ta\tb\nx\t1\t2\n";
    let table = RowTableCodec::new(0).read(Cursor::new(text)).unwrap();
    assert_eq!(table.index_label.as_deref(), Some("id"));
    assert_eq!(table.column_names(), vec!["a", "b"]);
}

#[test]
fn test_header_only_table_is_empty() {
    let text = "\"ms_level\"\t\"is_filled\"\n";
    let table = RowTableCodec::new(0).read(Cursor::new(text)).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.column_names(), vec!["ms_level", "is_filled"]);
}

#[test]
fn test_truncated_preamble() {
    let err = RowTableCodec::new(2).read(Cursor::new("# only one\n")).unwrap_err();
    assert!(matches!(err, TableError::TruncatedHeader { expected: 2, found: 1 }));
}

#[test]
fn test_ragged_row_is_rejected() {
    let text = "a\tb\n\"1\"\t1\t2\n\"2\"\t1\n";
    let err = RowTableCodec::new(0).read(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, TableError::RaggedRow { line: 3, expected: 3, found: 2 }));
}

#[test]
fn test_map_column_missing_is_noop() {
    let mut table = RowTableCodec::new(1).read(Cursor::new(BACKEND)).unwrap();
    let touched = table
        .map_column::<TableError, _>("dataStorage", |v| Ok(v.to_string()))
        .unwrap();
    assert!(!touched);

    let touched = table
        .map_column::<TableError, _>("rtime", |v| Ok(format!("{}0", v)))
        .unwrap();
    assert!(touched);
    assert_eq!(table.column_values("rtime").unwrap().collect::<Vec<_>>(), vec!["0.2750", "1.840"]);
}

#[test]
fn test_quote_helpers() {
    assert_eq!(unquote("\"sample\""), "sample");
    assert_eq!(unquote("sample"), "sample");
    assert_eq!(unquote("\""), "\"");
    assert_eq!(requote_like("\"/a/b.mzML\"", "/c/b.mzML"), "\"/c/b.mzML\"");
    assert_eq!(requote_like("/a/b.mzML", "/c/b.mzML"), "/c/b.mzML");
}

#[test]
fn test_links_read_offset_write() {
    let links = LinksTable::read(Cursor::new("1\t1\n1\t2\n\"1\"\t\"3\"\n")).unwrap();
    assert_eq!(links.len(), 3);

    let shifted = links.offset(1, 100);
    let mut out = Vec::new();
    shifted.write(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "2\t101\n2\t102\n2\t103\n");
}

#[test]
fn test_links_reject_bad_values() {
    let err = LinksTable::read(Cursor::new("1\tx\n")).unwrap_err();
    assert!(matches!(err, TableError::InvalidValue { line: 1, .. }));

    let err = LinksTable::read(Cursor::new("1\t2\t3\n")).unwrap_err();
    assert!(matches!(err, TableError::RaggedRow { expected: 2, found: 3, .. }));
}
