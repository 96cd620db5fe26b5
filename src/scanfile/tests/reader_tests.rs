//! Tests for the scan-file structure reader

use std::io::Cursor;

use crate::scanfile::constants::tags;
use crate::scanfile::errors::ScanError;
use crate::scanfile::reader::ScanFileReader;
use crate::scanfile::tests::test_utils::{build_scan_stack, single_plane_header};

#[test]
fn test_read_single_page_structure() {
    let buffer = build_scan_stack(512, 256, 1, &single_plane_header(), None);
    let mut cursor = Cursor::new(buffer);

    let mut reader = ScanFileReader::new();
    let scan_file = reader.read(&mut cursor).unwrap();

    assert!(!scan_file.is_big_tiff);
    assert_eq!(scan_file.page_count(), 1);
    assert_eq!(scan_file.dimensions(), Some((512, 256)));
}

#[test]
fn test_read_multipage_chain() {
    let buffer = build_scan_stack(128, 64, 5, &single_plane_header(), None);
    let mut cursor = Cursor::new(buffer);

    let mut reader = ScanFileReader::new();
    let scan_file = reader.read(&mut cursor).unwrap();

    assert_eq!(scan_file.page_count(), 5);
    for ifd in &scan_file.ifds {
        assert_eq!(ifd.get_dimensions(), Some((128, 64)));
    }

    // Later pages only carry the dimension tags
    assert_eq!(scan_file.ifds[0].entry_count(), 3);
    assert_eq!(scan_file.ifds[4].entry_count(), 2);
}

#[test]
fn test_invalid_byte_order_marker() {
    let mut cursor = Cursor::new(vec![0x00u8, 0x00, 42, 0, 8, 0, 0, 0]);

    let mut reader = ScanFileReader::new();
    match reader.read(&mut cursor) {
        Err(ScanError::InvalidByteOrder(marker)) => assert_eq!(marker, 0),
        other => panic!("expected InvalidByteOrder, got {:?}", other),
    }
}

#[test]
fn test_unsupported_version() {
    // "II" followed by a bogus version number
    let mut cursor = Cursor::new(vec![0x49u8, 0x49, 99, 0, 8, 0, 0, 0]);

    let mut reader = ScanFileReader::new();
    match reader.read(&mut cursor) {
        Err(ScanError::UnsupportedVersion(version)) => assert_eq!(version, 99),
        other => panic!("expected UnsupportedVersion, got {:?}", other),
    }
}

#[test]
fn test_read_ascii_software_tag() {
    let header = single_plane_header();
    let buffer = build_scan_stack(512, 256, 2, &header, None);
    let mut cursor = Cursor::new(buffer);

    let mut reader = ScanFileReader::new();
    let scan_file = reader.read(&mut cursor).unwrap();

    let text = reader
        .read_ascii_tag(&mut cursor, scan_file.main_ifd().unwrap(), tags::SOFTWARE)
        .unwrap();

    assert_eq!(text, header);
}

#[test]
fn test_read_missing_tag() {
    let buffer = build_scan_stack(512, 256, 1, &single_plane_header(), None);
    let mut cursor = Cursor::new(buffer);

    let mut reader = ScanFileReader::new();
    let scan_file = reader.read(&mut cursor).unwrap();

    match reader.read_ascii_tag(&mut cursor, scan_file.main_ifd().unwrap(), tags::ARTIST) {
        Err(ScanError::TagNotFound(tag)) => assert_eq!(tag, tags::ARTIST),
        other => panic!("expected TagNotFound, got {:?}", other),
    }
}

#[test]
fn test_read_tag_values_inline() {
    let buffer = build_scan_stack(800, 600, 1, &single_plane_header(), None);
    let mut cursor = Cursor::new(buffer);

    let mut reader = ScanFileReader::new();
    let scan_file = reader.read(&mut cursor).unwrap();
    let ifd = scan_file.main_ifd().unwrap();

    let widths = reader.read_tag_values(&mut cursor, ifd, tags::IMAGE_WIDTH).unwrap();
    assert_eq!(widths, vec![800]);
}
