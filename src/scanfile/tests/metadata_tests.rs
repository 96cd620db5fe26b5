//! Tests for ScanImage header parsing

use crate::scanfile::errors::ScanError;
use crate::scanfile::metadata::HeaderMap;
use crate::scanfile::tests::test_utils::single_plane_header;

#[test]
fn test_parse_header_lines() {
    let header = HeaderMap::parse(&single_plane_header());

    assert_eq!(header.len(), 10);
    assert_eq!(header.get("hRoiManager.mroiEnable"), Some("false"));
    assert_eq!(header.get("objectiveResolution"), Some("15"));
}

#[test]
fn test_parse_ignores_unrelated_lines() {
    let text = "frameNumbers = 1\nSI.hRoiManager.linePeriod = 1e-05\nepoch = [2020 3 1]";
    let header = HeaderMap::parse(text);

    assert_eq!(header.len(), 1);
    assert!(header.get("frameNumbers").is_none());
}

#[test]
fn test_parse_accepts_scanimage_prefix() {
    // Older builds prefix every key with "scanimage."
    let text = "scanimage.SI.hRoiManager.scanFrameRate = 58.3";
    let header = HeaderMap::parse(text);

    assert!((header.get_f64("hRoiManager.scanFrameRate").unwrap() - 58.3).abs() < 1e-12);
}

#[test]
fn test_get_str_strips_matlab_quotes() {
    let header = HeaderMap::parse("SI.VERSION_MAJOR = '2020'");

    assert_eq!(header.get_str("VERSION_MAJOR"), Some("2020".to_string()));
}

#[test]
fn test_get_bool_or() {
    let header = HeaderMap::parse("SI.a = true\nSI.b = 0\nSI.c = maybe");

    assert!(header.get_bool_or("a", false).unwrap());
    assert!(!header.get_bool_or("b", true).unwrap());
    assert!(header.get_bool_or("missing", true).unwrap());
    assert!(matches!(
        header.get_bool_or("c", false),
        Err(ScanError::InvalidParameter { .. })
    ));
}

#[test]
fn test_get_f64_missing_is_an_error() {
    let header = HeaderMap::parse("SI.a = 1.0");

    match header.get_f64("hRoiManager.linePeriod") {
        Err(ScanError::MissingParameter(key)) => assert_eq!(key, "hRoiManager.linePeriod"),
        other => panic!("expected MissingParameter, got {:?}", other),
    }
}

#[test]
fn test_get_f64_array_separators() {
    let header = HeaderMap::parse("SI.spaces = [0 5 10]\nSI.semis = [1;2]\nSI.scalar = 7\nSI.empty = []");

    assert_eq!(header.get_f64_array("spaces").unwrap(), vec![0.0, 5.0, 10.0]);
    assert_eq!(header.get_f64_array("semis").unwrap(), vec![1.0, 2.0]);
    assert_eq!(header.get_f64_array("scalar").unwrap(), vec![7.0]);
    assert!(header.get_f64_array("empty").unwrap().is_empty());
    assert!(header.get_f64_array("missing").unwrap().is_empty());
}

#[test]
fn test_get_f64_array_invalid_token() {
    let header = HeaderMap::parse("SI.zs = [0 five 10]");

    assert!(matches!(
        header.get_f64_array("zs"),
        Err(ScanError::InvalidParameter { .. })
    ));
}

#[test]
fn test_matlab_infinity_literal() {
    let header = HeaderMap::parse("SI.hStackManager.framesPerSlice = Inf");

    assert!(header.get_f64("hStackManager.framesPerSlice").unwrap().is_infinite());
}
