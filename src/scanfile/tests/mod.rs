//! Tests for the scan-file decoding module

mod test_utils;
mod reader_tests;
mod metadata_tests;
mod roi_tests;
