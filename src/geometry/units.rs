//! Unit conversions between native scan units and record units
//!
//! The scan format reports angles in degrees, line periods in seconds
//! and depths in microns; records store microns and microseconds.

/// Converts a scan angle to a distance using the format's calibration
///
/// The calibration (microns per degree) comes from the scan file's
/// objective configuration and is never re-derived here.
pub fn degrees_to_microns(degrees: f64, microns_per_degree: f64) -> f64 {
    degrees * microns_per_degree
}

/// Converts a line period from seconds to microseconds
pub fn seconds_to_microseconds(seconds: f64) -> f64 {
    seconds * 1e6
}

/// Converts a line period from microseconds back to seconds
pub fn microseconds_to_seconds(microseconds: f64) -> f64 {
    microseconds / 1e6
}
