//! Scan-file format constants
//!
//! Constants used throughout the scan-file decoding code, replacing
//! magic numbers with descriptive names. ScanImage stacks are regular
//! TIFF or BigTIFF containers with acquisition metadata in text tags.

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const BYTE: u16 = 1;       // 8-bit unsigned integer
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const RATIONAL: u16 = 5;   // Two LONGs: numerator and denominator
    pub const SBYTE: u16 = 6;      // 8-bit signed integer
    pub const UNDEFINED: u16 = 7;  // 8-bit byte with unspecified format
    pub const SSHORT: u16 = 8;     // 16-bit signed integer
    pub const SLONG: u16 = 9;      // 32-bit signed integer
    pub const SRATIONAL: u16 = 10; // Two SLONGs: numerator and denominator
    pub const FLOAT: u16 = 11;     // Single precision IEEE floating point
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer
    pub const SLONG8: u16 = 17;    // BigTIFF 64-bit signed integer
    pub const IFD8: u16 = 18;      // BigTIFF 64-bit IFD offset
}

/// TIFF tags the scan decoder cares about
pub mod tags {
    // Basic image structure tags
    pub const IMAGE_WIDTH: u16 = 256;        // Width of each page in pixels
    pub const IMAGE_LENGTH: u16 = 257;       // Height of each page in pixels
    pub const BITS_PER_SAMPLE: u16 = 258;    // Bits per component
    pub const IMAGE_DESCRIPTION: u16 = 270;  // Per-frame ScanImage metadata text
    pub const SAMPLES_PER_PIXEL: u16 = 277;  // Number of components per pixel
    pub const SOFTWARE: u16 = 305;           // Acquisition-wide ScanImage header text
    pub const DATE_TIME: u16 = 306;          // Acquisition timestamp
    pub const ARTIST: u16 = 315;             // ScanImage ROI-group JSON document
}

/// ScanImage header keys, stored without the leading "SI." prefix
pub mod keys {
    pub const VERSION_MAJOR: &str = "VERSION_MAJOR";
    pub const MROI_ENABLE: &str = "hRoiManager.mroiEnable";
    pub const SCAN_FRAME_RATE: &str = "hRoiManager.scanFrameRate";
    pub const LINE_PERIOD: &str = "hRoiManager.linePeriod";
    pub const FILL_FRACTION_TEMPORAL: &str = "hScan2D.fillFractionTemporal";
    pub const BIDIRECTIONAL: &str = "hScan2D.bidirectional";
    pub const FLYTO_TIME_PER_SCANFIELD: &str = "hScan2D.flytoTimePerScanfield";
    pub const CHANNEL_SAVE: &str = "hChannels.channelSave";
    pub const STACK_ZS: &str = "hStackManager.zs";
    pub const MOTOR_POSITION: &str = "hMotors.motorPosition";
    pub const OBJECTIVE_RESOLUTION: &str = "objectiveResolution";
}
