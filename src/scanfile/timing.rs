//! Per-pixel acquisition timing
//!
//! A raster scanner visits pixels one line at a time, so every pixel of
//! a field is acquired at a known delay after the frame starts. The
//! delay image records that per-pixel offset in milliseconds; downstream
//! motion and timing correction consumes it unchanged.

use serde::Serialize;

/// Row-major matrix of per-pixel acquisition delays in milliseconds
#[derive(Debug, Clone, Serialize)]
pub struct DelayImage {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

impl DelayImage {
    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Delay in milliseconds at the given pixel
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.width + col]
    }

    /// Row-major delay data in milliseconds
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// Computes the delay image for one field
///
/// Line `r` of the field is the scanner's line `start_line + r` within
/// the frame, so it begins at `(start_line + r) * seconds_per_line`.
/// Within a line only the active portion (the temporal fill fraction)
/// collects data, and bidirectional scanning acquires odd lines right
/// to left.
///
/// # Arguments
/// * `height` - Field height in pixels
/// * `width` - Field width in pixels
/// * `start_line` - The frame line index at which this field starts
/// * `seconds_per_line` - Scan line period in seconds
/// * `fill_fraction` - Temporal fill fraction of each line
/// * `bidirectional` - Whether odd lines are scanned in reverse
///
/// # Returns
/// The field's delay image in milliseconds
pub fn field_delay_image(
    height: usize,
    width: usize,
    start_line: usize,
    seconds_per_line: f64,
    fill_fraction: f64,
    bidirectional: bool,
) -> DelayImage {
    let mut data = Vec::with_capacity(height * width);

    for row in 0..height {
        let frame_line = start_line + row;
        let line_start = frame_line as f64 * seconds_per_line;
        let reversed = bidirectional && frame_line % 2 == 1;

        for col in 0..width {
            let scan_position = if reversed {
                (width - col) as f64 - 0.5
            } else {
                col as f64 + 0.5
            };

            let within_line = scan_position / width as f64 * seconds_per_line * fill_fraction;
            data.push((line_start + within_line) * 1e3);
        }
    }

    DelayImage {
        height,
        width,
        data,
    }
}
