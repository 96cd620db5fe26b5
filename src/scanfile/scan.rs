//! Parsed scan object
//!
//! `ParsedScan` opens the ordered file set of one acquisition, reads the
//! TIFF structure of every file, parses the ScanImage header and the
//! ROI-group metadata, and exposes typed accessors over the whole scan.
//! All file handles are scoped to `open`; afterwards the scan is a plain
//! in-memory value.

use log::{debug, warn};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::scanfile::constants::{keys, tags};
use crate::scanfile::errors::{ScanError, ScanResult};
use crate::scanfile::metadata::HeaderMap;
use crate::scanfile::reader::ScanFileReader;
use crate::scanfile::roi::RoiGroup;
use crate::scanfile::timing::{self, DelayImage};
use crate::scanfile::types::ScanFile;

/// One imaged rectangle of a multi-ROI acquisition, flattened to a
/// single depth
#[derive(Debug, Clone)]
pub struct RoiField {
    /// Height in pixels
    pub px_height: u32,
    /// Width in pixels
    pub px_width: u32,
    /// Height in scan-angle degrees
    pub height_deg: f64,
    /// Width in scan-angle degrees
    pub width_deg: f64,
    /// Center x in scan-angle degrees
    pub x_deg: f64,
    /// Center y in scan-angle degrees
    pub y_deg: f64,
    /// Depth in microns, relative to the motor zero
    pub depth: f64,
}

/// A fully parsed ScanImage acquisition
#[derive(Debug)]
pub struct ParsedScan {
    /// Per-file TIFF structure, in acquisition order
    files: Vec<ScanFile>,
    /// Acquisition-wide ScanImage header
    header: HeaderMap,
    /// ROI-group metadata, present on multi-ROI scans
    roi_group: Option<RoiGroup>,
    /// Page width in pixels
    image_width: u32,
    /// Page height in pixels
    image_height: u32,
    /// Total recorded pages across all files
    total_pages: usize,
}

impl ParsedScan {
    /// Opens and parses a scan from its ordered file set
    ///
    /// # Arguments
    /// * `paths` - All files comprising the scan, in acquisition order
    ///
    /// # Returns
    /// The parsed scan, or an error if the file set is empty, a file
    /// cannot be parsed, or the files disagree on acquisition parameters
    pub fn open(paths: &[PathBuf]) -> ScanResult<ParsedScan> {
        if paths.is_empty() {
            return Err(ScanError::EmptyFileSet);
        }

        let mut reader = ScanFileReader::new();
        let mut files = Vec::with_capacity(paths.len());
        let mut header_text = None;
        let mut roi_text = None;

        for (index, path) in paths.iter().enumerate() {
            let scan_file = reader.load(path)?;

            if index == 0 {
                header_text = Some(Self::read_header_text(&reader, &scan_file, path)?);
                roi_text = Self::read_roi_text(&reader, &scan_file, path)?;
            }

            files.push(scan_file);
        }

        let header = HeaderMap::parse(header_text.as_deref().unwrap_or(""));
        if header.is_empty() {
            return Err(ScanError::InvalidHeader);
        }
        debug!("Parsed {} ScanImage header entries", header.len());

        let (image_width, image_height) = files[0]
            .dimensions()
            .ok_or(ScanError::MissingDimensions)?;

        // Files of one scan are slices of the same page sequence; any
        // geometry drift between them means the set was assembled wrong.
        for file in &files[1..] {
            let dims = file.dimensions().ok_or(ScanError::MissingDimensions)?;
            if dims != (image_width, image_height) {
                return Err(ScanError::InconsistentFileSet(format!(
                    "{} has page size {}x{}, expected {}x{}",
                    file.path.display(), dims.0, dims.1, image_width, image_height
                )));
            }
        }

        let total_pages = files.iter().map(|f| f.page_count()).sum();

        let is_multiroi = header.get_bool_or(keys::MROI_ENABLE, false)?;
        let roi_group = match roi_text {
            Some(json) if !json.trim().is_empty() => match RoiGroup::parse(&json) {
                Ok(group) => Some(group),
                Err(e) if is_multiroi => return Err(e),
                Err(e) => {
                    warn!("Ignoring unparseable ROI metadata on single-plane scan: {}", e);
                    None
                }
            },
            _ => None,
        };

        Ok(ParsedScan {
            files,
            header,
            roi_group,
            image_width: image_width as u32,
            image_height: image_height as u32,
            total_pages,
        })
    }

    /// Reads the ScanImage header text from the first page
    ///
    /// ScanImage 2016b+ writes the acquisition header into the Software
    /// tag; older builds only fill ImageDescription.
    fn read_header_text(reader: &ScanFileReader, scan_file: &ScanFile, path: &Path) -> ScanResult<String> {
        let ifd = scan_file.main_ifd().ok_or(ScanError::InvalidHeader)?;
        let file = File::open(path)?;
        let mut buf = BufReader::new(file);

        match reader.read_ascii_tag(&mut buf, ifd, tags::SOFTWARE) {
            Ok(text) => Ok(text),
            Err(ScanError::TagNotFound(_)) => {
                debug!("No Software tag, falling back to ImageDescription");
                reader.read_ascii_tag(&mut buf, ifd, tags::IMAGE_DESCRIPTION)
                    .map_err(|_| ScanError::InvalidHeader)
            }
            Err(e) => Err(e),
        }
    }

    /// Reads the ROI-group JSON from the first page, if present
    fn read_roi_text(reader: &ScanFileReader, scan_file: &ScanFile, path: &Path) -> ScanResult<Option<String>> {
        let ifd = scan_file.main_ifd().ok_or(ScanError::InvalidHeader)?;

        if !ifd.has_tag(tags::ARTIST) {
            return Ok(None);
        }

        let file = File::open(path)?;
        let mut buf = BufReader::new(file);
        reader.read_ascii_tag(&mut buf, ifd, tags::ARTIST).map(Some)
    }

    /// Paths of the files comprising this scan, in acquisition order
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(|f| f.path.as_path()).collect()
    }

    /// Number of files in the scan set
    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    /// Per-file TIFF structures
    pub fn files(&self) -> &[ScanFile] {
        &self.files
    }

    /// The parsed ScanImage header
    pub fn header(&self) -> &HeaderMap {
        &self.header
    }

    /// ScanImage version string, when the header reports one
    pub fn version(&self) -> Option<String> {
        self.header.get_str(keys::VERSION_MAJOR)
    }

    /// Whether this acquisition used multi-ROI scanning
    pub fn is_multiroi(&self) -> ScanResult<bool> {
        self.header.get_bool_or(keys::MROI_ENABLE, false)
    }

    /// Number of recorded channels
    pub fn num_channels(&self) -> ScanResult<usize> {
        let channels = self.header.get_f64_array(keys::CHANNEL_SAVE)?;
        if channels.is_empty() {
            debug!("No channelSave entry, assuming a single channel");
            return Ok(1);
        }
        Ok(channels.len())
    }

    /// Scanning depths in microns, in stored order
    ///
    /// A scan without stack information is a single plane at depth zero.
    pub fn scanning_depths(&self) -> ScanResult<Vec<f64>> {
        let depths = self.header.get_f64_array(keys::STACK_ZS)?;
        if depths.is_empty() {
            return Ok(vec![0.0]);
        }
        Ok(depths)
    }

    /// Number of scanning depths (planes)
    pub fn num_scanning_depths(&self) -> ScanResult<usize> {
        Ok(self.scanning_depths()?.len())
    }

    /// Number of recorded frames
    ///
    /// Every frame records one page per channel per depth; the frame
    /// count is the page total divided by that product. Truncated
    /// acquisitions leave a remainder, which is tolerated.
    pub fn num_frames(&self) -> ScanResult<u32> {
        let pages_per_frame = self.num_channels()? * self.num_scanning_depths()?;
        let frames = self.total_pages / pages_per_frame;
        if self.total_pages % pages_per_frame != 0 {
            warn!("{} pages do not divide evenly into {} per frame; assuming {} frames",
                  self.total_pages, pages_per_frame, frames);
        }
        Ok(frames as u32)
    }

    /// Total recorded pages across all files
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Frame rate in Hz
    pub fn fps(&self) -> ScanResult<f64> {
        self.header.get_f64(keys::SCAN_FRAME_RATE)
    }

    /// Scan line period in seconds
    pub fn seconds_per_line(&self) -> ScanResult<f64> {
        self.header.get_f64(keys::LINE_PERIOD)
    }

    /// Temporal fill fraction of each scan line
    pub fn temporal_fill_fraction(&self) -> ScanResult<f64> {
        Ok(self.header.get_f64_opt(keys::FILL_FRACTION_TEMPORAL)?.unwrap_or(1.0))
    }

    /// Whether the scanner acquired lines bidirectionally
    pub fn is_bidirectional(&self) -> ScanResult<bool> {
        self.header.get_bool_or(keys::BIDIRECTIONAL, false)
    }

    /// Motor position at the acquisition's zero point, microns
    pub fn motor_position_at_zero(&self) -> ScanResult<[f64; 3]> {
        let position = self.header.get_f64_array(keys::MOTOR_POSITION)?;
        if position.is_empty() {
            debug!("No motor position in header, assuming origin");
            return Ok([0.0, 0.0, 0.0]);
        }

        let mut zero = [0.0; 3];
        for (axis, value) in zero.iter_mut().zip(position.iter()) {
            *axis = *value;
        }
        Ok(zero)
    }

    /// Angle-to-distance calibration: microns per scan-angle degree
    ///
    /// Fixed by the acquisition's objective configuration; geometry code
    /// must use this value rather than re-deriving a calibration.
    pub fn microns_per_degree(&self) -> ScanResult<f64> {
        self.header.get_f64(keys::OBJECTIVE_RESOLUTION)
    }

    /// Page height in pixels (the shared field height in raster mode)
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Page width in pixels (the shared field width in raster mode)
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Physical page size in microns, when the format reports it
    ///
    /// Raster acquisitions only carry physical dimensions when a default
    /// scanfield was recorded alongside the angle calibration.
    pub fn image_size_in_microns(&self) -> Option<(f64, f64)> {
        let um_per_deg = self.header.get_f64_opt(keys::OBJECTIVE_RESOLUTION).ok()??;
        let group = self.roi_group.as_ref()?;
        let scanfield = group.rois.first()?.scanfields.first()?;

        Some((
            scanfield.height_deg * um_per_deg,
            scanfield.width_deg * um_per_deg,
        ))
    }

    /// Number of ROIs in the imaging ROI group
    pub fn num_rois(&self) -> usize {
        self.roi_group.as_ref().map(|g| g.num_rois()).unwrap_or(0)
    }

    /// The imaged fields of a multi-ROI scan, one per (ROI, depth) pair
    ///
    /// Fields are ordered depth-major: all ROIs of the shallowest depth
    /// first, matching the scanner's acquisition order.
    pub fn fields(&self) -> ScanResult<Vec<RoiField>> {
        let group = self.roi_group.as_ref().ok_or_else(|| {
            ScanError::GenericError("multi-ROI scan carries no ROI-group metadata".to_string())
        })?;

        let mut fields = Vec::new();
        for z in self.scanning_depths()? {
            for roi in &group.rois {
                if !roi.covers_depth(z) {
                    continue;
                }
                if let Some(scanfield) = roi.scanfield_at(z) {
                    fields.push(RoiField {
                        px_height: scanfield.px_height,
                        px_width: scanfield.px_width,
                        height_deg: scanfield.height_deg,
                        width_deg: scanfield.width_deg,
                        x_deg: scanfield.center_x_deg,
                        y_deg: scanfield.center_y_deg,
                        depth: z,
                    });
                }
            }
        }

        Ok(fields)
    }

    /// Number of imaged fields
    pub fn num_fields(&self) -> ScanResult<usize> {
        if self.is_multiroi()? {
            Ok(self.fields()?.len())
        } else {
            self.num_scanning_depths()
        }
    }

    /// Lines the scanner spends flying between consecutive scanfields
    pub fn flyto_lines(&self) -> ScanResult<usize> {
        match self.header.get_f64_opt(keys::FLYTO_TIME_PER_SCANFIELD)? {
            Some(flyto_time) => {
                let line_period = self.seconds_per_line()?;
                Ok((flyto_time / line_period).round() as usize)
            }
            None => Ok(0),
        }
    }

    /// The delay image for one field, milliseconds per pixel
    ///
    /// In multi-ROI mode the field's first line is offset by every
    /// earlier field at the same depth plus the fly-to lines between
    /// them; raster fields always start at line zero of their frame.
    pub fn field_delay_image(&self, field_idx: usize) -> ScanResult<DelayImage> {
        let seconds_per_line = self.seconds_per_line()?;
        let fill_fraction = self.temporal_fill_fraction()?;
        let bidirectional = self.is_bidirectional()?;

        if self.is_multiroi()? {
            let fields = self.fields()?;
            let field = fields.get(field_idx).ok_or_else(|| {
                ScanError::GenericError(format!("field index {} out of range", field_idx))
            })?;

            let flyto_lines = self.flyto_lines()?;
            let start_line = fields[..field_idx]
                .iter()
                .filter(|other| (other.depth - field.depth).abs() < 1e-6)
                .map(|other| other.px_height as usize + flyto_lines)
                .sum();

            Ok(timing::field_delay_image(
                field.px_height as usize,
                field.px_width as usize,
                start_line,
                seconds_per_line,
                fill_fraction,
                bidirectional,
            ))
        } else {
            let num_depths = self.num_scanning_depths()?;
            if field_idx >= num_depths {
                return Err(ScanError::GenericError(format!(
                    "field index {} out of range", field_idx
                )));
            }

            Ok(timing::field_delay_image(
                self.image_height as usize,
                self.image_width as usize,
                0,
                seconds_per_line,
                fill_fraction,
                bidirectional,
            ))
        }
    }
}
