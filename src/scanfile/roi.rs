//! ScanImage ROI-group metadata parsing
//!
//! Multi-ROI acquisitions carry a JSON document in the Artist tag
//! describing the imaging ROI group: each ROI lists the z planes it is
//! defined at (`zs`) and one scanfield per plane with its center and
//! size in scan-angle degrees plus its pixel resolution. ScanImage
//! serializes single-element collections as bare objects rather than
//! one-element arrays, so both encodings must be accepted.

use log::debug;
use serde::Deserialize;

use crate::scanfile::errors::{ScanError, ScanResult};

/// A JSON value that may be a bare element or an array of elements
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoiDocument {
    #[serde(rename = "RoiGroups")]
    roi_groups: RoiGroupsRaw,
}

#[derive(Debug, Deserialize)]
struct RoiGroupsRaw {
    #[serde(rename = "imagingRoiGroup")]
    imaging_roi_group: RoiGroupRaw,
}

#[derive(Debug, Deserialize)]
struct RoiGroupRaw {
    rois: OneOrMany<RoiRaw>,
}

#[derive(Debug, Deserialize)]
struct RoiRaw {
    zs: Option<OneOrMany<f64>>,
    scanfields: Option<OneOrMany<ScanFieldRaw>>,
}

#[derive(Debug, Deserialize)]
struct ScanFieldRaw {
    #[serde(rename = "centerXY")]
    center_xy: [f64; 2],
    #[serde(rename = "sizeXY")]
    size_xy: [f64; 2],
    #[serde(rename = "pixelResolutionXY")]
    pixel_resolution_xy: [u32; 2],
}

/// One scanfield of an ROI: a rectangle in scan-angle space
#[derive(Debug, Clone)]
pub struct ScanField {
    /// Center of the rectangle, scan-angle degrees
    pub center_x_deg: f64,
    /// Center of the rectangle, scan-angle degrees
    pub center_y_deg: f64,
    /// Width of the rectangle, scan-angle degrees
    pub width_deg: f64,
    /// Height of the rectangle, scan-angle degrees
    pub height_deg: f64,
    /// Width in pixels
    pub px_width: u32,
    /// Height in pixels
    pub px_height: u32,
}

/// One ROI of the imaging ROI group
#[derive(Debug, Clone)]
pub struct Roi {
    /// Depths (microns) this ROI is defined at; empty = all depths
    pub zs: Vec<f64>,
    /// One scanfield per depth, or a single shared scanfield
    pub scanfields: Vec<ScanField>,
}

impl Roi {
    /// Whether this ROI is imaged at the given depth
    pub fn covers_depth(&self, z: f64) -> bool {
        if self.zs.is_empty() {
            return true;
        }
        self.zs.iter().any(|roi_z| (roi_z - z).abs() < 1e-6)
    }

    /// The scanfield describing this ROI at the given depth
    ///
    /// When the ROI carries one scanfield per listed depth the matching
    /// one is returned; a single scanfield is shared across all depths.
    pub fn scanfield_at(&self, z: f64) -> Option<&ScanField> {
        if self.scanfields.is_empty() {
            return None;
        }

        if self.scanfields.len() == self.zs.len() {
            if let Some(index) = self.zs.iter().position(|roi_z| (roi_z - z).abs() < 1e-6) {
                return self.scanfields.get(index);
            }
        }

        self.scanfields.first()
    }
}

/// The imaging ROI group of a multi-ROI acquisition
#[derive(Debug, Clone)]
pub struct RoiGroup {
    /// ROIs in scan order
    pub rois: Vec<Roi>,
}

impl RoiGroup {
    /// Parses the Artist-tag JSON document into an ROI group
    pub fn parse(json: &str) -> ScanResult<RoiGroup> {
        let document: RoiDocument = serde_json::from_str(json).map_err(|e| {
            ScanError::GenericError(format!("Invalid ROI-group JSON: {}", e))
        })?;

        let rois = document
            .roi_groups
            .imaging_roi_group
            .rois
            .into_vec()
            .into_iter()
            .map(|roi| Roi {
                zs: roi.zs.map(OneOrMany::into_vec).unwrap_or_default(),
                scanfields: roi
                    .scanfields
                    .map(OneOrMany::into_vec)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|sf| ScanField {
                        center_x_deg: sf.center_xy[0],
                        center_y_deg: sf.center_xy[1],
                        width_deg: sf.size_xy[0],
                        height_deg: sf.size_xy[1],
                        px_width: sf.pixel_resolution_xy[0],
                        px_height: sf.pixel_resolution_xy[1],
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        debug!("Parsed ROI group with {} ROIs", rois.len());

        Ok(RoiGroup { rois })
    }

    /// Number of ROIs in the group
    pub fn num_rois(&self) -> usize {
        self.rois.len()
    }
}
