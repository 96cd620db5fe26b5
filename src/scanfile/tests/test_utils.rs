use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::PathBuf;

/// Builds an in-memory ScanImage stack: a little-endian TIFF whose
/// first page carries the acquisition header in the Software tag and,
/// optionally, the ROI-group JSON in the Artist tag
pub fn build_scan_stack(
    width: u32,
    height: u32,
    pages: usize,
    software: &str,
    artist: Option<&str>,
) -> Vec<u8> {
    let mut buffer = Vec::new();

    // TIFF header (little-endian)
    buffer.write_u16::<LittleEndian>(0x4949).unwrap(); // II for little-endian
    buffer.write_u16::<LittleEndian>(42).unwrap();     // TIFF magic number
    buffer.write_u32::<LittleEndian>(0).unwrap();      // first IFD offset, patched below

    // Tag data area: ASCII values too large to store inline
    let software_offset = buffer.len() as u32;
    buffer.extend_from_slice(software.as_bytes());
    buffer.push(0);
    if buffer.len() % 2 == 1 {
        buffer.push(0);
    }

    let artist_entry = artist.map(|text| {
        let offset = buffer.len() as u32;
        buffer.extend_from_slice(text.as_bytes());
        buffer.push(0);
        if buffer.len() % 2 == 1 {
            buffer.push(0);
        }
        (offset, text.len() as u32 + 1)
    });

    // IFD chain, one IFD per page
    let first_ifd_offset = buffer.len() as u32;
    for page in 0..pages {
        let mut entries: Vec<(u16, u16, u32, u32)> = vec![
            (256, 4, 1, width),  // ImageWidth (LONG)
            (257, 4, 1, height), // ImageLength (LONG)
        ];

        if page == 0 {
            entries.push((305, 2, software.len() as u32 + 1, software_offset));
            if let Some((offset, count)) = artist_entry {
                entries.push((315, 2, count, offset));
            }
        }

        entries.sort_by_key(|entry| entry.0);

        buffer.write_u16::<LittleEndian>(entries.len() as u16).unwrap();
        for (tag, field_type, count, value) in &entries {
            buffer.write_u16::<LittleEndian>(*tag).unwrap();
            buffer.write_u16::<LittleEndian>(*field_type).unwrap();
            buffer.write_u32::<LittleEndian>(*count).unwrap();
            buffer.write_u32::<LittleEndian>(*value).unwrap();
        }

        let next_offset = if page + 1 == pages {
            0
        } else {
            buffer.len() as u32 + 4
        };
        buffer.write_u32::<LittleEndian>(next_offset).unwrap();
    }

    buffer[4..8].copy_from_slice(&first_ifd_offset.to_le_bytes());

    buffer
}

/// Writes stack buffers into a unique temp directory, one .tif per
/// buffer, and returns the directory together with the file paths
pub fn write_scan_files(label: &str, buffers: &[Vec<u8>]) -> (PathBuf, Vec<PathBuf>) {
    let root = std::env::temp_dir().join(format!("scankit-test-{}-{}", std::process::id(), label));
    fs::create_dir_all(&root).unwrap();

    let mut paths = Vec::new();
    for (index, buffer) in buffers.iter().enumerate() {
        let path = root.join(format!("scan_{:05}.tif", index + 1));
        fs::write(&path, buffer).unwrap();
        paths.push(path);
    }

    (root, paths)
}

/// Acquisition header of a plain three-depth raster scan
pub fn single_plane_header() -> String {
    [
        "SI.VERSION_MAJOR = '2020'",
        "SI.hRoiManager.mroiEnable = false",
        "SI.hRoiManager.scanFrameRate = 30.0303",
        "SI.hRoiManager.linePeriod = 6.3e-05",
        "SI.hScan2D.fillFractionTemporal = 0.712867",
        "SI.hScan2D.bidirectional = true",
        "SI.hChannels.channelSave = [1;2]",
        "SI.hStackManager.zs = [0 5 10]",
        "SI.hMotors.motorPosition = [10 20 0]",
        "SI.objectiveResolution = 15",
    ]
    .join("\n")
}

/// Acquisition header of a two-ROI scan at a single depth
pub fn multiroi_header() -> String {
    [
        "SI.VERSION_MAJOR = '2021'",
        "SI.hRoiManager.mroiEnable = true",
        "SI.hRoiManager.scanFrameRate = 15.2",
        "SI.hRoiManager.linePeriod = 4.2e-05",
        "SI.hScan2D.fillFractionTemporal = 0.9",
        "SI.hScan2D.bidirectional = false",
        "SI.hScan2D.flytoTimePerScanfield = 2.1e-04",
        "SI.hChannels.channelSave = 1",
        "SI.hStackManager.zs = 0",
        "SI.hMotors.motorPosition = [-5 8 100]",
        "SI.objectiveResolution = 15",
    ]
    .join("\n")
}

/// ROI-group JSON with two single-depth ROIs
///
/// Single-element collections are deliberately written as bare objects,
/// the way ScanImage serializes them.
pub fn two_roi_json() -> String {
    r#"{"RoiGroups":{"imagingRoiGroup":{"rois":[
        {"zs":0,"scanfields":{"centerXY":[1.0,-1.0],"sizeXY":[2.0,2.0],"pixelResolutionXY":[256,256]}},
        {"zs":0,"scanfields":{"centerXY":[-1.5,2.0],"sizeXY":[1.0,1.5],"pixelResolutionXY":[128,196]}}
    ]}}}"#
        .to_string()
}
