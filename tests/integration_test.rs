//! Integration tests for the scan metadata extraction pipeline

use byteorder::{LittleEndian, WriteBytesExt};
use std::fs;
use std::path::PathBuf;

use scankit::geometry::units;
use scankit::resolve::{DirectResolver, ManifestResolver};
use scankit::scanfile::errors::ScanError;
use scankit::ScanKit;

/// Builds an in-memory ScanImage stack: a little-endian TIFF whose
/// first page carries the acquisition header in the Software tag and,
/// optionally, the ROI-group JSON in the Artist tag
fn build_scan_stack(
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

    let first_ifd_offset = buffer.len() as u32;
    for page in 0..pages {
        let mut entries: Vec<(u16, u16, u32, u32)> = vec![
            (256, 4, 1, width),  // ImageWidth
            (257, 4, 1, height), // ImageLength
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

fn write_scan_files(label: &str, buffers: &[Vec<u8>]) -> (PathBuf, Vec<PathBuf>) {
    let root = std::env::temp_dir().join(format!("scankit-it-{}-{}", std::process::id(), label));
    fs::create_dir_all(&root).unwrap();

    let mut paths = Vec::new();
    for (index, buffer) in buffers.iter().enumerate() {
        let path = root.join(format!("scan_{:05}.tif", index + 1));
        fs::write(&path, buffer).unwrap();
        paths.push(path);
    }

    (root, paths)
}

fn single_plane_header() -> String {
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

fn multiroi_header() -> String {
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

fn two_roi_json() -> String {
    r#"{"RoiGroups":{"imagingRoiGroup":{"rois":[
        {"zs":0,"scanfields":{"centerXY":[1.0,-1.0],"sizeXY":[2.0,2.0],"pixelResolutionXY":[256,256]}},
        {"zs":0,"scanfields":{"centerXY":[-1.5,2.0],"sizeXY":[1.0,1.5],"pixelResolutionXY":[128,196]}}
    ]}}}"#
        .to_string()
}

#[test]
fn test_single_plane_extraction_pipeline() {
    let header = single_plane_header();
    let buffers = vec![
        build_scan_stack(512, 256, 6, &header, None),
        build_scan_stack(512, 256, 6, &header, None),
    ];
    let (root, paths) = write_scan_files("single-plane", &buffers);

    let kit = ScanKit::new(DirectResolver::new(root.clone(), paths.clone()));
    let record = kit.extract("single-plane").unwrap();

    // Header row
    let scan = record.scan();
    assert_eq!(scan.num_fields, 3);
    assert_eq!(scan.num_channels, 2);
    assert_eq!(scan.num_scanning_depths, 3);
    assert_eq!(scan.num_frames, 2);
    assert_eq!(scan.num_rois, 0);
    assert!(scan.bidirectional);
    assert!((scan.fps - 30.0303).abs() < 1e-9);
    assert!((scan.usecs_per_line - 63.0).abs() < 1e-9);
    assert!((scan.fill_fraction - 0.712867).abs() < 1e-12);
    assert_eq!(scan.version.as_deref(), Some("2020"));

    // One field per depth, indices dense, depth order preserved
    let fields = record.fields();
    assert_eq!(fields.len(), 3);
    for (index, field) in fields.iter().enumerate() {
        assert_eq!(field.field_idx, index);
        assert_eq!(field.px_width, 512);
        assert_eq!(field.px_height, 256);
        assert!((field.field_x - 10.0).abs() < 1e-12);
        assert!((field.field_y - 20.0).abs() < 1e-12);
        assert!(field.um_height.is_none());
        assert!(field.um_width.is_none());
        assert_eq!(field.delay_image.height(), 256);
        assert_eq!(field.delay_image.width(), 512);
    }
    assert_eq!(fields[0].field_z, 0.0);
    assert_eq!(fields[1].field_z, 5.0);
    assert_eq!(fields[2].field_z, 10.0);
    assert!(fields.windows(2).all(|pair| pair[0].field_z <= pair[1].field_z));

    // File references are root-relative and rejoin to the originals
    let files = record.files();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_path, "scan_00001.tif");
    for (reference, original) in files.iter().zip(paths.iter()) {
        let mut rejoined = root.clone();
        for part in reference.file_path.split('/') {
            rejoined.push(part);
        }
        assert_eq!(&rejoined, original);
    }
}

#[test]
fn test_multiroi_extraction_pipeline() {
    let json = two_roi_json();
    let buffers = vec![build_scan_stack(256, 520, 4, &multiroi_header(), Some(&json))];
    let (root, paths) = write_scan_files("multiroi", &buffers);

    let kit = ScanKit::new(DirectResolver::new(root, paths));
    let record = kit.extract("multiroi").unwrap();

    let scan = record.scan();
    assert_eq!(scan.num_rois, 2);
    assert_eq!(scan.num_fields, 2);
    assert_eq!(scan.num_frames, 4);

    let fields = record.fields();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].field_idx, 0);
    assert_eq!(fields[1].field_idx, 1);

    // Motor zero (-5, 8, 100) plus the ROI centers at 15 um/degree
    assert!((fields[0].field_x - (-5.0 + 1.0 * 15.0)).abs() < 1e-9);
    assert!((fields[0].field_y - (8.0 + -1.0 * 15.0)).abs() < 1e-9);
    assert!((fields[1].field_x - (-5.0 + -1.5 * 15.0)).abs() < 1e-9);
    assert!((fields[1].field_y - (8.0 + 2.0 * 15.0)).abs() < 1e-9);
    assert_eq!(fields[0].field_z, 100.0);
    assert_eq!(fields[1].field_z, 100.0);

    // Physical sizes come straight from the scanfields
    assert!((fields[0].um_width.unwrap() - 30.0).abs() < 1e-9);
    assert!((fields[0].um_height.unwrap() - 30.0).abs() < 1e-9);
    assert!((fields[1].um_width.unwrap() - 15.0).abs() < 1e-9);
    assert!((fields[1].um_height.unwrap() - 22.5).abs() < 1e-9);

    assert_eq!(fields[0].delay_image.height(), 256);
    assert_eq!(fields[0].delay_image.width(), 256);
    assert_eq!(fields[1].delay_image.height(), 196);
    assert_eq!(fields[1].delay_image.width(), 128);
}

#[test]
fn test_file_outside_root_fails_resolution() {
    let header = single_plane_header();
    let buffers = vec![build_scan_stack(128, 128, 6, &header, None)];
    let (root, paths) = write_scan_files("outside-root", &buffers);

    // A sibling directory that does not contain the scan files
    let other_root = root.join("elsewhere");

    let kit = ScanKit::new(DirectResolver::new(other_root, paths));
    match kit.extract("outside-root") {
        Err(ScanError::PathOutsideRoot { .. }) => {}
        other => panic!("expected PathOutsideRoot, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_frames_without_fields_is_a_consistency_error() {
    // Multi-ROI scan whose ROI group is empty: frames recorded, no fields
    let json = r#"{"RoiGroups":{"imagingRoiGroup":{"rois":[]}}}"#;
    let buffers = vec![build_scan_stack(256, 256, 4, &multiroi_header(), Some(json))];
    let (root, paths) = write_scan_files("no-fields", &buffers);

    let kit = ScanKit::new(DirectResolver::new(root, paths));
    match kit.extract("no-fields") {
        Err(ScanError::FieldCountMismatch { num_frames, num_fields }) => {
            assert_eq!(num_frames, 4);
            assert_eq!(num_fields, 0);
        }
        other => panic!("expected FieldCountMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_line_period_unit_round_trip() {
    let seconds = 6.3156e-05;
    let round_tripped = units::microseconds_to_seconds(units::seconds_to_microseconds(seconds));

    assert!((round_tripped - seconds).abs() < 1e-15);
}

#[test]
fn test_manifest_resolution() {
    let header = single_plane_header();
    let buffers = vec![
        build_scan_stack(512, 256, 6, &header, None),
        build_scan_stack(512, 256, 6, &header, None),
    ];
    let (root, _paths) = write_scan_files("manifest", &buffers);

    let manifest_path = root.join("manifest.toml");
    let manifest = format!(
        "root = \"{}\"\n\n[scans]\nsession1_scan1 = [\"scan_00001.tif\", \"scan_00002.tif\"]\n",
        root.display()
    );
    fs::write(&manifest_path, manifest).unwrap();

    let resolver = ManifestResolver::load(&manifest_path).unwrap();
    assert_eq!(resolver.scan_keys(), vec!["session1_scan1"]);

    let kit = ScanKit::new(resolver);
    let record = kit.extract("session1_scan1").unwrap();
    assert_eq!(record.scan().num_frames, 2);
    assert_eq!(record.files().len(), 2);

    assert!(kit.extract("unknown_scan").is_err());
}
