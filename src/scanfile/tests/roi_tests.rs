//! Tests for ROI-group metadata parsing

use crate::scanfile::roi::RoiGroup;
use crate::scanfile::tests::test_utils::two_roi_json;

#[test]
fn test_parse_two_roi_group() {
    let group = RoiGroup::parse(&two_roi_json()).unwrap();

    assert_eq!(group.num_rois(), 2);
    assert_eq!(group.rois[0].zs, vec![0.0]);
    assert_eq!(group.rois[0].scanfields.len(), 1);

    let scanfield = &group.rois[1].scanfields[0];
    assert!((scanfield.center_x_deg + 1.5).abs() < 1e-12);
    assert!((scanfield.center_y_deg - 2.0).abs() < 1e-12);
    assert_eq!(scanfield.px_width, 128);
    assert_eq!(scanfield.px_height, 196);
}

#[test]
fn test_parse_array_encodings() {
    // The same group with every collection written as an array
    let json = r#"{"RoiGroups":{"imagingRoiGroup":{"rois":[
        {"zs":[0,50],"scanfields":[
            {"centerXY":[0.0,0.0],"sizeXY":[2.0,2.0],"pixelResolutionXY":[512,512]},
            {"centerXY":[0.5,0.5],"sizeXY":[2.0,2.0],"pixelResolutionXY":[512,512]}
        ]}
    ]}}}"#;

    let group = RoiGroup::parse(json).unwrap();

    assert_eq!(group.num_rois(), 1);
    assert_eq!(group.rois[0].zs, vec![0.0, 50.0]);
    assert_eq!(group.rois[0].scanfields.len(), 2);
}

#[test]
fn test_scanfield_per_depth_selection() {
    let json = r#"{"RoiGroups":{"imagingRoiGroup":{"rois":[
        {"zs":[0,50],"scanfields":[
            {"centerXY":[0.0,0.0],"sizeXY":[2.0,2.0],"pixelResolutionXY":[512,512]},
            {"centerXY":[0.5,0.5],"sizeXY":[2.0,2.0],"pixelResolutionXY":[512,512]}
        ]}
    ]}}}"#;
    let group = RoiGroup::parse(json).unwrap();
    let roi = &group.rois[0];

    assert!(roi.covers_depth(0.0));
    assert!(roi.covers_depth(50.0));
    assert!(!roi.covers_depth(25.0));

    let deep = roi.scanfield_at(50.0).unwrap();
    assert!((deep.center_x_deg - 0.5).abs() < 1e-12);
}

#[test]
fn test_single_shared_scanfield() {
    let json = r#"{"RoiGroups":{"imagingRoiGroup":{"rois":
        {"zs":[0,10,20],"scanfields":{"centerXY":[1.0,1.0],"sizeXY":[2.0,2.0],"pixelResolutionXY":[256,256]}}
    }}}"#;
    let group = RoiGroup::parse(json).unwrap();
    let roi = &group.rois[0];

    // One scanfield shared across all three depths
    let shallow = roi.scanfield_at(0.0).unwrap();
    let deep = roi.scanfield_at(20.0).unwrap();
    assert!((shallow.center_x_deg - deep.center_x_deg).abs() < 1e-12);
}

#[test]
fn test_roi_without_depths_covers_everything() {
    let json = r#"{"RoiGroups":{"imagingRoiGroup":{"rois":
        {"scanfields":{"centerXY":[0.0,0.0],"sizeXY":[1.0,1.0],"pixelResolutionXY":[64,64]}}
    }}}"#;
    let group = RoiGroup::parse(json).unwrap();

    assert!(group.rois[0].covers_depth(-30.0));
    assert!(group.rois[0].covers_depth(120.0));
}

#[test]
fn test_invalid_json_is_rejected() {
    assert!(RoiGroup::parse("{\"RoiGroups\":").is_err());
    assert!(RoiGroup::parse("{}").is_err());
}
