use std::fs;

use fpraster_core::LayerName;
use fpraster_io::{load_footprint, render_with_profile, IoError, RenderProfile};
use fpraster_renderer::RenderOptions;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const DIP_PIN: &str = r#"{
    "name": "DIP-2",
    "lines": [
        {"start": [-2.0, -1.5], "end": [2.0, -1.5], "width": 0.12, "layer": "F.SilkS"}
    ],
    "circles": [
        {"center": [0.0, 0.0], "end": [2.2, 0.0], "layer": "F.CrtYd"}
    ],
    "pads": [
        {"number": "1", "at": [-1.27, 0], "size": [1.6, 1.6], "shape": "rect", "layers": ["*.Cu", "*.Mask"]},
        {"number": "2", "at": [1.27, 0], "size": [1.6, 1.6], "shape": "oval", "layers": ["*.Cu", "*.Mask"]}
    ]
}"#;

#[test]
fn test_json_to_png() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let fp_path = dir.path().join("dip.json");
    let profile_path = dir.path().join("profile.json");
    let png_path = dir.path().join("dip.png");
    fs::write(&fp_path, DIP_PIN).unwrap();

    let mut profile = RenderProfile::new("small");
    profile.options = RenderOptions::fitted(128);
    profile.save(&profile_path).unwrap();

    let footprint = load_footprint(&fp_path).unwrap();
    let profile = RenderProfile::load(&profile_path).unwrap();
    let summary = render_with_profile(&footprint, &profile, &png_path).unwrap();

    assert_eq!(summary.footprint, "DIP-2");
    assert_eq!(summary.layer(LayerName::FrontCopper).unwrap().primitive_count, 2);
    assert_eq!(summary.layer(LayerName::FrontMask).unwrap().primitive_count, 2);
    assert_eq!(summary.total_primitives(), 6);

    let bytes = fs::read(&png_path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = tiny_skia::Pixmap::decode_png(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (128, 128));
}

#[test]
fn test_unknown_layer_leaves_no_file() {
    init_logger();
    let dir = tempfile::tempdir().unwrap();
    let fp_path = dir.path().join("bad.json");
    let png_path = dir.path().join("bad.png");
    fs::write(
        &fp_path,
        r#"{"pads": [{"at": [0, 0], "size": [1, 1], "shape": "rect", "layers": ["B.Cu"]}]}"#,
    )
    .unwrap();

    let footprint = load_footprint(&fp_path).unwrap();
    let err = render_with_profile(&footprint, &RenderProfile::default(), &png_path).unwrap_err();
    assert!(matches!(err, IoError::Render(_)));
    assert!(err.to_string().contains("B.Cu"));
    assert!(!png_path.exists());
}
