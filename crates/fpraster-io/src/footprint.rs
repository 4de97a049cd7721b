//! Loading the parsed footprint model from JSON.

use std::fs;
use std::path::Path;

use fpraster_core::Footprint;

use crate::error::IoError;

pub fn footprint_from_json(json: &str) -> Result<Footprint, IoError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_footprint(path: impl AsRef<Path>) -> Result<Footprint, IoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let footprint: Footprint = serde_json::from_str(&text).map_err(IoError::json_at(path))?;
    log::info!(
        "loaded footprint '{}' from {}: {} records",
        footprint.name,
        path.display(),
        footprint.record_count()
    );
    Ok(footprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpraster_core::{PadShape, Placement};

    const SOIC_PIN: &str = r#"{
        "name": "SOIC-8_pin1",
        "lines": [
            {"start": [-1.9, -2.5], "end": [1.9, -2.5], "width": 0.12, "layer": "F.SilkS"}
        ],
        "arcs": [
            {"start": [0.0, 0.0], "end": [1.0, 0.0], "angle": 180.0, "layer": "F.Fab"}
        ],
        "pads": [
            {
                "number": "1",
                "at": [-2.7, -1.905, 90],
                "size": [1.55, 0.6],
                "shape": "roundrect",
                "layers": ["F.Cu", "F.Mask", "F.Paste"],
                "attributes": {"solder_mask_margin": 0.05}
            },
            {
                "at": [0, 0],
                "size": [1, 1],
                "shape": "rect",
                "layers": ["F.Cu"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_footprint_json() {
        let fp = footprint_from_json(SOIC_PIN).unwrap();
        assert_eq!(fp.name, "SOIC-8_pin1");
        assert_eq!(fp.record_count(), 4);
        assert!(fp.circles.is_empty());
        assert_eq!(fp.arcs[0].width, fpraster_core::footprint::DEFAULT_STROKE_WIDTH);

        let pin1 = &fp.pads[0];
        assert_eq!(pin1.at, Placement::rotated(-2.7, -1.905, 90.0));
        assert_eq!(pin1.shape, PadShape::Other("roundrect".to_string()));
        assert_eq!(pin1.attributes.solder_mask_margin, Some(0.05));
        assert_eq!(fp.pads[1].shape, PadShape::Rect);
    }

    #[test]
    fn test_bad_placement_is_rejected() {
        let json = r#"{"pads": [{"at": [1], "size": [1, 1], "shape": "rect", "layers": []}]}"#;
        assert!(matches!(footprint_from_json(json), Err(IoError::Serde(_))));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_footprint(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
