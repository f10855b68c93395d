use crate::shared::frame::FacialArea;

/// Key under which the label store records a face: image name plus the
/// rounded natural-space facial area.
pub fn face_label_key(image_name: &str, area: &FacialArea) -> String {
    format!(
        "{image_name}_{}_{}_{}_{}",
        area.x.round() as i64,
        area.y.round() as i64,
        area.w.round() as i64,
        area.h.round() as i64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_rounds_coordinates() {
        let area = FacialArea {
            x: 10.4,
            y: 20.6,
            w: 30.0,
            h: 39.5,
        };
        assert_eq!(face_label_key("a.jpg", &area), "a.jpg_10_21_30_40");
    }

    #[test]
    fn test_same_area_same_key() {
        let area = FacialArea {
            x: 1.0,
            y: 2.0,
            w: 3.0,
            h: 4.0,
        };
        assert_eq!(face_label_key("x", &area), face_label_key("x", &area));
        assert_ne!(face_label_key("x", &area), face_label_key("y", &area));
    }
}
