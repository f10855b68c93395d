//! Camera metadata encoded in snapshot identifiers.
//!
//! Identifiers look like `6745a1b2_cam3_pan-34.4_tilt2.5_zoom10.0.jpg`: a
//! hex capture time in seconds, then `_pan`, `_tilt` and `_zoom` tokens.

use std::fmt;

use serde::Serialize;

use crate::shared::constants::IMAGE_EXTENSIONS;

const TIMESTAMP_DELIMITER: char = '_';

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PanTilt {
    pub pan: f64,
    pub tilt: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PanTiltZoom {
    pub pan: f64,
    pub tilt: f64,
    pub zoom: f64,
}

impl PanTiltZoom {
    pub fn pan_tilt(&self) -> PanTilt {
        PanTilt {
            pan: self.pan,
            tilt: self.tilt,
        }
    }
}

impl fmt::Display for PanTiltZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pan: {:.1}° Tilt: {:.1}° Zoom: {:.1}",
            self.pan, self.tilt, self.zoom
        )
    }
}

/// Capture time in seconds, read from the hex token before the first `_`.
pub fn extract_capture_time(identifier: &str) -> Option<i64> {
    let token = identifier.split(TIMESTAMP_DELIMITER).next()?;
    if token.is_empty() {
        return None;
    }
    i64::from_str_radix(token, 16).ok()
}

pub fn extract_pan_tilt(identifier: &str) -> Option<PanTilt> {
    let name = image_name(identifier)?;
    Some(PanTilt {
        pan: tagged_number(&name, "_pan")?,
        tilt: tagged_number(&name, "_tilt")?,
    })
}

pub fn extract_pan_tilt_zoom(identifier: &str) -> Option<PanTiltZoom> {
    let name = image_name(identifier)?;
    Some(PanTiltZoom {
        pan: tagged_number(&name, "_pan")?,
        tilt: tagged_number(&name, "_tilt")?,
        zoom: tagged_number(&name, "_zoom")?,
    })
}

/// Lowercased identifier, or `None` when it is not a recognized image file.
fn image_name(identifier: &str) -> Option<String> {
    let name = identifier.to_lowercase();
    let (_, ext) = name.rsplit_once('.')?;
    IMAGE_EXTENSIONS.contains(&ext).then_some(name)
}

/// Decimal number following the first occurrence of `tag` that is
/// followed by one, so `_panorama` does not shadow a later `_pan10`.
///
/// Accepts an optional leading minus and an optional fractional part
/// (`-34`, `12.`, `0.75`).
fn tagged_number(name: &str, tag: &str) -> Option<f64> {
    name.match_indices(tag)
        .find_map(|(start, _)| leading_number(&name[start + tag.len()..]))
}

fn leading_number(rest: &str) -> Option<f64> {
    let bytes = rest.as_bytes();

    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == int_start {
        return None;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    rest[..end].trim_end_matches('.').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const NAME: &str = "6745a1b2_cam3_pan-34.4_tilt2.5_zoom10.0.jpg";

    #[test]
    fn test_capture_time_parses_hex_prefix() {
        assert_eq!(extract_capture_time(NAME), Some(0x6745a1b2));
    }

    #[rstest]
    #[case("zzz_pan1_tilt1.jpg")]
    #[case("_pan1_tilt1.jpg")]
    #[case("")]
    fn test_capture_time_unparseable(#[case] identifier: &str) {
        assert_eq!(extract_capture_time(identifier), None);
    }

    #[test]
    fn test_capture_time_without_delimiter_uses_whole_token() {
        assert_eq!(extract_capture_time("ff"), Some(255));
    }

    #[test]
    fn test_pan_tilt_with_negative_pan() {
        let pt = extract_pan_tilt(NAME).unwrap();
        assert_relative_eq!(pt.pan, -34.4);
        assert_relative_eq!(pt.tilt, 2.5);
    }

    #[rstest]
    #[case("1_pan10_tilt-5.JPG", 10.0, -5.0)]
    #[case("1_pan0.75_tilt3.jpeg", 0.75, 3.0)]
    #[case("1_pan12._tilt1.5.jpg", 12.0, 1.5)]
    fn test_pan_tilt_variants(#[case] identifier: &str, #[case] pan: f64, #[case] tilt: f64) {
        let pt = extract_pan_tilt(identifier).unwrap();
        assert_relative_eq!(pt.pan, pan);
        assert_relative_eq!(pt.tilt, tilt);
    }

    #[rstest]
    #[case("1_pan10_tilt5.png")]
    #[case("1_pan10_tilt5")]
    #[case("1_pan10.jpg")]
    #[case("1_tilt5.jpg")]
    #[case("1_pan-_tilt5.jpg")]
    fn test_pan_tilt_missing(#[case] identifier: &str) {
        assert_eq!(extract_pan_tilt(identifier), None);
    }

    #[test]
    fn test_pan_tilt_takes_first_occurrence() {
        let pt = extract_pan_tilt("1_pan1_tilt2_pan9_tilt9.jpg").unwrap();
        assert_relative_eq!(pt.pan, 1.0);
        assert_relative_eq!(pt.tilt, 2.0);
    }

    #[rstest]
    #[case("6745a1b2_panorama_cam_pan10_tilt5.jpg", 10.0, 5.0)]
    #[case("1_tiltcam_pan-2_tilt3.5.jpg", -2.0, 3.5)]
    #[case("1_pan-_pan4_tilt_tilt1.jpg", 4.0, 1.0)]
    fn test_pan_tilt_skips_tags_without_numbers(
        #[case] identifier: &str,
        #[case] pan: f64,
        #[case] tilt: f64,
    ) {
        let pt = extract_pan_tilt(identifier).unwrap();
        assert_relative_eq!(pt.pan, pan);
        assert_relative_eq!(pt.tilt, tilt);
    }

    #[test]
    fn test_pan_tilt_zoom_requires_zoom() {
        assert!(extract_pan_tilt_zoom("1_pan1_tilt2.jpg").is_none());
        let ptz = extract_pan_tilt_zoom(NAME).unwrap();
        assert_relative_eq!(ptz.zoom, 10.0);
        assert_eq!(ptz.pan_tilt(), extract_pan_tilt(NAME).unwrap());
    }

    #[test]
    fn test_pan_tilt_zoom_caption() {
        let ptz = extract_pan_tilt_zoom(NAME).unwrap();
        assert_eq!(ptz.to_string(), "Pan: -34.4° Tilt: 2.5° Zoom: 10.0");
    }
}
