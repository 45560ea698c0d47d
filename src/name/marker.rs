//! Camera marker label grammar.

use super::{SceneId, ShotId};
use crate::util::starts_with_ignore_case;

/// Parsed `CAM-SC<digits>-SH<digits>` marker label.
///
/// Anything after the shot digits is ignored, so `CAM-SC17-SH100FLAT` and
/// `CAM-SC17-SH100-B` both address shot `SH100` of scene `SC17`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerLabel {
    pub scene: SceneId,
    pub shot: ShotId,
}

impl MarkerLabel {
    /// Parse a marker name (case-insensitive). `None` when the label does
    /// not follow the camera marker grammar.
    pub fn parse(label: &str) -> Option<Self> {
        let rest = strip_ignore_case(label, "CAM-")?;
        let (scene_text, rest) = take_id(rest, "SC")?;
        let rest = rest.strip_prefix('-')?;
        let (shot_text, _trailing) = take_id(rest, "SH")?;
        let scene = SceneId::parse(scene_text)?;
        let shot = ShotId::parse(shot_text)?;
        Some(Self { scene, shot })
    }
}

fn strip_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    // Matched prefixes are ASCII, so the byte offset is a char boundary.
    starts_with_ignore_case(text, prefix).then(|| &text[prefix.len()..])
}

/// Split off `<prefix><digits>` from the front, returning it and the rest.
fn take_id<'a>(text: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    if !starts_with_ignore_case(text, prefix) {
        return None;
    }
    let digits = text[prefix.len()..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let split = prefix.len() + digits;
    Some((&text[..split], &text[split..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let label = MarkerLabel::parse("CAM-SC17-SH100").expect("valid label");
        assert_eq!(label.scene.as_str(), "SC17");
        assert_eq!(label.shot.as_str(), "SH100");
    }

    #[test]
    fn test_parse_case_insensitive() {
        let label = MarkerLabel::parse("cam-sc17-sh100").expect("valid label");
        assert_eq!(label.scene.as_str(), "SC17");
        assert_eq!(label.shot.as_str(), "SH100");
    }

    #[test]
    fn test_trailing_text_ignored() {
        let label = MarkerLabel::parse("CAM-SC17-SH100FLAT").expect("valid label");
        assert_eq!(label.shot.as_str(), "SH100");
        let label = MarkerLabel::parse("CAM-SC17-SH100-B").expect("valid label");
        assert_eq!(label.shot.as_str(), "SH100");
    }

    #[test]
    fn test_reject_malformed() {
        assert_eq!(MarkerLabel::parse("MARKER-SC17-SH100"), None);
        assert_eq!(MarkerLabel::parse("CAM-SC17"), None);
        assert_eq!(MarkerLabel::parse("CAM-SC-SH100"), None);
        assert_eq!(MarkerLabel::parse("CAM-SH100-SC17"), None);
        assert_eq!(MarkerLabel::parse(""), None);
    }
}
