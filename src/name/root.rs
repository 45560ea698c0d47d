//! Parser for `+...+` wrapped root container names.
//!
//! Wrapped names mark the fixed points of the hierarchy grammar:
//!
//! ```text
//! +SC17-FOREST+        scene root (scene id, location)
//! +LOC-DOWNTOWN+       location root
//! +ENV-CITY+           environment root
//! +ART-SC17-FOREST+    role group (head is a role tag)
//! +SC17-FOREST-ART+    role group (structural tag after the scene id)
//! ```
//!
//! A `+SC..+` name is a scene root only when none of the segments after the
//! scene id is structural (`MODEL`, `VFX`, `ACTOR`, `PROP`, `ART`, `ANI`,
//! `SHOT`). Matching is segment-exact and case-insensitive, so a location
//! actually called `MARTINI` does not shadow the `ART` tag.

use super::{RoleTag, SceneId};

/// Structural segment that is not a role tag.
const SHOT_SEGMENT: &str = "SHOT";

/// Parsed form of a `+...+` wrapped container name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootName {
    /// Scene root, e.g. `+SC17-FOREST+`.
    Scene { scene: SceneId, location: String },
    /// Location root, e.g. `+LOC-DOWNTOWN+`.
    Location { name: String },
    /// Environment root, e.g. `+ENV-CITY+`.
    Environment { name: String },
    /// Role group root, e.g. `+ART-SC17-FOREST+` or `+SC17-FOREST-ART+`.
    /// `tag` is `None` when the structural segment was `SHOT`.
    Group { tag: Option<RoleTag> },
    /// Wrapped but not part of the grammar.
    Other,
}

impl RootName {
    /// Parse a container name. `None` when the name is not `+` wrapped;
    /// wrapped names always parse, falling back to [`RootName::Other`].
    pub fn parse(name: &str) -> Option<Self> {
        if name.len() < 2 || !name.starts_with('+') || !name.ends_with('+') {
            return None;
        }
        let body = name.trim_matches('+');
        let mut segments = body.split('-');
        let head = segments.next().unwrap_or("");
        let rest: Vec<&str> = segments.collect();

        if head.eq_ignore_ascii_case("LOC") {
            return Some(Self::location_or_other(&rest));
        }
        if head.eq_ignore_ascii_case("ENV") {
            return Some(Self::environment_or_other(&rest));
        }
        if let Some(scene) = SceneId::parse(head) {
            return Some(Self::scene_or_group(scene, &rest));
        }
        if let Some(tag) = RoleTag::from_segment(head) {
            return Some(Self::Group { tag: Some(tag) });
        }
        if head.eq_ignore_ascii_case(SHOT_SEGMENT) {
            return Some(Self::Group { tag: None });
        }
        Some(Self::Other)
    }

    fn location_or_other(rest: &[&str]) -> Self {
        if rest.is_empty() {
            Self::Other
        } else {
            Self::Location { name: rest.join("-") }
        }
    }

    fn environment_or_other(rest: &[&str]) -> Self {
        if rest.is_empty() {
            Self::Other
        } else {
            Self::Environment { name: rest.join("-") }
        }
    }

    fn scene_or_group(scene: SceneId, rest: &[&str]) -> Self {
        if rest.is_empty() {
            return Self::Other;
        }
        for segment in rest {
            if segment.eq_ignore_ascii_case(SHOT_SEGMENT) {
                return Self::Group { tag: None };
            }
            if let Some(tag) = RoleTag::from_segment(segment) {
                return Self::Group { tag: Some(tag) };
            }
        }
        Self::Scene { scene, location: rest.join("-") }
    }

    /// Scene id when this is a scene root.
    pub fn scene(&self) -> Option<&SceneId> {
        match self {
            Self::Scene { scene, .. } => Some(scene),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_root() {
        let parsed = RootName::parse("+SC17-FOREST+").expect("wrapped");
        assert_eq!(
            parsed,
            RootName::Scene {
                scene: SceneId::parse("SC17").unwrap(),
                location: "FOREST".to_string(),
            }
        );
        // Multi-segment locations rejoin with their hyphens
        let parsed = RootName::parse("+SC03-OLD-TOWN+").expect("wrapped");
        assert_eq!(
            parsed,
            RootName::Scene {
                scene: SceneId::parse("SC03").unwrap(),
                location: "OLD-TOWN".to_string(),
            }
        );
    }

    #[test]
    fn test_structural_segment_blocks_scene() {
        assert_eq!(
            RootName::parse("+SC17-FOREST-ART+"),
            Some(RootName::Group { tag: Some(RoleTag::Art) })
        );
        assert_eq!(
            RootName::parse("+SC17-FOREST-VFX+"),
            Some(RootName::Group { tag: Some(RoleTag::Vfx) })
        );
        assert_eq!(
            RootName::parse("+SC17-SHOT-FOREST+"),
            Some(RootName::Group { tag: None })
        );
    }

    #[test]
    fn test_segment_exact_tag_match() {
        // ART inside a longer segment is plain location text
        let parsed = RootName::parse("+SC17-MARTINI+").expect("wrapped");
        assert_eq!(
            parsed,
            RootName::Scene {
                scene: SceneId::parse("SC17").unwrap(),
                location: "MARTINI".to_string(),
            }
        );
    }

    #[test]
    fn test_tag_head_is_group() {
        assert_eq!(
            RootName::parse("+ART-SC17-FOREST+"),
            Some(RootName::Group { tag: Some(RoleTag::Art) })
        );
        assert_eq!(
            RootName::parse("+ani-sc17-forest+"),
            Some(RootName::Group { tag: Some(RoleTag::Ani) })
        );
    }

    #[test]
    fn test_loc_env_roots() {
        assert_eq!(
            RootName::parse("+LOC-DOWNTOWN+"),
            Some(RootName::Location { name: "DOWNTOWN".to_string() })
        );
        assert_eq!(
            RootName::parse("+env-CITY-NIGHT+"),
            Some(RootName::Environment { name: "CITY-NIGHT".to_string() })
        );
        assert_eq!(RootName::parse("+LOC+"), Some(RootName::Other));
        assert_eq!(RootName::parse("+ENV+"), Some(RootName::Other));
    }

    #[test]
    fn test_unwrapped_and_other() {
        assert_eq!(RootName::parse("SC17-FOREST"), None);
        assert_eq!(RootName::parse("MODEL-SC17-SH100"), None);
        assert_eq!(RootName::parse("+"), None);
        assert_eq!(RootName::parse("+CHARS+"), Some(RootName::Other));
        assert_eq!(RootName::parse("+SC17+"), Some(RootName::Other));
        assert_eq!(RootName::parse("++"), Some(RootName::Other));
    }

    #[test]
    fn test_case_insensitive_scene() {
        let parsed = RootName::parse("+sc17-forest+").expect("wrapped");
        assert!(matches!(parsed, RootName::Scene { .. }));
        assert_eq!(parsed.scene().map(|s| s.as_str()), Some("SC17"));
    }
}
