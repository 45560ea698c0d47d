//! Small text helpers for name matching.
//!
//! Convention names are ASCII by construction, so every comparison here is
//! ASCII-case-insensitive and allocation free. Non-ASCII bytes compare
//! exactly, which is the right behavior for free-text location names.

/// Check whether `haystack` contains `needle`, ignoring ASCII case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Check whether `s` starts with `prefix`, ignoring ASCII case.
pub fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Check whether `s` ends with `suffix`, ignoring ASCII case.
pub fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("MODEL-SC17-SH100", "model"));
        assert!(contains_ignore_case("shot-vfx-sc17", "VFX"));
        assert!(!contains_ignore_case("MODEL-SC17", "VFX"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("", "x"));
    }

    #[test]
    fn test_prefix_suffix() {
        assert!(starts_with_ignore_case("CAM-SC17-SH100", "cam-"));
        assert!(!starts_with_ignore_case("CA", "cam-"));
        assert!(ends_with_ignore_case("LOC-DESERT-MODEL", "-model"));
        assert!(!ends_with_ignore_case("LOC-DESERT-MODEL", "-vfx"));
    }

    #[test]
    fn test_non_ascii_is_exact() {
        assert!(contains_ignore_case("LOC-CAFÉ-MODEL", "CAFÉ"));
        assert!(!contains_ignore_case("LOC-CAFÉ-MODEL", "café"));
    }
}
