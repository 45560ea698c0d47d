//! Scene and shot identifiers.
//!
//! Identifiers appear inside container and marker names as `SC<digits>` and
//! `SH<digits>`. The digit text is kept verbatim so zero padded ids such as
//! `SC05` survive a parse/format round trip; equality is digit-string
//! equality, matching how names are compared in the hierarchy itself.

use std::fmt;

use crate::util::starts_with_ignore_case;

/// Scene identifier, e.g. `SC17`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SceneId {
    canonical: String,
}

impl SceneId {
    /// Create from a scene number.
    pub fn new(number: u32) -> Self {
        Self {
            canonical: format!("SC{number}"),
        }
    }

    /// Parse `SC<digits>` (case-insensitive). The whole input must be the id.
    pub fn parse(text: &str) -> Option<Self> {
        parse_id(text, "SC").map(|canonical| Self { canonical })
    }

    /// Full canonical form, e.g. `"SC17"`.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The digit portion, e.g. `"17"`.
    pub fn digits(&self) -> &str {
        &self.canonical[2..]
    }

    /// Numeric value of the digits, if they fit a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.digits().parse().ok()
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Shot identifier, e.g. `SH180`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShotId {
    canonical: String,
}

impl ShotId {
    /// Create from a shot number.
    pub fn new(number: u32) -> Self {
        Self {
            canonical: format!("SH{number}"),
        }
    }

    /// Parse `SH<digits>` (case-insensitive). The whole input must be the id.
    pub fn parse(text: &str) -> Option<Self> {
        parse_id(text, "SH").map(|canonical| Self { canonical })
    }

    /// Full canonical form, e.g. `"SH180"`.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The digit portion, e.g. `"180"`.
    pub fn digits(&self) -> &str {
        &self.canonical[2..]
    }

    /// Numeric value of the digits, if they fit a `u64`.
    pub fn number(&self) -> Option<u64> {
        self.digits().parse().ok()
    }
}

impl fmt::Display for ShotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Shared parse: `<prefix><digits>`, at least one digit, nothing after.
fn parse_id(text: &str, prefix: &str) -> Option<String> {
    if !starts_with_ignore_case(text, prefix) {
        return None;
    }
    let digits = &text[prefix.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{prefix}{digits}"))
}
