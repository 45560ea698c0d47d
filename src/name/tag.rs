//! Role tags and classification roles.

use std::fmt;

use crate::util::contains_ignore_case;

/// Role tag embedded in container names.
///
/// Tags mark a container's purpose inside the hierarchy. [`RoleTag::Ani`] is
/// the animation group tag that holds ACTOR and PROP containers in the prefix
/// convention; it classifies to no role by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleTag {
    Model,
    Vfx,
    Actor,
    Prop,
    Art,
    Ani,
}

impl RoleTag {
    /// All known tags.
    pub const ALL: [RoleTag; 6] = [
        Self::Model,
        Self::Vfx,
        Self::Actor,
        Self::Prop,
        Self::Art,
        Self::Ani,
    ];

    /// Canonical uppercase spelling, as it appears in names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "MODEL",
            Self::Vfx => "VFX",
            Self::Actor => "ACTOR",
            Self::Prop => "PROP",
            Self::Art => "ART",
            Self::Ani => "ANI",
        }
    }

    /// Parse an exact hyphen-separated name segment (case-insensitive).
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(segment))
    }

    /// Check whether this tag occurs anywhere in `name` as a substring
    /// (case-insensitive). Ancestry classification inspects names this way.
    pub fn found_in(self, name: &str) -> bool {
        contains_ignore_case(name, self.as_str())
    }

    /// The role this tag classifies to, if any. `ART` counts as MODEL;
    /// `ANI` is structural only.
    pub fn role(self) -> Option<Role> {
        match self {
            Self::Model | Self::Art => Some(Role::Model),
            Self::Vfx => Some(Role::Vfx),
            Self::Actor => Some(Role::Actor),
            Self::Prop => Some(Role::Prop),
            Self::Ani => None,
        }
    }
}

impl fmt::Display for RoleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result and operation type of a copy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    /// Set-dressing / art department content. The fallback when an object's
    /// ancestry carries no recognizable tag.
    #[default]
    Model,
    Vfx,
    Actor,
    Prop,
}

impl Role {
    /// All roles.
    pub const ALL: [Role; 4] = [Self::Model, Self::Vfx, Self::Actor, Self::Prop];

    /// Canonical uppercase spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Model => "MODEL",
            Self::Vfx => "VFX",
            Self::Actor => "ACTOR",
            Self::Prop => "PROP",
        }
    }

    /// Parse from text (case-insensitive).
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(text))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
