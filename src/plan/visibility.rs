//! Visibility keyframe contract.
//!
//! A toggle hides or shows a subject over an inclusive frame span by
//! bracketing the span with four keys: the frames just outside the span
//! carry the opposite state, so with step interpolation the subject flips
//! exactly at the span edges. The host inserts the same keys on both
//! boolean channels.

use crate::forest::ObjectId;
use crate::timeline::FrameSpan;

/// Channels a toggle keys, viewport and render visibility.
pub const VISIBILITY_CHANNELS: [&str; 2] = ["hide_viewport", "hide_render"];

/// Interpolation mode the host must use for visibility keys.
pub const KEY_INTERPOLATION: &str = "CONSTANT";

/// Who a toggle applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySubject {
    /// An object already present in the forest.
    Object(ObjectId),
    /// A copy created earlier in the same plan, addressed by its new name.
    PlannedCopy(String),
}

/// One keyframe, shared by both visibility channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityKey {
    pub frame: i32,
    pub hidden: bool,
}

/// Hide or show a subject over a span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityToggle {
    pub subject: KeySubject,
    pub span: FrameSpan,
    pub hide: bool,
}

impl VisibilityToggle {
    /// Hide the subject over the span.
    pub fn hide(subject: KeySubject, span: FrameSpan) -> Self {
        Self { subject, span, hide: true }
    }

    /// Show the subject over the span, hiding it outside.
    pub fn show(subject: KeySubject, span: FrameSpan) -> Self {
        Self { subject, span, hide: false }
    }

    /// The four keys, in frame order. The bracketing frames saturate at
    /// the i32 limits, so a span touching a limit keeps its keys ordered.
    pub fn keyframes(&self) -> [VisibilityKey; 4] {
        let inside = self.hide;
        let outside = !self.hide;
        [
            VisibilityKey { frame: self.span.start().saturating_sub(1), hidden: outside },
            VisibilityKey { frame: self.span.start(), hidden: inside },
            VisibilityKey { frame: self.span.end(), hidden: inside },
            VisibilityKey { frame: self.span.end().saturating_add(1), hidden: outside },
        ]
    }
}
