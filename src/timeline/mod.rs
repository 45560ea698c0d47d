//! Frame spans derived from camera-bound timeline markers.
//!
//! Markers partition the timeline into shots: a shot runs from its marker's
//! frame to the frame before the next camera marker, and the last shot runs
//! to the scene end bound. Only markers bound to a camera count; unbound
//! markers are ignored everywhere.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::name::{MarkerLabel, SceneId, ShotId};
use crate::util::{contains_ignore_case, Error, Result};

/// A point on the shared timeline, optionally bound to a camera.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub frame: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
}

impl Marker {
    /// Marker with no camera binding.
    pub fn new(name: impl Into<String>, frame: i32) -> Self {
        Self {
            name: name.into(),
            frame,
            camera: None,
        }
    }

    /// Bind the marker to a camera.
    pub fn with_camera(mut self, camera: impl Into<String>) -> Self {
        self.camera = Some(camera.into());
        self
    }

    #[inline]
    pub fn is_camera_bound(&self) -> bool {
        self.camera.is_some()
    }
}

/// Inclusive frame range. Construction rejects inverted ranges, so a span
/// in hand is always valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameSpan {
    start: i32,
    end: i32,
}

impl FrameSpan {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }

    #[inline]
    pub fn contains(&self, frame: i32) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Frames in the span. A span may cover the whole i32 range, so the
    /// count is wider than the bounds.
    pub fn frame_count(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start) + 1
    }
}

/// The shot governing a playhead position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShotWindow {
    pub span: FrameSpan,
    pub scene: SceneId,
    pub shot: ShotId,
    /// Name of the marker that opens the shot.
    pub marker: String,
}

/// Camera-bound markers sorted by frame. The sort is stable, so markers
/// sharing a frame keep their list order and the later one governs.
fn camera_markers(markers: &[Marker]) -> Vec<&Marker> {
    let mut bound: Vec<&Marker> = markers.iter().filter(|m| m.is_camera_bound()).collect();
    bound.sort_by_key(|m| m.frame);
    bound
}

/// Find the shot the playhead sits in.
///
/// `None` when no camera marker starts at or before `current_frame`, when
/// the frame lies past the final shot's end, or when the governing marker's
/// name does not follow the `CAM-SC..-SH..` grammar. All three are normal
/// "not in a shot" outcomes.
pub fn current_shot(markers: &[Marker], current_frame: i32, scene_end: i32) -> Option<ShotWindow> {
    let sorted = camera_markers(markers);
    let index = sorted.iter().rposition(|m| m.frame <= current_frame)?;
    let marker = sorted[index];
    let end = match sorted.get(index + 1) {
        Some(next) => next.frame.saturating_sub(1),
        None => scene_end,
    };
    if current_frame > end {
        return None;
    }
    let label = MarkerLabel::parse(&marker.name)?;
    let span = FrameSpan::new(marker.frame, end).ok()?;
    debug!(
        "current shot at frame {}: {} {} [{}..={}]",
        current_frame,
        label.scene.as_str(),
        label.shot.as_str(),
        span.start(),
        span.end()
    );
    Some(ShotWindow {
        span,
        scene: label.scene,
        shot: label.shot,
        marker: marker.name.clone(),
    })
}

/// Frame span covered by a whole scene.
///
/// Scene membership is by name: camera markers containing `-<scene>-`
/// (case-insensitive). The span runs from the scene's first marker to the
/// frame before the first camera marker after the scene's last, or to
/// `scene_end` when the scene closes the timeline. `None` when the scene
/// has no markers or the span would invert.
pub fn scene_span(markers: &[Marker], scene: &SceneId, scene_end: i32) -> Option<FrameSpan> {
    let sorted = camera_markers(markers);
    let needle = format!("-{}-", scene.as_str());
    let in_scene: Vec<&&Marker> = sorted
        .iter()
        .filter(|m| contains_ignore_case(&m.name, &needle))
        .collect();
    let first = in_scene.first()?;
    let last = in_scene.last()?;
    let end = sorted
        .iter()
        .find(|m| m.frame > last.frame)
        .map(|m| m.frame.saturating_sub(1))
        .unwrap_or(scene_end);
    let span = FrameSpan::new(first.frame, end).ok()?;
    debug!(
        "scene span for {}: [{}..={}]",
        scene.as_str(),
        span.start(),
        span.end()
    );
    Some(span)
}
