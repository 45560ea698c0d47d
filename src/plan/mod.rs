//! Copy and move planners.
//!
//! Each planner turns one user intent into a [`CopyPlan`]: pure data the
//! host applies in order. The planners resolve targets (creating chain
//! containers as needed) but never duplicate objects, link copies, or
//! insert keyframes themselves. `Ok(None)` means the action does not apply
//! here (no shot under the playhead, no scene roots, role unsupported);
//! `Err` means the input was invalid.

mod visibility;

pub use visibility::*;

use tracing::debug;

use crate::convention::{Convention, TargetLevel};
use crate::forest::{ContainerId, Forest, ObjectId};
use crate::name::Role;
use crate::resolve::{
    all_scene_roots, classify_context, env_targets, find_source_location, resolve_target,
    resolve_target_at, TargetRequest,
};
use crate::timeline::{current_shot, scene_span, Marker};
use crate::util::{Error, Result};

/// One copy the host must make: duplicate `source`, name the copy, link
/// it into `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyStep {
    pub source: ObjectId,
    pub target: ContainerId,
    pub copy_name: String,
}

/// Everything the host must apply for one action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyPlan {
    /// Copies to create and link, in order.
    pub steps: Vec<CopyStep>,
    /// Visibility keys to insert after the copies exist.
    pub visibility: Vec<VisibilityToggle>,
    /// Scene roots passed over because the convention has no chain for the
    /// object's role there.
    pub skipped: Vec<String>,
    /// Remove the original object entirely once the copies are made.
    pub remove_source: bool,
    /// Unlink the original from this container once the copies are made.
    pub unlink_source: Option<(ObjectId, ContainerId)>,
}

fn object_name(forest: &Forest, object: ObjectId) -> Result<String> {
    forest
        .object(object)
        .map(|o| o.name().to_string())
        .ok_or(Error::StaleObject { index: object.index() })
}

/// Copy an object into the current shot's container for its role.
///
/// The original is hidden over the shot span and the copy shown over it,
/// so exactly one of the two is visible at any frame.
pub fn plan_copy_to_shot(
    forest: &mut Forest,
    convention: &Convention,
    object: ObjectId,
    markers: &[Marker],
    current_frame: i32,
    scene_end: i32,
) -> Result<Option<CopyPlan>> {
    let source_name = object_name(forest, object)?;
    let Some(window) = current_shot(markers, current_frame, scene_end) else {
        return Ok(None);
    };
    let role = classify_context(forest, object, convention.classify_rules());
    let request = TargetRequest {
        scene: window.scene.clone(),
        role,
        level: TargetLevel::Shot(window.shot.clone()),
    };
    let Some(target) = resolve_target(forest, convention, &request)? else {
        return Ok(None);
    };
    let copy_name = format!(
        "{}.{}.{}",
        source_name,
        window.scene.as_str(),
        window.shot.as_str()
    );
    debug!("plan: copy '{}' into shot {} as '{}'", source_name, window.shot.as_str(), copy_name);
    Ok(Some(CopyPlan {
        steps: vec![CopyStep { source: object, target, copy_name: copy_name.clone() }],
        visibility: vec![
            VisibilityToggle::hide(KeySubject::Object(object), window.span),
            VisibilityToggle::show(KeySubject::PlannedCopy(copy_name), window.span),
        ],
        ..CopyPlan::default()
    }))
}

/// Copy an object into the current scene's container for its role.
///
/// The scene is the one owning the shot under the playhead. When the scene
/// span cannot be computed the copy still goes ahead, just without
/// visibility keys.
pub fn plan_copy_to_scene(
    forest: &mut Forest,
    convention: &Convention,
    object: ObjectId,
    markers: &[Marker],
    current_frame: i32,
    scene_end: i32,
) -> Result<Option<CopyPlan>> {
    let source_name = object_name(forest, object)?;
    let Some(window) = current_shot(markers, current_frame, scene_end) else {
        return Ok(None);
    };
    let role = classify_context(forest, object, convention.classify_rules());
    let request = TargetRequest {
        scene: window.scene.clone(),
        role,
        level: TargetLevel::Scene,
    };
    let Some(target) = resolve_target(forest, convention, &request)? else {
        return Ok(None);
    };
    let copy_name = format!("{}.{}", source_name, window.scene.as_str());
    let visibility = match scene_span(markers, &window.scene, scene_end) {
        Some(span) => vec![
            VisibilityToggle::hide(KeySubject::Object(object), span),
            VisibilityToggle::show(KeySubject::PlannedCopy(copy_name.clone()), span),
        ],
        None => Vec::new(),
    };
    debug!("plan: copy '{}' into scene {} as '{}'", source_name, window.scene.as_str(), copy_name);
    Ok(Some(CopyPlan {
        steps: vec![CopyStep { source: object, target, copy_name }],
        visibility,
        ..CopyPlan::default()
    }))
}

/// Make one unique copy per scene and remove the original.
///
/// Scenes the convention cannot target for the object's role are recorded
/// in `skipped` and the rest still get their copy; the original is only
/// removed when at least one copy was planned. `Ok(None)` when the forest
/// has no scene roots at all.
pub fn plan_move_to_all_scenes(
    forest: &mut Forest,
    convention: &Convention,
    object: ObjectId,
) -> Result<Option<CopyPlan>> {
    let source_name = object_name(forest, object)?;
    let roots = all_scene_roots(forest);
    if roots.is_empty() {
        return Ok(None);
    }
    let role = classify_context(forest, object, convention.classify_rules());
    let mut plan = CopyPlan::default();
    for root in &roots {
        match resolve_target_at(forest, convention, root, role, &TargetLevel::Scene)? {
            Some(target) => plan.steps.push(CopyStep {
                source: object,
                target,
                copy_name: format!("{}.{}", source_name, root.scene.as_str()),
            }),
            None => {
                let root_name = forest
                    .container(root.id)
                    .map(|c| c.name().to_string())
                    .unwrap_or_else(|| root.scene.as_str().to_string());
                debug!("plan: skipping '{}', no {} chain in '{}'", root_name, role, convention.name());
                plan.skipped.push(root_name);
            }
        }
    }
    plan.remove_source = !plan.steps.is_empty();
    Ok(Some(plan))
}

/// Copy an object from its location container into every matching
/// environment, then unlink it from the location.
///
/// The source is probed as MODEL first, then VFX, mirroring how location
/// containers are tagged. Environment targets are never created; when none
/// exist the plan is `None` and nothing is unlinked.
pub fn plan_copy_to_env(
    forest: &Forest,
    convention: &Convention,
    object: ObjectId,
) -> Result<Option<CopyPlan>> {
    let source_name = object_name(forest, object)?;
    let (role, source) = match find_source_location(forest, object, Role::Model) {
        Some(source) => (Role::Model, source),
        None => match find_source_location(forest, object, Role::Vfx) {
            Some(source) => (Role::Vfx, source),
            None => return Ok(None),
        },
    };
    let targets = env_targets(forest, role, convention)?;
    if targets.is_empty() {
        return Ok(None);
    }
    let steps = targets
        .into_iter()
        .map(|t| CopyStep {
            source: object,
            target: t.id,
            copy_name: format!("{}.{}", source_name, t.env),
        })
        .collect();
    debug!("plan: copy '{}' out of its location as {}", source_name, role);
    Ok(Some(CopyPlan {
        steps,
        unlink_source: Some((object, source)),
        ..CopyPlan::default()
    }))
}
