//! Resolver operations over a forest and a naming convention.
//!
//! Everything here follows one error discipline: malformed input and
//! integrity violations are `Err`, while "the thing you asked about is not
//! in this project" is `Ok(None)` or an empty list. Callers report the
//! latter to the user and move on.

use tracing::debug;

use crate::convention::{ClassifyRules, Convention, TargetLevel, TemplateArgs};
use crate::forest::{ContainerId, Forest, ObjectId};
use crate::name::{Role, RootName, SceneId};
use crate::util::{ends_with_ignore_case, starts_with_ignore_case, Result};

// ============================================================================
// Scene roots
// ============================================================================

/// A top-level container whose name parses as a scene root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneRoot {
    pub id: ContainerId,
    pub scene: SceneId,
    pub location: String,
}

fn scene_roots(forest: &Forest) -> impl Iterator<Item = SceneRoot> + '_ {
    forest.roots().filter_map(|id| {
        let container = forest.container(id)?;
        match RootName::parse(container.name()) {
            Some(RootName::Scene { scene, location }) => Some(SceneRoot { id, scene, location }),
            _ => None,
        }
    })
}

/// All scene roots, in creation order.
pub fn all_scene_roots(forest: &Forest) -> Vec<SceneRoot> {
    scene_roots(forest).collect()
}

/// Find the top-level container for a scene. Group containers that embed a
/// structural tag (`+SC17-FOREST-ART+`) never qualify, only true scene
/// roots (`+SC17-FOREST+`) do.
pub fn find_scene_root(forest: &Forest, scene: &SceneId) -> Option<ContainerId> {
    scene_roots(forest).find(|root| &root.scene == scene).map(|root| root.id)
}

// ============================================================================
// Classification
// ============================================================================

/// Classify an object's role from its container ancestry.
///
/// Walks upward from each membership in turn, bounded per path; the first
/// ancestor name carrying a tag decides, with ties inside one name broken
/// by the precedence order in `rules`. Objects with no memberships, or
/// whose ancestry never matches, default to MODEL. Pure query.
pub fn classify_context(forest: &Forest, object: ObjectId, rules: &ClassifyRules) -> Role {
    let Some(obj) = forest.object(object) else {
        return Role::default();
    };
    for &membership in obj.memberships() {
        for ancestor in forest.ancestry(membership) {
            let Some(container) = forest.container(ancestor) else {
                break;
            };
            if let Some(role) = rules.role_of(container.name()) {
                debug!("classified '{}' as {} via '{}'", obj.name(), role, container.name());
                return role;
            }
        }
    }
    Role::default()
}

// ============================================================================
// Target resolution
// ============================================================================

/// Address of a resolve: which scene, which role, which level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetRequest {
    pub scene: SceneId,
    pub role: Role,
    pub level: TargetLevel,
}

/// Locate or create the container a request addresses.
///
/// `Ok(None)` when the role is not part of the convention or the scene has
/// no root in the forest. Missing chain containers are created on the way
/// down, so resolving twice returns the same id and creates nothing new.
pub fn resolve_target(
    forest: &mut Forest,
    convention: &Convention,
    request: &TargetRequest,
) -> Result<Option<ContainerId>> {
    let Some(root) = scene_roots(forest).find(|r| r.scene == request.scene) else {
        debug!("no scene root for {}", request.scene.as_str());
        return Ok(None);
    };
    resolve_target_at(forest, convention, &root, request.role, &request.level)
}

/// Same as [`resolve_target`], starting from an already located scene root.
pub fn resolve_target_at(
    forest: &mut Forest,
    convention: &Convention,
    root: &SceneRoot,
    role: Role,
    level: &TargetLevel,
) -> Result<Option<ContainerId>> {
    let Some(chain) = convention.chain(role, level) else {
        debug!("convention '{}' has no {} chain", convention.name(), role);
        return Ok(None);
    };
    let args = template_args(root, role, level);
    let mut current = root.id;
    for template in chain {
        let name = template.expand(&args)?;
        current = forest.get_or_create_child(current, &name)?;
    }
    Ok(Some(current))
}

/// One step of a resolve preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainStep {
    pub name: String,
    pub exists: bool,
}

/// Expand the chain a request would walk, without creating anything.
/// Containers are globally unique by name, so existence is a name lookup.
pub fn target_chain(
    forest: &Forest,
    convention: &Convention,
    request: &TargetRequest,
) -> Result<Option<Vec<ChainStep>>> {
    let Some(root) = scene_roots(forest).find(|r| r.scene == request.scene) else {
        return Ok(None);
    };
    let Some(chain) = convention.chain(request.role, &request.level) else {
        return Ok(None);
    };
    let args = template_args(&root, request.role, &request.level);
    let mut steps = Vec::with_capacity(chain.len());
    for template in chain {
        let name = template.expand(&args)?;
        let exists = forest.container_by_name(&name).is_some();
        steps.push(ChainStep { name, exists });
    }
    Ok(Some(steps))
}

fn template_args<'a>(root: &'a SceneRoot, role: Role, level: &'a TargetLevel) -> TemplateArgs<'a> {
    TemplateArgs {
        scene: Some(root.scene.as_str()),
        loc: Some(&root.location),
        shot: match level {
            TargetLevel::Shot(shot) => Some(shot.as_str()),
            TargetLevel::Scene => None,
        },
        role: Some(role.as_str()),
        env: None,
    }
}

// ============================================================================
// Location / environment lookups
// ============================================================================

/// Find the `LOC-..-<role>` container an object is linked into, provided
/// its parent is a `+LOC-..+` root. Both conventions share this shape.
pub fn find_source_location(forest: &Forest, object: ObjectId, role: Role) -> Option<ContainerId> {
    let obj = forest.object(object)?;
    let suffix = format!("-{}", role.as_str());
    for &membership in obj.memberships() {
        let container = forest.container(membership)?;
        if !starts_with_ignore_case(container.name(), "LOC-")
            || !ends_with_ignore_case(container.name(), &suffix)
        {
            continue;
        }
        let parent_is_loc_root = container
            .parent()
            .and_then(|p| forest.container(p))
            .map(|p| matches!(RootName::parse(p.name()), Some(RootName::Location { .. })))
            .unwrap_or(false);
        if parent_is_loc_root {
            return Some(membership);
        }
    }
    None
}

/// A role child found under an `+ENV-..+` root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvTarget {
    pub env: String,
    pub id: ContainerId,
}

/// Role children of every environment root, where they exist. Environment
/// containers are never created by the resolver.
pub fn env_targets(forest: &Forest, role: Role, convention: &Convention) -> Result<Vec<EnvTarget>> {
    let mut targets = Vec::new();
    for root in forest.roots() {
        let Some(container) = forest.container(root) else {
            continue;
        };
        let Some(RootName::Environment { name: env }) = RootName::parse(container.name()) else {
            continue;
        };
        if let Some(id) = env_child(forest, root, &env, role, convention)? {
            targets.push(EnvTarget { env, id });
        }
    }
    Ok(targets)
}

/// Role child of one environment, addressed by environment name.
pub fn env_target_by_name(
    forest: &Forest,
    env_name: &str,
    role: Role,
    convention: &Convention,
) -> Result<Option<ContainerId>> {
    let root_name = format!("+ENV-{env_name}+");
    let Some(root) = forest.container_by_name(&root_name) else {
        return Ok(None);
    };
    env_child(forest, root, env_name, role, convention)
}

fn env_child(
    forest: &Forest,
    root: ContainerId,
    env: &str,
    role: Role,
    convention: &Convention,
) -> Result<Option<ContainerId>> {
    let args = TemplateArgs {
        role: Some(role.as_str()),
        env: Some(env),
        ..TemplateArgs::default()
    };
    let child_name = convention.env_child().expand(&args)?;
    let found = forest
        .container_by_name(&child_name)
        .filter(|&id| forest.parent_of(id) == Some(root));
    Ok(found)
}
