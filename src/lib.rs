//! # Advcopy
//!
//! Naming-convention driven collection hierarchy resolver and copy planner
//! for shot/scene layout pipelines.
//!
//! Layout projects organize their containers by a strict naming scheme:
//! `+SC17-FOREST+` scene roots, role groups (`+ART-SC17-FOREST+`), per-shot
//! containers (`MODEL-SC17-SH100`) and camera markers (`CAM-SC17-SH100`)
//! that slice the timeline into shots. This crate parses those names,
//! locates or lazily creates the container a (scene, shot, role) address
//! points at, classifies objects by their container ancestry, derives
//! shot/scene frame spans, and emits copy/move plans with visibility
//! keyframes as pure data for the host application to apply.
//!
//! ## Modules
//!
//! - [`util`] - Errors and shared text helpers
//! - [`name`] - The name grammar (scene/shot ids, role tags, root names, marker labels)
//! - [`forest`] - Container/object arena with explicit parent links
//! - [`timeline`] - Markers and frame span math
//! - [`convention`] - Naming-convention variants as data-driven template chains
//! - [`resolve`] - Scene roots, context classification, target resolution
//! - [`plan`] - Copy/move planners and the visibility keyframe contract
//! - [`snapshot`] - JSON project snapshots
//!
//! ## Example
//!
//! ```
//! use advcopy::prelude::*;
//!
//! # fn main() -> advcopy::Result<()> {
//! let mut forest = Forest::new();
//! forest.create_root("+SC17-FOREST+")?;
//!
//! let request = TargetRequest {
//!     scene: SceneId::parse("SC17").unwrap(),
//!     role: Role::Model,
//!     level: TargetLevel::Shot(ShotId::parse("SH100").unwrap()),
//! };
//! let target = resolve_target(&mut forest, &Convention::prefix(), &request)?
//!     .expect("scene root is present");
//! assert_eq!(forest.container(target).unwrap().name(), "MODEL-SC17-SH100");
//! # Ok(())
//! # }
//! ```

pub mod util;
pub mod name;
pub mod forest;
pub mod timeline;
pub mod convention;
pub mod resolve;
pub mod plan;
pub mod snapshot;

// Re-export commonly used types
pub use forest::{ContainerId, Forest, ObjectId};
pub use util::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::convention::{ClassifyRules, Convention, NameTemplate, TargetLevel, TemplateArgs};
    pub use crate::forest::{Container, ContainerId, Forest, ObjectId, SceneObject};
    pub use crate::name::{MarkerLabel, Role, RoleTag, RootName, SceneId, ShotId};
    pub use crate::plan::*;
    pub use crate::resolve::*;
    pub use crate::snapshot::{ContainerRecord, ProjectSnapshot};
    pub use crate::timeline::{current_shot, scene_span, FrameSpan, Marker, ShotWindow};
    pub use crate::util::{Error, Result};
}
