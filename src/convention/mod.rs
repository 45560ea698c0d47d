//! Naming-convention variants as data.
//!
//! A convention is a table: per role and target level, the ordered chain of
//! container names to walk or create under a scene root, expressed as
//! [`NameTemplate`] values. The resolver interprets the table; no role gets
//! its own code path. Two conventions are built in:
//!
//! - [`Convention::prefix`] puts the role tag first (`+ART-SC17-FOREST+`,
//!   `MODEL-SC17-SH100`) and supports all four roles, routing ACTOR and
//!   PROP through a shared `ANI` animation group.
//! - [`Convention::suffix`] appends the tag (`+SC17-FOREST-ART+`,
//!   `SC17-SH100-ART`) and only defines MODEL and VFX; resolving ACTOR or
//!   PROP against it yields no target.

mod template;

pub use template::*;

use std::collections::HashMap;

use crate::name::{Role, RoleTag, ShotId};

// ============================================================================
// Target level
// ============================================================================

/// Hierarchy level a resolve lands on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetLevel {
    /// Scene-wide container, one per role per scene.
    Scene,
    /// Per-shot container.
    Shot(ShotId),
}

// ============================================================================
// Classification rules
// ============================================================================

/// Tag precedence for ancestry classification.
///
/// Each ancestor name is checked against the tags in order; the first tag
/// present anywhere in the name decides the role. VFX outranks everything
/// in both built-in orders; they differ in whether MODEL/ART or PROP/ACTOR
/// is checked first, which matters for mixed names like `PROP-MODEL-SC17`.
#[derive(Clone, Debug)]
pub struct ClassifyRules {
    order: Vec<(RoleTag, Role)>,
}

impl ClassifyRules {
    /// VFX, then MODEL/ART, then PROP, then ACTOR.
    pub fn model_first() -> Self {
        Self {
            order: vec![
                (RoleTag::Vfx, Role::Vfx),
                (RoleTag::Model, Role::Model),
                (RoleTag::Art, Role::Model),
                (RoleTag::Prop, Role::Prop),
                (RoleTag::Actor, Role::Actor),
            ],
        }
    }

    /// VFX, then PROP/ACTOR, then MODEL/ART.
    pub fn anim_first() -> Self {
        Self {
            order: vec![
                (RoleTag::Vfx, Role::Vfx),
                (RoleTag::Prop, Role::Prop),
                (RoleTag::Actor, Role::Actor),
                (RoleTag::Model, Role::Model),
                (RoleTag::Art, Role::Model),
            ],
        }
    }

    /// Only VFX and MODEL/ART are detected; PROP/ACTOR ancestry falls
    /// through to the MODEL default. The suffix convention classifies
    /// this way, matching its two-role chain table.
    pub fn model_vfx_only() -> Self {
        Self {
            order: vec![
                (RoleTag::Vfx, Role::Vfx),
                (RoleTag::Model, Role::Model),
                (RoleTag::Art, Role::Model),
            ],
        }
    }

    /// Role of the first tag found in `name`, if any.
    pub fn role_of(&self, name: &str) -> Option<Role> {
        self.order
            .iter()
            .find(|(tag, _)| tag.found_in(name))
            .map(|&(_, role)| role)
    }
}

impl Default for ClassifyRules {
    fn default() -> Self {
        Self::model_first()
    }
}

// ============================================================================
// Convention
// ============================================================================

/// One naming convention: the chain tables plus the classification order
/// that ships with it.
#[derive(Clone, Debug)]
pub struct Convention {
    name: String,
    shot_chains: HashMap<Role, Vec<NameTemplate>>,
    scene_chains: HashMap<Role, Vec<NameTemplate>>,
    env_child: NameTemplate,
    classify: ClassifyRules,
}

impl Convention {
    /// Role-tag-first convention, all four roles.
    pub fn prefix() -> Self {
        let mut shot_chains = HashMap::new();
        shot_chains.insert(
            Role::Model,
            chain(&["+ART-{base}+", "SHOT-ART-{base}", "MODEL-{scene}-{shot}"]),
        );
        shot_chains.insert(
            Role::Vfx,
            chain(&["+VFX-{base}+", "SHOT-VFX-{base}", "VFX-{scene}-{shot}"]),
        );
        let ani_shot = chain(&["+ANI-{base}+", "SHOT-ANI-{base}", "{role}-{scene}-{shot}"]);
        shot_chains.insert(Role::Actor, ani_shot.clone());
        shot_chains.insert(Role::Prop, ani_shot);

        let mut scene_chains = HashMap::new();
        scene_chains.insert(Role::Model, chain(&["+ART-{base}+", "MODEL-{base}"]));
        scene_chains.insert(Role::Vfx, chain(&["+VFX-{base}+", "VFX-{base}"]));
        let ani_scene = chain(&["+ANI-{base}+", "{role}-{base}"]);
        scene_chains.insert(Role::Actor, ani_scene.clone());
        scene_chains.insert(Role::Prop, ani_scene);

        Self {
            name: "prefix".to_string(),
            shot_chains,
            scene_chains,
            env_child: template("{role}-ENV-{env}"),
            classify: ClassifyRules::model_first(),
        }
    }

    /// Role-tag-last convention, MODEL and VFX only.
    pub fn suffix() -> Self {
        let mut shot_chains = HashMap::new();
        shot_chains.insert(
            Role::Model,
            chain(&[
                "+{base}-ART+",
                "{base}-ART-SHOT",
                "{scene}-{shot}-ART",
                "MODEL-{scene}-{shot}",
            ]),
        );
        shot_chains.insert(
            Role::Vfx,
            chain(&["+{base}-VFX+", "{base}-VFX-SHOT", "{scene}-{shot}-VFX"]),
        );

        let mut scene_chains = HashMap::new();
        scene_chains.insert(Role::Model, chain(&["+{base}-ART+", "{base}-MODEL"]));
        scene_chains.insert(Role::Vfx, chain(&["+{base}-VFX+", "{base}-VFX"]));

        Self {
            name: "suffix".to_string(),
            shot_chains,
            scene_chains,
            env_child: template("ENV-{env}-{role}"),
            classify: ClassifyRules::model_vfx_only(),
        }
    }

    /// Swap in a different classification order.
    pub fn with_classify_rules(mut self, rules: ClassifyRules) -> Self {
        self.classify = rules;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classify_rules(&self) -> &ClassifyRules {
        &self.classify
    }

    /// Chain for a role at a level; `None` when the role is not part of
    /// this convention.
    pub fn chain(&self, role: Role, level: &TargetLevel) -> Option<&[NameTemplate]> {
        let table = match level {
            TargetLevel::Scene => &self.scene_chains,
            TargetLevel::Shot(_) => &self.shot_chains,
        };
        table.get(&role).map(Vec::as_slice)
    }

    /// Template for the role child under an `+ENV-..+` root.
    pub fn env_child(&self) -> &NameTemplate {
        &self.env_child
    }

    /// Whether the convention defines chains for `role`.
    pub fn supports(&self, role: Role) -> bool {
        self.shot_chains.contains_key(&role)
    }
}

// Built-in chain text is static; the tests below expand every table entry.
fn template(text: &str) -> NameTemplate {
    NameTemplate::parse(text).unwrap()
}

fn chain(specs: &[&str]) -> Vec<NameTemplate> {
    specs.iter().map(|s| template(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot_args<'a>() -> TemplateArgs<'a> {
        TemplateArgs {
            scene: Some("SC17"),
            loc: Some("FOREST"),
            shot: Some("SH100"),
            role: Some("ACTOR"),
            env: None,
        }
    }

    fn expand_chain(chain: &[NameTemplate], args: &TemplateArgs) -> Vec<String> {
        chain.iter().map(|t| t.expand(args).unwrap()).collect()
    }

    #[test]
    fn test_prefix_shot_chains() {
        let conv = Convention::prefix();
        let shot = TargetLevel::Shot(ShotId::parse("SH100").unwrap());
        let model = expand_chain(conv.chain(Role::Model, &shot).unwrap(), &shot_args());
        assert_eq!(
            model,
            ["+ART-SC17-FOREST+", "SHOT-ART-SC17-FOREST", "MODEL-SC17-SH100"]
        );
        let actor = expand_chain(conv.chain(Role::Actor, &shot).unwrap(), &shot_args());
        assert_eq!(
            actor,
            ["+ANI-SC17-FOREST+", "SHOT-ANI-SC17-FOREST", "ACTOR-SC17-SH100"]
        );
    }

    #[test]
    fn test_prefix_scene_chains() {
        let conv = Convention::prefix();
        let vfx = expand_chain(conv.chain(Role::Vfx, &TargetLevel::Scene).unwrap(), &shot_args());
        assert_eq!(vfx, ["+VFX-SC17-FOREST+", "VFX-SC17-FOREST"]);
    }

    #[test]
    fn test_suffix_shot_chains() {
        let conv = Convention::suffix();
        let shot = TargetLevel::Shot(ShotId::parse("SH100").unwrap());
        let model = expand_chain(conv.chain(Role::Model, &shot).unwrap(), &shot_args());
        assert_eq!(
            model,
            [
                "+SC17-FOREST-ART+",
                "SC17-FOREST-ART-SHOT",
                "SC17-SH100-ART",
                "MODEL-SC17-SH100",
            ]
        );
        let vfx = expand_chain(conv.chain(Role::Vfx, &shot).unwrap(), &shot_args());
        assert_eq!(
            vfx,
            ["+SC17-FOREST-VFX+", "SC17-FOREST-VFX-SHOT", "SC17-SH100-VFX"]
        );
    }

    #[test]
    fn test_suffix_scene_chains() {
        let conv = Convention::suffix();
        let model = expand_chain(conv.chain(Role::Model, &TargetLevel::Scene).unwrap(), &shot_args());
        assert_eq!(model, ["+SC17-FOREST-ART+", "SC17-FOREST-MODEL"]);
    }

    #[test]
    fn test_suffix_has_no_animation_roles() {
        let conv = Convention::suffix();
        let shot = TargetLevel::Shot(ShotId::parse("SH100").unwrap());
        assert!(conv.chain(Role::Actor, &shot).is_none());
        assert!(conv.chain(Role::Prop, &TargetLevel::Scene).is_none());
        assert!(!conv.supports(Role::Prop));
        assert!(conv.supports(Role::Model));
    }

    #[test]
    fn test_env_child_templates() {
        let args = TemplateArgs {
            role: Some("MODEL"),
            env: Some("CITY"),
            ..TemplateArgs::default()
        };
        assert_eq!(
            Convention::prefix().env_child().expand(&args).unwrap(),
            "MODEL-ENV-CITY"
        );
        assert_eq!(
            Convention::suffix().env_child().expand(&args).unwrap(),
            "ENV-CITY-MODEL"
        );
    }

    #[test]
    fn test_classify_orders_differ_on_mixed_names() {
        let model_first = ClassifyRules::model_first();
        let anim_first = ClassifyRules::anim_first();
        assert_eq!(model_first.role_of("PROP-MODEL-SC17"), Some(Role::Model));
        assert_eq!(anim_first.role_of("PROP-MODEL-SC17"), Some(Role::Prop));
        // VFX outranks everything in both orders
        assert_eq!(model_first.role_of("PROP-VFX-SC17"), Some(Role::Vfx));
        assert_eq!(anim_first.role_of("PROP-VFX-SC17"), Some(Role::Vfx));
        assert_eq!(model_first.role_of("plain"), None);
    }

    #[test]
    fn test_classify_art_counts_as_model() {
        let rules = ClassifyRules::default();
        assert_eq!(rules.role_of("+ART-SC17-FOREST+"), Some(Role::Model));
        assert_eq!(rules.role_of("shot-art-sc17"), Some(Role::Model));
    }

    #[test]
    fn test_suffix_classify_ignores_animation_tags() {
        let rules = Convention::suffix().classify_rules().clone();
        assert_eq!(rules.role_of("PROP-SC17"), None);
        assert_eq!(rules.role_of("ACTOR-SC17"), None);
        assert_eq!(rules.role_of("SC17-SH100-VFX"), Some(Role::Vfx));
    }
}
