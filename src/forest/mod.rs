//! Container forest: the host hierarchy as an arena.
//!
//! Containers and objects live in two flat arenas addressed by dense ids.
//! Every container stores an explicit `parent` back-link maintained by the
//! mutation API, so parent lookup is a field read and never a scan over
//! sibling lists. Names are globally unique per arena (the host enforces
//! the same rule), which is what lets `get_or_create_child` be idempotent.
//!
//! Objects are not owned by a single container; they hold a membership
//! list and can be linked into several containers at once. `link`/`unlink`
//! keep both sides of the relation in sync.

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;
use tracing::debug;

use crate::util::{Error, Result};

/// Upward walks stop after this many hops.
pub const MAX_WALK_DEPTH: usize = 32;

// ============================================================================
// Ids
// ============================================================================

/// Dense arena index of a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

impl ContainerId {
    /// Arena slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Dense arena index of a scene object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Arena slot index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// One container node. Fields are private; the [`Forest`] mutation API is
/// the only writer, which keeps parent/child links symmetric.
#[derive(Debug)]
pub struct Container {
    name: String,
    parent: Option<ContainerId>,
    children: Vec<ContainerId>,
    members: Vec<ObjectId>,
}

impl Container {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    pub fn children(&self) -> &[ContainerId] {
        &self.children
    }

    pub fn members(&self) -> &[ObjectId] {
        &self.members
    }

    /// True for top-level containers.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// One scene object. Most objects sit in one or two containers, so the
/// membership list is inline.
#[derive(Debug)]
pub struct SceneObject {
    name: String,
    memberships: SmallVec<[ContainerId; 2]>,
}

impl SceneObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Containers this object is linked into, in link order.
    pub fn memberships(&self) -> &[ContainerId] {
        &self.memberships
    }
}

// ============================================================================
// Forest
// ============================================================================

/// Arena of containers and objects with name indexes.
#[derive(Debug, Default)]
pub struct Forest {
    containers: Vec<Container>,
    objects: Vec<SceneObject>,
    container_names: HashMap<String, ContainerId>,
    object_names: HashMap<String, ObjectId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Containers
    // ------------------------------------------------------------------

    /// Create a new top-level container.
    pub fn create_root(&mut self, name: &str) -> Result<ContainerId> {
        self.insert_container(name, None)
    }

    /// Return the child of `parent` called `name`, creating it when absent.
    ///
    /// Idempotent: a second call with the same arguments returns the same
    /// id without touching the forest. A `name` already used anywhere else
    /// in the forest is a precondition violation, not a lookup miss.
    pub fn get_or_create_child(&mut self, parent: ContainerId, name: &str) -> Result<ContainerId> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        self.check_container(parent)?;
        if let Some(&existing) = self.container_names.get(name) {
            if self.containers[existing.index()].parent == Some(parent) {
                return Ok(existing);
            }
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.insert_container(name, Some(parent))
    }

    /// Attach a top-level container under `parent`.
    ///
    /// Attaching a child to the parent it already has is a no-op, matching
    /// [`Forest::link`]. A child under a different parent is an error, not
    /// a move.
    pub fn attach(&mut self, child: ContainerId, parent: ContainerId) -> Result<()> {
        self.check_container(child)?;
        self.check_container(parent)?;
        if let Some(current) = self.containers[child.index()].parent {
            if current == parent {
                return Ok(());
            }
            return Err(Error::AlreadyParented {
                child: self.containers[child.index()].name.clone(),
                parent: self.containers[current.index()].name.clone(),
            });
        }
        if child == parent || self.ancestry(parent).any(|id| id == child) {
            return Err(Error::WouldCycle {
                child: self.containers[child.index()].name.clone(),
                parent: self.containers[parent.index()].name.clone(),
            });
        }
        self.containers[child.index()].parent = Some(parent);
        self.containers[parent.index()].children.push(child);
        Ok(())
    }

    fn insert_container(&mut self, name: &str, parent: Option<ContainerId>) -> Result<ContainerId> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.container_names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(Container {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            members: Vec::new(),
        });
        self.container_names.insert(name.to_string(), id);
        match parent {
            Some(p) => {
                self.containers[p.index()].children.push(id);
                debug!("created container: {} under {}", name, self.containers[p.index()].name);
            }
            None => debug!("created root container: {}", name),
        }
        Ok(id)
    }

    /// Parent container, `None` for roots and unknown ids.
    #[inline]
    pub fn parent_of(&self, id: ContainerId) -> Option<ContainerId> {
        self.container(id)?.parent
    }

    /// Walk from `start` to its root: the container itself, then each
    /// parent in turn. Capped at [`MAX_WALK_DEPTH`] hops so malformed
    /// data cannot hang a caller.
    pub fn ancestry(&self, start: ContainerId) -> impl Iterator<Item = ContainerId> + '_ {
        let first = self.container(start).map(|_| start);
        std::iter::successors(first, move |&id| self.parent_of(id)).take(MAX_WALK_DEPTH)
    }

    /// All top-level containers, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.containers
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_root())
            .map(|(i, _)| ContainerId(i as u32))
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(id.index())
    }

    pub fn container_by_name(&self, name: &str) -> Option<ContainerId> {
        self.container_names.get(name).copied()
    }

    pub fn containers(&self) -> impl Iterator<Item = (ContainerId, &Container)> {
        self.containers
            .iter()
            .enumerate()
            .map(|(i, c)| (ContainerId(i as u32), c))
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    fn check_container(&self, id: ContainerId) -> Result<()> {
        if id.index() < self.containers.len() {
            Ok(())
        } else {
            Err(Error::StaleContainer { index: id.index() })
        }
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    /// Register a scene object. Object names are globally unique, in a
    /// namespace separate from container names.
    pub fn add_object(&mut self, name: &str) -> Result<ObjectId> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.object_names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            name: name.to_string(),
            memberships: SmallVec::new(),
        });
        self.object_names.insert(name.to_string(), id);
        Ok(id)
    }

    /// Link an object into a container. Linking twice is a no-op.
    pub fn link(&mut self, object: ObjectId, container: ContainerId) -> Result<()> {
        self.check_object(object)?;
        self.check_container(container)?;
        let memberships = &mut self.objects[object.index()].memberships;
        if memberships.contains(&container) {
            return Ok(());
        }
        memberships.push(container);
        self.containers[container.index()].members.push(object);
        Ok(())
    }

    /// Remove an object from a container it is linked into.
    pub fn unlink(&mut self, object: ObjectId, container: ContainerId) -> Result<()> {
        self.check_object(object)?;
        self.check_container(container)?;
        let memberships = &mut self.objects[object.index()].memberships;
        let Some(pos) = memberships.iter().position(|&c| c == container) else {
            return Err(Error::NotLinked {
                object: self.objects[object.index()].name.clone(),
                container: self.containers[container.index()].name.clone(),
            });
        };
        memberships.remove(pos);
        let members = &mut self.containers[container.index()].members;
        if let Some(pos) = members.iter().position(|&o| o == object) {
            members.remove(pos);
        }
        Ok(())
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.index())
    }

    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_names.get(name).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, o)| (ObjectId(i as u32), o))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn check_object(&self, id: ObjectId) -> Result<()> {
        if id.index() < self.objects.len() {
            Ok(())
        } else {
            Err(Error::StaleObject { index: id.index() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_forest() -> (Forest, ContainerId, ContainerId) {
        let mut forest = Forest::new();
        let root = forest.create_root("+SC17-FOREST+").expect("root");
        let child = forest.get_or_create_child(root, "+ART-SC17-FOREST+").expect("child");
        (forest, root, child)
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let (mut forest, root, child) = small_forest();
        let again = forest.get_or_create_child(root, "+ART-SC17-FOREST+").expect("existing");
        assert_eq!(again, child);
        assert_eq!(forest.container_count(), 2);
        assert_eq!(forest.container(root).unwrap().children(), &[child]);
    }

    #[test]
    fn test_duplicate_name_elsewhere_is_error() {
        let (mut forest, _root, child) = small_forest();
        let err = forest.get_or_create_child(child, "+SC17-FOREST+").unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }

    #[test]
    fn test_empty_and_stale() {
        let (mut forest, root, _) = small_forest();
        assert!(matches!(
            forest.get_or_create_child(root, ""),
            Err(Error::EmptyName)
        ));
        let stale = ContainerId(99);
        assert!(matches!(
            forest.get_or_create_child(stale, "X"),
            Err(Error::StaleContainer { index: 99 })
        ));
        assert_eq!(forest.parent_of(stale), None);
    }

    #[test]
    fn test_parent_links() {
        let (mut forest, root, child) = small_forest();
        let leaf = forest.get_or_create_child(child, "MODEL-SC17-SH100").expect("leaf");
        assert_eq!(forest.parent_of(leaf), Some(child));
        assert_eq!(forest.parent_of(child), Some(root));
        assert_eq!(forest.parent_of(root), None);
        let chain: Vec<_> = forest.ancestry(leaf).collect();
        assert_eq!(chain, vec![leaf, child, root]);
    }

    #[test]
    fn test_attach_guards() {
        let mut forest = Forest::new();
        let a = forest.create_root("A").unwrap();
        let b = forest.create_root("B").unwrap();
        forest.attach(b, a).expect("attach");
        assert_eq!(forest.parent_of(b), Some(a));
        // b already has a parent
        let c = forest.create_root("C").unwrap();
        assert!(matches!(forest.attach(b, c), Err(Error::AlreadyParented { .. })));
        // a under b would loop
        assert!(matches!(forest.attach(a, b), Err(Error::WouldCycle { .. })));
        assert!(matches!(forest.attach(c, c), Err(Error::WouldCycle { .. })));
    }

    #[test]
    fn test_attach_to_current_parent_is_a_no_op() {
        let mut forest = Forest::new();
        let a = forest.create_root("A").unwrap();
        let b = forest.create_root("B").unwrap();
        forest.attach(b, a).expect("attach");
        forest.attach(b, a).expect("reattach is a no-op");
        assert_eq!(forest.container(a).unwrap().children(), &[b]);
        assert_eq!(forest.parent_of(b), Some(a));
    }

    #[test]
    fn test_walk_depth_is_bounded() {
        let mut forest = Forest::new();
        let mut id = forest.create_root("N0").unwrap();
        for i in 1..40 {
            id = forest.get_or_create_child(id, &format!("N{i}")).unwrap();
        }
        assert_eq!(forest.ancestry(id).count(), MAX_WALK_DEPTH);
    }

    #[test]
    fn test_link_unlink() {
        let (mut forest, root, child) = small_forest();
        let obj = forest.add_object("tree.001").expect("object");
        forest.link(obj, child).expect("link");
        forest.link(obj, child).expect("relink is a no-op");
        assert_eq!(forest.object(obj).unwrap().memberships(), &[child]);
        assert_eq!(forest.container(child).unwrap().members(), &[obj]);

        forest.link(obj, root).expect("second membership");
        assert_eq!(forest.object(obj).unwrap().memberships().len(), 2);

        forest.unlink(obj, child).expect("unlink");
        assert_eq!(forest.object(obj).unwrap().memberships(), &[root]);
        assert!(forest.container(child).unwrap().members().is_empty());
        assert!(matches!(
            forest.unlink(obj, child),
            Err(Error::NotLinked { .. })
        ));
    }

    #[test]
    fn test_name_lookups() {
        let (forest, root, child) = small_forest();
        assert_eq!(forest.container_by_name("+SC17-FOREST+"), Some(root));
        assert_eq!(forest.container_by_name("+ART-SC17-FOREST+"), Some(child));
        assert_eq!(forest.container_by_name("nope"), None);
        assert_eq!(forest.roots().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn test_object_namespace_is_separate() {
        let mut forest = Forest::new();
        forest.create_root("SHARED").unwrap();
        // same text is fine for an object, names collide per namespace only
        forest.add_object("SHARED").expect("object namespace");
        assert!(matches!(
            forest.add_object("SHARED"),
            Err(Error::DuplicateName(_))
        ));
    }
}
