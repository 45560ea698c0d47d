//! JSON snapshot of a project's hierarchy and timeline.
//!
//! A snapshot is a developer surface: a flat dump of container records,
//! object names, markers and the frame range, enough to rebuild a
//! [`Forest`] and drive every resolver operation outside the host. It is
//! not a persistence format the host reads back.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::forest::Forest;
use crate::timeline::Marker;
use crate::util::{Error, Result};

fn default_frame_start() -> i32 {
    1
}

fn default_frame_end() -> i32 {
    250
}

/// One container: its name, child container names and member object names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl ContainerRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            members: Vec::new(),
        }
    }
}

/// Serialized state of one project file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default)]
    pub containers: Vec<ContainerRecord>,
    /// Objects may also appear implicitly via container `members`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<Marker>,
    #[serde(default = "default_frame_start")]
    pub frame_start: i32,
    #[serde(default = "default_frame_end")]
    pub frame_end: i32,
    #[serde(default = "default_frame_start")]
    pub current_frame: i32,
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            objects: Vec::new(),
            markers: Vec::new(),
            frame_start: default_frame_start(),
            frame_end: default_frame_end(),
            current_frame: default_frame_start(),
        }
    }
}

impl ProjectSnapshot {
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn to_writer(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))
    }

    /// Rebuild the forest this snapshot describes.
    ///
    /// Containers are created first, then parented per the `children`
    /// lists. A child name with no record of its own becomes an empty leaf
    /// container; a member name not in `objects` is registered on the fly.
    /// A child claimed by two parents or a name used twice is an error;
    /// listing the same child twice under one parent is a no-op.
    pub fn build(&self) -> Result<Forest> {
        if self.frame_end < self.frame_start {
            return Err(Error::snapshot(format!(
                "frame_end {} before frame_start {}",
                self.frame_end, self.frame_start
            )));
        }
        let mut forest = Forest::new();
        for record in &self.containers {
            forest.create_root(&record.name)?;
        }
        for record in &self.containers {
            let Some(parent) = forest.container_by_name(&record.name) else {
                continue;
            };
            for child_name in &record.children {
                match forest.container_by_name(child_name) {
                    Some(child) => forest.attach(child, parent)?,
                    None => {
                        forest.get_or_create_child(parent, child_name)?;
                    }
                }
            }
        }
        for name in &self.objects {
            forest.add_object(name)?;
        }
        for record in &self.containers {
            let Some(container) = forest.container_by_name(&record.name) else {
                continue;
            };
            for member in &record.members {
                let object = match forest.object_by_name(member) {
                    Some(id) => id,
                    None => forest.add_object(member)?,
                };
                forest.link(object, container)?;
            }
        }
        Ok(forest)
    }

    /// Snapshot an existing forest together with its timeline state.
    pub fn capture(
        forest: &Forest,
        markers: &[Marker],
        frame_start: i32,
        frame_end: i32,
        current_frame: i32,
    ) -> Self {
        let containers = forest
            .containers()
            .map(|(_, container)| ContainerRecord {
                name: container.name().to_string(),
                children: container
                    .children()
                    .iter()
                    .filter_map(|&c| forest.container(c))
                    .map(|c| c.name().to_string())
                    .collect(),
                members: container
                    .members()
                    .iter()
                    .filter_map(|&o| forest.object(o))
                    .map(|o| o.name().to_string())
                    .collect(),
            })
            .collect();
        let objects = forest.objects().map(|(_, o)| o.name().to_string()).collect();
        Self {
            containers,
            objects,
            markers: markers.to_vec(),
            frame_start,
            frame_end,
            current_frame,
        }
    }
}
