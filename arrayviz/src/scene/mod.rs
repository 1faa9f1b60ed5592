//! The scene tree: an arena of nodes addressed by generational handles.

mod id;
mod node;

use std::collections::HashMap;

use log::trace;

pub use id::NodeId;
pub use node::{Node, TextContent};

use crate::array::ArrayData;
use crate::config::{Metrics, StageConfig, Timing};
use crate::entry::EntryData;
use crate::error::{Error, Result};
use crate::matrix::MatrixData;
use crate::types::{Theme, Vec2};

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Owns every node, plus the per-node data of entries and containers.
///
/// Nodes form a single tree under [`Scene::root`]. Detached nodes stay alive
/// but are neither laid out nor rendered until they are attached again.
#[derive(Debug)]
pub struct Scene {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: NodeId,
    theme: Theme,
    config: StageConfig,

    pub(crate) entries: HashMap<NodeId, EntryData>,
    pub(crate) arrays: HashMap<NodeId, ArrayData>,
    pub(crate) matrices: HashMap<NodeId, MatrixData>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(StageConfig::default())
    }

    pub fn with_config(config: StageConfig) -> Self {
        let root_node = Node::group().name("root");
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(root_node),
            }],
            free_list: Vec::new(),
            root: NodeId {
                idx: 0,
                generation: 0,
            },
            theme: Theme::dark(),
            config,
            entries: HashMap::new(),
            arrays: HashMap::new(),
            matrices: HashMap::new(),
        }
    }

    /// Replace the theme. Only affects nodes spawned afterwards.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Metrics {
        &self.config.metrics
    }

    pub fn timing(&self) -> &Timing {
        &self.config.timing
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slots
            .get(id.idx as usize)
            .is_some_and(|slot| slot.generation == id.generation && slot.node.is_some())
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.idx as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::UnknownNode(id))
    }

    // -- Topology --

    /// Insert `node` as the last child of `parent`.
    pub fn spawn(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId> {
        self.node(parent)?;
        node.parent = Some(parent);
        node.children.clear();

        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            NodeId {
                idx,
                generation: slot.generation,
            }
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId { idx, generation: 0 }
        };

        self.node_mut(parent)?.children.push(id);
        trace!("spawned {id} under {parent}");
        Ok(id)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// True when `ancestor` is `node` or one of its parents.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> Result<bool> {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.node(id)?.parent;
        }
        Ok(false)
    }

    /// Move `child` to the end of `parent`'s children, keeping its local
    /// position.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(child)?;
        if self.is_ancestor(child, parent)? {
            return Err(Error::Cycle {
                node: child,
                parent,
            });
        }
        self.unlink(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Move `child` under `parent` without changing where it appears on
    /// screen.
    pub fn reparent(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        let absolute = self.absolute_position(child)?;
        self.add_child(parent, child)?;
        self.set_absolute_position(child, absolute)
    }

    /// Remove a node from its parent; it stays alive, unattached.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        self.unlink(id)
    }

    /// Destroy a node and its whole subtree. Destroying the root only
    /// destroys its children.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            for child in self.children(id)?.to_vec() {
                self.destroy(child)?;
            }
            return Ok(());
        }

        let doomed = self.walk(id)?;
        self.unlink(id)?;
        for node in doomed {
            self.entries.remove(&node);
            self.arrays.remove(&node);
            self.matrices.remove(&node);
            self.slots[node.idx as usize].node = None;
            self.free_list.push(node.idx);
        }
        trace!("destroyed {id}");
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|&c| c != id);
        Ok(())
    }

    /// The subtree under `from` in pre-order, which is also paint order.
    pub fn walk(&self, from: NodeId) -> Result<Vec<NodeId>> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.node(id)?.children.iter().rev());
        }
        Ok(order)
    }

    // -- World space --

    /// Position of a node's center in scene coordinates.
    pub fn absolute_position(&self, id: NodeId) -> Result<Vec2> {
        let mut sum = Vec2::ZERO;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            sum += node.position;
            current = node.parent;
        }
        Ok(sum)
    }

    pub fn set_absolute_position(&mut self, id: NodeId, position: Vec2) -> Result<()> {
        let origin = match self.node(id)?.parent {
            Some(parent) => self.absolute_position(parent)?,
            None => Vec2::ZERO,
        };
        self.node_mut(id)?.position = position - origin;
        Ok(())
    }

    /// Product of the node's opacity and every ancestor's.
    pub fn effective_opacity(&self, id: NodeId) -> Result<f32> {
        let mut opacity = 1.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id)?;
            opacity *= node.opacity();
            current = node.parent;
        }
        Ok(opacity)
    }

    /// Error for a handle that is missing the expected component.
    pub(crate) fn missing(&self, id: NodeId, expected: &'static str) -> Error {
        if self.is_alive(id) {
            Error::NotAContainer { node: id, expected }
        } else {
            Error::UnknownNode(id)
        }
    }
}
