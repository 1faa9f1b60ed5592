use log::warn;

use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::scene::{Node, NodeId, Scene};

/// Temporary holder for the label elements of two entries that are crossing
/// each other.
///
/// Labels lent here keep their place on screen while their boxes move, and
/// must all be handed back before the holder is closed.
#[derive(Debug)]
pub(crate) struct SwapScratch {
    node: NodeId,
    /// Each lent label with the entry it came from.
    lent: Vec<(NodeId, Entry)>,
}

impl SwapScratch {
    /// Create the holder as the last child of `host`, above its entries.
    pub(crate) fn open(scene: &mut Scene, host: NodeId) -> Result<Self> {
        let node = scene.spawn(host, Node::group().name("swap"))?;
        Ok(Self {
            node,
            lent: Vec::with_capacity(2),
        })
    }

    /// Take `entry`'s label element.
    pub(crate) fn lend(&mut self, scene: &mut Scene, entry: Entry) -> Result<NodeId> {
        let label = entry.data(scene)?.sub_label;
        scene.reparent(label, self.node)?;
        self.lent.push((label, entry));
        Ok(label)
    }

    /// Give a lent label to `entry`, which need not be the one it came from.
    pub(crate) fn give_back(
        &mut self,
        scene: &mut Scene,
        label: NodeId,
        entry: Entry,
    ) -> Result<()> {
        let Some(pos) = self.lent.iter().position(|&(l, _)| l == label) else {
            return Err(violation(format!("label {label} was never lent")));
        };
        self.lent.remove(pos);
        let inner = entry.data(scene)?.inner;
        scene.reparent(label, inner)
    }

    /// Destroy the holder. Fails if anything is still parented to it.
    pub(crate) fn close(self, scene: &mut Scene) -> Result<()> {
        let held = scene.children(self.node)?.len();
        if !self.lent.is_empty() || held > 0 {
            return Err(violation(format!(
                "{} labels still on loan, {held} nodes attached",
                self.lent.len()
            )));
        }
        scene.destroy(self.node)
    }

    /// Return every lent label to the entry it came from and destroy the
    /// holder.
    pub(crate) fn abort(mut self, scene: &mut Scene) -> Result<()> {
        for (label, entry) in std::mem::take(&mut self.lent) {
            let inner = entry.data(scene)?.inner;
            scene.reparent(label, inner)?;
        }
        scene.destroy(self.node)
    }
}

fn violation(detail: String) -> Error {
    warn!("swap scratch: {detail}");
    Error::Invariant {
        container: "swap scratch",
        detail,
    }
}
