use super::node::{Node, NodeId};
use anyhow::{bail, Result};
use std::collections::{HashMap, HashSet};

/// One element of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: NodeId,
    pub name: String,
}

/// Immutable table of drive nodes
///
/// Built once at startup from a fixed set of nodes and never mutated.
/// Construction validates the tree shape; lookups after that are
/// infallible or degrade to defined fallbacks.
#[derive(Debug)]
pub struct Drive {
    /// All nodes indexed by id
    nodes: HashMap<NodeId, Node>,
    /// Root node id (the single node without a parent)
    root_id: NodeId,
}

impl Drive {
    /// Build a drive table from a list of nodes
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes do not form a single-rooted tree:
    /// duplicate ids, zero or multiple roots, children referencing missing
    /// ids, a child listed under more than one folder, a non-folder with
    /// children, a parent link that disagrees with the children list, or
    /// nodes unreachable from the root.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        let mut table: HashMap<NodeId, Node> = HashMap::new();
        for node in nodes {
            let id = node.id.clone();
            if table.insert(id.clone(), node).is_some() {
                bail!("duplicate node id: {}", id);
            }
        }

        let mut roots = table.values().filter(|node| node.parent.is_none());
        let root_id = match (roots.next(), roots.next()) {
            (Some(root), None) => root.id.clone(),
            (None, _) => bail!("no root node (every node has a parent)"),
            (Some(first), Some(second)) => {
                bail!("multiple root nodes: {} and {}", first.id, second.id)
            }
        };

        let mut owner_of: HashMap<&NodeId, &NodeId> = HashMap::new();
        for node in table.values() {
            if !node.children.is_empty() && !node.is_folder() {
                bail!("non-folder node {} has children", node.id);
            }
            for child_id in &node.children {
                let Some(child) = table.get(child_id) else {
                    bail!("node {} lists missing child {}", node.id, child_id);
                };
                if child.parent.as_ref() != Some(&node.id) {
                    bail!(
                        "child {} of {} points back to {:?}",
                        child_id,
                        node.id,
                        child.parent
                    );
                }
                if let Some(other) = owner_of.insert(child_id, &node.id) {
                    bail!("node {} is a child of both {} and {}", child_id, other, node.id);
                }
            }
        }

        // Walk down from the root; anything not reached is either in a
        // detached cycle or orphaned, both of which break the tree shape.
        let mut reached: HashSet<&NodeId> = HashSet::new();
        let mut stack = vec![&root_id];
        while let Some(id) = stack.pop() {
            if !reached.insert(id) {
                bail!("cycle detected at node {}", id);
            }
            if let Some(node) = table.get(id) {
                stack.extend(node.children.iter());
            }
        }
        if reached.len() != table.len() {
            let orphan = table
                .keys()
                .find(|id| !reached.contains(id))
                .map(|id| id.as_str().to_string())
                .unwrap_or_default();
            bail!("node {} is not reachable from the root", orphan);
        }

        Ok(Self {
            nodes: table,
            root_id,
        })
    }

    /// Get the root node id
    pub fn root_id(&self) -> &NodeId {
        &self.root_id
    }

    /// Get the root node
    pub fn root(&self) -> &Node {
        // The constructor guarantees the root is present.
        &self.nodes[&self.root_id]
    }

    /// Get a node by id
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of nodes in the table
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child ids of the given node, in declared order
    ///
    /// Unknown ids and leaves yield an empty slice.
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Child nodes of the given folder, in declared order
    pub fn entries_of(&self, id: &NodeId) -> Vec<&Node> {
        self.children_of(id)
            .iter()
            .filter_map(|child_id| self.get(child_id))
            .collect()
    }

    /// Breadcrumb trail from the root down to the given node
    ///
    /// Walks parent links upward and reverses. An unknown or dangling id
    /// degrades to the single-element root trail; this never fails and
    /// never returns an empty trail.
    pub fn breadcrumbs(&self, id: &NodeId) -> Vec<Crumb> {
        let mut trail = Vec::new();
        let mut current = Some(id.clone());

        while let Some(node_id) = current {
            let Some(node) = self.get(&node_id) else {
                let root = self.root();
                return vec![Crumb {
                    id: root.id.clone(),
                    name: root.name.clone(),
                }];
            };
            trail.push(Crumb {
                id: node.id.clone(),
                name: node.name.clone(),
            });
            current = node.parent.clone();
        }

        trail.reverse();
        trail
    }
}
