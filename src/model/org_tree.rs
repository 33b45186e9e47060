// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;

use super::hierarchy::HierarchyNode;
use super::ids::{email_key, NodeIdx};
use super::record::Person;

/// Whether a node currently shows its reports.
///
/// Only meaningful for nodes with children; leaves keep whatever state they were given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Branch {
    #[default]
    Expanded,
    Collapsed,
}

impl Branch {
    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Collapsed,
            Self::Collapsed => Self::Expanded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrgNode {
    person: Person,
    parent: Option<NodeIdx>,
    children: Vec<NodeIdx>,
    depth: usize,
    branch: Branch,
}

impl OrgNode {
    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn parent(&self) -> Option<NodeIdx> {
        self.parent
    }

    /// All reports, regardless of expand state.
    pub fn children(&self) -> &[NodeIdx] {
        &self.children
    }

    /// Reports currently shown: all of them when expanded, none when collapsed.
    pub fn visible_children(&self) -> &[NodeIdx] {
        match self.branch {
            Branch::Expanded => &self.children,
            Branch::Collapsed => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn is_collapsed(&self) -> bool {
        self.has_children() && self.branch == Branch::Collapsed
    }

    /// True when the node has reports and they are currently shown.
    pub fn is_open(&self) -> bool {
        self.has_children() && self.branch == Branch::Expanded
    }
}

/// Arena holding one org hierarchy. Index 0 is the root; indices follow pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgTree {
    nodes: Vec<OrgNode>,
}

impl OrgTree {
    pub fn from_hierarchy(root: &HierarchyNode) -> Self {
        let mut nodes = Vec::<OrgNode>::with_capacity(root.subtree_size());
        let mut stack: Vec<(&HierarchyNode, Option<NodeIdx>, usize)> = vec![(root, None, 0)];

        while let Some((source, parent, depth)) = stack.pop() {
            let idx = NodeIdx::new(nodes.len());
            nodes.push(OrgNode {
                person: source.person.clone(),
                parent,
                children: Vec::with_capacity(source.children.len()),
                depth,
                branch: Branch::Expanded,
            });
            if let Some(parent) = parent {
                nodes[parent.get()].children.push(idx);
            }
            for child in source.children.iter().rev() {
                stack.push((child, Some(idx), depth + 1));
            }
        }

        Self { nodes }
    }

    pub fn root(&self) -> NodeIdx {
        NodeIdx::new(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: NodeIdx) -> Option<&OrgNode> {
        self.nodes.get(idx.get())
    }

    pub fn indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.nodes.len()).map(NodeIdx::new)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &OrgNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeIdx::new(idx), node))
    }

    /// Deepest depth in the tree (the root has depth 0).
    pub fn height(&self) -> usize {
        self.nodes.iter().map(OrgNode::depth).max().unwrap_or(0)
    }

    pub fn set_branch(&mut self, idx: NodeIdx, branch: Branch) -> bool {
        let Some(node) = self.nodes.get_mut(idx.get()) else {
            return false;
        };
        if node.branch == branch {
            return false;
        }
        node.branch = branch;
        true
    }

    pub fn find_by_email(&self, email: &str) -> Option<NodeIdx> {
        let key = email_key(email);
        if key.is_empty() {
            return None;
        }
        self.iter()
            .find(|(_, node)| node.person.email_key() == key)
            .map(|(idx, _)| idx)
    }

    /// Ancestors of `idx`, nearest first.
    pub fn ancestors(&self, idx: NodeIdx) -> SmallVec<[NodeIdx; 8]> {
        let mut out = SmallVec::new();
        let mut current = self.node(idx).and_then(OrgNode::parent);
        while let Some(parent) = current {
            out.push(parent);
            current = self.node(parent).and_then(OrgNode::parent);
        }
        out
    }

    /// A node is visible when every ancestor is expanded.
    pub fn is_visible(&self, idx: NodeIdx) -> bool {
        self.node(idx).is_some()
            && self
                .ancestors(idx)
                .iter()
                .all(|ancestor| self.nodes[ancestor.get()].branch == Branch::Expanded)
    }

    /// Visible nodes in pre-order, starting at the root.
    pub fn visible_preorder(&self) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        if self.nodes.is_empty() {
            return out;
        }
        let mut stack = vec![self.root()];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx.get()].visible_children().iter().rev().copied());
        }
        out
    }

    /// All strict descendants of `idx` in pre-order, ignoring expand state.
    pub fn descendants(&self, idx: NodeIdx) -> Vec<NodeIdx> {
        let mut out = Vec::new();
        let Some(node) = self.node(idx) else {
            return out;
        };
        let mut stack = node.children.iter().rev().copied().collect::<Vec<_>>();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.get()].children.iter().rev().copied());
        }
        out
    }
}
