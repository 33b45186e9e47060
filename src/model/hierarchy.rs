// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::record::{Person, UserRecord};

/// Nested org structure as supplied by a directory import.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct HierarchyNode {
    #[serde(flatten)]
    pub person: Person,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            children: Vec::new(),
        }
    }

    pub fn child(mut self, node: HierarchyNode) -> Self {
        self.children.push(node);
        self
    }

    /// Total number of people in this subtree, including `self`.
    pub fn subtree_size(&self) -> usize {
        let mut count = 0usize;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Flattens the hierarchy into the parallel record list, in pre-order.
    ///
    /// Every record except the root gets its parent's email as `manager_email`.
    pub fn flatten(&self) -> Vec<UserRecord> {
        let mut out = Vec::with_capacity(self.subtree_size());
        let mut stack: Vec<(&HierarchyNode, Option<&str>)> = vec![(self, None)];
        while let Some((node, manager)) = stack.pop() {
            out.push(UserRecord {
                person: node.person.clone(),
                manager_email: manager.map(str::to_owned),
            });
            for child in node.children.iter().rev() {
                stack.push((child, Some(node.person.email.as_str())));
            }
        }
        out
    }
}

impl Drop for HierarchyNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Nests flat records by their manager reference.
///
/// The root is the first record without a resolvable manager. Further unmanaged records, and
/// records only reachable through a reporting cycle, are attached directly under the root so
/// that every record appears exactly once.
pub fn build_hierarchy(records: &[UserRecord]) -> Option<HierarchyNode> {
    if records.is_empty() {
        return None;
    }

    let mut by_email = HashMap::<SmolStr, usize>::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let key = record.email_key();
        if key.is_empty() {
            continue;
        }
        by_email.entry(key).or_insert(idx);
    }

    let mut reports = vec![Vec::<usize>::new(); records.len()];
    let mut unmanaged = Vec::<usize>::new();
    for (idx, record) in records.iter().enumerate() {
        match record
            .manager_key()
            .and_then(|key| by_email.get(&key).copied())
        {
            Some(manager) if manager != idx => reports[manager].push(idx),
            _ => unmanaged.push(idx),
        }
    }

    let root_idx = unmanaged.first().copied().unwrap_or(0);
    let mut visited = vec![false; records.len()];
    let mut root = assemble(root_idx, records, &reports, &mut visited);

    let mut detached = 0usize;
    for idx in unmanaged.into_iter().chain(0..records.len()) {
        if visited[idx] {
            continue;
        }
        detached += 1;
        root.children.push(assemble(idx, records, &reports, &mut visited));
    }
    if detached > 0 {
        tracing::warn!(
            detached,
            root = %records[root_idx].person.email,
            "attached records without a reachable manager under the root"
        );
    }

    Some(root)
}

/// Builds the subtree under `root` from the report lists without recursing.
fn assemble(
    root: usize,
    records: &[UserRecord],
    reports: &[Vec<usize>],
    visited: &mut [bool],
) -> HierarchyNode {
    // Pre-order pass: (record index, position of the parent within `order`).
    visited[root] = true;
    let mut order = vec![(root, 0usize)];
    let mut stack = reports[root].iter().rev().map(|&report| (report, 0usize)).collect::<Vec<_>>();
    while let Some((idx, parent)) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        let at = order.len();
        order.push((idx, parent));
        stack.extend(reports[idx].iter().rev().map(|&report| (report, at)));
    }

    // Children always follow their parent in `order`, so a reverse pass finishes every subtree
    // before it is attached.
    let mut children = (0..order.len()).map(|_| Vec::new()).collect::<Vec<_>>();
    for at in (1..order.len()).rev() {
        let (idx, parent) = order[at];
        let node = finish(records, idx, &mut children[at]);
        children[parent].push(node);
    }
    finish(records, root, &mut children[0])
}

fn finish(records: &[UserRecord], idx: usize, reports: &mut Vec<HierarchyNode>) -> HierarchyNode {
    let mut node = HierarchyNode::new(records[idx].person.clone());
    node.children = std::mem::take(reports);
    node.children.reverse();
    node
}
