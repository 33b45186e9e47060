// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Depth-bounded expand/collapse over the whole tree.
//!
//! The frontier is a single shared depth: expanding reveals one more tier everywhere, collapsing
//! folds the deepest open tier everywhere. Both return the next frontier instead of updating it
//! in place.

use crate::model::{Branch, NodeIdx, OrgTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub frontier: usize,
    pub changed: bool,
}

/// Expands every collapsed node at depth `<= frontier`.
///
/// The frontier advances by one only if some node actually changed.
pub fn expand_tier(tree: &mut OrgTree, frontier: usize) -> TierChange {
    let targets = tree
        .iter()
        .filter(|(_, node)| node.is_collapsed() && node.depth() <= frontier)
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let mut changed = false;
    for idx in targets {
        changed |= tree.set_branch(idx, Branch::Expanded);
    }

    TierChange {
        frontier: if changed { frontier + 1 } else { frontier },
        changed,
    }
}

/// Collapses every visible open node at the deepest depth that has one.
///
/// The new frontier is one past the deepest depth still open, or 0 once nothing is open.
/// Calling it with nothing open is a no-op that keeps `frontier`.
pub fn collapse_tier(tree: &mut OrgTree, frontier: usize) -> TierChange {
    let Some(deepest) = deepest_open_depth(tree) else {
        return TierChange {
            frontier,
            changed: false,
        };
    };

    let targets = open_visible(tree)
        .into_iter()
        .filter(|idx| tree.node(*idx).is_some_and(|node| node.depth() == deepest))
        .collect::<Vec<_>>();
    let mut changed = false;
    for idx in targets {
        changed |= tree.set_branch(idx, Branch::Collapsed);
    }

    TierChange {
        frontier: deepest_open_depth(tree).map_or(0, |depth| depth + 1),
        changed,
    }
}

/// Opens every node; the frontier moves past the deepest level.
pub fn expand_all(tree: &mut OrgTree) -> TierChange {
    let mut changed = false;
    for idx in tree.indices().collect::<Vec<_>>() {
        changed |= tree.set_branch(idx, Branch::Expanded);
    }
    TierChange {
        frontier: tree.height() + 1,
        changed,
    }
}

/// Leaves only the root open, so the root and its direct reports stay visible.
pub fn collapse_all(tree: &mut OrgTree) -> TierChange {
    let targets = tree
        .iter()
        .map(|(idx, node)| {
            let branch = if node.depth() == 0 {
                Branch::Expanded
            } else {
                Branch::Collapsed
            };
            (idx, branch, node.has_children())
        })
        .collect::<Vec<_>>();

    let mut changed = false;
    for (idx, branch, has_children) in targets {
        let flipped = tree.set_branch(idx, branch);
        changed |= flipped && has_children;
    }
    TierChange {
        frontier: 1,
        changed,
    }
}

fn open_visible(tree: &OrgTree) -> Vec<NodeIdx> {
    tree.visible_preorder()
        .into_iter()
        .filter(|idx| tree.node(*idx).is_some_and(|node| node.is_open()))
        .collect()
}

fn deepest_open_depth(tree: &OrgTree) -> Option<usize> {
    open_visible(tree)
        .into_iter()
        .filter_map(|idx| tree.node(idx).map(|node| node.depth()))
        .max()
}
