// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::Serialize;

use super::tree::{Point, TreeLayout};
use crate::model::{NodeIdx, OrgTree};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Motion {
    pub node: NodeIdx,
    pub from: Point,
    pub to: Point,
}

/// How the visible set moves from one layout to the next.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Transition {
    /// Newly visible nodes, starting at their nearest previously visible ancestor's old position.
    pub entering: Vec<Motion>,
    /// Nodes visible before and after.
    pub updating: Vec<Motion>,
    /// Nodes no longer visible, heading to their nearest still-visible ancestor's new position.
    /// They are dropped once the motion completes.
    pub exiting: Vec<Motion>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.entering.is_empty() && self.updating.is_empty() && self.exiting.is_empty()
    }

    pub fn motion(&self, node: NodeIdx) -> Option<&Motion> {
        self.entering
            .iter()
            .chain(self.updating.iter())
            .chain(self.exiting.iter())
            .find(|motion| motion.node == node)
    }
}

/// Plans the motion from `previous` to `next`.
///
/// `cache` holds each node's last rendered position (`x0/y0`); nodes missing from it fall back
/// to `fallback`.
pub fn plan_transition(
    tree: &OrgTree,
    previous: Option<&TreeLayout>,
    next: &TreeLayout,
    cache: &BTreeMap<NodeIdx, Point>,
    fallback: Point,
) -> Transition {
    let was_visible = |idx: NodeIdx| previous.is_some_and(|layout| layout.contains(idx));
    let cached = |idx: NodeIdx| cache.get(&idx).copied().unwrap_or(fallback);

    let mut transition = Transition::default();

    for (idx, placement) in next.placements() {
        let idx = *idx;
        if was_visible(idx) {
            transition.updating.push(Motion {
                node: idx,
                from: cached(idx),
                to: placement.point,
            });
            continue;
        }
        let origin = tree
            .ancestors(idx)
            .into_iter()
            .find(|ancestor| was_visible(*ancestor))
            .map(cached)
            .unwrap_or_else(|| cached(idx));
        transition.entering.push(Motion {
            node: idx,
            from: origin,
            to: placement.point,
        });
    }

    if let Some(previous) = previous {
        for idx in previous.placements().keys().copied() {
            if next.contains(idx) {
                continue;
            }
            let target = tree
                .ancestors(idx)
                .into_iter()
                .find_map(|ancestor| next.point(ancestor))
                .unwrap_or(fallback);
            transition.exiting.push(Motion {
                node: idx,
                from: cached(idx),
                to: target,
            });
        }
    }

    transition
}
