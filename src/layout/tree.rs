// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{NodeIdx, OrgTree};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spacing {
    /// Distance between neighbouring leaf slots.
    pub horizontal: f64,
    /// Multiplier applied to the base gap between depth levels.
    pub vertical_scale: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            horizontal: 180.0,
            vertical_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutParams {
    pub spacing: Spacing,
    pub viewport: Viewport,
    /// Vertical distance between depth levels before `vertical_scale` is applied.
    pub level_gap: f64,
    pub top_margin: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            spacing: Spacing::default(),
            viewport: Viewport::default(),
            level_gap: 120.0,
            top_margin: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodePlacement {
    pub node: NodeIdx,
    pub depth: usize,
    /// Position among the visible nodes of the same depth, left to right.
    pub order: usize,
    pub point: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Positions of every visible node plus the visible parent/child links.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TreeLayout {
    levels: Vec<Vec<NodeIdx>>,
    placements: BTreeMap<NodeIdx, NodePlacement>,
    edges: Vec<(NodeIdx, NodeIdx)>,
    bounds: Bounds,
}

impl TreeLayout {
    pub fn levels(&self) -> &[Vec<NodeIdx>] {
        &self.levels
    }

    pub fn placements(&self) -> &BTreeMap<NodeIdx, NodePlacement> {
        &self.placements
    }

    pub fn placement(&self, node: NodeIdx) -> Option<&NodePlacement> {
        self.placements.get(&node)
    }

    pub fn point(&self, node: NodeIdx) -> Option<Point> {
        self.placements.get(&node).map(|placement| placement.point)
    }

    pub fn contains(&self, node: NodeIdx) -> bool {
        self.placements.contains_key(&node)
    }

    pub fn edges(&self) -> &[(NodeIdx, NodeIdx)] {
        &self.edges
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Lays out the visible part of `tree`, top-down.
///
/// Visible leaves take consecutive slots in pre-order and each parent is centred over its
/// first and last visible child, so order within a depth is always left to right. Slots are
/// scaled by `spacing.horizontal`; depth `d` sits at `top_margin + d * level_gap *
/// vertical_scale`. The root is centred horizontally in the viewport.
///
/// The result depends only on the tree shape, expand state and `params`.
pub fn layout_tree(tree: &OrgTree, params: &LayoutParams) -> TreeLayout {
    let order = tree.visible_preorder();
    if order.is_empty() {
        return TreeLayout::default();
    }

    let mut slots = BTreeMap::<NodeIdx, f64>::new();
    let mut next_leaf = 0usize;
    for &idx in &order {
        let Some(node) = tree.node(idx) else {
            continue;
        };
        if node.visible_children().is_empty() {
            slots.insert(idx, next_leaf as f64);
            next_leaf += 1;
        }
    }
    for &idx in order.iter().rev() {
        let Some(node) = tree.node(idx) else {
            continue;
        };
        let visible = node.visible_children();
        let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
            continue;
        };
        let first = slots.get(first).copied().unwrap_or_default();
        let last = slots.get(last).copied().unwrap_or_default();
        slots.insert(idx, (first + last) / 2.0);
    }

    let root_slot = slots.get(&tree.root()).copied().unwrap_or_default();
    let offset_x = params.viewport.width / 2.0 - root_slot * params.spacing.horizontal;
    let level_step = params.level_gap * params.spacing.vertical_scale;

    let mut levels = Vec::<Vec<NodeIdx>>::new();
    let mut placements = BTreeMap::<NodeIdx, NodePlacement>::new();
    let mut edges = Vec::<(NodeIdx, NodeIdx)>::new();
    let mut bounds: Option<Bounds> = None;

    for &idx in &order {
        let Some(node) = tree.node(idx) else {
            continue;
        };
        let depth = node.depth();
        if levels.len() <= depth {
            levels.resize_with(depth + 1, Vec::new);
        }
        let level = &mut levels[depth];
        let point = Point::new(
            offset_x + slots.get(&idx).copied().unwrap_or_default() * params.spacing.horizontal,
            params.top_margin + depth as f64 * level_step,
        );
        placements.insert(
            idx,
            NodePlacement {
                node: idx,
                depth,
                order: level.len(),
                point,
            },
        );
        level.push(idx);
        edges.extend(node.visible_children().iter().map(|child| (idx, *child)));

        bounds = Some(match bounds {
            None => Bounds {
                min_x: point.x,
                max_x: point.x,
                min_y: point.y,
                max_y: point.y,
            },
            Some(b) => Bounds {
                min_x: b.min_x.min(point.x),
                max_x: b.max_x.max(point.x),
                min_y: b.min_y.min(point.y),
                max_y: b.max_y.max(point.y),
            },
        });
    }

    TreeLayout {
        levels,
        placements,
        edges,
        bounds: bounds.unwrap_or_default(),
    }
}
