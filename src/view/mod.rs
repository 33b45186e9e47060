// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive view over one org tree.
//!
//! [`TreeView`] owns the tree, the flat record list it was built from, the [`ViewState`] and the
//! current layout. Every mutation completes synchronously, including relayout, before returning.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::config::ViewConfig;
use crate::layout::{
    layout_tree, plan_transition, LayoutParams, Point, Spacing, Transition, TreeLayout, Viewport,
};
use crate::model::{
    build_hierarchy, Branch, HierarchyNode, LicenseIndex, NodeIdx, OrgTree, Person, UserRecord,
};
use crate::query::{self, OrgSummary};

pub mod highlight;
pub mod state;
pub mod tiers;

pub use highlight::{matching_emails, SearchError, SearchMatcher, SearchMode};
pub use state::{
    DimPolicy, Display, Highlight, HighlightMode, UnknownDimPolicy, ViewState, ZoomTransform,
};
pub use tiers::{collapse_tier, expand_tier, TierChange};

#[derive(Debug, Clone)]
pub struct TreeView {
    tree: OrgTree,
    records: Vec<UserRecord>,
    state: ViewState,
    params: LayoutParams,
    layout: TreeLayout,
    /// Last rendered position of each node, the origin of its next motion.
    positions: BTreeMap<NodeIdx, Point>,
    transition: Transition,
}

impl TreeView {
    /// Builds a view with the default configuration. `None` leaves the chart uninitialized.
    ///
    /// `records` is the flat list highlights and summaries are evaluated over; when empty it is
    /// derived from the hierarchy.
    pub fn build_from_hierarchy(
        root: Option<&HierarchyNode>,
        records: Vec<UserRecord>,
    ) -> Option<Self> {
        Self::build_with(root, records, &ViewConfig::default())
    }

    /// Builds a view with only the root and its direct reports visible.
    pub fn build_with(
        root: Option<&HierarchyNode>,
        records: Vec<UserRecord>,
        config: &ViewConfig,
    ) -> Option<Self> {
        let Some(root) = root else {
            tracing::debug!("view.build: no hierarchy");
            return None;
        };
        let records = if records.is_empty() {
            root.flatten()
        } else {
            records
        };

        let mut tree = OrgTree::from_hierarchy(root);
        tiers::collapse_all(&mut tree);

        let params = config.layout_params();
        let layout = layout_tree(&tree, &params);
        let origin = layout.point(tree.root()).unwrap_or_default();
        let positions = tree.indices().map(|idx| (idx, origin)).collect();

        tracing::debug!(nodes = tree.len(), records = records.len(), "view.build");
        let mut view = Self {
            tree,
            records,
            state: ViewState::new(config.dim_policy, config.spacing),
            params,
            layout: TreeLayout::default(),
            positions,
            transition: Transition::default(),
        };
        view.apply_layout(None, layout);
        Some(view)
    }

    /// Builds from a parsed JSON payload: either a nested hierarchy object or an array of flat
    /// records with manager references. Anything else yields `None`.
    pub fn from_json(value: &Value, config: &ViewConfig) -> Option<Self> {
        Self::from_json_with_licenses(value, None, config)
    }

    /// [`Self::from_json`], overwriting license fields from `licenses` before the build.
    pub fn from_json_with_licenses(
        value: &Value,
        licenses: Option<&LicenseIndex>,
        config: &ViewConfig,
    ) -> Option<Self> {
        match value {
            Value::Object(_) => {
                let mut root = HierarchyNode::deserialize(value)
                    .map_err(|err| tracing::debug!(%err, "view.from_json: not a hierarchy"))
                    .ok()?;
                if let Some(licenses) = licenses {
                    licenses.enrich_hierarchy(&mut root);
                }
                Self::build_with(Some(&root), Vec::new(), config)
            }
            Value::Array(_) => {
                let mut records = Vec::<UserRecord>::deserialize(value)
                    .map_err(|err| tracing::debug!(%err, "view.from_json: not a record list"))
                    .ok()?;
                if let Some(licenses) = licenses {
                    licenses.enrich_records(&mut records);
                }
                let root = build_hierarchy(&records)?;
                Self::build_with(Some(&root), records, config)
            }
            _ => None,
        }
    }

    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn layout_params(&self) -> &LayoutParams {
        &self.params
    }

    /// Motion produced by the most recent relayout.
    pub fn last_transition(&self) -> &Transition {
        &self.transition
    }

    /// Cached position a node animates from on the next relayout.
    pub fn previous_position(&self, idx: NodeIdx) -> Option<Point> {
        self.positions.get(&idx).copied()
    }

    pub fn is_visible(&self, idx: NodeIdx) -> bool {
        self.layout.contains(idx)
    }

    pub fn find_by_email(&self, email: &str) -> Option<NodeIdx> {
        self.tree.find_by_email(email)
    }

    /// Flips one node between expanded and collapsed. Leaves and unknown indices are ignored.
    pub fn toggle_node(&mut self, idx: NodeIdx) -> Option<&Transition> {
        let node = self.tree.node(idx)?;
        if !node.has_children() {
            return None;
        }
        let branch = node.branch().toggled();
        self.tree.set_branch(idx, branch);
        tracing::debug!(node = %idx, ?branch, "view.toggle");
        Some(self.recompute_layout())
    }

    pub fn expand_one_tier(&mut self) -> TierChange {
        let change = expand_tier(&mut self.tree, self.state.expand_frontier);
        self.finish_tier_change("view.expand_tier", change)
    }

    pub fn collapse_one_tier(&mut self) -> TierChange {
        let change = collapse_tier(&mut self.tree, self.state.expand_frontier);
        self.finish_tier_change("view.collapse_tier", change)
    }

    pub fn expand_all(&mut self) -> TierChange {
        let change = tiers::expand_all(&mut self.tree);
        self.finish_tier_change("view.expand_all", change)
    }

    pub fn collapse_all(&mut self) -> TierChange {
        let change = tiers::collapse_all(&mut self.tree);
        self.finish_tier_change("view.collapse_all", change)
    }

    fn finish_tier_change(&mut self, event: &'static str, change: TierChange) -> TierChange {
        self.state.expand_frontier = change.frontier;
        tracing::debug!(event, frontier = change.frontier, changed = change.changed, "view.tier");
        if change.changed {
            self.recompute_layout();
        }
        change
    }

    /// Expands every ancestor of `idx` so it becomes visible. Returns whether anything changed.
    pub fn reveal(&mut self, idx: NodeIdx) -> bool {
        if self.tree.node(idx).is_none() {
            return false;
        }
        let mut changed = false;
        for ancestor in self.tree.ancestors(idx) {
            changed |= self.tree.set_branch(ancestor, Branch::Expanded);
        }
        if changed {
            tracing::debug!(node = %idx, "view.reveal");
            self.recompute_layout();
        }
        changed
    }

    /// Lays out the visible nodes again and plans the motion from the previous layout.
    pub fn recompute_layout(&mut self) -> &Transition {
        let next = layout_tree(&self.tree, &self.params);
        let previous = std::mem::take(&mut self.layout);
        self.apply_layout(Some(previous), next);
        &self.transition
    }

    fn apply_layout(&mut self, previous: Option<TreeLayout>, next: TreeLayout) {
        let fallback = next.point(self.tree.root()).unwrap_or_default();
        self.transition = plan_transition(
            &self.tree,
            previous.as_ref(),
            &next,
            &self.positions,
            fallback,
        );
        for (idx, placement) in next.placements() {
            self.positions.insert(*idx, placement.point);
        }
        self.layout = next;
    }

    pub fn set_spacing(&mut self, spacing: Spacing) -> &Transition {
        self.state.spacing = spacing;
        self.params.spacing = spacing;
        tracing::debug!(
            horizontal = spacing.horizontal,
            vertical_scale = spacing.vertical_scale,
            "view.spacing"
        );
        self.recompute_layout()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> &Transition {
        self.params.viewport = viewport;
        self.recompute_layout()
    }

    /// Highlights every record satisfying `predicate`, replacing any active highlight.
    ///
    /// Returns the number of matched emails; zero matches leaves no highlight active.
    pub fn set_highlight<F>(&mut self, mode: HighlightMode, predicate: F) -> usize
    where
        F: Fn(&UserRecord) -> bool + Sync,
    {
        let emails = matching_emails(&self.records, predicate);
        self.state.highlight = Highlight::from_matches(mode, emails);
        let matched = self.state.highlight.matched_count();
        tracing::debug!(?mode, matched, "view.highlight");
        matched
    }

    pub fn highlight_department(&mut self, department: &str) -> usize {
        let department = department.trim().to_lowercase();
        if department.is_empty() {
            self.clear_highlight();
            return 0;
        }
        self.set_highlight(HighlightMode::Department, |record| {
            record.person.department.trim().to_lowercase() == department
        })
    }

    pub fn highlight_licensed(&mut self) -> usize {
        self.set_highlight(HighlightMode::License, |record| record.person.has_license)
    }

    /// Highlights search hits. A blank query or an invalid pattern clears the highlight.
    pub fn highlight_search(&mut self, query: &str, mode: SearchMode) -> usize {
        if query.trim().is_empty() {
            self.clear_highlight();
            return 0;
        }
        match SearchMatcher::new(query, mode) {
            Ok(matcher) => self.set_highlight(HighlightMode::Search, |record| {
                matcher.is_match(&record.person)
            }),
            Err(err) => {
                tracing::warn!(%err, "view.highlight_search");
                self.clear_highlight();
                0
            }
        }
    }

    pub fn clear_highlight(&mut self) {
        if self.state.highlight.is_active() {
            tracing::debug!("view.highlight cleared");
        }
        self.state.highlight = Highlight::None;
    }

    pub fn set_dim_policy(&mut self, policy: DimPolicy) {
        self.state.dim_policy = policy;
    }

    fn is_matched(&self, idx: NodeIdx) -> bool {
        self.tree
            .node(idx)
            .is_some_and(|node| self.state.highlight.admits(&node.person().email_key()))
    }

    fn is_edge_matched(&self, parent: NodeIdx, child: NodeIdx) -> bool {
        self.is_matched(parent) || self.is_matched(child)
    }

    pub fn node_opacity(&self, idx: NodeIdx) -> f64 {
        self.state.node_opacity(self.is_matched(idx))
    }

    /// An edge counts as matched when either endpoint is.
    pub fn edge_opacity(&self, parent: NodeIdx, child: NodeIdx) -> f64 {
        self.state.edge_opacity(self.is_edge_matched(parent, child))
    }

    pub fn node_display(&self, idx: NodeIdx) -> Display {
        self.state.display(self.is_matched(idx))
    }

    pub fn edge_display(&self, parent: NodeIdx, child: NodeIdx) -> Display {
        self.state.display(self.is_edge_matched(parent, child))
    }

    pub fn count_descendants(&self, idx: NodeIdx) -> usize {
        query::count_descendants(&self.tree, idx)
    }

    pub fn count_licensed_descendants(&self, idx: NodeIdx) -> usize {
        query::count_licensed_descendants(&self.tree, idx)
    }

    pub fn summary(&self) -> OrgSummary {
        query::summarize(&self.records)
    }

    /// People currently shown, in visible pre-order.
    pub fn visible_users(&self) -> Vec<Person> {
        self.tree
            .visible_preorder()
            .into_iter()
            .filter_map(|idx| self.tree.node(idx))
            .map(|node| node.person().clone())
            .collect()
    }

    pub fn zoom_by(&mut self, factor: f64, focus: Point) -> ZoomTransform {
        self.state.zoom = self.state.zoom.scaled_about(factor, focus);
        self.state.zoom
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> ZoomTransform {
        self.state.zoom = self.state.zoom.translated(dx, dy);
        self.state.zoom
    }

    pub fn reset_zoom(&mut self) {
        self.state.zoom = ZoomTransform::IDENTITY;
    }

    /// Pans so `idx` sits in the middle of the viewport at the current scale.
    pub fn center_on(&mut self, idx: NodeIdx) -> bool {
        let Some(point) = self.layout.point(idx) else {
            return false;
        };
        let viewport = self.params.viewport;
        let k = self.state.zoom.k;
        self.state.zoom = ZoomTransform {
            k,
            x: viewport.width / 2.0 - point.x * k,
            y: viewport.height / 2.0 - point.y * k,
        };
        true
    }
}

#[cfg(test)]
mod tests;
