// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};
use serde_json::{json, Value};

use super::{DimPolicy, Display, HighlightMode, SearchMode, TreeView};
use crate::config::ViewConfig;
use crate::layout::{Point, Spacing};
use crate::model::fixtures::{deep_org, reporting_chain, small_org};
use crate::model::{Branch, NodeIdx};

const ROOT: NodeIdx = NodeIdx::new(0);
const A: NodeIdx = NodeIdx::new(1);
const B: NodeIdx = NodeIdx::new(2);
const C: NodeIdx = NodeIdx::new(3);
const D: NodeIdx = NodeIdx::new(4);

fn visible_names(view: &TreeView) -> Vec<String> {
    view.visible_users().into_iter().map(|person| person.name).collect()
}

fn branches(view: &TreeView) -> Vec<Branch> {
    view.tree().iter().map(|(_, node)| node.branch()).collect()
}

fn opacities(view: &TreeView) -> Vec<f64> {
    view.tree().indices().map(|idx| view.node_opacity(idx)).collect()
}

#[fixture]
fn org() -> TreeView {
    TreeView::build_from_hierarchy(Some(&small_org()), Vec::new()).expect("view")
}

#[fixture]
fn chain() -> TreeView {
    TreeView::build_from_hierarchy(Some(&reporting_chain()), Vec::new()).expect("view")
}

#[test]
fn missing_hierarchy_leaves_the_chart_uninitialized() {
    assert!(TreeView::build_from_hierarchy(None, Vec::new()).is_none());
    assert!(TreeView::from_json(&json!("nope"), &ViewConfig::default()).is_none());
    assert!(TreeView::from_json(&json!({"children": 3}), &ViewConfig::default()).is_none());
    assert!(TreeView::from_json(&json!([]), &ViewConfig::default()).is_none());
}

#[rstest]
fn default_build_shows_root_and_direct_reports(mut chain: TreeView) {
    assert_eq!(visible_names(&chain), vec!["Root", "A"]);
    assert_eq!(chain.state().expand_frontier(), 1);

    let change = chain.expand_one_tier();
    assert!(change.changed);
    assert_eq!(visible_names(&chain), vec!["Root", "A", "B", "C"]);
    assert_eq!(chain.state().expand_frontier(), 2);
}

#[rstest]
fn position_caches_start_at_the_root(org: TreeView) {
    let root = org.layout().point(ROOT).expect("root placed");
    assert_eq!(org.previous_position(B), Some(root));
    assert_eq!(org.previous_position(C), Some(root));
    assert!(org
        .last_transition()
        .entering
        .iter()
        .all(|motion| motion.from == root));
    assert_eq!(org.previous_position(D), org.layout().point(D));
}

#[rstest]
fn toggling_reveals_from_the_toggled_node(mut org: TreeView) {
    let anchor = org.layout().point(A).expect("a placed");
    let transition = org.toggle_node(A).expect("a has reports").clone();

    assert_eq!(transition.entering.len(), 2);
    assert!(transition.entering.iter().all(|motion| motion.from == anchor));
    assert_eq!(visible_names(&org), vec!["Root", "A", "B", "C", "D"]);

    let transition = org.toggle_node(A).expect("a has reports").clone();
    let new_anchor = org.layout().point(A).expect("a placed");
    assert_eq!(transition.exiting.len(), 2);
    assert!(transition.exiting.iter().all(|motion| motion.to == new_anchor));
    assert_eq!(visible_names(&org), vec!["Root", "A", "D"]);

    assert!(org.toggle_node(D).is_none());
    assert!(org.toggle_node(NodeIdx::new(42)).is_none());
}

#[rstest]
fn counts_do_not_depend_on_expand_state(mut org: TreeView) {
    let before = [
        org.count_descendants(ROOT),
        org.count_licensed_descendants(ROOT),
        org.count_descendants(A),
        org.count_licensed_descendants(A),
    ];
    assert_eq!(before, [4, 2, 2, 1]);

    for idx in [A, ROOT, A, ROOT] {
        org.toggle_node(idx);
        let after = [
            org.count_descendants(ROOT),
            org.count_licensed_descendants(ROOT),
            org.count_descendants(A),
            org.count_licensed_descendants(A),
        ];
        assert_eq!(after, before);
    }
}

#[rstest]
fn empty_matches_look_like_no_highlight(mut org: TreeView) {
    let plain = opacities(&org);
    let matched = org.set_highlight(HighlightMode::Search, |_| false);

    assert_eq!(matched, 0);
    assert!(!org.state().highlight().is_active());
    assert_eq!(opacities(&org), plain);
    assert!(plain.iter().all(|opacity| *opacity == 1.0));
}

#[rstest]
fn highlight_drives_opacity_per_dim_policy(mut org: TreeView) {
    assert_eq!(org.highlight_department(" sales "), 2);
    assert_eq!(org.state().highlight().mode(), Some(HighlightMode::Department));

    assert_eq!(org.node_opacity(D), 1.0);
    assert_eq!(org.node_opacity(ROOT), 0.2);
    assert_eq!(org.edge_opacity(ROOT, D), 0.6);
    assert_eq!(org.edge_opacity(ROOT, A), 0.1);
    assert_eq!(org.node_display(ROOT), Display::Visible);

    org.set_dim_policy(DimPolicy::Transparent);
    assert_eq!(org.node_opacity(ROOT), 0.0);
    assert_eq!(org.edge_opacity(ROOT, A), 0.0);
    assert_eq!(org.node_display(ROOT), Display::Visible);

    org.set_dim_policy(DimPolicy::Hidden);
    assert_eq!(org.node_display(ROOT), Display::Hidden);
    assert_eq!(org.node_display(D), Display::Visible);
    assert_eq!(org.edge_display(ROOT, A), Display::Hidden);
    assert_eq!(org.edge_display(ROOT, D), Display::Visible);
}

#[rstest]
fn hidden_policy_keeps_layout_positions(mut org: TreeView) {
    let layout = org.layout().clone();
    org.highlight_licensed();
    org.set_dim_policy(DimPolicy::Hidden);
    assert_eq!(org.layout(), &layout);
}

#[rstest]
fn highlights_cover_collapsed_people_and_replace_each_other(mut org: TreeView) {
    assert!(!org.tree().is_visible(C));
    assert_eq!(org.highlight_licensed(), 3);
    assert_eq!(org.node_opacity(C), 1.0);

    assert_eq!(org.highlight_search("b title", SearchMode::Substring), 1);
    assert_eq!(org.state().highlight().mode(), Some(HighlightMode::Search));
    assert_eq!(org.node_opacity(C), 0.2);
    assert_eq!(org.node_opacity(B), 1.0);

    org.clear_highlight();
    assert!(!org.state().highlight().is_active());
}

#[rstest]
#[case("", SearchMode::Substring)]
#[case("[unterminated", SearchMode::Regex)]
#[case("qqqqqq", SearchMode::Fuzzy)]
fn unusable_searches_clear_the_highlight(
    mut org: TreeView,
    #[case] query: &str,
    #[case] mode: SearchMode,
) {
    org.highlight_licensed();
    assert_eq!(org.highlight_search(query, mode), 0);
    assert!(!org.state().highlight().is_active());
}

#[rstest]
fn collapse_after_expand_restores_branches(mut org: TreeView) {
    let before = branches(&org);
    let frontier = org.state().expand_frontier();
    assert!(org.expand_one_tier().changed);
    org.collapse_one_tier();
    assert_eq!(branches(&org), before);
    assert_eq!(org.state().expand_frontier(), frontier);
}

#[test]
fn repeated_collapse_bottoms_out() {
    let mut view = TreeView::build_from_hierarchy(Some(&deep_org()), Vec::new()).expect("view");
    view.expand_all();
    assert_eq!(view.state().expand_frontier(), 4);
    assert_eq!(view.visible_users().len(), 6);

    for _ in 0..3 {
        view.collapse_one_tier();
    }
    assert_eq!(visible_names(&view), vec!["Root"]);
    assert_eq!(view.state().expand_frontier(), 0);

    let change = view.collapse_one_tier();
    assert!(!change.changed);
    assert_eq!(view.state().expand_frontier(), 0);

    view.collapse_all();
    assert_eq!(visible_names(&view), vec!["Root", "A", "B"]);
    assert_eq!(view.state().expand_frontier(), 1);
}

#[test]
fn reveal_opens_the_path_to_a_search_hit() {
    let mut view = TreeView::build_from_hierarchy(Some(&deep_org()), Vec::new()).expect("view");
    let hit = view.find_by_email("A1X@x.com").expect("a1x");
    assert!(!view.is_visible(hit));

    assert!(view.reveal(hit));
    assert!(view.is_visible(hit));
    assert!(!view.reveal(hit));
    assert!(!view.is_visible(view.find_by_email("b1@x.com").expect("b1")));
}

#[rstest]
fn spacing_changes_relayout(mut org: TreeView) {
    org.toggle_node(A);
    let narrow = org.layout().bounds();
    let transition = org
        .set_spacing(Spacing {
            horizontal: 360.0,
            vertical_scale: 2.0,
        })
        .clone();

    assert_eq!(transition.updating.len(), 5);
    assert!(transition.entering.is_empty());
    let wide = org.layout().bounds();
    assert_eq!(wide.width(), narrow.width() * 2.0);
    assert_eq!(wide.height(), narrow.height() * 2.0);
    assert_eq!(org.state().spacing().horizontal, 360.0);
}

#[rstest]
fn zoom_pans_and_centers(mut org: TreeView) {
    let zoom = org.zoom_by(2.0, Point::new(600.0, 400.0));
    assert_eq!(zoom.k, 2.0);
    let zoom = org.pan_by(10.0, -5.0);
    assert_eq!((zoom.x, zoom.y), (-590.0, -405.0));

    assert!(org.center_on(D));
    let d = org.layout().point(D).expect("d");
    let on_screen = org.state().zoom().apply(d);
    assert_eq!(on_screen, Point::new(600.0, 400.0));
    assert!(!org.center_on(B));

    org.reset_zoom();
    assert_eq!(org.state().zoom().k, 1.0);
}

#[test]
fn flat_records_build_the_same_chart() {
    let value = json!([
        {"displayName": "Ann", "mail": "ann@x.com", "department": "Eng", "hasLicense": true},
        {"name": "Bob", "email": "bob@x.com", "managerMail": "ANN@x.com", "aiEngagement": null},
        {"name": "Cid", "email": "cid@x.com", "managerEmail": "bob@x.com"}
    ]);
    let mut view = TreeView::from_json(&value, &ViewConfig::default()).expect("view");
    assert_eq!(visible_names(&view), vec!["Ann", "Bob"]);
    assert_eq!(view.count_descendants(view.tree().root()), 2);

    view.expand_all();
    assert_eq!(visible_names(&view), vec!["Ann", "Bob", "Cid"]);

    let summary = view.summary();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.licensed, 1);
}

#[test]
fn nested_json_uses_config() {
    let value = json!({
        "name": "Root",
        "email": "root@x.com",
        "children": [{"name": "A", "email": "a@x.com", "children": [{"name": "B"}]}]
    });
    let config = ViewConfig {
        dim_policy: DimPolicy::Hidden,
        ..ViewConfig::default()
    };
    let view = TreeView::from_json(&value, &config).expect("view");
    assert_eq!(view.state().dim_policy(), DimPolicy::Hidden);
    assert_eq!(view.records().len(), 3);
    assert_eq!(view.tree().len(), 3);
}

#[test]
fn deep_flat_chains_build_and_reveal() {
    const DEPTH: usize = 10_000;
    let records = (0..DEPTH)
        .map(|idx| match idx {
            0 => json!({"name": "P0", "email": "p0@x.com"}),
            _ => json!({
                "name": format!("P{idx}"),
                "email": format!("p{idx}@x.com"),
                "managerEmail": format!("p{}@x.com", idx - 1)
            }),
        })
        .collect::<Vec<_>>();

    let mut view =
        TreeView::from_json(&Value::Array(records), &ViewConfig::default()).expect("view");
    assert_eq!(view.tree().len(), DEPTH);
    assert_eq!(view.count_descendants(view.tree().root()), DEPTH - 1);

    let deepest = view
        .find_by_email(&format!("p{}@x.com", DEPTH - 1))
        .expect("deepest report");
    assert!(view.reveal(deepest));
    assert!(view.is_visible(deepest));
    assert_eq!(view.visible_users().len(), DEPTH);
}
