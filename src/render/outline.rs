// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{NodeIdx, OrgNode};
use crate::view::{Display, TreeView};

use super::text::{push_count, truncate_with_ellipsis};
use super::{
    GUIDE_BRANCH, GUIDE_LAST, GUIDE_PIPE, GUIDE_SPACE, MARKER_COLLAPSED, MARKER_EXPANDED,
    MARKER_MATCH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Append title, department and license status.
    pub show_details: bool,
    /// Append report counts for managers.
    pub show_counts: bool,
    /// Names longer than this are truncated with `…`.
    pub max_label_width: usize,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            show_details: true,
            show_counts: true,
            max_label_width: 48,
        }
    }
}

/// Renders the visible part of the tree as an indented Unicode outline.
///
/// `▾`/`▸` mark expanded/collapsed managers. Under an active highlight matched people end with
/// `◀`; transparent people keep their line but lose their label, hidden people lose their line
/// while their visible reports stay listed.
pub fn render_outline(view: &TreeView, options: &OutlineOptions) -> String {
    let tree = view.tree();
    if tree.is_empty() {
        return String::new();
    }

    let mut lines = Vec::<String>::new();
    let mut stack = vec![(tree.root(), String::new(), true, true)];
    while let Some((idx, prefix, is_last, is_root)) = stack.pop() {
        let Some(node) = tree.node(idx) else {
            continue;
        };

        if view.node_display(idx) == Display::Visible {
            let mut line = String::new();
            if !is_root {
                line.push_str(&prefix);
                line.push_str(if is_last { GUIDE_LAST } else { GUIDE_BRANCH });
            }
            push_node(&mut line, view, idx, node, options);
            lines.push(line.trim_end().to_owned());
        }

        let child_prefix = if is_root {
            String::new()
        } else {
            format!("{prefix}{}", if is_last { GUIDE_SPACE } else { GUIDE_PIPE })
        };
        let children = node.visible_children();
        for (pos, child) in children.iter().enumerate().rev() {
            stack.push((*child, child_prefix.clone(), pos + 1 == children.len(), false));
        }
    }

    lines.join("\n")
}

fn push_node(
    out: &mut String,
    view: &TreeView,
    idx: NodeIdx,
    node: &OrgNode,
    options: &OutlineOptions,
) {
    if node.is_open() {
        out.push_str(MARKER_EXPANDED);
    } else if node.is_collapsed() {
        out.push_str(MARKER_COLLAPSED);
    }

    let opacity = view.node_opacity(idx);
    if opacity == 0.0 {
        return;
    }

    let person = node.person();
    let name = if person.name.trim().is_empty() {
        person.email.trim()
    } else {
        person.name.trim()
    };
    out.push_str(&truncate_with_ellipsis(name, options.max_label_width));

    if options.show_details {
        for field in [person.title.trim(), person.department.trim()] {
            if !field.is_empty() {
                out.push_str(" · ");
                out.push_str(field);
            }
        }
        if person.has_license {
            out.push_str(" · licensed");
        }
    }

    if options.show_counts && node.has_children() {
        out.push_str(" (");
        push_count(out, view.count_descendants(idx), "report");
        out.push_str(", ");
        out.push_str(itoa::Buffer::new().format(view.count_licensed_descendants(idx)));
        out.push_str(" licensed)");
    }

    if view.state().highlight().is_active() && opacity >= 1.0 {
        out.push(' ');
        out.push_str(MARKER_MATCH);
    }
}
