// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use orgview::config::ViewConfig;
use orgview::model::LicenseIndex;
use orgview::render::{render_outline, OutlineOptions};
use orgview::store::{HistoryFile, RecentHistory};
use orgview::table::{ColumnPlacement, TableStore};
use orgview::view::{DimPolicy, SearchMode, TreeView};

const PLAIN: OutlineOptions = OutlineOptions {
    show_details: false,
    show_counts: false,
    max_label_width: 48,
};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("org_chart")
}

fn read_fixture(name: &str) -> Value {
    let path = fixtures_dir().join(name);
    let raw =
        fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    serde_json::from_str(&raw).unwrap_or_else(|err| panic!("invalid json in {path:?}: {err}"))
}

fn licenses() -> LicenseIndex {
    serde_json::from_value(read_fixture("licenses.json")).expect("license index")
}

fn open(name: &str, licenses: Option<&LicenseIndex>) -> TreeView {
    TreeView::from_json_with_licenses(&read_fixture(name), licenses, &ViewConfig::default())
        .unwrap_or_else(|| panic!("expected {name} to build a chart"))
}

fn visible_names(view: &TreeView) -> Vec<String> {
    view.visible_users().into_iter().map(|person| person.name).collect()
}

#[test]
fn nested_and_flat_inputs_build_the_same_chart() {
    let mut nested = open("hierarchy.json", None);
    let mut flat = open("records.json", None);
    assert_eq!(visible_names(&nested), vec!["Ava Chen", "Ben Ortiz", "Eve Moss"]);
    assert_eq!(visible_names(&nested), visible_names(&flat));

    nested.expand_all();
    flat.expand_all();
    assert_eq!(nested.visible_users(), flat.visible_users());
    assert_eq!(nested.layout(), flat.layout());
    assert_eq!(nested.summary(), flat.summary());
}

#[test]
fn license_overlay_feeds_counts_and_summary() {
    let index = licenses();
    let view = open("hierarchy.json", Some(&index));

    let expected = [
        "▾ Ava Chen · CEO · Executive · licensed (5 reports, 2 licensed)",
        "├── ▸ Ben Ortiz · VP Engineering · Engineering (2 reports, 1 licensed)",
        "└── ▸ Eve Moss · VP Sales · Sales (1 report, 1 licensed)",
    ]
    .join("\n");
    assert_eq!(render_outline(&view, &OutlineOptions::default()), expected);

    let summary = view.summary();
    assert_eq!(summary.total, 6);
    assert_eq!(summary.licensed, 3);
    assert_eq!(summary.license_rate, 0.5);
    assert_eq!(summary.average_engagement, Some(6.0));
    let departments = summary
        .departments
        .iter()
        .map(|stats| (stats.department.as_str(), stats.headcount, stats.licensed))
        .collect::<Vec<_>>();
    assert_eq!(
        departments,
        vec![("Engineering", 3, 1), ("Executive", 1, 1), ("Sales", 2, 1)]
    );
}

#[test]
fn department_highlight_across_dim_policies() {
    let mut view = open("records.json", None);
    view.expand_all();
    assert_eq!(view.highlight_department("SALES"), 2);

    let dimmed = [
        "▾ Ava Chen",
        "├── ▾ Ben Ortiz",
        "│   ├── Cara Diaz",
        "│   └── Dev Patel",
        "└── ▾ Eve Moss ◀",
        "    └── Finn Lee ◀",
    ]
    .join("\n");
    assert_eq!(render_outline(&view, &PLAIN), dimmed);

    view.set_dim_policy(DimPolicy::Hidden);
    let hidden = ["└── ▾ Eve Moss ◀", "    └── Finn Lee ◀"].join("\n");
    assert_eq!(render_outline(&view, &PLAIN), hidden);

    view.clear_highlight();
    assert_eq!(render_outline(&view, &PLAIN), dimmed.replace(" ◀", ""));
}

#[test]
fn search_then_reveal_walks_to_a_hidden_report() {
    let mut view = open("hierarchy.json", None);
    assert_eq!(view.highlight_search("berlin", SearchMode::Substring), 1);

    let cara = view.find_by_email("cara@contoso.com").expect("cara");
    assert!(!view.is_visible(cara));
    assert!(view.reveal(cara));
    assert_eq!(
        visible_names(&view),
        vec!["Ava Chen", "Ben Ortiz", "Cara Diaz", "Dev Patel", "Eve Moss"]
    );
    assert!(view.center_on(cara));

    assert_eq!(view.highlight_search("^(ava|finn)", SearchMode::Regex), 2);
    assert_eq!(view.highlight_search("Acount Executve", SearchMode::Fuzzy), 1);
}

#[test]
fn tiers_expand_and_collapse_through_the_fixture() {
    let mut view = open("hierarchy.json", None);
    assert!(view.expand_one_tier().changed);
    assert_eq!(view.visible_users().len(), 6);
    assert!(!view.expand_one_tier().changed);

    view.collapse_one_tier();
    assert_eq!(visible_names(&view), vec!["Ava Chen", "Ben Ortiz", "Eve Moss"]);
    view.collapse_one_tier();
    assert_eq!(visible_names(&view), vec!["Ava Chen"]);
}

#[test]
fn directory_export_table_flow() {
    let mut table = TableStore::new();
    table.load_json(
        &json!(["Name", "E-mail", "Dept", "Desk"]),
        &json!([
            ["Finn Lee", "finn@contoso.com", "Sales", "Desk 10"],
            ["Ava Chen", "ava@contoso.com", "Executive", "Desk 2"],
            ["Cara Diaz", "cara@contoso.com", "Engineering", null],
            ["Eve Moss", "eve@contoso.com", "Sales", "Desk 9"]
        ]),
    );

    let desk = table.find_preferred_column(&["desk"]).expect("desk column");
    table.sort(desk, true);
    let desks = table
        .rows()
        .iter()
        .map(|row| row.cell(desk).unwrap_or_default().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(desks, vec!["", "Desk 2", "Desk 9", "Desk 10"]);

    let index = licenses();
    let email = table.find_preferred_column(&["mail"]).expect("mail column");
    let flags = table
        .rows()
        .iter()
        .map(|row| match index.has_license(row.cell(email).unwrap_or_default()) {
            true => "yes".to_owned(),
            false => "no".to_owned(),
        })
        .collect::<Vec<_>>();
    let values = BTreeMap::from([("Licensed".to_owned(), flags)]);
    table.apply_field_values(&["Licensed"], &values, ColumnPlacement::At(2));

    let snapshot = table.snapshot();
    assert_eq!(snapshot.columns, vec!["Name", "E-mail", "Licensed", "Dept", "Desk"]);
    assert_eq!(snapshot.rows[0], vec!["Cara Diaz", "cara@contoso.com", "yes", "Engineering", ""]);
    assert_eq!(snapshot.rows[3][2], "yes");
    assert_eq!(snapshot.rows[2][2], "no");
}

#[test]
fn opened_charts_are_remembered() {
    let dir = std::env::temp_dir().join(format!(
        "orgview-flow-history-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    let file = HistoryFile::new(dir.join("recent.json"));

    let mut history = file.load(2).expect("missing history loads");
    assert_eq!(history, RecentHistory::new(2));
    for name in ["hierarchy.json", "records.json", "hierarchy.json"] {
        history.push("Ava Chen", fixtures_dir().join(name).to_string_lossy());
    }
    file.save(&history).expect("save history");

    let reloaded = file.load(2).expect("load history");
    let sources = reloaded
        .entries()
        .iter()
        .filter_map(|entry| Path::new(&entry.source).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    assert_eq!(sources, vec!["hierarchy.json", "records.json"]);

    let _ = fs::remove_dir_all(&dir);
}
