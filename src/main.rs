// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orgview CLI entrypoint.
//!
//! Loads an org chart from JSON (nested hierarchy or flat records), applies the requested
//! expand/highlight state and prints the visible outline. `--layout-json` prints the computed
//! view state and node positions instead; `--table` prints the flat records as TSV.
//!
//! Logging goes to stderr and is filtered by `ORGVIEW_LOG` (default `warn`).

use std::error::Error;
use std::fs;
use std::str::FromStr;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use orgview::config::ViewConfig;
use orgview::model::{HierarchyNode, LicenseIndex, UserRecord};
use orgview::render::{render_outline, OutlineOptions};
use orgview::store::{HistoryFile, RecentHistory, WriteDurability};
use orgview::table::TableStore;
use orgview::view::{DimPolicy, SearchMode, TreeView};

const LOG_ENV: &str = "ORGVIEW_LOG";

const TABLE_COLUMNS: [&str; 8] = [
    "Name",
    "Email",
    "Title",
    "Department",
    "Location",
    "Licensed",
    "Engagement",
    "Manager",
];

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <org.json> [--licenses <file>] [--tiers <n> | --expand-all] [--reveal <email>]\n      [--search <query> [--regex | --fuzzy] | --department <name> | --licensed]\n      [--dim-policy dim|transparent|hidden] [--plain] [--summary | --layout-json]\n      [--history <file>] [--durable-writes]\n  {program} <org.json> --table [--sort <column> [--desc]]\n  {program} --print-schema\n\n<org.json> holds either a nested hierarchy (`name`, `email`, `children`) or an array of\nrecords with `managerEmail`. --licenses overlays `holders`/`engagement` from a license export.\n\n--history records the opened file in a recent-files list; --durable-writes syncs it to disk.\n\nLayout and dimming defaults come from ORGVIEW_* environment variables; see the crate docs."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    input: Option<String>,
    licenses: Option<String>,
    tiers: Option<usize>,
    expand_all: bool,
    reveal: Option<String>,
    search: Option<String>,
    search_mode: Option<SearchMode>,
    department: Option<String>,
    licensed: bool,
    dim_policy: Option<DimPolicy>,
    plain: bool,
    summary: bool,
    layout_json: bool,
    table: bool,
    sort: Option<String>,
    descending: bool,
    history: Option<String>,
    durable_writes: bool,
    print_schema: bool,
}

fn set_flag(flag: &mut bool) -> Result<(), ()> {
    if *flag {
        return Err(());
    }
    *flag = true;
    Ok(())
}

fn set_value<T>(slot: &mut Option<T>, value: Option<T>) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value.ok_or(())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--licenses" => set_value(&mut options.licenses, args.next())?,
            "--tiers" => {
                let raw = args.next().ok_or(())?;
                let tiers: usize = raw.parse().map_err(|_| ())?;
                set_value(&mut options.tiers, Some(tiers))?;
            }
            "--expand-all" => set_flag(&mut options.expand_all)?,
            "--reveal" => set_value(&mut options.reveal, args.next())?,
            "--search" => set_value(&mut options.search, args.next())?,
            "--regex" => set_value(&mut options.search_mode, Some(SearchMode::Regex))?,
            "--fuzzy" => set_value(&mut options.search_mode, Some(SearchMode::Fuzzy))?,
            "--department" => set_value(&mut options.department, args.next())?,
            "--licensed" => set_flag(&mut options.licensed)?,
            "--dim-policy" => {
                let raw = args.next().ok_or(())?;
                let policy = DimPolicy::from_str(&raw).map_err(|_| ())?;
                set_value(&mut options.dim_policy, Some(policy))?;
            }
            "--plain" => set_flag(&mut options.plain)?,
            "--summary" => set_flag(&mut options.summary)?,
            "--layout-json" => set_flag(&mut options.layout_json)?,
            "--table" => set_flag(&mut options.table)?,
            "--sort" => set_value(&mut options.sort, args.next())?,
            "--desc" => set_flag(&mut options.descending)?,
            "--history" => set_value(&mut options.history, args.next())?,
            "--durable-writes" => set_flag(&mut options.durable_writes)?,
            "--print-schema" => set_flag(&mut options.print_schema)?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_value(&mut options.input, Some(arg))?,
        }
    }

    if options.print_schema {
        return if options == (CliOptions { print_schema: true, ..CliOptions::default() }) {
            Ok(options)
        } else {
            Err(())
        };
    }

    if options.input.is_none() {
        return Err(());
    }

    let highlights = [
        options.search.is_some(),
        options.department.is_some(),
        options.licensed,
    ];
    if highlights.into_iter().filter(|set| *set).count() > 1 {
        return Err(());
    }

    if options.search_mode.is_some() && options.search.is_none() {
        return Err(());
    }

    if options.tiers.is_some() && options.expand_all {
        return Err(());
    }

    if options.summary && options.layout_json {
        return Err(());
    }

    if (options.sort.is_some() && !options.table) || (options.descending && options.sort.is_none())
    {
        return Err(());
    }

    if options.durable_writes && options.history.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_json(path: &str) -> Result<Value, Box<dyn Error>> {
    let raw = fs::read_to_string(path).map_err(|err| format!("cannot read {path}: {err}"))?;
    let value = serde_json::from_str(&raw).map_err(|err| format!("invalid json in {path}: {err}"))?;
    Ok(value)
}

fn print_schema() -> Result<(), Box<dyn Error>> {
    let schema = json!({
        "hierarchy": schemars::schema_for!(HierarchyNode),
        "records": schemars::schema_for!(Vec<UserRecord>),
    });
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

fn record_table(records: &[UserRecord]) -> TableStore {
    let rows = records.iter().map(|record| {
        let person = &record.person;
        vec![
            person.name.clone(),
            person.email.clone(),
            person.title.clone(),
            person.department.clone(),
            person.location.clone(),
            if person.has_license { "yes" } else { "no" }.to_owned(),
            person.ai_engagement.to_string(),
            record.manager_email.clone().unwrap_or_default(),
        ]
    });
    let mut table = TableStore::new();
    table.load(TABLE_COLUMNS, rows);
    table
}

fn print_table(view: &TreeView, options: &CliOptions) -> Result<(), Box<dyn Error>> {
    let mut table = record_table(view.records());
    if let Some(sort) = options.sort.as_deref() {
        let column = table
            .find_preferred_column(&[sort])
            .ok_or_else(|| format!("unknown column: {sort}"))?;
        table.sort(column, false);
        if options.descending {
            table.sort(column, true);
        }
    }

    let snapshot = table.snapshot();
    println!("{}", snapshot.columns.join("\t"));
    for row in &snapshot.rows {
        println!("{}", row.join("\t"));
    }
    Ok(())
}

fn apply_view_options(view: &mut TreeView, options: &CliOptions) -> Result<(), Box<dyn Error>> {
    if options.expand_all {
        view.expand_all();
    }
    for _ in 0..options.tiers.unwrap_or(0) {
        if !view.expand_one_tier().changed {
            break;
        }
    }
    if let Some(email) = options.reveal.as_deref() {
        let idx = view
            .find_by_email(email)
            .ok_or_else(|| format!("no person with email {email}"))?;
        view.reveal(idx);
    }

    if let Some(query) = options.search.as_deref() {
        let matched = view.highlight_search(query, options.search_mode.unwrap_or_default());
        tracing::info!(matched, "cli.search");
    } else if let Some(department) = options.department.as_deref() {
        let matched = view.highlight_department(department);
        tracing::info!(matched, "cli.department");
    } else if options.licensed {
        view.highlight_licensed();
    }
    Ok(())
}

fn print_summary(view: &TreeView) {
    let summary = view.summary();
    println!();
    println!(
        "{} people, {} licensed ({:.0}%)",
        summary.total,
        summary.licensed,
        summary.license_rate * 100.0
    );
    if let Some(engagement) = summary.average_engagement {
        println!("average engagement: {engagement:.1}");
    }
    for stats in &summary.departments {
        println!(
            "  {}: {} people, {} licensed",
            stats.department, stats.headcount, stats.licensed
        );
    }
}

fn remember(options: &CliOptions, input: &str, view: &TreeView) {
    let Some(path) = options.history.as_deref() else {
        return;
    };
    let durability = if options.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };
    let file = HistoryFile::new(path).with_durability(durability);
    let capacity = ViewConfig::from_env().history_capacity;
    let mut history = match file.load(capacity) {
        Ok(history) => history,
        Err(err) => {
            tracing::warn!(%err, "cli.history: starting a new history");
            RecentHistory::new(capacity)
        }
    };
    let label = view
        .tree()
        .node(view.tree().root())
        .map(|node| node.person().name.clone())
        .unwrap_or_default();
    history.push(label, input);
    if let Err(err) = file.save(&history) {
        tracing::warn!(%err, "cli.history: save failed");
    }
}

fn main() {
    init_logging();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "orgview".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.print_schema {
            return print_schema();
        }

        let input = options.input.clone().unwrap_or_default();
        let value = read_json(&input)?;
        let licenses = match options.licenses.as_deref() {
            Some(path) => Some(serde_json::from_value::<LicenseIndex>(read_json(path)?)?),
            None => None,
        };

        let mut config = ViewConfig::from_env();
        if let Some(policy) = options.dim_policy {
            config.dim_policy = policy;
        }

        let mut view = TreeView::from_json_with_licenses(&value, licenses.as_ref(), &config)
            .ok_or_else(|| format!("{input}: no org chart found"))?;
        remember(&options, &input, &view);

        if options.table {
            return print_table(&view, &options);
        }

        apply_view_options(&mut view, &options)?;

        if options.layout_json {
            let out = json!({
                "state": view.state(),
                "layout": view.layout(),
                "visibleUsers": view.visible_users(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        let outline = OutlineOptions {
            show_details: !options.plain,
            show_counts: !options.plain,
            ..OutlineOptions::default()
        };
        println!("{}", render_outline(&view, &outline));
        if options.summary {
            print_summary(&view);
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("orgview: {err}");
        std::process::exit(1);
    }
}
