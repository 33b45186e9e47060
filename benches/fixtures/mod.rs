// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use orgview::model::{Person, UserRecord};

const DEPARTMENTS: [&str; 5] = ["Engineering", "Sales", "Finance", "Support", "Marketing"];
const LOCATIONS: [&str; 4] = ["Seattle", "Berlin", "Tokyo", "Remote"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub const ALL: [Case; 3] = [Case::Small, Case::Medium, Case::Large];

    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    pub fn people(self) -> usize {
        match self {
            Case::Small => 50,
            Case::Medium => 1_000,
            Case::Large => 10_000,
        }
    }
}

/// Flat records for a balanced org with fan-out `6`; person `i` reports to `(i - 1) / 6`.
pub fn org_records(case: Case) -> Vec<UserRecord> {
    const FANOUT: usize = 6;
    (0..case.people())
        .map(|idx| {
            let person = Person::new(format!("Person {idx:05}"), format!("p{idx:05}@bench.org"))
                .with_title(format!("Role {}", idx % 17))
                .with_department(DEPARTMENTS[idx % DEPARTMENTS.len()])
                .with_location(LOCATIONS[idx % LOCATIONS.len()])
                .with_license(idx % 3 == 0)
                .with_engagement((idx % 10) as f64);
            let record = UserRecord::new(person);
            if idx == 0 {
                record
            } else {
                record.reporting_to(format!("p{:05}@bench.org", (idx - 1) / FANOUT))
            }
        })
        .collect()
}

pub const TABLE_COLUMNS: [&str; 5] = ["Name", "Email", "Department", "Desk", "Notes"];

/// Directory export rows with mixed-case text and embedded numbers.
pub fn table_rows(case: Case) -> Vec<Vec<String>> {
    (0..case.people())
        .map(|idx| {
            let mixed = idx.wrapping_mul(7919) % case.people();
            vec![
                format!("{} {mixed}", if idx % 2 == 0 { "person" } else { "Person" }),
                format!("p{mixed}@bench.org"),
                DEPARTMENTS[mixed % DEPARTMENTS.len()].to_owned(),
                format!("Desk {}", mixed % 250),
                String::new(),
            ]
        })
        .collect()
}

pub fn checksum_lines(text: &str) -> u64 {
    let mut acc = 0u64;
    for line in text.lines() {
        acc = acc.wrapping_mul(131).wrapping_add(line.len() as u64);
    }
    acc
}
