// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::RegexBuilder;
use smol_str::SmolStr;

/// Lowercased label with everything but letters and digits removed (`E-Mail Address` ->
/// `emailaddress`).
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

pub(crate) fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub(crate) fn position_of(columns: &[SmolStr], name: &str) -> Option<usize> {
    columns.iter().position(|column| same_label(column, name))
}

/// Makes labels unique case-insensitively by suffixing repeats with ` (2)`, ` (3)`, ...
pub(crate) fn dedupe_labels<I, S>(labels: I) -> Vec<SmolStr>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::<SmolStr>::new();
    for label in labels {
        let label = label.as_ref().trim();
        if position_of(&out, label).is_none() {
            out.push(SmolStr::new(label));
            continue;
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{label} ({n})");
            if position_of(&out, &candidate).is_none() {
                out.push(SmolStr::new(candidate));
                break;
            }
            n += 1;
        }
    }
    out
}

/// Finds the column best matching any candidate, trying candidates in priority order.
///
/// A direct substring match on normalized labels wins; otherwise a loose match accepts labels
/// containing the candidate's characters in order (`dept` finds `Department`).
pub fn find_preferred_column<S: AsRef<str>>(
    columns: &[SmolStr],
    candidates: &[S],
) -> Option<usize> {
    let normalized = columns
        .iter()
        .map(|column| normalize_label(column))
        .collect::<Vec<_>>();
    let candidates = candidates
        .iter()
        .map(|candidate| normalize_label(candidate.as_ref()))
        .filter(|candidate| !candidate.is_empty())
        .collect::<Vec<_>>();

    for candidate in &candidates {
        if let Some(idx) = normalized.iter().position(|label| label.contains(candidate.as_str())) {
            return Some(idx);
        }
    }

    for candidate in &candidates {
        let pattern = candidate
            .chars()
            .map(|ch| regex::escape(ch.encode_utf8(&mut [0u8; 4])))
            .collect::<Vec<_>>()
            .join(".*");
        let Ok(regex) = RegexBuilder::new(&pattern).build() else {
            continue;
        };
        if let Some(idx) = normalized.iter().position(|label| regex.is_match(label)) {
            return Some(idx);
        }
    }

    None
}
