// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use smol_str::SmolStr;

use crate::model::{Person, UserRecord};

/// Record lists at least this long are matched on the rayon pool.
pub const PARALLEL_MATCH_THRESHOLD: usize = 2048;

/// Minimum rapidfuzz ratio for a fuzzy hit on a single field or word.
pub const FUZZY_MIN_RATIO: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Substring,
    Regex,
    Fuzzy,
}

#[derive(Debug)]
pub enum SearchError {
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid search pattern `{pattern}`: {source}")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
        }
    }
}

/// Compiled, case-insensitive search over a person's name, email, title, department and
/// location.
#[derive(Debug, Clone)]
pub enum SearchMatcher {
    Substring(String),
    Regex(Regex),
    Fuzzy(String),
}

impl SearchMatcher {
    pub fn new(query: &str, mode: SearchMode) -> Result<Self, SearchError> {
        let query = query.trim();
        match mode {
            SearchMode::Substring => Ok(Self::Substring(query.to_lowercase())),
            SearchMode::Fuzzy => Ok(Self::Fuzzy(query.to_lowercase())),
            SearchMode::Regex => RegexBuilder::new(query)
                .case_insensitive(true)
                .build()
                .map(Self::Regex)
                .map_err(|source| SearchError::InvalidPattern {
                    pattern: query.to_owned(),
                    source,
                }),
        }
    }

    pub fn is_match(&self, person: &Person) -> bool {
        searchable_fields(person).any(|field| match self {
            Self::Substring(needle) => field.to_lowercase().contains(needle.as_str()),
            Self::Regex(regex) => regex.is_match(field),
            Self::Fuzzy(needle) => fuzzy_match(needle, &field.to_lowercase()),
        })
    }
}

fn searchable_fields(person: &Person) -> impl Iterator<Item = &str> {
    [
        person.name.as_str(),
        person.email.as_str(),
        person.title.as_str(),
        person.department.as_str(),
        person.location.as_str(),
    ]
    .into_iter()
    .filter(|field| !field.is_empty())
}

fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    if haystack.contains(needle) {
        return true;
    }
    std::iter::once(haystack)
        .chain(haystack.split(|ch: char| ch.is_whitespace() || ch == '@' || ch == '.'))
        .filter(|part| !part.is_empty())
        .any(|part| rapidfuzz::fuzz::ratio(needle.chars(), part.chars()) >= FUZZY_MIN_RATIO)
}

/// Email keys of every record satisfying `predicate`. Records without an email never match.
pub fn matching_emails<F>(records: &[UserRecord], predicate: F) -> BTreeSet<SmolStr>
where
    F: Fn(&UserRecord) -> bool + Sync,
{
    let key_if_match = |record: &UserRecord| {
        let key = record.email_key();
        (!key.is_empty() && predicate(record)).then_some(key)
    };
    if records.len() >= PARALLEL_MATCH_THRESHOLD {
        records.par_iter().filter_map(key_if_match).collect()
    } else {
        records.iter().filter_map(key_if_match).collect()
    }
}
