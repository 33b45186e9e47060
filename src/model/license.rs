// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use super::hierarchy::HierarchyNode;
use super::ids::email_key;
use super::record::{Person, UserRecord};

/// Side-loaded license holders and engagement scores, keyed by email.
///
/// Read-only once built: the view only asks membership and lookup questions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "LicenseIndexFile")]
pub struct LicenseIndex {
    holders: BTreeSet<SmolStr>,
    engagement: BTreeMap<SmolStr, f64>,
}

/// On-disk shape of a license export.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LicenseIndexFile {
    pub holders: Vec<String>,
    pub engagement: BTreeMap<String, f64>,
}

impl From<LicenseIndexFile> for LicenseIndex {
    fn from(file: LicenseIndexFile) -> Self {
        Self::from_pairs(file.holders, file.engagement)
    }
}

impl LicenseIndex {
    pub fn from_pairs<H, E, K>(holders: H, engagement: E) -> Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        E: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let holders = holders
            .into_iter()
            .map(|email| email_key(email.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        let engagement = engagement
            .into_iter()
            .map(|(email, score)| (email_key(email.as_ref()), score))
            .filter(|(key, score)| !key.is_empty() && score.is_finite())
            .collect();
        Self {
            holders,
            engagement,
        }
    }

    pub fn has_license(&self, email: &str) -> bool {
        self.holders.contains(&email_key(email))
    }

    pub fn engagement(&self, email: &str) -> Option<f64> {
        self.engagement.get(&email_key(email)).copied()
    }

    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty() && self.engagement.is_empty()
    }

    fn apply(&self, person: &mut Person) {
        let key = person.email_key();
        person.has_license = self.holders.contains(&key);
        person.ai_engagement = self.engagement.get(&key).copied().unwrap_or(0.0);
    }

    /// Overwrites `has_license`/`ai_engagement` on every record from this index.
    pub fn enrich_records(&self, records: &mut [UserRecord]) {
        for record in records {
            self.apply(&mut record.person);
        }
    }

    /// Same as [`Self::enrich_records`], for a nested hierarchy.
    pub fn enrich_hierarchy(&self, root: &mut HierarchyNode) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            self.apply(&mut node.person);
            stack.extend(node.children.iter_mut());
        }
    }
}
