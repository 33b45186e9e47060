// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{NodeIdx, OrgTree, UserRecord};
use crate::table::natural_cmp;

/// Label used for records without a department.
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Number of people reporting to `idx`, directly or indirectly, whether shown or not.
pub fn count_descendants(tree: &OrgTree, idx: NodeIdx) -> usize {
    tree.descendants(idx).len()
}

/// Licensed people reporting to `idx`, directly or indirectly, whether shown or not.
pub fn count_licensed_descendants(tree: &OrgTree, idx: NodeIdx) -> usize {
    tree.descendants(idx)
        .into_iter()
        .filter(|child| tree.node(*child).is_some_and(|node| node.person().has_license))
        .count()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStats {
    pub department: String,
    pub headcount: usize,
    pub licensed: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgSummary {
    pub total: usize,
    pub licensed: usize,
    /// `licensed / total`, 0 for an empty list.
    pub license_rate: f64,
    /// Mean engagement of licensed people; `None` when nobody holds a license.
    pub average_engagement: Option<f64>,
    /// Sorted by department name in natural order.
    pub departments: Vec<DepartmentStats>,
}

pub fn summarize(records: &[UserRecord]) -> OrgSummary {
    let mut departments = BTreeMap::<String, DepartmentStats>::new();
    let mut licensed = 0usize;
    let mut engagement_sum = 0.0f64;

    for record in records {
        let person = &record.person;
        let name = match person.department.trim() {
            "" => UNASSIGNED_DEPARTMENT,
            name => name,
        };
        let entry = departments
            .entry(name.to_owned())
            .or_insert_with(|| DepartmentStats {
                department: name.to_owned(),
                headcount: 0,
                licensed: 0,
            });
        entry.headcount += 1;
        if person.has_license {
            entry.licensed += 1;
            licensed += 1;
            engagement_sum += person.ai_engagement;
        }
    }

    let mut departments = departments.into_values().collect::<Vec<_>>();
    departments.sort_by(|a, b| natural_cmp(&a.department, &b.department));

    let total = records.len();
    OrgSummary {
        total,
        licensed,
        license_rate: if total == 0 {
            0.0
        } else {
            licensed as f64 / total as f64
        },
        average_engagement: (licensed > 0).then(|| engagement_sum / licensed as f64),
        departments,
    }
}
