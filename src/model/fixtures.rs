// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::hierarchy::HierarchyNode;
use super::record::Person;

fn person(name: &str, department: &str) -> Person {
    Person::new(name, format!("{}@x.com", name.to_lowercase()))
        .with_title(format!("{name} title"))
        .with_department(department)
}

/// `Root -> A -> {B, C}` plus `Root -> D`.
///
/// Licensed: Root, A, C. Departments: Root is Executive, A/B are Engineering, C/D are Sales.
pub(crate) fn small_org() -> HierarchyNode {
    HierarchyNode::new(person("Root", "Executive").with_license(true).with_engagement(9.0))
        .child(
            HierarchyNode::new(person("A", "Engineering").with_license(true).with_engagement(5.0))
                .child(HierarchyNode::new(person("B", "Engineering")))
                .child(HierarchyNode::new(
                    person("C", "Sales").with_license(true).with_engagement(3.0),
                )),
        )
        .child(HierarchyNode::new(person("D", "Sales")))
}

/// `Root -> A -> {B, C}`.
pub(crate) fn reporting_chain() -> HierarchyNode {
    HierarchyNode::new(person("Root", "Executive")).child(
        HierarchyNode::new(person("A", "Engineering"))
            .child(HierarchyNode::new(person("B", "Engineering")))
            .child(HierarchyNode::new(person("C", "Engineering"))),
    )
}

/// Four levels deep: `Root -> {A -> {A1 -> A1x}, B -> B1}`.
pub(crate) fn deep_org() -> HierarchyNode {
    HierarchyNode::new(person("Root", "Executive"))
        .child(
            HierarchyNode::new(person("A", "Engineering")).child(
                HierarchyNode::new(person("A1", "Engineering"))
                    .child(HierarchyNode::new(person("A1x", "Engineering"))),
            ),
        )
        .child(
            HierarchyNode::new(person("B", "Sales"))
                .child(HierarchyNode::new(person("B1", "Sales").with_license(true))),
        )
}
