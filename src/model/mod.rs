// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! People arrive either as a nested hierarchy or as flat directory records; both share
//! [`Person`] and are joined by lowercase email.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod hierarchy;
pub mod ids;
pub mod license;
pub mod org_tree;
pub mod record;

pub use hierarchy::{build_hierarchy, HierarchyNode};
pub use ids::{email_key, Id, NodeIdx, RowId};
pub use license::{LicenseIndex, LicenseIndexFile};
pub use org_tree::{Branch, OrgNode, OrgTree};
pub use record::{Person, UserRecord};
