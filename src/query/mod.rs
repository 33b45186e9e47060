// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only aggregates over the org tree and the flat record list.

pub mod stats;

pub use stats::{
    count_descendants, count_licensed_descendants, summarize, DepartmentStats, OrgSummary,
};
