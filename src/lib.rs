// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orgview: org-chart core.
//!
//! Two independent pieces share the data model: [`table::TableStore`] edits tabular
//! directory exports, [`view::TreeView`] holds the expand/collapse, highlight and layout state
//! of an interactive reporting tree.

pub mod config;
pub mod layout;
pub mod model;
pub mod query;
pub mod render;
pub mod store;
pub mod table;
pub mod view;
