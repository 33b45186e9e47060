// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout of the visible org tree.
//!
//! Placement is a pure function of tree shape, expand state and [`LayoutParams`]; motion between
//! two layouts is planned separately so callers can animate or ignore it.

pub mod transition;
pub mod tree;

pub use transition::{plan_transition, Motion, Transition};
pub use tree::{
    layout_tree, Bounds, LayoutParams, NodePlacement, Point, Spacing, TreeLayout, Viewport,
};
