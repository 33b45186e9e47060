// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of the org chart.
//!
//! The outline is what the CLI prints; it reflects expand state, highlight and dim policy the
//! same way a graphical front end would.

pub mod outline;
mod text;

pub use outline::{render_outline, OutlineOptions};

pub const GUIDE_BRANCH: &str = "├── ";
pub const GUIDE_LAST: &str = "└── ";
pub const GUIDE_PIPE: &str = "│   ";
pub const GUIDE_SPACE: &str = "    ";

pub const MARKER_EXPANDED: &str = "▾ ";
pub const MARKER_COLLAPSED: &str = "▸ ";
pub const MARKER_MATCH: &str = "◀";
