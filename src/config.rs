// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View configuration with environment overrides.
//!
//! | Variable | Default | Range |
//! |---|---|---|
//! | `ORGVIEW_SPACING_H` | 180 | 20..=2000 |
//! | `ORGVIEW_SPACING_V` | 1.0 | 0.1..=10 |
//! | `ORGVIEW_DIM_POLICY` | `dim` | `dim`, `transparent`, `hidden` |
//! | `ORGVIEW_HISTORY_CAPACITY` | 10 | 1..=100 |
//!
//! Unparseable values fall back to the default; out-of-range values are clamped.

use serde::Serialize;

use crate::layout::{LayoutParams, Spacing, Viewport};
use crate::view::DimPolicy;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewConfig {
    pub spacing: Spacing,
    pub dim_policy: DimPolicy,
    pub level_gap: f64,
    pub viewport: Viewport,
    pub history_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let params = LayoutParams::default();
        Self {
            spacing: params.spacing,
            dim_policy: DimPolicy::default(),
            level_gap: params.level_gap,
            viewport: params.viewport,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl ViewConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let spacing = Spacing {
            horizontal: parse_f64(lookup("ORGVIEW_SPACING_H"), defaults.spacing.horizontal)
                .clamp(20.0, 2000.0),
            vertical_scale: parse_f64(
                lookup("ORGVIEW_SPACING_V"),
                defaults.spacing.vertical_scale,
            )
            .clamp(0.1, 10.0),
        };
        let dim_policy = lookup("ORGVIEW_DIM_POLICY")
            .and_then(|raw| raw.parse::<DimPolicy>().ok())
            .unwrap_or(defaults.dim_policy);
        let history_capacity = lookup("ORGVIEW_HISTORY_CAPACITY")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(defaults.history_capacity)
            .clamp(1, 100);

        Self {
            spacing,
            dim_policy,
            history_capacity,
            ..defaults
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            spacing: self.spacing,
            viewport: self.viewport,
            level_gap: self.level_gap,
            ..LayoutParams::default()
        }
    }
}

fn parse_f64(raw: Option<String>, default: f64) -> f64 {
    raw.and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(default)
}
