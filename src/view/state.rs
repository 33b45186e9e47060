// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use smol_str::SmolStr;

use crate::layout::{Point, Spacing};

pub const NODE_MATCHED_OPACITY: f64 = 1.0;
pub const NODE_DIMMED_OPACITY: f64 = 0.2;
pub const EDGE_MATCHED_OPACITY: f64 = 0.6;
pub const EDGE_DIMMED_OPACITY: f64 = 0.1;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 4.0;

/// How elements outside an active highlight are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DimPolicy {
    /// Faded but still interactive.
    #[default]
    Dim,
    /// Invisible, still occupying space and interactive.
    Transparent,
    /// Removed from display and interaction.
    Hidden,
}

impl DimPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dim => "dim",
            Self::Transparent => "transparent",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for DimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDimPolicy(pub String);

impl fmt::Display for UnknownDimPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dim policy `{}` (expected dim, transparent or hidden)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDimPolicy {}

impl FromStr for DimPolicy {
    type Err = UnknownDimPolicy;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dim" => Ok(Self::Dim),
            "transparent" => Ok(Self::Transparent),
            "hidden" | "hide" => Ok(Self::Hidden),
            _ => Err(UnknownDimPolicy(raw.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    Department,
    License,
    Search,
}

/// The emails currently emphasised. An empty match is never stored as an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Highlight {
    #[default]
    None,
    Active {
        mode: HighlightMode,
        emails: BTreeSet<SmolStr>,
    },
}

impl Highlight {
    pub fn from_matches(mode: HighlightMode, emails: BTreeSet<SmolStr>) -> Self {
        if emails.is_empty() {
            Self::None
        } else {
            Self::Active { mode, emails }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn mode(&self) -> Option<HighlightMode> {
        match self {
            Self::None => None,
            Self::Active { mode, .. } => Some(*mode),
        }
    }

    pub fn matched_count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Active { emails, .. } => emails.len(),
        }
    }

    /// `true` when no highlight is active or `email_key` is part of it.
    pub fn admits(&self, email_key: &str) -> bool {
        match self {
            Self::None => true,
            Self::Active { emails, .. } => emails.contains(email_key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    Visible,
    Hidden,
}

/// Screen transform: `screen = world * k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
    };

    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    pub fn invert(&self, screen: Point) -> Point {
        Point::new((screen.x - self.x) / self.k, (screen.y - self.y) / self.k)
    }

    /// Rescales by `factor`, keeping the world point under `focus` fixed on screen.
    ///
    /// The scale is clamped to `[MIN_ZOOM, MAX_ZOOM]`; non-finite or non-positive factors are
    /// ignored.
    pub fn scaled_about(self, factor: f64, focus: Point) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return self;
        }
        let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let anchor = self.invert(focus);
        Self {
            k,
            x: focus.x - anchor.x * k,
            y: focus.y - anchor.y * k,
        }
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        if !dx.is_finite() || !dy.is_finite() {
            return self;
        }
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

/// Everything that drives rendering besides the tree itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub(super) expand_frontier: usize,
    pub(super) highlight: Highlight,
    pub(super) dim_policy: DimPolicy,
    pub(super) spacing: Spacing,
    pub(super) zoom: ZoomTransform,
}

impl ViewState {
    pub(super) fn new(dim_policy: DimPolicy, spacing: Spacing) -> Self {
        Self {
            expand_frontier: 1,
            highlight: Highlight::None,
            dim_policy,
            spacing,
            zoom: ZoomTransform::IDENTITY,
        }
    }

    pub fn expand_frontier(&self) -> usize {
        self.expand_frontier
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn dim_policy(&self) -> DimPolicy {
        self.dim_policy
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn zoom(&self) -> ZoomTransform {
        self.zoom
    }

    pub fn node_opacity(&self, matched: bool) -> f64 {
        if matched {
            return NODE_MATCHED_OPACITY;
        }
        match self.dim_policy {
            DimPolicy::Dim => NODE_DIMMED_OPACITY,
            DimPolicy::Transparent | DimPolicy::Hidden => 0.0,
        }
    }

    pub fn edge_opacity(&self, matched: bool) -> f64 {
        if matched {
            return EDGE_MATCHED_OPACITY;
        }
        match self.dim_policy {
            DimPolicy::Dim => EDGE_DIMMED_OPACITY,
            DimPolicy::Transparent | DimPolicy::Hidden => 0.0,
        }
    }

    pub fn display(&self, matched: bool) -> Display {
        if matched || self.dim_policy != DimPolicy::Hidden {
            Display::Visible
        } else {
            Display::Hidden
        }
    }
}
