// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::marker::PhantomData;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

/// A stable numeric identifier, tagged by what it identifies.
///
/// Identity never depends on display position: a tree node keeps its id across
/// expand/collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub const fn new(value: usize) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn get(self) -> usize {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value as u64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTag {}
/// Index of a node inside an [`OrgTree`](super::OrgTree) arena.
pub type NodeIdx = Id<NodeTag>;

/// Identity of a table row, assigned monotonically by the owning store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Join key for people across the tree, the flat record list and the license index.
pub fn email_key(email: &str) -> SmolStr {
    let trimmed = email.trim();
    if trimmed.chars().any(char::is_uppercase) {
        SmolStr::new(trimmed.to_lowercase())
    } else {
        SmolStr::new(trimmed)
    }
}
