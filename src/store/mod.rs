// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! On-disk persistence. The only persisted state is the recent-history list.

pub mod history;

pub use history::{HistoryEntry, HistoryFile, RecentHistory, StoreError, WriteDurability};
