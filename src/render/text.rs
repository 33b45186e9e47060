// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Orgview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Orgview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    let len = text_len(text);
    if len <= max_len {
        return text.to_owned();
    }
    match max_len {
        0 => String::new(),
        1 => "…".to_owned(),
        _ => {
            let mut out: String = text.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Appends `<n> <noun>`, pluralizing the noun with a trailing `s`.
pub(crate) fn push_count(out: &mut String, n: usize, noun: &str) {
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(n));
    out.push(' ');
    out.push_str(noun);
    if n != 1 {
        out.push('s');
    }
}
