// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Presentation helpers shared by renderers.

/// Shown in place of an empty title.
pub const TITLE_PLACEHOLDER: &str = "(no title)";

/// Shown in place of an empty description.
pub const DESCRIPTION_PLACEHOLDER: &str = "(no description)";

/// Title to display, falling back to the placeholder.
pub fn display_title(title: &str) -> &str {
    if title.is_empty() {
        TITLE_PLACEHOLDER
    } else {
        title
    }
}

/// Description to display, falling back to the placeholder.
pub fn display_description(description: &str) -> &str {
    if description.is_empty() {
        DESCRIPTION_PLACEHOLDER
    } else {
        description
    }
}

/// Deep link that asks the browser to highlight each query word.
///
/// Appends a text fragment (`#:~:text=a&text=b`) with every whitespace
/// separated word percent-encoded. An existing `#fragment` on the URL is
/// replaced, since text directives must be the whole fragment.
///
/// ```
/// use rangeseek::render::highlight_url;
///
/// assert_eq!(
///     highlight_url("https://example.com/doc", "rust 検索"),
///     "https://example.com/doc#:~:text=rust&text=%E6%A4%9C%E7%B4%A2"
/// );
/// ```
pub fn highlight_url(url: &str, query: &str) -> String {
    let base = url.split_once('#').map_or(url, |(base, _)| base);
    let directives: Vec<String> = query
        .split_whitespace()
        .map(|word| format!("text={}", urlencoding::encode(word)))
        .collect();

    if directives.is_empty() {
        return base.to_string();
    }
    format!("{}#:~:{}", base, directives.join("&"))
}
