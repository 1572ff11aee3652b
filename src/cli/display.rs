// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the rangeseek CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. Detection tries
//! `RANGESEEK_THEME` first, then `COLORFGBG`, then falls back to dark.
//! Colors are dropped entirely when stdout isn't a TTY or `NO_COLOR` is set.

use std::sync::OnceLock;
use std::time::Duration;

use rangeseek::render::{display_description, display_title, highlight_url};
use rangeseek::{EmptyReason, IndexStats, ResultRecord};

// Width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("RANGESEEK_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": background 7 and up (except 8) is a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (166, 226, 46);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_GREEN: (u8, u8, u8) = (68, 140, 39);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_GREEN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length in chars, ignoring ANSI escapes
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Cut plain text to `max` chars, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", GRAY(), "─".repeat(BOX_WIDTH), RESET);
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Cosine scores sit in [0, 1] for well-formed indexes
pub fn score_value(score: f64) -> String {
    let text = format!("{:>6.3}", score);
    if !use_colors() {
        return text;
    }
    let color = if score >= 0.5 {
        BRIGHT_GREEN()
    } else if score >= 0.2 {
        GREEN()
    } else if score >= 0.05 {
        YELLOW()
    } else {
        GRAY()
    };
    format!("{}{}{}", color, text, RESET)
}

pub fn encoding_badge(encoding: &str) -> String {
    let color: fn() -> String = match encoding {
        "gzip" => GREEN,
        _ => YELLOW,
    };
    themed(color, &[BOLD], &format!("[{}]", encoding.to_uppercase()))
}

fn timing(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let color: fn() -> String = if ms < 100.0 {
        GREEN
    } else if ms < 1000.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &format!("{:.1} ms", ms))
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_results(
    query: &str,
    total_hits: usize,
    records: &[ResultRecord],
    elapsed: Duration,
) {
    section_top("SEARCH");
    row(&format!(" Query:   {}", themed(BLUE, &[BOLD], query)));
    row(&format!(
        " Hits:    {} (showing {}) in {}",
        total_hits,
        records.len(),
        timing(elapsed)
    ));

    for (rank, record) in records.iter().enumerate() {
        section_mid(&format!("#{}", rank + 1));
        row(&format!(
            " {}  {}",
            score_value(record.score),
            themed(BRIGHT_GREEN, &[BOLD], &truncate(display_title(&record.title), 68))
        ));
        row(&format!(
            "         {}",
            themed(CYAN, &[], &truncate(&highlight_url(&record.url, query), 70))
        ));
        row(&format!(
            "         {}",
            themed(GRAY, &[], &truncate(display_description(&record.description), 70))
        ));
    }
    section_bot();
}

pub fn print_no_results(query: &str, reason: &EmptyReason) {
    section_top("SEARCH");
    row(&format!(" Query:   {}", themed(BLUE, &[BOLD], query)));
    row(&format!(
        " {}",
        themed(YELLOW, &[], &format!("No results: {}", reason))
    ));
    section_bot();
}

pub fn print_inspect(stats: &IndexStats, keys: &[(String, u32, Option<u64>)]) {
    section_top("INDEX");
    row(&format!(" Source:     {}", truncate(&stats.source, 66)));
    row(&format!(
        " Sections:   {}",
        encoding_badge(stats.encoding)
    ));
    row(&format!(" Documents:  {}", stats.total_docs));
    row(&format!(" Keys:       {}", stats.keys));

    section_mid("LAYOUT");
    let names = [
        "dictionary.gz",
        "docmeta.gz",
        "dictionary",
        "docmeta",
        "postings",
        "docdata",
    ];
    for (name, &offset) in names.iter().zip(&stats.section_offsets) {
        let value = if offset == 0 {
            themed(GRAY, &[DIM], "absent")
        } else {
            format!("@ {} ({})", offset, format_size(u64::from(offset)))
        };
        row(&format!(" {:<14} {}", name, value));
    }

    if !keys.is_empty() {
        section_mid("KEYS");
        for (key, offset, docs) in keys {
            let df = docs.map_or_else(|| "open".to_string(), |d| d.to_string());
            row(&format!(
                " {:<12} offset {:>10}   df {:>8}",
                themed(BLUE, &[], key),
                offset,
                df
            ));
        }
    }
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
