use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::section::SectionFamily;
use crate::text_processing::{
    collapse_whitespace, ends_sentence, is_bullet, join_hyphenated_with_config, normalize_quotes,
    strip_bullet,
};

/// One bibliographic entry's raw text, before field extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub text: String,
    /// Leading number of the entry in a flat numbered list.
    pub index: Option<usize>,
    /// Family of the section the item came from (`Other` for numbered lists).
    pub family: SectionFamily,
}

impl Item {
    pub fn new(text: impl Into<String>, family: SectionFamily) -> Self {
        Self {
            text: text.into(),
            index: None,
            family,
        }
    }
}

fn finish_item(buf: &str) -> Option<String> {
    let tidy = collapse_whitespace(buf);
    let tidy = tidy.trim_matches(['•', '-', '–', '—', ' ']).trim();
    if tidy.is_empty() {
        None
    } else {
        Some(tidy.to_string())
    }
}

/// Split a section's paragraphs into items.
///
/// A bullet paragraph always opens a new item (marker removed). Any other
/// paragraph continues the open item unless that item already ends a
/// sentence, in which case it opens a new one.
pub fn section_items<S: AsRef<str>>(paragraphs: &[S]) -> Vec<String> {
    let mut items = Vec::new();
    let mut buf = String::new();

    for p in paragraphs {
        let p = p.as_ref();
        if is_bullet(p) {
            items.extend(finish_item(&buf));
            buf = strip_bullet(p).trim().to_string();
        } else if buf.trim().is_empty() {
            buf = p.trim().to_string();
        } else if ends_sentence(&buf) {
            items.extend(finish_item(&buf));
            buf = p.trim().to_string();
        } else {
            buf.push(' ');
            buf.push_str(p.trim());
        }
    }
    items.extend(finish_item(&buf));

    items
}

/// Result of cutting a flat numbered list into entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberedList {
    pub items: Vec<Item>,
    /// Every numbered entry seen, including ones with no text after the number.
    pub total: usize,
}

static NUMBERED_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").unwrap());
static INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^\s*(\d+)\.\s*(.*)$").unwrap());

/// Cut a document that is one long numbered list (`"1. ..."`, `"2. ..."`)
/// into entries.
///
/// Blank lines are dropped, curly quotes straightened and line-break
/// hyphenation repaired first. Text before the first numbered line is
/// discarded.
pub fn split_numbered<S: AsRef<str>>(lines: &[S]) -> NumberedList {
    split_numbered_with_config(lines, &ParsingConfig::default())
}

/// Config-aware version of [`split_numbered`].
pub(crate) fn split_numbered_with_config<S: AsRef<str>>(
    lines: &[S],
    config: &ParsingConfig,
) -> NumberedList {
    let cleaned: Vec<String> = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .map(normalize_quotes)
        .collect();
    let joined = join_hyphenated_with_config(&cleaned, config);

    let mut chunks: Vec<String> = Vec::new();
    let mut in_list = false;
    for line in &joined {
        if NUMBERED_START.is_match(line) {
            chunks.push(line.clone());
            in_list = true;
        } else if in_list && let Some(last) = chunks.last_mut() {
            last.push(' ');
            last.push_str(line);
        }
    }

    let total = chunks.len();
    let items = chunks
        .iter()
        .filter_map(|chunk| {
            let caps = INDEX_RE.captures(chunk)?;
            let text = collapse_whitespace(caps.get(2).map_or("", |m| m.as_str()));
            if text.is_empty() {
                return None;
            }
            Some(Item {
                text,
                index: caps.get(1).and_then(|m| m.as_str().parse().ok()),
                family: SectionFamily::Other,
            })
        })
        .collect();

    NumberedList { items, total }
}
