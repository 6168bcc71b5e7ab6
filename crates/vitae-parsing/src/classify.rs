//! Keyword classification for entries that carry no section context.

use once_cell::sync::Lazy;
use regex::Regex;

use vitae_core::Record;

use crate::authors::{find_first_real_period, leading_author_block, split_authors};
use crate::config::ParsingConfig;
use crate::identifiers::Identifiers;
use crate::items::Item;
use crate::strategy::ParsedItem;
use crate::talk::{extract_date, quoted_title, text_after, title_case};
use crate::text_processing::first_year;

const TITLE_FALLBACK_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Publication,
    Talk,
    Unknown,
}

/// Press coverage, interviews, blog posts and the like.
pub fn is_media_noise(text: &str, config: &ParsingConfig) -> bool {
    config.media_noise().is_match(text)
}

/// Talk when a talk keyword is present and no exclusion word is; otherwise
/// publication when a publication keyword is present; otherwise unknown.
pub fn classify(text: &str, config: &ParsingConfig) -> Classification {
    let is_talk =
        config.talk_keywords().is_match(text) && !config.talk_exclusions().is_match(text);
    if is_talk {
        Classification::Talk
    } else if config.publication_keywords().is_match(text) {
        Classification::Publication
    } else {
        Classification::Unknown
    }
}

/// The sentence following the author block.
fn sentence_after_authors(text: &str) -> Option<String> {
    let start = find_first_real_period(text)? + 1;
    let rest = text[start..].trim_start();
    let end = find_first_real_period(rest).unwrap_or(rest.len());
    let sentence = rest[..end].trim().trim_end_matches('.').trim();
    (!sentence.is_empty()).then(|| sentence.to_string())
}

fn generic_title(text: &str) -> Option<String> {
    quoted_title(text)
        .or_else(|| sentence_after_authors(text))
        .or_else(|| {
            let head: String = text.chars().take(TITLE_FALLBACK_CHARS).collect();
            let head = head.trim();
            (!head.is_empty()).then(|| head.to_string())
        })
}

/// `In <venue>` after the title, else the comma-delimited phrase right
/// before a trailing date or year.
fn generic_venue(after: &str) -> Option<String> {
    static IN_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\bIn\s+([^,\n]+?)(?:,|\s*\(|\.\s*$|$)").unwrap());
    static BEFORE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"(?i)(?:^|,)\s*([^,]+?),\s*(?:[a-z]+\.?\s+\d{1,2},\s*\d{4}|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{1,2}/\d{4}|\d{4})",
        )
        .unwrap()
    });

    if let Some(m) = IN_RE.captures(after).and_then(|c| c.get(1)) {
        let venue = m.as_str().trim();
        if !venue.is_empty() {
            return Some(venue.to_string());
        }
    }

    let rest = after.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '"' | '\u{201C}' | '\u{201D}')
    });
    BEFORE_DATE_RE
        .captures(rest)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Classify one numbered entry and pull out what light extraction can find.
///
/// Media noise yields [`ParsedItem::Noise`].
pub fn parse_generic(item: &Item, config: &ParsingConfig) -> ParsedItem {
    let text = item.text.as_str();
    if is_media_noise(text, config) {
        tracing::debug!(index = ?item.index, "dropping media item");
        return ParsedItem::Noise;
    }

    let class = classify(text, config);

    let mut record = Record::new(text);
    record.index = item.index;
    record.title = generic_title(text);
    record.venue = generic_venue(text_after(text, record.title.as_deref()));
    record.year = first_year(text);

    let ids = Identifiers::scan(text);
    record.doi = ids.doi;
    record.arxiv = ids.arxiv;
    record.invited = config.is_invited(text);

    if class == Classification::Talk {
        record.talk_type = config.talk_types().find(text).map(title_case);
        record.date = extract_date(text);
    } else if let Some(authors) = leading_author_block(text) {
        record.authors_list = split_authors(authors, config.max_authors());
        record.authors = Some(authors.to_string());
    }

    match class {
        Classification::Publication => ParsedItem::Publication(record),
        Classification::Talk => ParsedItem::Talk(record),
        Classification::Unknown => ParsedItem::Unknown(record),
    }
}
