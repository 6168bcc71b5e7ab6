//! Publication entries: an ordered list of structural matchers plus
//! identifier and year scans that run regardless of the structure.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use vitae_core::Record;

use crate::authors::{find_first_real_period, split_authors};
use crate::config::ParsingConfig;
use crate::identifiers::Identifiers;
use crate::text_processing::first_year;

/// Fields captured by one structural matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRecord {
    pub authors: Option<String>,
    pub title: Option<String>,
    pub venue: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(PartialRecord),
    NoMatch,
}

pub type Matcher = fn(&str) -> MatchOutcome;

/// Structural matchers in priority order; the first match wins.
pub const MATCHERS: &[(&str, Matcher)] = &[
    ("parenthesized_year", match_parenthesized_year),
    ("quoted_title", match_quoted_title),
    ("trailing_year", match_trailing_year),
];

const QUOTES: [char; 6] = ['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

fn clean_field(value: &str) -> Option<String> {
    let value = value
        .trim()
        .trim_matches(QUOTES)
        .trim_end_matches([',', ';', ':'])
        .trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn clean_venue(value: &str) -> Option<String> {
    static IN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i:in)\s+").unwrap());
    let value = value.trim();
    clean_field(&IN_RE.replace(value, ""))
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

fn partial_from(caps: &Captures<'_>) -> PartialRecord {
    PartialRecord {
        authors: group(caps, "authors").and_then(clean_field),
        title: group(caps, "title").and_then(clean_field),
        venue: group(caps, "venue").and_then(clean_venue),
        year: group(caps, "year").and_then(|y| y.parse().ok()),
    }
}

/// `Authors (Year). Title. Venue, ...`
pub fn match_parenthesized_year(text: &str) -> MatchOutcome {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"^(?P<authors>.+?)\s*\(\s*(?P<year>\d{4})[a-z]?\s*\)\.?\s+(?P<title>.+?)\.["\x{201D}]?\s+(?P<venue>.+?)(?:[.,;]|$)"#,
        )
        .unwrap()
    });
    match RE.captures(text) {
        Some(caps) => MatchOutcome::Matched(partial_from(&caps)),
        None => MatchOutcome::NoMatch,
    }
}

/// `Authors. "Title," Venue, Year.` with straight or curly quotes.
pub fn match_quoted_title(text: &str) -> MatchOutcome {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r#"^(?P<authors>.+?)[.,]\s+["\x{201C}](?P<title>.+?)[,.]?["\x{201D}][,.]?\s+(?P<venue>.+?),\s+(?P<year>\d{4})(?:[.,;]|$)"#,
        )
        .unwrap()
    });
    match RE.captures(text) {
        Some(caps) => MatchOutcome::Matched(partial_from(&caps)),
        None => MatchOutcome::NoMatch,
    }
}

/// `Authors. Title. Venue Year`
///
/// The author block ends at the first period that does not close an
/// initial, so `J. Doe. Title. Venue 2020` keeps `J. Doe` together.
pub fn match_trailing_year(text: &str) -> MatchOutcome {
    static RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<title>.+?)\.\s+(?P<venue>.+?)\s+(?P<year>\d{4})(?:[.,;]|$)").unwrap()
    });

    let Some(end) = find_first_real_period(text) else {
        return MatchOutcome::NoMatch;
    };
    let authors = &text[..end];
    let rest = text[end + 1..].trim_start();

    match RE.captures(rest) {
        Some(caps) => {
            let mut partial = partial_from(&caps);
            partial.authors = clean_field(authors);
            MatchOutcome::Matched(partial)
        }
        None => MatchOutcome::NoMatch,
    }
}

/// Parse one publication item into a record.
///
/// Never fails: an item no matcher recognizes still yields a record with its
/// raw text, plus whatever identifiers and year the scans find.
pub fn parse_publication(text: &str, config: &ParsingConfig) -> Record {
    let mut record = Record::new(text);

    let matched = MATCHERS.iter().find_map(|(name, matcher)| match matcher(text) {
        MatchOutcome::Matched(partial) => Some((*name, partial)),
        MatchOutcome::NoMatch => None,
    });

    if let Some((name, partial)) = matched {
        tracing::trace!(matcher = name, "publication matched");
        record.authors = partial.authors;
        record.title = partial.title;
        record.venue = partial.venue;
        record.year = partial.year;
    }

    let ids = Identifiers::scan(text);
    record.doi = ids.doi;
    record.arxiv = ids.arxiv;

    if record.year.is_none() {
        record.year = first_year(text);
    }
    if let Some(authors) = &record.authors {
        record.authors_list = split_authors(authors, config.max_authors());
    }
    record.invited = config.is_invited(text);

    record
}
