use once_cell::sync::Lazy;
use regex::Regex;

use vitae_core::Record;

use crate::config::ParsingConfig;
use crate::identifiers::Identifiers;
use crate::text_processing::{collapse_whitespace, first_year};

/// Month-name date, `M/YYYY` or bare year.
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b((?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{4}|\d{1,2}/\d{4}|\d{4})\b",
    )
    .unwrap()
});

/// First date-like token, as written.
pub fn extract_date(text: &str) -> Option<String> {
    DATE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn is_date_only(text: &str) -> bool {
    DATE_RE
        .find(text)
        .is_some_and(|m| m.start() == 0 && m.end() == text.len())
}

/// Text inside the first pair of straight or curly double quotes, with
/// trailing `,`/`.` removed (`"Title,"` → `Title`).
pub fn quoted_title(text: &str) -> Option<String> {
    static QUOTED_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#""([^"]+)"|\x{201C}([^\x{201D}]+)\x{201D}"#).unwrap());
    let caps = QUOTED_RE.captures(text)?;
    let inner = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let title = inner.trim().trim_end_matches([',', '.']).trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Upper-case the first letter of every word, lower-case the rest.
pub fn title_case(text: &str) -> String {
    collapse_whitespace(text)
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The part of `text` after the first occurrence of `title`, or all of it.
pub(crate) fn text_after<'t>(text: &'t str, title: Option<&str>) -> &'t str {
    title
        .and_then(|t| text.find(t).map(|pos| &text[pos + t.len()..]))
        .unwrap_or(text)
}

fn host_venue(after: &str) -> Option<String> {
    static HOST_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)(?:\b(?:hosted\s+by|at)\b|@)\s*([^,;]+)").unwrap()
    });
    let venue = HOST_RE.captures(after)?.get(1)?.as_str();
    let venue = venue.trim().trim_end_matches('.').trim();
    (!venue.is_empty()).then(|| venue.to_string())
}

/// First comma-delimited phrase, ignoring punctuation and quotes left over
/// from the title.
fn leading_phrase(after: &str) -> Option<String> {
    let rest = after.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '"' | '\u{201C}' | '\u{201D}' | '-' | '–' | '—')
    });
    let phrase = rest.split([',', ';']).next()?.trim().trim_end_matches('.').trim();
    if phrase.is_empty() || is_date_only(phrase) {
        return None;
    }
    Some(phrase.to_string())
}

/// Parse one talk item into a record.
///
/// - type: first talk-type keyword, title-cased ("Invited Talk")
/// - date: month + year, `M/YYYY` or a bare year
/// - title: quoted text, else whatever follows a trailing colon
/// - venue: `at`/`hosted by`/`@` phrase after the title, else the first
///   comma-delimited phrase after it
pub fn parse_talk(text: &str, config: &ParsingConfig) -> Record {
    static COLON_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r":\s*([^–—-]+)$").unwrap());

    let mut record = Record::new(text);

    record.talk_type = config.talk_types().find(text).map(title_case);
    record.date = extract_date(text);

    record.title = quoted_title(text).or_else(|| {
        COLON_TAIL
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|t| !t.is_empty())
    });

    record.venue = match record.title.as_deref() {
        Some(title) => {
            let after = text_after(text, Some(title));
            host_venue(after).or_else(|| leading_phrase(after))
        }
        None => host_venue(text),
    };

    let ids = Identifiers::scan(text);
    record.doi = ids.doi;
    record.arxiv = ids.arxiv;
    record.year = first_year(text);
    record.invited = config.is_invited(text);

    record
}
