//! Word lists that drive heading recognition and keyword classification.
//!
//! Every list here is English-only and can be replaced or extended through
//! [`ParsingConfigBuilder`](crate::ParsingConfigBuilder).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::section::SectionFamily;

pub const PUBLICATION_HEADINGS: &[&str] = &[
    "publications",
    "refereed publications",
    "selected publications",
    "peer-reviewed",
    "conference papers",
    "journal articles",
];

pub const TALK_HEADINGS: &[&str] = &[
    "presentations",
    "talks",
    "invited talks",
    "invited presentations",
    "keynotes",
    "seminars",
    "colloquia",
];

/// Words that make a short title-case line look like a heading.
pub const SECTION_KEYWORDS: &[&str] = &["publications", "talks", "presentations"];

pub const TALK_TYPES: &[&str] = &[
    "keynote",
    "invited talk",
    "invited presentation",
    "seminar",
    "colloquium",
    "tutorial",
    "webinar",
    "panel",
];

pub const PUBLICATION_KEYWORDS: &[&str] = &[
    "journal",
    "proceedings",
    "trans.",
    "transactions",
    "arxiv",
    "doi",
    "volume",
    "vol.",
    "issue",
    "pages",
    "ieee",
    "acm",
    "springer",
    "elsevier",
    "proc.",
    "conference",
    "symposium",
    "workshop",
    "letter",
    "book",
    "chapter",
];

pub const TALK_KEYWORDS: &[&str] = &[
    "keynote",
    "invited",
    "talk",
    "presentation",
    "colloquium",
    "seminar",
    "panel",
    "guest lecture",
    "lecture",
    "webinar",
    "tutorial",
    "debate",
];

/// A talk keyword does not make an item a talk when one of these is present.
pub const TALK_EXCLUSIONS: &[&str] = &["proceedings", "conference", "journal"];

pub const MEDIA_NOISE: &[&str] = &["press", "news", "podcast", "interview", "media", "blog", "op-ed"];

pub const INVITED_KEYWORDS: &[&str] = &["invited", "keynote"];

pub(crate) static DEFAULT_HEADINGS: Lazy<HeadingTable> =
    Lazy::new(|| HeadingTable::new(PUBLICATION_HEADINGS, TALK_HEADINGS).unwrap());
pub(crate) static DEFAULT_SECTION_KEYWORDS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(SECTION_KEYWORDS).unwrap());
pub(crate) static DEFAULT_TALK_TYPES: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(TALK_TYPES).unwrap());
pub(crate) static DEFAULT_PUBLICATION_KEYWORDS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(PUBLICATION_KEYWORDS).unwrap());
pub(crate) static DEFAULT_TALK_KEYWORDS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(TALK_KEYWORDS).unwrap());
pub(crate) static DEFAULT_TALK_EXCLUSIONS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(TALK_EXCLUSIONS).unwrap());
pub(crate) static DEFAULT_MEDIA_NOISE: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(MEDIA_NOISE).unwrap());
pub(crate) static DEFAULT_INVITED_KEYWORDS: Lazy<KeywordSet> =
    Lazy::new(|| KeywordSet::new(INVITED_KEYWORDS).unwrap());

/// Regex source for a phrase: internal whitespace matches any run of
/// whitespace, and a hyphen may also be a space or absent
/// ("peer-reviewed" matches "peer reviewed" and "peerreviewed").
fn phrase_pattern(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|token| {
            token
                .split('-')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"[-\s]?")
        })
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// A case-insensitive, whole-word keyword matcher.
///
/// Keywords ending in a letter or digit also match their plural
/// ("talk" matches "talks") but never a longer word ("press" does not
/// match "pressure").
#[derive(Debug, Clone)]
pub struct KeywordSet {
    words: Vec<String>,
    re: Option<Regex>,
}

impl KeywordSet {
    pub fn new<S: AsRef<str>>(words: &[S]) -> Result<Self, regex::Error> {
        let words: Vec<String> = words
            .iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self { words, re: None });
        }

        let alternatives: Vec<String> = words
            .iter()
            .map(|w| {
                let body = phrase_pattern(w);
                let lead = if w.starts_with(|c: char| c.is_alphanumeric()) {
                    r"\b"
                } else {
                    ""
                };
                if w.ends_with(|c: char| c.is_alphanumeric()) {
                    format!(r"{lead}({body})s?\b")
                } else {
                    format!(r"{lead}({body})")
                }
            })
            .collect();

        let re = Regex::new(&format!("(?i)(?:{})", alternatives.join("|")))?;
        Ok(Self {
            words,
            re: Some(re),
        })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// The leftmost keyword occurrence, as written in `text` (plural suffix
    /// excluded).
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.re.as_ref()?.captures(text)?;
        caps.iter().skip(1).flatten().next().map(|m| m.as_str())
    }
}

/// Heading vocabulary compiled into one anchored, full-line matcher.
#[derive(Debug, Clone)]
pub struct HeadingTable {
    entries: Vec<(String, SectionFamily)>,
    re: Option<Regex>,
}

impl HeadingTable {
    pub fn new<S: AsRef<str>>(publications: &[S], talks: &[S]) -> Result<Self, regex::Error> {
        let mut entries: Vec<(String, SectionFamily)> = Vec::new();
        for (list, family) in [
            (publications, SectionFamily::Publications),
            (talks, SectionFamily::Talks),
        ] {
            for heading in list {
                let heading = heading.as_ref().trim().to_lowercase();
                if !heading.is_empty() {
                    entries.push((heading, family));
                }
            }
        }

        if entries.is_empty() {
            return Ok(Self { entries, re: None });
        }

        let alternatives: Vec<String> = entries
            .iter()
            .map(|(h, _)| format!("({})", phrase_pattern(h)))
            .collect();
        let re = Regex::new(&format!(r"(?i)^\s*(?:{})\s*:?\s*$", alternatives.join("|")))?;
        Ok(Self {
            entries,
            re: Some(re),
        })
    }

    /// Match a whole line against the vocabulary.
    ///
    /// Returns the canonical vocabulary entry, so "PEER REVIEWED:" and
    /// "Peer-reviewed" resolve to the same label.
    pub fn match_heading(&self, line: &str) -> Option<(&str, SectionFamily)> {
        let caps = self.re.as_ref()?.captures(line)?;
        let idx = caps
            .iter()
            .skip(1)
            .position(|g| g.is_some())?;
        self.entries
            .get(idx)
            .map(|(label, family)| (label.as_str(), *family))
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_whole_word_with_plural() {
        let set = KeywordSet::new(&["talk", "press"]).unwrap();
        assert!(set.is_match("Two Talks at MIT"));
        assert!(set.is_match("press release"));
        assert!(!set.is_match("Pressure sensing arrays"));
        assert!(!set.is_match("talkative agents"));
    }

    #[test]
    fn test_keyword_trailing_punctuation() {
        let set = KeywordSet::new(&["proc."]).unwrap();
        assert!(set.is_match("In Proc. ACL, 2021."));
        assert!(!set.is_match("process mining"));
    }

    #[test]
    fn test_keyword_hyphen_variants() {
        let set = KeywordSet::new(&["op-ed"]).unwrap();
        assert!(set.is_match("Op-Ed in the Times"));
        assert!(set.is_match("an op ed piece"));
        assert!(set.is_match("oped"));
    }

    #[test]
    fn test_keyword_find_returns_source_text() {
        let set = KeywordSet::new(TALK_TYPES).unwrap();
        assert_eq!(
            set.find("2021 Invited  Talk, Stanford"),
            Some("Invited  Talk")
        );
        assert_eq!(set.find("Keynotes series"), Some("Keynote"));
        assert_eq!(set.find("nothing here"), None);
    }

    #[test]
    fn test_empty_keyword_set_never_matches() {
        let set = KeywordSet::new::<&str>(&[]).unwrap();
        assert!(!set.is_match("anything"));
        assert_eq!(set.find("anything"), None);
    }

    #[test]
    fn test_heading_match_canonical_label() {
        let table = &*DEFAULT_HEADINGS;
        assert_eq!(
            table.match_heading("  PEER REVIEWED: "),
            Some(("peer-reviewed", SectionFamily::Publications))
        );
        assert_eq!(
            table.match_heading("Invited Talks"),
            Some(("invited talks", SectionFamily::Talks))
        );
        assert_eq!(
            table.match_heading("Selected   Publications:"),
            Some(("selected publications", SectionFamily::Publications))
        );
        assert_eq!(table.match_heading("Publications in 2020"), None);
        assert_eq!(table.match_heading("Talks given"), None);
    }
}
