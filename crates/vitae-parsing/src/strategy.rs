use std::fmt;
use std::str::FromStr;

use vitae_core::Record;

use crate::ParsingError;
use crate::classify::parse_generic;
use crate::config::ParsingConfig;
use crate::items::{Item, section_items, split_numbered_with_config};
use crate::publication::parse_publication;
use crate::section::{SectionFamily, split_sections_with_config};
use crate::talk::parse_talk;
use crate::text_processing::reflow_with_config;

/// How a document is cut into items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Headed publication/talk sections with bullet items.
    Sectioned,
    /// One flat `1. ... 2. ...` list, classified by keywords.
    Numbered,
    /// Sectioned when the document has at least one known heading.
    #[default]
    Auto,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sectioned => "sectioned",
            Self::Numbered => "numbered",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sectioned" => Ok(Self::Sectioned),
            "numbered" => Ok(Self::Numbered),
            "auto" => Ok(Self::Auto),
            other => Err(ParsingError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Items produced by one segmentation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub items: Vec<Item>,
    /// Numbered entries seen, when the strategy counts them.
    pub total: Option<usize>,
}

/// Outcome of parsing one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedItem {
    Publication(Record),
    Talk(Record),
    Unknown(Record),
    /// Press and media mentions, excluded from every output list.
    Noise,
}

impl ParsedItem {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Publication(r) | Self::Talk(r) | Self::Unknown(r) => Some(r),
            Self::Noise => None,
        }
    }
}

/// A document segmentation paired with the parser for its items.
pub trait RecordParser {
    /// Strategy name reported in the summary.
    fn name(&self) -> &'static str;

    fn segment(&self, lines: &[String]) -> Segmentation;

    /// Parse one item. Pure: the same item always yields the same result.
    fn parse(&self, item: &Item) -> ParsedItem;
}

/// Paragraph reconstruction, heading sections and bullet items. The section
/// an item sits in decides how it is parsed.
#[derive(Debug, Clone, Copy)]
pub struct SectionedParser<'a> {
    config: &'a ParsingConfig,
}

impl<'a> SectionedParser<'a> {
    pub fn new(config: &'a ParsingConfig) -> Self {
        Self { config }
    }
}

impl RecordParser for SectionedParser<'_> {
    fn name(&self) -> &'static str {
        Strategy::Sectioned.name()
    }

    fn segment(&self, lines: &[String]) -> Segmentation {
        let paragraphs = reflow_with_config(lines, self.config);
        let sections = split_sections_with_config(&paragraphs, self.config);

        let mut items = Vec::new();
        for section in &sections {
            if section.family == SectionFamily::Other {
                tracing::debug!(
                    label = %section.label,
                    paragraphs = section.paragraphs.len(),
                    "skipping section outside publications and talks"
                );
                continue;
            }
            items.extend(
                section_items(&section.paragraphs)
                    .into_iter()
                    .map(|text| Item::new(text, section.family)),
            );
        }

        Segmentation { items, total: None }
    }

    fn parse(&self, item: &Item) -> ParsedItem {
        match item.family {
            SectionFamily::Publications => {
                ParsedItem::Publication(parse_publication(&item.text, self.config))
            }
            SectionFamily::Talks => ParsedItem::Talk(parse_talk(&item.text, self.config)),
            SectionFamily::Other => ParsedItem::Unknown(Record::new(item.text.as_str())),
        }
    }
}

/// One flat numbered list, each entry classified by keywords.
#[derive(Debug, Clone, Copy)]
pub struct NumberedParser<'a> {
    config: &'a ParsingConfig,
}

impl<'a> NumberedParser<'a> {
    pub fn new(config: &'a ParsingConfig) -> Self {
        Self { config }
    }
}

impl RecordParser for NumberedParser<'_> {
    fn name(&self) -> &'static str {
        Strategy::Numbered.name()
    }

    fn segment(&self, lines: &[String]) -> Segmentation {
        let list = split_numbered_with_config(lines, self.config);
        Segmentation {
            items: list.items,
            total: Some(list.total),
        }
    }

    fn parse(&self, item: &Item) -> ParsedItem {
        parse_generic(item, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("Sectioned".parse::<Strategy>().unwrap(), Strategy::Sectioned);
        assert_eq!(" numbered ".parse::<Strategy>().unwrap(), Strategy::Numbered);
        assert_eq!("auto".parse::<Strategy>().unwrap(), Strategy::Auto);
        assert!(matches!(
            "fuzzy".parse::<Strategy>(),
            Err(ParsingError::UnknownStrategy(s)) if s == "fuzzy"
        ));
        assert_eq!(Strategy::default().to_string(), "auto");
    }

    #[test]
    fn test_sectioned_segment_routes_by_family() {
        let config = ParsingConfig::default();
        let parser = SectionedParser::new(&config);
        let seg = parser.segment(&lines(
            "Jane Doe\n\nPUBLICATIONS\n- J. Doe. A paper. Venue 2020.\n- J. Doe. Another. Venue 2021.\n\nTALKS\n- Keynote, \"Big Ideas,\" MIT, 2019.",
        ));
        assert_eq!(seg.total, None);
        assert_eq!(seg.items.len(), 3);
        assert_eq!(seg.items[0].family, SectionFamily::Publications);
        assert_eq!(seg.items[2].family, SectionFamily::Talks);
        assert_eq!(seg.items[2].text, "Keynote, \"Big Ideas,\" MIT, 2019.");

        assert!(matches!(parser.parse(&seg.items[0]), ParsedItem::Publication(_)));
        assert!(matches!(parser.parse(&seg.items[2]), ParsedItem::Talk(_)));
    }

    #[test]
    fn test_numbered_segment_counts_entries() {
        let config = ParsingConfig::default();
        let parser = NumberedParser::new(&config);
        let seg = parser.segment(&lines("Header\n1. First entry, Journal X, 2020.\n2. Radio interview."));
        assert_eq!(seg.total, Some(2));
        assert_eq!(seg.items.len(), 2);
        assert_eq!(parser.parse(&seg.items[1]), ParsedItem::Noise);
        assert_eq!(parser.name(), "numbered");
    }

    #[test]
    fn test_parse_is_pure() {
        let config = ParsingConfig::default();
        let parser = SectionedParser::new(&config);
        let item = Item::new("J. Doe. A paper. Venue 2020.", SectionFamily::Publications);
        assert_eq!(parser.parse(&item), parser.parse(&item));
        assert_eq!(parser.parse(&item).record().map(|r| r.year), Some(Some(2020)));
    }
}
