use thiserror::Error;

pub mod aggregate;
pub mod authors;
pub mod classify;
pub mod config;
pub mod extractor;
pub mod identifiers;
pub mod items;
pub mod publication;
pub mod section;
pub mod strategy;
pub mod talk;
pub mod text_processing;
pub mod vocabulary;

pub use aggregate::Aggregator;
pub use classify::Classification;
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder, VocabularyList};
pub use extractor::CvExtractor;
pub use items::{Item, NumberedList};
pub use publication::{MatchOutcome, PartialRecord};
pub use section::{Section, SectionFamily, SectionMachine};
pub use strategy::{
    NumberedParser, ParsedItem, RecordParser, SectionedParser, Segmentation, Strategy,
};
pub use text_processing::{Normalizer, reflow, render};
// Re-export domain types from core (canonical definitions live there)
pub use vitae_core::{Record, Report, Summary, Unparsed};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("invalid vocabulary pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("unknown strategy '{0}' (expected auto, sectioned or numbered)")]
    UnknownStrategy(String),
}

/// Extract a structured report from an ordered sequence of text lines.
///
/// Pipeline:
/// 1. Pick a strategy (headed sections vs. one flat numbered list)
/// 2. Rebuild paragraphs from wrapped lines and repair hyphenation
/// 3. Bucket paragraphs under publication/talk headings
/// 4. Split each section into items
/// 5. Parse every item into a [`Record`]
/// 6. Partition talks into invited / non-invited and collect unparsed items
pub fn extract_report<S: AsRef<str>>(lines: &[S], strategy: Strategy) -> Report {
    CvExtractor::new().extract(lines, strategy)
}
