use vitae_core::Report;

use crate::aggregate::Aggregator;
use crate::config::ParsingConfig;
use crate::section::{self, Section};
use crate::strategy::{NumberedParser, RecordParser, SectionedParser, Segmentation, Strategy};
use crate::text_processing;

/// A configurable CV extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each pipeline step as a method.
/// The default constructor uses built-in vocabularies; use
/// [`CvExtractor::with_config`] to supply custom word lists and limits.
#[derive(Debug, Clone)]
pub struct CvExtractor {
    config: ParsingConfig,
}

impl Default for CvExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn owned_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines.iter().map(|l| l.as_ref().to_string()).collect()
}

impl CvExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Rebuild logical paragraphs from wrapped lines (step 1).
    pub fn reflow<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        text_processing::reflow_with_config(lines, &self.config)
    }

    /// Bucket paragraphs under their headings (step 2).
    pub fn sections<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Section> {
        section::split_sections_with_config(&self.reflow(lines), &self.config)
    }

    /// Replace [`Strategy::Auto`] with the concrete strategy for this
    /// document: sectioned when any paragraph is a known heading.
    pub fn resolve_strategy<S: AsRef<str>>(&self, lines: &[S], strategy: Strategy) -> Strategy {
        match strategy {
            Strategy::Auto => {
                let resolved = if section::has_heading(&self.reflow(lines), &self.config) {
                    Strategy::Sectioned
                } else {
                    Strategy::Numbered
                };
                tracing::debug!(strategy = %resolved, "auto-selected strategy");
                resolved
            }
            concrete => concrete,
        }
    }

    fn parser(&self, strategy: Strategy) -> Box<dyn RecordParser + '_> {
        match strategy {
            Strategy::Numbered => Box::new(NumberedParser::new(&self.config)),
            Strategy::Sectioned | Strategy::Auto => Box::new(SectionedParser::new(&self.config)),
        }
    }

    /// Cut the document into items without parsing them (step 3).
    ///
    /// Returns the concrete strategy used alongside the items.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S], strategy: Strategy) -> (Strategy, Segmentation) {
        let strategy = self.resolve_strategy(lines, strategy);
        let segmentation = self.parser(strategy).segment(&owned_lines(lines));
        (strategy, segmentation)
    }

    /// Run the full pipeline and build the report.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S], strategy: Strategy) -> Report {
        let strategy = self.resolve_strategy(lines, strategy);
        let parser = self.parser(strategy);
        let segmentation = parser.segment(&owned_lines(lines));

        let mut aggregator = Aggregator::new(parser.as_ref());
        aggregator.extend(&segmentation.items);
        let report = aggregator.finish(segmentation.total);

        tracing::info!(
            strategy = %report.summary.strategy,
            items = segmentation.items.len(),
            publications = report.summary.n_publications,
            talks = report.summary.n_presentations,
            invited = report.summary.n_invited_talks,
            unparsed = report.unparsed.len(),
            "extraction complete"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_picks_sectioned_with_heading() {
        let extractor = CvExtractor::new();
        let lines = ["Invited Talks", "- Keynote, \"X,\" Y, 2020."];
        assert_eq!(extractor.resolve_strategy(&lines, Strategy::Auto), Strategy::Sectioned);
    }

    #[test]
    fn test_auto_picks_numbered_without_heading() {
        let extractor = CvExtractor::new();
        let lines = ["1. J. Doe. Paper. Journal X, 2020.", "2. Another."];
        assert_eq!(extractor.resolve_strategy(&lines, Strategy::Auto), Strategy::Numbered);
        assert_eq!(
            extractor.resolve_strategy(&lines, Strategy::Sectioned),
            Strategy::Sectioned
        );
    }

    #[test]
    fn test_segment_reports_concrete_strategy() {
        let extractor = CvExtractor::new();
        let (strategy, seg) = extractor.segment(&["1. First.", "2. Second."], Strategy::Auto);
        assert_eq!(strategy, Strategy::Numbered);
        assert_eq!(seg.total, Some(2));
    }

    #[test]
    fn test_sections_step() {
        let extractor = CvExtractor::new();
        let sections = extractor.sections(&["Name", "", "Talks", "- One.", "- Two."]);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].label, "talks");
        assert_eq!(sections[1].paragraphs.len(), 2);
    }

    #[test]
    fn test_extract_empty_document() {
        let report = CvExtractor::new().extract::<&str>(&[], Strategy::Auto);
        assert_eq!(report.summary.strategy, "numbered");
        assert_eq!(report.summary.total_numbered_items, Some(0));
        assert!(report.publications.is_empty());
        assert!(report.unparsed.is_empty());
    }
}
