use vitae_core::{Record, Report, Summary, Unparsed};

use crate::items::Item;
use crate::strategy::{ParsedItem, RecordParser};

/// Collects parsed items into a [`Report`].
///
/// Talks are split into invited and non-invited at the end; unparsed items
/// are found by parsing each publication/talk item a second time with the
/// same parser.
pub struct Aggregator<'p> {
    parser: &'p dyn RecordParser,
    publications: Vec<Record>,
    talks: Vec<Record>,
    unknown: Vec<Record>,
    publication_items: Vec<Item>,
    talk_items: Vec<Item>,
    noise: usize,
}

impl<'p> Aggregator<'p> {
    pub fn new(parser: &'p dyn RecordParser) -> Self {
        Self {
            parser,
            publications: Vec::new(),
            talks: Vec::new(),
            unknown: Vec::new(),
            publication_items: Vec::new(),
            talk_items: Vec::new(),
            noise: 0,
        }
    }

    /// Parse one item and file the result.
    pub fn push(&mut self, item: &Item) {
        match self.parser.parse(item) {
            ParsedItem::Publication(record) => {
                self.publications.push(record);
                self.publication_items.push(item.clone());
            }
            ParsedItem::Talk(record) => {
                self.talks.push(record);
                self.talk_items.push(item.clone());
            }
            ParsedItem::Unknown(record) => self.unknown.push(record),
            ParsedItem::Noise => self.noise += 1,
        }
    }

    pub fn extend<'i>(&mut self, items: impl IntoIterator<Item = &'i Item>) {
        for item in items {
            self.push(item);
        }
    }

    fn collect_unparsed(&self) -> Unparsed {
        let reparse = |item: &Item| self.parser.parse(item);
        Unparsed {
            publications: self
                .publication_items
                .iter()
                .filter(|item| {
                    reparse(*item)
                        .record()
                        .is_none_or(Record::is_unparsed_publication)
                })
                .map(|item| item.text.clone())
                .collect(),
            presentations: self
                .talk_items
                .iter()
                .filter(|item| {
                    reparse(*item)
                        .record()
                        .is_none_or(Record::is_unparsed_presentation)
                })
                .map(|item| item.text.clone())
                .collect(),
        }
    }

    /// Build the report. `total` is the numbered-entry count, when the
    /// strategy reports one; it also switches on the `unknown` list.
    pub fn finish(self, total: Option<usize>) -> Report {
        let unparsed = self.collect_unparsed();

        let n_presentations = self.talks.len();
        let (invited_talks, presentations): (Vec<Record>, Vec<Record>) =
            self.talks.into_iter().partition(Record::is_invited_talk);

        let mut summary = Summary {
            strategy: self.parser.name().to_string(),
            n_publications: self.publications.len(),
            n_presentations,
            n_invited_talks: invited_talks.len(),
            n_unknown: None,
            total_numbered_items: None,
        };

        let unknown = total.map(|total| {
            summary.n_unknown = Some(self.unknown.len());
            summary.total_numbered_items = Some(total);
            self.unknown
        });

        tracing::debug!(
            noise = self.noise,
            unparsed = unparsed.len(),
            "aggregation complete"
        );

        Report {
            summary,
            publications: self.publications,
            presentations,
            invited_talks,
            unparsed,
            unknown,
        }
    }
}
