use crate::config::ParsingConfig;
use crate::vocabulary::HeadingTable;

/// Label of the implicit section that holds text before any heading.
pub const OTHER_LABEL: &str = "other";

/// Which parser the items of a section are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionFamily {
    Publications,
    Talks,
    Other,
}

impl SectionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publications => "publications",
            Self::Talks => "talks",
            Self::Other => "other",
        }
    }
}

/// A labeled run of paragraphs under one recognized heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Canonical (lower-case) vocabulary entry, or `"other"`.
    pub label: String,
    pub family: SectionFamily,
    pub paragraphs: Vec<String>,
}

impl Section {
    fn new(label: &str, family: SectionFamily) -> Self {
        Self {
            label: label.to_string(),
            family,
            paragraphs: Vec::new(),
        }
    }
}

/// Routes paragraphs into sections.
///
/// The state is the active section (initially `"other"`); a paragraph that
/// is a vocabulary heading switches state, every other paragraph is appended
/// to the active section. Seeing a heading again resumes its section rather
/// than opening a new one.
#[derive(Debug)]
pub struct SectionMachine<'a> {
    headings: &'a HeadingTable,
    sections: Vec<Section>,
    current: Option<usize>,
}

impl<'a> SectionMachine<'a> {
    pub fn new(headings: &'a HeadingTable) -> Self {
        Self {
            headings,
            sections: Vec::new(),
            current: None,
        }
    }

    /// Label of the active section.
    pub fn current_label(&self) -> &str {
        self.current
            .and_then(|i| self.sections.get(i))
            .map(|s| s.label.as_str())
            .unwrap_or(OTHER_LABEL)
    }

    fn position_or_insert(&mut self, label: &str, family: SectionFamily) -> usize {
        match self.sections.iter().position(|s| s.label == label) {
            Some(i) => i,
            None => {
                self.sections.push(Section::new(label, family));
                self.sections.len() - 1
            }
        }
    }

    /// Consume one paragraph. Returns `true` when it was a heading.
    pub fn feed(&mut self, paragraph: &str) -> bool {
        if let Some((label, family)) = self.headings.match_heading(paragraph) {
            tracing::debug!(heading = paragraph.trim(), label, "section transition");
            let idx = self.position_or_insert(label, family);
            self.current = Some(idx);
            return true;
        }

        let idx = match self.current {
            Some(i) => i,
            None => {
                let i = self.position_or_insert(OTHER_LABEL, SectionFamily::Other);
                self.current = Some(i);
                i
            }
        };
        self.sections[idx].paragraphs.push(paragraph.to_string());
        false
    }

    /// Sections in order of first appearance.
    pub fn finish(self) -> Vec<Section> {
        self.sections
    }
}

/// Bucket paragraphs under the headings they follow.
pub fn split_sections<S: AsRef<str>>(paragraphs: &[S]) -> Vec<Section> {
    split_sections_with_config(paragraphs, &ParsingConfig::default())
}

/// Config-aware version of [`split_sections`].
pub(crate) fn split_sections_with_config<S: AsRef<str>>(
    paragraphs: &[S],
    config: &ParsingConfig,
) -> Vec<Section> {
    let mut machine = SectionMachine::new(config.headings());
    for p in paragraphs {
        machine.feed(p.as_ref());
    }
    machine.finish()
}

/// Whether any paragraph is a vocabulary heading.
pub(crate) fn has_heading<S: AsRef<str>>(paragraphs: &[S], config: &ParsingConfig) -> bool {
    let headings = config.headings();
    paragraphs.iter().any(|p| headings.is_heading(p.as_ref()))
}
