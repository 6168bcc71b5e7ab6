use std::collections::HashMap;

use vitae_core::config_file::{ConfigFile, ListConfig};

use crate::ParsingError;
use crate::vocabulary::{self, HeadingTable, KeywordSet};

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ListOverride::Default)
    }
}

impl From<&ListConfig> for ListOverride<String> {
    fn from(list: &ListConfig) -> Self {
        match (&list.replace, &list.extend) {
            (None, None) => ListOverride::Default,
            (None, Some(extra)) => ListOverride::Extend(extra.clone()),
            (Some(base), extra) => {
                let mut values = base.clone();
                values.extend(extra.iter().flatten().cloned());
                ListOverride::Replace(values)
            }
        }
    }
}

/// The configurable word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabularyList {
    PublicationHeadings,
    TalkHeadings,
    SectionKeywords,
    TalkTypes,
    PublicationKeywords,
    TalkKeywords,
    TalkExclusions,
    MediaNoise,
    InvitedKeywords,
    CompoundSuffixes,
}

impl VocabularyList {
    fn defaults(&self) -> &'static [&'static str] {
        match self {
            Self::PublicationHeadings => vocabulary::PUBLICATION_HEADINGS,
            Self::TalkHeadings => vocabulary::TALK_HEADINGS,
            Self::SectionKeywords => vocabulary::SECTION_KEYWORDS,
            Self::TalkTypes => vocabulary::TALK_TYPES,
            Self::PublicationKeywords => vocabulary::PUBLICATION_KEYWORDS,
            Self::TalkKeywords => vocabulary::TALK_KEYWORDS,
            Self::TalkExclusions => vocabulary::TALK_EXCLUSIONS,
            Self::MediaNoise => vocabulary::MEDIA_NOISE,
            Self::InvitedKeywords => vocabulary::INVITED_KEYWORDS,
            Self::CompoundSuffixes => &[],
        }
    }
}

/// Configuration for the extraction pipeline.
///
/// Vocabulary fields are `Option`; `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with custom word lists.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs / text_processing.rs ──
    pub(crate) headings: Option<HeadingTable>,
    pub(crate) section_keywords: Option<KeywordSet>,
    /// Longest line (in words) still considered heading-shaped (default: 6).
    pub(crate) heading_max_words: usize,
    /// Continuation words that keep a line-break hyphen (default: none).
    pub(crate) compound_suffixes: Vec<String>,

    // ── talk.rs / classify.rs ──
    pub(crate) talk_types: Option<KeywordSet>,
    pub(crate) publication_keywords: Option<KeywordSet>,
    pub(crate) talk_keywords: Option<KeywordSet>,
    pub(crate) talk_exclusions: Option<KeywordSet>,
    pub(crate) media_noise: Option<KeywordSet>,
    pub(crate) invited_keywords: Option<KeywordSet>,

    // ── authors.rs ──
    /// Maximum number of authors to retain per record (default: 50).
    pub(crate) max_authors: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            headings: None,
            section_keywords: None,
            heading_max_words: 6,
            compound_suffixes: Vec::new(),
            talk_types: None,
            publication_keywords: None,
            talk_keywords: None,
            talk_exclusions: None,
            media_noise: None,
            invited_keywords: None,
            max_authors: 50,
        }
    }
}

impl ParsingConfig {
    pub fn headings(&self) -> &HeadingTable {
        self.headings
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_HEADINGS)
    }

    pub fn section_keywords(&self) -> &KeywordSet {
        self.section_keywords
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_SECTION_KEYWORDS)
    }

    pub fn talk_types(&self) -> &KeywordSet {
        self.talk_types
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_TALK_TYPES)
    }

    pub fn publication_keywords(&self) -> &KeywordSet {
        self.publication_keywords
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_PUBLICATION_KEYWORDS)
    }

    pub fn talk_keywords(&self) -> &KeywordSet {
        self.talk_keywords
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_TALK_KEYWORDS)
    }

    pub fn talk_exclusions(&self) -> &KeywordSet {
        self.talk_exclusions
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_TALK_EXCLUSIONS)
    }

    pub fn media_noise(&self) -> &KeywordSet {
        self.media_noise
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_MEDIA_NOISE)
    }

    pub fn invited_keywords(&self) -> &KeywordSet {
        self.invited_keywords
            .as_ref()
            .unwrap_or(&vocabulary::DEFAULT_INVITED_KEYWORDS)
    }

    pub fn heading_max_words(&self) -> usize {
        self.heading_max_words
    }

    pub fn max_authors(&self) -> usize {
        self.max_authors
    }

    pub fn compound_suffixes(&self) -> &[String] {
        &self.compound_suffixes
    }

    /// The canonical invited rule: an invited keyword anywhere in the text.
    pub fn is_invited(&self, text: &str) -> bool {
        self.invited_keywords().is_match(text)
    }
}

/// Builder for [`ParsingConfig`].
///
/// Word lists are compiled to regexes in [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    lists: HashMap<VocabularyList, ListOverride<String>>,
    heading_max_words: Option<usize>,
    max_authors: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from an on-disk config file.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let mut builder = Self::new();

        if let Some(vocab) = &file.vocabulary {
            let lists = [
                (VocabularyList::PublicationHeadings, &vocab.publication_headings),
                (VocabularyList::TalkHeadings, &vocab.talk_headings),
                (VocabularyList::SectionKeywords, &vocab.section_keywords),
                (VocabularyList::TalkTypes, &vocab.talk_types),
                (VocabularyList::PublicationKeywords, &vocab.publication_keywords),
                (VocabularyList::TalkKeywords, &vocab.talk_keywords),
                (VocabularyList::TalkExclusions, &vocab.talk_exclusions),
                (VocabularyList::MediaNoise, &vocab.media_noise),
                (VocabularyList::InvitedKeywords, &vocab.invited_keywords),
            ];
            for (kind, list) in lists {
                if let Some(list) = list {
                    builder.lists.insert(kind, ListOverride::from(list));
                }
            }
        }

        if let Some(limits) = &file.parsing {
            builder.heading_max_words = limits.heading_max_words;
            builder.max_authors = limits.max_authors;
            if let Some(suffixes) = &limits.compound_suffixes {
                builder
                    .lists
                    .insert(VocabularyList::CompoundSuffixes, ListOverride::from(suffixes));
            }
        }

        builder
    }

    /// Replace the built-in values of one list.
    pub fn set_list(mut self, kind: VocabularyList, values: Vec<String>) -> Self {
        self.lists.insert(kind, ListOverride::Replace(values));
        self
    }

    /// Append values to one list (to its replacement, if one was set).
    pub fn extend_list(mut self, kind: VocabularyList, values: Vec<String>) -> Self {
        match self.lists.get_mut(&kind) {
            Some(ListOverride::Replace(v)) | Some(ListOverride::Extend(v)) => v.extend(values),
            _ => {
                self.lists.insert(kind, ListOverride::Extend(values));
            }
        }
        self
    }

    pub fn add_compound_suffix(self, suffix: String) -> Self {
        self.extend_list(VocabularyList::CompoundSuffixes, vec![suffix])
    }

    pub fn heading_max_words(mut self, n: usize) -> Self {
        self.heading_max_words = Some(n);
        self
    }

    pub fn max_authors(mut self, n: usize) -> Self {
        self.max_authors = Some(n);
        self
    }

    fn resolved(&self, kind: VocabularyList) -> Option<Vec<String>> {
        let over = self.lists.get(&kind)?;
        if over.is_default() {
            return None;
        }
        let defaults: Vec<String> = kind.defaults().iter().map(|s| s.to_string()).collect();
        Some(over.resolve(&defaults))
    }

    fn keyword_set(&self, kind: VocabularyList) -> Result<Option<KeywordSet>, ParsingError> {
        self.resolved(kind)
            .map(|words| KeywordSet::new(&words))
            .transpose()
            .map_err(ParsingError::from)
    }

    /// Compile all word lists and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ParsingError> {
        let pub_headings = self.resolved(VocabularyList::PublicationHeadings);
        let talk_headings = self.resolved(VocabularyList::TalkHeadings);
        let headings = if pub_headings.is_some() || talk_headings.is_some() {
            let defaults = |kind: VocabularyList| -> Vec<String> {
                kind.defaults().iter().map(|s| s.to_string()).collect()
            };
            let pubs = pub_headings.unwrap_or_else(|| defaults(VocabularyList::PublicationHeadings));
            let talks = talk_headings.unwrap_or_else(|| defaults(VocabularyList::TalkHeadings));
            Some(HeadingTable::new(&pubs, &talks)?)
        } else {
            None
        };

        Ok(ParsingConfig {
            headings,
            section_keywords: self.keyword_set(VocabularyList::SectionKeywords)?,
            heading_max_words: self.heading_max_words.unwrap_or(6),
            compound_suffixes: self
                .resolved(VocabularyList::CompoundSuffixes)
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            talk_types: self.keyword_set(VocabularyList::TalkTypes)?,
            publication_keywords: self.keyword_set(VocabularyList::PublicationKeywords)?,
            talk_keywords: self.keyword_set(VocabularyList::TalkKeywords)?,
            talk_exclusions: self.keyword_set(VocabularyList::TalkExclusions)?,
            media_noise: self.keyword_set(VocabularyList::MediaNoise)?,
            invited_keywords: self.keyword_set(VocabularyList::InvitedKeywords)?,
            max_authors: self.max_authors.unwrap_or(50),
        })
    }
}
