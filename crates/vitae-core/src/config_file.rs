use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub vocabulary: Option<VocabularyConfig>,
    pub parsing: Option<ParsingLimitsConfig>,
    pub output: Option<OutputConfig>,
}

/// Override for one built-in word list.
///
/// `replace` discards the defaults; `extend` appends to them (or to the
/// replacement, when both are given).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConfig {
    pub replace: Option<Vec<String>>,
    pub extend: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    pub publication_headings: Option<ListConfig>,
    pub talk_headings: Option<ListConfig>,
    pub section_keywords: Option<ListConfig>,
    pub talk_types: Option<ListConfig>,
    pub publication_keywords: Option<ListConfig>,
    pub talk_keywords: Option<ListConfig>,
    pub talk_exclusions: Option<ListConfig>,
    pub media_noise: Option<ListConfig>,
    pub invited_keywords: Option<ListConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingLimitsConfig {
    pub heading_max_words: Option<usize>,
    pub max_authors: Option<usize>,
    pub compound_suffixes: Option<ListConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `auto`, `sectioned` or `numbered`.
    pub strategy: Option<String>,
    pub pretty: Option<bool>,
}

/// Platform config directory path: `<config_dir>/vitae/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vitae").join("config.toml"))
}

/// Load config by cascading CWD `.vitae.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".vitae.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

fn pick<T: Clone>(overlay: Option<&T>, base: Option<&T>) -> Option<T> {
    overlay.or(base).cloned()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bv = base.vocabulary.unwrap_or_default();
    let ov = overlay.vocabulary.unwrap_or_default();
    let bp = base.parsing.unwrap_or_default();
    let op = overlay.parsing.unwrap_or_default();
    let bo = base.output.unwrap_or_default();
    let oo = overlay.output.unwrap_or_default();

    ConfigFile {
        vocabulary: Some(VocabularyConfig {
            publication_headings: pick(
                ov.publication_headings.as_ref(),
                bv.publication_headings.as_ref(),
            ),
            talk_headings: pick(ov.talk_headings.as_ref(), bv.talk_headings.as_ref()),
            section_keywords: pick(ov.section_keywords.as_ref(), bv.section_keywords.as_ref()),
            talk_types: pick(ov.talk_types.as_ref(), bv.talk_types.as_ref()),
            publication_keywords: pick(
                ov.publication_keywords.as_ref(),
                bv.publication_keywords.as_ref(),
            ),
            talk_keywords: pick(ov.talk_keywords.as_ref(), bv.talk_keywords.as_ref()),
            talk_exclusions: pick(ov.talk_exclusions.as_ref(), bv.talk_exclusions.as_ref()),
            media_noise: pick(ov.media_noise.as_ref(), bv.media_noise.as_ref()),
            invited_keywords: pick(ov.invited_keywords.as_ref(), bv.invited_keywords.as_ref()),
        }),
        parsing: Some(ParsingLimitsConfig {
            heading_max_words: op.heading_max_words.or(bp.heading_max_words),
            max_authors: op.max_authors.or(bp.max_authors),
            compound_suffixes: pick(op.compound_suffixes.as_ref(), bp.compound_suffixes.as_ref()),
        }),
        output: Some(OutputConfig {
            strategy: oo.strategy.or(bo.strategy),
            pretty: oo.pretty.or(bo.pretty),
        }),
    }
}
