use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

/// Bullet or list marker at the start of a line: `-`, `*`, `•`, `–`, `—`,
/// `12.` or `[12]`, followed by whitespace.
pub(crate) static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•–—]|\d+\.|\[\d+\])\s+").unwrap());

/// Whether a line starts with a bullet or list marker.
pub fn is_bullet(line: &str) -> bool {
    BULLET_RE.is_match(line)
}

/// Remove a leading bullet or list marker, if any.
pub fn strip_bullet(line: &str) -> &str {
    match BULLET_RE.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Collapse every whitespace run (including newlines) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace typographic quotes with their ASCII counterparts.
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}'], "\"")
        .replace(['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'], "'")
}

/// Strong clause-terminal punctuation at the end of a paragraph buffer.
pub fn ends_with_terminal(text: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[.!?:;»”"]\s*$"#).unwrap());
    RE.is_match(text)
}

/// Sentence-final punctuation (`.`, `!`, `?`) at the end of an item.
pub fn ends_sentence(text: &str) -> bool {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s*$").unwrap());
    RE.is_match(text)
}

/// First bare `19xx`/`20xx` token.
pub fn first_year(text: &str) -> Option<i32> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
    YEAR_RE.find(text).and_then(|m| m.as_str().parse().ok())
}

/// All cased characters are upper case, and there is at least one.
pub fn is_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Every cased run starts with an upper-case letter followed only by
/// lower-case letters ("Invited Talks", "Peer-Reviewed").
pub fn is_title_case(s: &str) -> bool {
    let mut any_cased = false;
    let mut prev_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else if c.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            any_cased = true;
        } else {
            prev_cased = false;
        }
    }
    any_cased
}

/// Whether a line looks like a section heading.
///
/// Short (at most `heading_max_words` words), no sentence-final punctuation,
/// and either an exact vocabulary heading, or an all-caps/title-case line
/// containing a section keyword ("Recent Talks", "SELECTED PUBLICATIONS 2020").
pub fn is_heading_like(line: &str) -> bool {
    is_heading_like_with_config(line, &ParsingConfig::default())
}

/// Config-aware version of [`is_heading_like`].
pub(crate) fn is_heading_like_with_config(line: &str, config: &ParsingConfig) -> bool {
    let clean = line.trim().trim_matches(':').trim();
    if clean.is_empty() || clean.split_whitespace().count() > config.heading_max_words() {
        return false;
    }
    if clean.ends_with(['.', '!', '?']) {
        return false;
    }
    if config.headings().is_heading(clean) {
        return true;
    }
    (is_upper(clean) || is_title_case(clean)) && config.section_keywords().is_match(clean)
}

/// Rejoin words split by a hyphen at the end of a line.
///
/// - `"compu-"`, `"tational"` → `"computational"`
/// - with `"driven"` configured as a compound suffix:
///   `"data-"`, `"driven"` → `"data-driven"`
pub fn join_hyphenated<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    join_hyphenated_with_config(lines, &ParsingConfig::default())
}

/// Config-aware version of [`join_hyphenated`].
pub(crate) fn join_hyphenated_with_config<S: AsRef<str>>(
    lines: &[S],
    config: &ParsingConfig,
) -> Vec<String> {
    static HYPHEN_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w-$").unwrap());
    static WORD_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w").unwrap());

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.as_ref().trim_end();
        let continuation = line.trim_start();

        if let Some(prev) = out.last_mut()
            && HYPHEN_END.is_match(prev)
            && WORD_START.is_match(continuation)
        {
            let first_word = continuation
                .split_whitespace()
                .next()
                .unwrap_or("")
                .trim_end_matches(['.', ',', ';', ':'])
                .to_lowercase();
            let keep_hyphen = config.compound_suffixes().contains(&first_word);
            if !keep_hyphen {
                prev.pop();
            }
            prev.push_str(continuation);
            continue;
        }

        out.push(line.to_string());
    }
    out
}

/// Rebuild logical paragraphs from physically wrapped lines.
///
/// After hyphenation repair, each line is handled by the first rule that
/// applies:
/// 1. blank line: paragraph break
/// 2. bullet/numbered line: always starts a new paragraph
/// 3. heading-shaped buffer: never merged with what follows
/// 4. buffer ends in terminal punctuation: new paragraph
/// 5. next line is a bullet or heading, or this line is a heading: new paragraph
/// 6. otherwise: soft-wrap join with a single space
///
/// Rule 5 looks at the current line as well as the next one, so a heading
/// that follows unterminated text still starts its own paragraph.
///
/// Output is a fixed point only through [`render`]: pass
/// `render(&paragraphs)` back in, not the paragraphs themselves, since two
/// adjacent unterminated paragraphs given as bare lines soft-join.
pub fn reflow<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    reflow_with_config(lines, &ParsingConfig::default())
}

/// Config-aware version of [`reflow`].
pub(crate) fn reflow_with_config<S: AsRef<str>>(lines: &[S], config: &ParsingConfig) -> Vec<String> {
    let lines = join_hyphenated_with_config(lines, config);

    let mut out: Vec<String> = Vec::new();
    let mut buf = String::new();

    fn flush(buf: &mut String, out: &mut Vec<String>) {
        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            out.push(trimmed.to_string());
        }
        buf.clear();
    }

    for (i, line) in lines.iter().enumerate() {
        let next = lines.get(i + 1).map(String::as_str).unwrap_or("");
        let s = line.trim_end();

        if s.trim().is_empty() {
            flush(&mut buf, &mut out);
            continue;
        }

        if is_bullet(s) {
            flush(&mut buf, &mut out);
            buf.push_str(s);
            continue;
        }

        if buf.is_empty() {
            buf.push_str(s);
            continue;
        }

        if is_heading_like_with_config(&buf, config) || ends_with_terminal(&buf) {
            flush(&mut buf, &mut out);
            buf.push_str(s);
            continue;
        }

        if is_bullet(next)
            || is_heading_like_with_config(next, config)
            || is_heading_like_with_config(s, config)
        {
            flush(&mut buf, &mut out);
            buf.push_str(s);
            continue;
        }

        buf.push(' ');
        buf.push_str(s.trim_start());
    }
    flush(&mut buf, &mut out);

    out
}

/// Render paragraphs as text, one blank line between paragraphs.
///
/// Feeding the rendered lines back through [`reflow`] reproduces the same
/// paragraphs.
pub fn render<S: AsRef<str>>(paragraphs: &[S]) -> String {
    paragraphs
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Paragraph reconstruction bound to one [`ParsingConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    config: &'a ParsingConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a ParsingConfig) -> Self {
        Self { config }
    }

    pub fn reflow<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        reflow_with_config(lines, self.config)
    }

    pub fn render<S: AsRef<str>>(&self, paragraphs: &[S]) -> String {
        render(paragraphs)
    }

    pub fn is_heading_like(&self, line: &str) -> bool {
        is_heading_like_with_config(line, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphen_join() {
        assert_eq!(reflow(&["compu-", "tational"]), vec!["computational"]);
        assert_eq!(
            join_hyphenated(&["a study of compu-", "tational methods"]),
            vec!["a study of computational methods"]
        );
    }

    #[test]
    fn test_hyphen_not_joined_across_blank_line() {
        assert_eq!(join_hyphenated(&["compu-", "", "tational"]).len(), 3);
    }

    #[test]
    fn test_hyphen_requires_word_char_before() {
        // A dangling dash bullet is not a split word
        assert_eq!(join_hyphenated(&["notes -", "more"]).len(), 2);
    }

    #[test]
    fn test_hyphen_compound_suffix_kept() {
        let config = crate::ParsingConfigBuilder::new()
            .add_compound_suffix("driven".to_string())
            .build()
            .unwrap();
        assert_eq!(
            join_hyphenated_with_config(&["data-", "driven design"], &config),
            vec!["data-driven design"]
        );
        // Syllable break still works
        assert_eq!(
            join_hyphenated_with_config(&["detec-", "tion"], &config),
            vec!["detection"]
        );
    }

    #[test]
    fn test_blank_line_breaks_paragraph() {
        assert_eq!(
            reflow(&["first part", "", "second part"]),
            vec!["first part", "second part"]
        );
    }

    #[test]
    fn test_soft_wrap_join() {
        assert_eq!(
            reflow(&["J. Doe and A. Lee. A very long title that", "   wraps onto the next line."]),
            vec!["J. Doe and A. Lee. A very long title that wraps onto the next line."]
        );
    }

    #[test]
    fn test_bullet_starts_new_paragraph() {
        let paras = reflow(&["- first item without", "continuing here", "", "- second item"]);
        assert_eq!(paras, vec!["- first item without continuing here", "- second item"]);
    }

    #[test]
    fn test_line_before_bullet_is_not_joined() {
        let paras = reflow(&["- first item without", "continuing here", "- second item"]);
        assert_eq!(paras, vec!["- first item without", "continuing here", "- second item"]);
    }

    #[test]
    fn test_heading_never_merges_with_body() {
        let paras = reflow(&["PUBLICATIONS", "J. Doe. Some paper title", "Venue 2020"]);
        assert_eq!(paras[0], "PUBLICATIONS");
        assert_eq!(paras[1], "J. Doe. Some paper title Venue 2020");
    }

    #[test]
    fn test_heading_not_merged_into_previous_text() {
        let paras = reflow(&["some trailing text", "Invited Talks", "Keynote at MIT"]);
        assert_eq!(paras, vec!["some trailing text", "Invited Talks", "Keynote at MIT"]);
    }

    #[test]
    fn test_terminal_punctuation_breaks() {
        let paras = reflow(&["Ends here.", "Starts again", "colon ends:", "next"]);
        assert_eq!(paras, vec!["Ends here.", "Starts again colon ends:", "next"]);
    }

    #[test]
    fn test_render_is_fixed_point() {
        let lines = [
            "CONFERENCE PAPERS",
            "- A. Author. A paper that wraps",
            "over two lines. Venue 2020.",
            "",
            "a paragraph without",
            "final punctuation",
            "",
            "another one",
        ];
        let once = reflow(&lines);
        let rendered = render(&once);
        let twice = reflow(&rendered.lines().collect::<Vec<_>>());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_paragraphs_must_round_trip_through_render() {
        let once = reflow(&["first part", "", "second part"]);
        assert_eq!(once, vec!["first part", "second part"]);
        assert_eq!(reflow(&once), vec!["first part second part"]);
        let rendered = render(&once);
        assert_eq!(reflow(&rendered.lines().collect::<Vec<_>>()), once);
    }

    #[test]
    fn test_reflow_idempotent_on_rule_derived_boundaries() {
        let lines = [
            "SELECTED PUBLICATIONS",
            "1. J. Doe. First paper. Venue",
            "2019.",
            "2. J. Doe. Second paper. Venue 2020.",
            "Talks",
            "- Keynote, \"Big Ideas,\" Somewhere, 2021.",
        ];
        let once = reflow(&lines);
        assert_eq!(reflow(&once), once);
    }

    #[test]
    fn test_normalizer_uses_config() {
        let config = crate::ParsingConfigBuilder::new()
            .heading_max_words(1)
            .build()
            .unwrap();
        let normalizer = Normalizer::new(&config);
        assert!(!normalizer.is_heading_like("Invited Talks"));
        assert!(normalizer.is_heading_like("Talks"));
        let paras = normalizer.reflow(&["Talks", "Keynote at MIT"]);
        assert_eq!(normalizer.render(&paras), "Talks\n\nKeynote at MIT");
    }

    #[test]
    fn test_is_heading_like() {
        assert!(is_heading_like("PUBLICATIONS"));
        assert!(is_heading_like("Invited Talks:"));
        assert!(is_heading_like("Recent Presentations"));
        // vocabulary match regardless of case
        assert!(is_heading_like("selected publications"));
        assert!(!is_heading_like("Talks."));
        assert!(!is_heading_like("Some Random Title Case Words"));
        assert!(!is_heading_like(
            "List Of All The Many Publications Ever Written"
        ));
        assert!(!is_heading_like(""));
    }

    #[test]
    fn test_title_and_upper_case() {
        assert!(is_title_case("Invited Talks"));
        assert!(is_title_case("Peer-Reviewed Papers"));
        assert!(!is_title_case("Invited talks"));
        assert!(!is_title_case("IEEE Papers"));
        assert!(is_upper("JOURNAL ARTICLES 2020"));
        assert!(!is_upper("2020"));
    }

    #[test]
    fn test_bullets() {
        assert!(is_bullet("- item"));
        assert!(is_bullet("  • item"));
        assert!(is_bullet("12. item"));
        assert!(is_bullet("[3] item"));
        assert!(!is_bullet("-item"));
        assert!(!is_bullet("Item 3."));
        assert_eq!(strip_bullet("[3] J. Doe."), "J. Doe.");
        assert_eq!(strip_bullet("— Talk"), "Talk");
        assert_eq!(strip_bullet("No marker"), "No marker");
    }

    #[test]
    fn test_normalize_quotes() {
        assert_eq!(
            normalize_quotes("\u{201C}Title\u{201D} and it\u{2019}s"),
            "\"Title\" and it's"
        );
    }

    #[test]
    fn test_first_year() {
        assert_eq!(first_year("Proc. ICML 2019."), Some(2019));
        assert_eq!(first_year("pages 12019-12030"), None);
        assert_eq!(first_year("no year"), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a  b\n c\t"), "a b c");
    }
}
