use once_cell::sync::Lazy;
use regex::Regex;

/// Byte offset of the first period (followed by whitespace) that is not
/// part of an initial like `J.` in `J. Doe`.
///
/// A capital letter followed by a period counts as an initial only in
/// initial position: at the start, after `,`/`&`/`and`, or after another
/// initial. After a surname (`Smith J.`) it ends the author block.
pub(crate) fn find_first_real_period(text: &str) -> Option<usize> {
    static PERIOD_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s").unwrap());

    let bytes = text.as_bytes();
    PERIOD_SPACE.find_iter(text).map(|m| m.start()).find(|&pos| {
        if pos == 0 {
            return false;
        }
        let single_letter = bytes[pos - 1].is_ascii_uppercase()
            && (pos == 1 || !bytes[pos - 2].is_ascii_alphabetic());
        !(single_letter && in_initial_position(&text[..pos - 1]))
    })
}

/// Whether a letter following `prefix` starts a name rather than trailing
/// a surname.
fn in_initial_position(prefix: &str) -> bool {
    let prefix = prefix.trim_end();
    let Some(last) = prefix.chars().last() else {
        return true;
    };
    match last {
        ',' | '&' | ';' | '-' | '(' => true,
        '.' => {
            let before = prefix[..prefix.len() - 1].as_bytes();
            match before {
                [b'A'..=b'Z'] => true,
                [.., c, b'A'..=b'Z'] => !c.is_ascii_alphabetic(),
                _ => false,
            }
        }
        _ => {
            let word = prefix
                .rsplit(|c: char| !c.is_alphanumeric())
                .next()
                .unwrap_or("");
            word.eq_ignore_ascii_case("and")
        }
    }
}

/// The author block at the start of an entry: everything before the first
/// real period.
pub fn leading_author_block(text: &str) -> Option<&str> {
    let end = find_first_real_period(text)?;
    let block = text[..end].trim();
    (!block.is_empty()).then_some(block)
}

/// Split an author string on commas, `and` and `&`.
///
/// Trailing periods are removed from each name, `et al.` is dropped and at
/// most `max_authors` names are kept.
pub fn split_authors(authors: &str, max_authors: usize) -> Vec<String> {
    static SEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s*(?:,|\band\b|&)\s*").unwrap());
    static ET_AL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^et\s+al\.?$").unwrap());

    SEP_RE
        .split(authors)
        .map(|name| name.trim().trim_end_matches('.').trim())
        .filter(|name| !name.is_empty() && !ET_AL_RE.is_match(name))
        .take(max_authors)
        .map(String::from)
        .collect()
}
