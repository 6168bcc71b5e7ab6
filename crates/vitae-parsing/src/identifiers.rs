use once_cell::sync::Lazy;
use regex::Regex;

/// Identifiers found anywhere in an item, independent of its structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    pub doi: Option<String>,
    pub arxiv: Option<String>,
}

impl Identifiers {
    pub fn scan(text: &str) -> Self {
        Self {
            doi: extract_doi(text),
            arxiv: extract_arxiv_id(text),
        }
    }
}

/// Trim trailing punctuation and any closing bracket that has no opener
/// inside the DOI itself.
fn clean_doi(doi: &str) -> String {
    const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];
    let mut doi = doi.trim_end_matches(['.', ',', ';', ':']);

    loop {
        let unbalanced = PAIRS.iter().find(|(open, close)| {
            doi.ends_with(*close) && doi.matches(*close).count() > doi.matches(*open).count()
        });
        match unbalanced {
            Some(_) => {
                doi = doi[..doi.len() - 1].trim_end_matches(['.', ',', ';', ':']);
            }
            None => break,
        }
    }

    doi.to_string()
}

/// Extract a DOI.
///
/// Accepts bare `10.NNNN/suffix`, `doi:` prefixed, and `doi.org` /
/// `dx.doi.org` URLs. A URL wins over a bare DOI elsewhere in the text.
pub fn extract_doi(text: &str) -> Option<String> {
    static URL_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?i)https?://(?:dx\.)?doi\.org/(10\.\d{4,9}/[^\s\]>},]+)").unwrap()
    });
    static DOI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"10\.\d{4,9}/[^\s\]>},]+").unwrap());

    if let Some(m) = URL_RE.captures(text).and_then(|c| c.get(1)) {
        return Some(clean_doi(m.as_str()));
    }
    DOI_RE.find(text).map(|m| clean_doi(m.as_str()))
}

/// Extract an arXiv identifier.
///
/// - `arXiv:2301.12345`, `arXiv 2301.12345v2`
/// - `arxiv.org/abs/2301.12345`
/// - old style `arXiv:hep-th/9901001`
pub fn extract_arxiv_id(text: &str) -> Option<String> {
    static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
        [
            r"(?i)arXiv[:\s]+(\d{4}\.\d{4,5}(?:v\d+)?)",
            r"(?i)arxiv\.org/abs/(\d{4}\.\d{4,5}(?:v\d+)?)",
            r"(?i)arXiv[:\s]+([a-z-]+(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?)",
            r"(?i)arxiv\.org/abs/([a-z-]+(?:\.[A-Z]{2})?/\d{7}(?:v\d+)?)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    });

    PATTERNS
        .iter()
        .find_map(|re| re.captures(text)?.get(1))
        .map(|m| m.as_str().to_string())
}
