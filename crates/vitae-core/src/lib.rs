use serde::{Deserialize, Serialize};

pub mod config_file;

/// A structured record reconstructed from one bibliographic item.
///
/// `raw` always carries the item text verbatim; every other field is a
/// best-effort extraction and is omitted from JSON output when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub raw: String,
    /// Leading number of the item in a flat numbered list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The author block as it appears in the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors_list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arxiv: Option<String>,
    /// Talk classification such as "Keynote" or "Invited Talk".
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub talk_type: Option<String>,
    /// Date token exactly as found in the item ("March 2022", "3/2021", "2019").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default)]
    pub invited: bool,
}

impl Record {
    /// Create a record that carries only its source text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Default::default()
        }
    }

    /// A publication is unparsed when none of title, venue or year was found.
    pub fn is_unparsed_publication(&self) -> bool {
        self.title.is_none() && self.venue.is_none() && self.year.is_none()
    }

    /// A presentation is unparsed when no title was found.
    pub fn is_unparsed_presentation(&self) -> bool {
        self.title.is_none()
    }

    /// Whether a talk belongs in the invited partition.
    ///
    /// True for an "Invited ..." type, a type mentioning keynote, or an
    /// explicit invited flag.
    pub fn is_invited_talk(&self) -> bool {
        let by_type = self.talk_type.as_deref().is_some_and(|t| {
            let t = t.to_lowercase();
            t.starts_with("invited") || t.contains("keynote")
        });
        by_type || self.invited
    }
}

/// Counts for a completed extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Name of the segmentation strategy that produced the report.
    pub strategy: String,
    pub n_publications: usize,
    /// All talk records, invited or not.
    pub n_presentations: usize,
    pub n_invited_talks: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_unknown: Option<usize>,
    /// Numbered entries seen before noise filtering (numbered lists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_numbered_items: Option<usize>,
}

/// Raw items whose parse yielded nothing usable, kept for manual review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unparsed {
    pub publications: Vec<String>,
    pub presentations: Vec<String>,
}

impl Unparsed {
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty() && self.presentations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.publications.len() + self.presentations.len()
    }
}

/// The terminal artifact of a run.
///
/// `presentations` and `invited_talks` partition the talk records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub publications: Vec<Record>,
    pub presentations: Vec<Record>,
    pub invited_talks: Vec<Record>,
    pub unparsed: Unparsed,
    /// Items the generic classifier could not place (numbered lists only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unknown: Option<Vec<Record>>,
}

impl Report {
    /// Every talk record, non-invited first.
    pub fn talks(&self) -> impl Iterator<Item = &Record> {
        self.presentations.iter().chain(self.invited_talks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_record_serialization() {
        let mut r = Record::new("Doe. Paper. Venue 2020.");
        r.year = Some(2020);
        let json = serde_json::to_value(&r).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["raw"], "Doe. Paper. Venue 2020.");
        assert_eq!(obj["year"], 2020);
        assert_eq!(obj["invited"], false);
        assert!(!obj.contains_key("title"));
        assert!(!obj.contains_key("authors_list"));
        assert!(!obj.contains_key("type"));
    }

    #[test]
    fn talk_type_serializes_as_type() {
        let mut r = Record::new("Keynote, Foo 2020");
        r.talk_type = Some("Keynote".into());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "Keynote");
    }

    #[test]
    fn invited_by_type_or_flag() {
        let mut r = Record::new("x");
        assert!(!r.is_invited_talk());
        r.talk_type = Some("Invited Presentation".into());
        assert!(r.is_invited_talk());

        let mut k = Record::new("x");
        k.talk_type = Some("Keynote".into());
        assert!(k.is_invited_talk());

        let mut s = Record::new("x");
        s.talk_type = Some("Seminar".into());
        assert!(!s.is_invited_talk());
        s.invited = true;
        assert!(s.is_invited_talk());
    }

    #[test]
    fn unparsed_checks() {
        let mut r = Record::new("something");
        assert!(r.is_unparsed_publication());
        assert!(r.is_unparsed_presentation());
        r.year = Some(1999);
        assert!(!r.is_unparsed_publication());
        assert!(r.is_unparsed_presentation());
    }

    #[test]
    fn report_omits_unknown_when_absent() {
        let report = Report::default();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("unknown").is_none());
        assert!(json.get("unparsed").is_some());
        assert!(json["summary"].get("n_unknown").is_none());
    }
}
