//! End-to-end tests for the extraction pipeline: raw CV lines in, report out.

use vitae_parsing::{
    CvExtractor, ParsingConfigBuilder, Record, Strategy, VocabularyList, extract_report, reflow,
    render,
};

const SECTIONED_CV: &str = r#"Jane Doe
Curriculum Vitae

SELECTED PUBLICATIONS
- J. Doe and A. Lee. "Fast Pars-
  ing." In Proc. ACL, 2021.
- Smith J. A Study. Proc. ICML 2019.

INVITED TALKS
- Keynote: "Scaling Systems," MIT, March 2022.
- Seminar, "Local Things," Univ. of X, 2020."#;

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn numbered_list_end_to_end() {
    let input = [
        "1. J. Doe and A. Lee. \"Fast Parsing.\" In Proc. ACL, 2021.",
        "2. Invited Talk: \"Scaling Systems,\" MIT, March 2022.",
    ];
    let report = extract_report(&input, Strategy::Auto);

    assert_eq!(report.summary.strategy, "numbered");
    assert_eq!(report.summary.total_numbered_items, Some(2));
    assert_eq!(report.summary.n_unknown, Some(0));

    assert_eq!(report.publications.len(), 1);
    let publication = &report.publications[0];
    assert_eq!(publication.index, Some(1));
    assert_eq!(publication.title.as_deref(), Some("Fast Parsing"));
    assert_eq!(publication.authors.as_deref(), Some("J. Doe and A. Lee"));
    assert_eq!(publication.venue.as_deref(), Some("Proc. ACL"));
    assert_eq!(publication.year, Some(2021));

    assert!(report.presentations.is_empty());
    assert_eq!(report.invited_talks.len(), 1);
    let talk = &report.invited_talks[0];
    assert_eq!(talk.title.as_deref(), Some("Scaling Systems"));
    assert_eq!(talk.venue.as_deref(), Some("MIT"));
    assert_eq!(talk.date.as_deref(), Some("March 2022"));
    assert!(talk.invited);
}

#[test]
fn sectioned_cv_end_to_end() {
    let report = extract_report(&lines(SECTIONED_CV), Strategy::Auto);

    assert_eq!(report.summary.strategy, "sectioned");
    assert_eq!(report.summary.n_publications, 2);
    assert_eq!(report.summary.n_presentations, 2);
    assert_eq!(report.summary.n_invited_talks, 1);
    assert!(report.unknown.is_none());

    let first = &report.publications[0];
    assert_eq!(first.title.as_deref(), Some("Fast Parsing"));
    assert_eq!(first.venue.as_deref(), Some("Proc. ACL"));
    assert_eq!(first.authors_list, vec!["J. Doe", "A. Lee"]);

    let keynote = &report.invited_talks[0];
    assert_eq!(keynote.talk_type.as_deref(), Some("Keynote"));
    assert_eq!(keynote.title.as_deref(), Some("Scaling Systems"));
    assert_eq!(keynote.venue.as_deref(), Some("MIT"));

    let seminar = &report.presentations[0];
    assert_eq!(seminar.title.as_deref(), Some("Local Things"));
    assert_eq!(seminar.venue.as_deref(), Some("Univ. of X"));
    assert!(!seminar.invited);

    assert!(report.unparsed.is_empty());
}

#[test]
fn invited_and_regular_talks_partition_all_talks() {
    let report = extract_report(&lines(SECTIONED_CV), Strategy::Sectioned);

    assert_eq!(
        report.invited_talks.len() + report.presentations.len(),
        report.summary.n_presentations
    );
    assert!(report.invited_talks.iter().all(Record::is_invited_talk));
    assert!(!report.presentations.iter().any(Record::is_invited_talk));
    for talk in &report.invited_talks {
        assert!(!report.presentations.contains(talk));
    }
}

#[test]
fn every_segmented_item_yields_one_record() {
    let extractor = CvExtractor::new();
    let input = lines(SECTIONED_CV);
    let (strategy, segmentation) = extractor.segment(&input, Strategy::Auto);
    assert_eq!(strategy, Strategy::Sectioned);

    let report = extractor.extract(&input, Strategy::Auto);
    assert_eq!(
        segmentation.items.len(),
        report.publications.len() + report.talks().count()
    );
    let raws: Vec<&str> = report
        .publications
        .iter()
        .chain(report.talks())
        .map(|r| r.raw.as_str())
        .collect();
    for item in &segmentation.items {
        assert!(raws.contains(&item.text.as_str()), "missing record for {}", item.text);
    }
}

#[test]
fn hyphenated_line_break_is_joined() {
    assert_eq!(reflow(&["compu-", "tational"]), vec!["computational"]);
}

#[test]
fn heading_never_merges_with_body() {
    let paragraphs = reflow(&["PUBLICATIONS", "J. Doe. A paper that continues"]);
    assert_eq!(paragraphs[0], "PUBLICATIONS");
    assert_eq!(paragraphs.len(), 2);
}

#[test]
fn year_falls_back_to_first_year_token() {
    let report = extract_report(
        &["Publications", "- Smith J. A Study. Proc. ICML 2019."],
        Strategy::Auto,
    );
    let publication = &report.publications[0];
    assert_eq!(publication.year, Some(2019));
    assert_eq!(publication.authors.as_deref(), Some("Smith J"));
    assert_eq!(publication.title.as_deref(), Some("A Study"));
    assert_eq!(publication.venue.as_deref(), Some("Proc. ICML"));
}

#[test]
fn doi_found_regardless_of_structure() {
    let report = extract_report(
        &[
            "Publications",
            "- unstructured blob 10.1109/TPAMI.2020.123",
            "- J. Doe. A paper. IEEE TPAMI 2020. doi:10.1109/TPAMI.2020.123",
            "Talks",
            "- \"Recorded Talk,\" Workshop X, 2020, 10.1109/TPAMI.2020.123",
        ],
        Strategy::Sectioned,
    );
    assert_eq!(report.publications.len(), 2);
    for record in report.publications.iter().chain(report.talks()) {
        assert_eq!(record.doi.as_deref(), Some("10.1109/TPAMI.2020.123"));
    }
}

#[test]
fn media_noise_excluded_from_numbered_output() {
    let input = [
        "1. J. Doe. A paper. Journal of Things, 2020.",
        "2. Interview with Radio Station, 2021.",
        "3. Invited seminar, \"Ideas,\" Univ. Y, 2019.",
    ];
    let report = extract_report(&input, Strategy::Numbered);

    assert_eq!(report.summary.total_numbered_items, Some(3));
    let all: Vec<&Record> = report
        .publications
        .iter()
        .chain(report.talks())
        .chain(report.unknown.iter().flatten())
        .collect();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|r| !r.raw.contains("Interview")));
}

#[test]
fn reflow_is_idempotent_through_render() {
    let input = lines(SECTIONED_CV);
    let once = reflow(&input);
    let rendered = render(&once);
    let twice = reflow(&rendered.lines().collect::<Vec<_>>());
    assert_eq!(once, twice);
}

#[test]
fn configured_heading_opens_a_talk_section() {
    let config = ParsingConfigBuilder::new()
        .extend_list(VocabularyList::TalkHeadings, vec!["guest lectures".into()])
        .build()
        .unwrap();
    let extractor = CvExtractor::with_config(config);
    let report = extractor.extract(
        &["Guest Lectures", "- Seminar, \"Graph Things,\" ETH Zurich, 2018."],
        Strategy::Auto,
    );
    assert_eq!(report.summary.strategy, "sectioned");
    assert_eq!(report.summary.n_presentations, 1);
    assert_eq!(report.presentations[0].venue.as_deref(), Some("ETH Zurich"));
}

#[test]
fn report_serializes_sparsely() {
    let report = extract_report(&lines(SECTIONED_CV), Strategy::Auto);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["summary"]["strategy"], "sectioned");
    assert!(json["summary"].get("n_unknown").is_none());
    assert!(json.get("unknown").is_none());
    let talk = &json["invited_talks"][0];
    assert_eq!(talk["type"], "Keynote");
    assert_eq!(talk["invited"], true);
    assert!(talk.get("authors").is_none());
}
