use catalog_core::{
    filter_collection, matching_indices, ComicRecord, FilterState, MarkerClassifier,
    StatusCategory, StatusFilter,
};
use pretty_assertions::assert_eq;

fn comic(id: u64, title: &str, access: Option<&str>) -> ComicRecord {
    ComicRecord {
        id: id.into(),
        title: title.to_string(),
        access: access.map(str::to_string),
        ..ComicRecord::default()
    }
}

fn sample() -> Vec<ComicRecord> {
    vec![
        comic(1, "Alpha", Some("需要追漫券")),
        comic(2, "Beta", Some("可免費看完整話數")),
        comic(3, "Gamma", None),
        comic(4, "alphabet soup", Some("已完結")),
        comic(5, "ALPINE", Some("需要追漫券")),
    ]
}

fn ids(records: &[ComicRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn cleared_filter_is_identity() {
    let collection = sample();
    assert_eq!(filter_collection(&collection, &FilterState::default()), collection);
}

#[test]
fn search_is_case_insensitive_substring() {
    let collection = sample();
    let filter = FilterState::new("alp", StatusFilter::All);
    assert_eq!(ids(&filter_collection(&collection, &filter)), ["1", "4", "5"]);

    let filter = FilterState::new("ALPHA", StatusFilter::All);
    assert_eq!(ids(&filter_collection(&collection, &filter)), ["1", "4"]);
}

#[test]
fn search_alp_matches_titles_case_insensitively() {
    let collection = vec![
        comic(1, "Alpha", Some("需要追漫券")),
        comic(2, "Beta", Some("可免費看完整話數")),
        comic(3, "Gamma", None),
    ];
    let filter = FilterState::new("alp", StatusFilter::All);
    assert_eq!(filter_collection(&collection, &filter), vec![collection[0].clone()]);
}

#[test]
fn status_filter_keeps_matching_category() {
    let collection = sample();
    let filter = FilterState::new("", StatusFilter::Only(StatusCategory::FreeCompleted));
    assert_eq!(ids(&filter_collection(&collection, &filter)), ["2", "4"]);
}

#[test]
fn search_and_status_compose_conjunctively() {
    let collection = sample();
    let filter = FilterState::new("alp", StatusFilter::Only(StatusCategory::Paid));
    assert_eq!(ids(&filter_collection(&collection, &filter)), ["1", "5"]);
}

#[test]
fn filtering_is_idempotent() {
    let collection = sample();
    let filter = FilterState::new("a", StatusFilter::Only(StatusCategory::Paid));
    let once = filter_collection(&collection, &filter);
    let twice = filter_collection(&once, &filter);
    assert_eq!(once, twice);
}

#[test]
fn no_match_or_empty_input_gives_empty_result() {
    let filter = FilterState::new("zzz", StatusFilter::All);
    assert!(filter_collection(&sample(), &filter).is_empty());
    assert!(filter_collection(&[], &FilterState::default()).is_empty());
}

#[test]
fn matching_indices_preserve_order() {
    let filter = FilterState::new("", StatusFilter::Only(StatusCategory::Paid));
    assert_eq!(matching_indices(&sample(), &filter, &MarkerClassifier), vec![0, 4]);
}

#[test]
fn status_filter_parses_cli_tokens() {
    assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
    assert_eq!(
        "paid".parse::<StatusFilter>(),
        Ok(StatusFilter::Only(StatusCategory::Paid))
    );
    assert!("free".parse::<StatusFilter>().is_err());
    assert_eq!(StatusFilter::Only(StatusCategory::FreeOngoing).to_string(), "free_ongoing");
}
