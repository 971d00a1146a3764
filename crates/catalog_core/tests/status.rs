use catalog_core::{classify, AggregateStats, ComicRecord, MarkerClassifier, StatusCategory};
use pretty_assertions::assert_eq;

fn comic(id: u64, title: &str, access: Option<&str>, episodes: Option<&str>) -> ComicRecord {
    ComicRecord {
        id: id.into(),
        title: title.to_string(),
        access: access.map(str::to_string),
        episodes: episodes.map(str::to_string),
        ..ComicRecord::default()
    }
}

fn sample() -> Vec<ComicRecord> {
    vec![
        comic(1, "Alpha", Some("需要追漫券"), None),
        comic(2, "Beta", Some("可免費看完整話數"), None),
        comic(3, "Gamma", None, Some("連載中")),
    ]
}

#[test]
fn sample_collection_classifies_into_each_category() {
    let categories: Vec<_> = sample().iter().map(classify).collect();
    assert_eq!(
        categories,
        vec![
            StatusCategory::Paid,
            StatusCategory::FreeCompleted,
            StatusCategory::FreeOngoing,
        ]
    );
}

#[test]
fn sample_collection_stats() {
    let stats = AggregateStats::compute(&sample(), &MarkerClassifier);
    assert_eq!(
        stats,
        AggregateStats {
            total: 3,
            free_ongoing: 1,
            free_completed: 1,
            paid: 1,
        }
    );
}

#[test]
fn record_without_status_text_is_free_ongoing() {
    assert_eq!(classify(&comic(9, "Bare", None, None)), StatusCategory::FreeOngoing);
    assert_eq!(
        classify(&comic(9, "Blank", Some(""), Some(""))),
        StatusCategory::FreeOngoing
    );
}

#[test]
fn paid_marker_takes_precedence_over_completed() {
    let record = comic(4, "Delta", Some("已完結，需要追漫券"), None);
    assert_eq!(classify(&record), StatusCategory::Paid);
}

#[test]
fn completed_crawler_note_is_free_completed() {
    let record = comic(5, "Epsilon", Some("已完結，可免費看完整話數!"), Some("共 80 話"));
    assert_eq!(classify(&record), StatusCategory::FreeCompleted);
}

#[test]
fn bare_completed_marker_is_free_completed() {
    let record = comic(6, "Zeta", None, Some("已完結"));
    assert_eq!(classify(&record), StatusCategory::FreeCompleted);
}

#[test]
fn access_text_shadows_episodes() {
    // `episodes` would say completed, but `access` is present and wins.
    let record = comic(7, "Eta", Some("每週更新"), Some("已完結"));
    assert_eq!(classify(&record), StatusCategory::FreeOngoing);
}

#[test]
fn category_counts_partition_the_total() {
    let notes = [
        None,
        Some("需要追漫券"),
        Some("已完結"),
        Some("已完結，追漫券"),
        Some("可免費看完整話數"),
        Some(""),
        Some("共 12 話"),
    ];
    let collection: Vec<_> = notes
        .iter()
        .cycle()
        .take(50)
        .enumerate()
        .map(|(i, note)| comic(i as u64, "T", *note, None))
        .collect();

    let stats = AggregateStats::compute(&collection, &MarkerClassifier);
    assert_eq!(stats.total, 50);
    assert_eq!(
        stats.free_ongoing + stats.free_completed + stats.paid,
        stats.total
    );
    for category in StatusCategory::ALL {
        let expected = collection.iter().filter(|c| classify(c) == category).count();
        assert_eq!(stats.count(category), expected);
    }
}

#[test]
fn empty_collection_has_zero_stats() {
    assert_eq!(
        AggregateStats::compute(&[], &MarkerClassifier),
        AggregateStats::default()
    );
}
