use std::fmt;

use crate::ComicRecord;

/// Find the record whose id renders to the same text as `id`.
///
/// Duplicate ids: the first match in collection order wins. `None` means
/// "not found" and is an ordinary outcome; an empty id never matches.
pub fn resolve(collection: &[ComicRecord], id: impl fmt::Display) -> Option<&ComicRecord> {
    let wanted = id.to_string();
    collection.iter().find(|record| record.id.matches(&wanted))
}
