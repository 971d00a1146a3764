use engine_logging::engine_warn;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// One comic as the collection endpoint serialises it.
///
/// Decoding is lenient: descriptive fields that are missing or not strings
/// become empty, and `access`/`episodes` become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ComicPayload {
    /// JSON string or number, kept as text.
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub author: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub genre: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub picture: String,
    #[serde(deserialize_with = "text_or_empty")]
    pub hyperlink: String,
    #[serde(alias = "crawlDate", deserialize_with = "text_or_empty")]
    pub crawl_date: String,
    #[serde(alias = "lastUpdated", deserialize_with = "optional_text")]
    pub last_updated: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub access: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub episodes: Option<String>,
    #[serde(alias = "episodeCount", deserialize_with = "optional_count")]
    pub episode_count: Option<u32>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response is not valid JSON: {0}")]
    Json(String),
    #[error("expected a JSON array of comics, got {0}")]
    NotACollection(&'static str),
}

/// Decode a collection body. Elements that are not objects, or that carry no
/// usable id, are skipped with a warning; the remaining records keep their
/// order.
pub fn decode_collection(bytes: &[u8]) -> Result<Vec<ComicPayload>, DecodeError> {
    match parse(bytes)? {
        Value::Array(items) => Ok(decode_items(items)),
        other => Err(DecodeError::NotACollection(kind_name(&other))),
    }
}

/// Decode a single-record body. Accepts either one object or an array.
pub fn decode_record(bytes: &[u8]) -> Result<Vec<ComicPayload>, DecodeError> {
    match parse(bytes)? {
        Value::Array(items) => Ok(decode_items(items)),
        Value::Null => Ok(Vec::new()),
        value @ Value::Object(_) => Ok(decode_items(vec![value])),
        other => Err(DecodeError::NotACollection(kind_name(&other))),
    }
}

fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))
}

fn decode_items(items: Vec<Value>) -> Vec<ComicPayload> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                engine_warn!("Skipping comic #{}: {} is not an object", index, kind_name(&item));
                return None;
            }
            match serde_json::from_value::<ComicPayload>(item) {
                Ok(comic) if comic.id.is_empty() => {
                    engine_warn!("Skipping comic #{}: no usable id", index);
                    None
                }
                Ok(comic) => Some(comic),
                Err(err) => {
                    engine_warn!("Skipping comic #{}: {}", index, err);
                    None
                }
            }
        })
        .collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number_text(&number),
        _ => String::new(),
    })
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_text(deserializer)?.unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

fn optional_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        _ => None,
    })
}

/// Integral floats print without a fraction, so `2.0` and `2` name the same
/// comic.
fn number_text(number: &Number) -> String {
    if let Some(n) = number.as_i64() {
        return n.to_string();
    }
    if let Some(n) = number.as_u64() {
        return n.to_string();
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => number.to_string(),
    }
}
