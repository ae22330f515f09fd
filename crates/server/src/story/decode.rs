// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Structural decoding of read-only call responses into story entries.
//!
//! Responses come in several historical shapes: response envelopes tagged by
//! name (`"ok"`, `"ResponseOk"`), by numeric type id, or by a `success`/`okay`
//! flag; lists as bare arrays or tagged containers; tuples with or without a
//! wrapper; and scalars either bare or wrapped one or more levels deep. Tags are
//! only trusted when the payload field they announce is actually present.
//!
//! Anything that cannot be recognized decodes to an empty story. The only hard
//! failure is an integer that cannot be represented without loss.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::entry::StoryEntry;

const MAX_DEPTH: usize = 16;

/// Wrapper layers tolerated around each list element.
const ELEMENT_LAYERS: usize = 2;

/// Fields that identify a story record.
const RECORD_FIELDS: [&str; 4] = ["word", "sender", "timestamp", "category"];

/// Keys that may carry the payload of an envelope or container.
const PAYLOAD_KEYS: [&str; 4] = ["value", "list", "data", "result"];

const METADATA_KEYS: [&str; 2] = ["type", "typeName"];

/// Largest integer a float payload can carry exactly (2^53 - 1).
const MAX_SAFE_FLOAT_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Integer '{0}' does not fit in a 64-bit integer")]
    IntegerOutOfRange(String),

    #[error("Negative value {value} for field '{field}'")]
    NegativeValue { field: &'static str, value: i64 },
}

/// Classification of a single response node.
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Success envelope; holds the payload.
    Success(&'a Value),
    /// Error envelope or empty optional.
    Failure,
    /// List container; holds the elements.
    List(&'a [Value]),
    /// Field-bearing record (tuple).
    Record(&'a Map<String, Value>),
    /// Untagged container around another node.
    Wrapped(&'a Value),
    Unknown,
}

/// A scalar extracted from a (possibly wrapped) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Bool(bool),
}

fn tag_is(map: &Map<String, Value>, names: &[&str], ids: &[u64]) -> bool {
    match map.get("type") {
        Some(Value::String(tag)) => names.contains(&tag.as_str()),
        Some(Value::Number(id)) => id.as_u64().is_some_and(|id| ids.contains(&id)),
        _ => false,
    }
}

fn type_name_is(map: &Map<String, Value>, names: &[&str]) -> bool {
    map.get("typeName")
        .and_then(Value::as_str)
        .is_some_and(|name| names.contains(&name))
}

fn flag(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

fn is_tagged(map: &Map<String, Value>) -> bool {
    METADATA_KEYS.iter().any(|key| map.contains_key(*key))
}

fn payload(map: &Map<String, Value>) -> Option<&Value> {
    PAYLOAD_KEYS.iter().find_map(|key| map.get(*key))
}

fn is_record(map: &Map<String, Value>) -> bool {
    RECORD_FIELDS.iter().any(|field| map.contains_key(*field))
}

/// Success tags. Numeric ids: 7 = ok, 10 = some; 9 is a known mislabel for ok
/// and is only accepted together with a payload.
fn is_success(map: &Map<String, Value>) -> bool {
    tag_is(map, &["ok", "ResponseOk", "responseOk", "some"], &[7, 9, 10])
        || type_name_is(map, &["ResponseOk", "OptionalSome"])
        || flag(map, "success") == Some(true)
        || flag(map, "okay") == Some(true)
}

fn is_failure(map: &Map<String, Value>, has_payload: bool) -> bool {
    tag_is(map, &["err", "ResponseErr", "responseErr", "none"], &[8])
        || (!has_payload && tag_is(map, &[], &[9]))
        || type_name_is(map, &["ResponseErr", "OptionalNone"])
        || flag(map, "success") == Some(false)
        || flag(map, "okay") == Some(false)
}

fn is_success_envelope(value: &Value) -> bool {
    matches!(value, Value::Object(map) if payload(map).is_some() && is_success(map))
}

/// Classify one node of a response.
pub fn classify(value: &Value) -> Shape<'_> {
    let map = match value {
        Value::Array(items) => return Shape::List(items),
        Value::Object(map) => map,
        _ => return Shape::Unknown,
    };

    if is_record(map) {
        return Shape::Record(map);
    }

    let inner = payload(map);
    if is_failure(map, inner.is_some()) {
        return Shape::Failure;
    }

    let Some(inner) = inner else {
        return Shape::Unknown;
    };

    if is_success(map) {
        return Shape::Success(inner);
    }

    if tag_is(map, &["list"], &[11]) {
        return match inner {
            Value::Array(items) => Shape::List(items),
            _ => Shape::Unknown,
        };
    }

    if tag_is(map, &["tuple"], &[12]) {
        return match inner {
            Value::Object(fields) => Shape::Record(fields),
            _ => Shape::Unknown,
        };
    }

    if !is_tagged(map) || is_success_envelope(inner) {
        return Shape::Wrapped(inner);
    }

    Shape::Unknown
}

/// Extract a scalar from a bare or wrapped value.
///
/// Strings are returned as text even when they look like `123n` literals;
/// only typed integer wrappers and JSON numbers yield integers. Integer-valued
/// fields reinterpret text through [`extract_integer`].
pub fn extract_scalar(value: &Value) -> Result<Option<Scalar>, DecodeError> {
    scalar_at(value, 0)
}

fn scalar_at(value: &Value, depth: usize) -> Result<Option<Scalar>, DecodeError> {
    if depth > MAX_DEPTH {
        return Ok(None);
    }

    match value {
        Value::Null | Value::Array(_) => Ok(None),
        Value::Bool(b) => Ok(Some(Scalar::Bool(*b))),
        Value::Number(n) => number_scalar(n).map(Some),
        Value::String(s) => Ok(Some(Scalar::Text(s.clone()))),
        Value::Object(map) => {
            if tag_is(map, &["int", "uint", "bigint"], &[0, 1]) {
                if let Some(inner) = map.get("value") {
                    return integer_payload(inner, depth);
                }
            }

            for key in ["value", "data"] {
                if let Some(inner) = map.get(key) {
                    return scalar_at(inner, depth + 1);
                }
            }

            let mut fields = map
                .iter()
                .filter(|(key, _)| !METADATA_KEYS.contains(&key.as_str()));
            if let (Some((_, only)), None) = (fields.next(), fields.next()) {
                return scalar_at(only, depth + 1);
            }

            Ok(None)
        }
    }
}

fn integer_payload(inner: &Value, depth: usize) -> Result<Option<Scalar>, DecodeError> {
    match inner {
        Value::String(s) => Ok(integer_text(s)?.map(Scalar::Integer)),
        Value::Number(n) => number_scalar(n).map(Some),
        other => scalar_at(other, depth + 1),
    }
}

fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Decimal text, optionally in `123n` big integer form, narrowed to `i64`.
fn integer_text(s: &str) -> Result<Option<i64>, DecodeError> {
    let digits = s.trim();
    let digits = digits.strip_suffix('n').unwrap_or(digits);
    if is_integer_literal(digits) {
        narrow(digits).map(Some)
    } else {
        Ok(None)
    }
}

/// Extract an integer from a bare or wrapped value, reading decimal and
/// `123n` text as numbers. Used for ids, timestamps and counts.
pub fn extract_integer(value: &Value) -> Result<Option<i64>, DecodeError> {
    match extract_scalar(value)? {
        Some(Scalar::Integer(n)) => Ok(Some(n)),
        Some(Scalar::Text(s)) => integer_text(&s),
        _ => Ok(None),
    }
}

fn narrow(digits: &str) -> Result<i64, DecodeError> {
    digits
        .parse::<i128>()
        .ok()
        .and_then(|wide| i64::try_from(wide).ok())
        .ok_or_else(|| DecodeError::IntegerOutOfRange(digits.to_string()))
}

fn number_scalar(n: &Number) -> Result<Scalar, DecodeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Scalar::Integer(i));
    }
    if n.as_u64().is_some() {
        return Err(DecodeError::IntegerOutOfRange(n.to_string()));
    }

    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() != 0.0 || !f.is_finite() {
        return Ok(Scalar::Text(n.to_string()));
    }
    if f.abs() > MAX_SAFE_FLOAT_INTEGER {
        return Err(DecodeError::IntegerOutOfRange(n.to_string()));
    }
    Ok(Scalar::Integer(f as i64))
}

fn field_scalar(record: &Map<String, Value>, name: &str) -> Result<Option<Scalar>, DecodeError> {
    match record.get(name) {
        Some(value) => extract_scalar(value),
        None => Ok(None),
    }
}

fn text_field(record: &Map<String, Value>, name: &str) -> Result<String, DecodeError> {
    Ok(match field_scalar(record, name)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Integer(i)) => i.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

fn unsigned_field(
    record: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<u64>, DecodeError> {
    let Some(value) = record.get(name) else {
        return Ok(None);
    };
    match extract_integer(value)? {
        Some(value) => u64::try_from(value)
            .map(Some)
            .map_err(|_| DecodeError::NegativeValue { field: name, value }),
        None => Ok(None),
    }
}

/// Decodes contract responses into [`StoryEntry`] values.
#[derive(Debug, Clone)]
pub struct StoryDecoder {
    default_category: String,
}

impl StoryDecoder {
    pub fn new(default_category: impl Into<String>) -> Self {
        Self {
            default_category: default_category.into(),
        }
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Decode a response carrying the whole story (or a single record).
    ///
    /// Unrecognized shapes and error envelopes yield an empty list.
    pub fn entries(&self, value: &Value) -> Result<Vec<StoryEntry>, DecodeError> {
        self.collect(value, 0)
    }

    /// Decode a single-record response, e.g. from `get-word`.
    ///
    /// `id` is used when the record does not carry its own id.
    pub fn entry(&self, value: &Value, id: u64) -> Result<Option<StoryEntry>, DecodeError> {
        match find_record(value, MAX_DEPTH) {
            Some(record) => self.from_record(record, id).map(Some),
            None => Ok(None),
        }
    }

    /// Decode a count response. Missing, non-numeric or non-positive counts are `None`.
    pub fn count(&self, value: &Value) -> Result<Option<u64>, DecodeError> {
        let mut current = value;
        for _ in 0..MAX_DEPTH {
            match classify(current) {
                Shape::Success(inner) | Shape::Wrapped(inner) => current = inner,
                Shape::Failure => return Ok(None),
                _ => break,
            }
        }

        Ok(extract_integer(current)?
            .filter(|n| *n > 0)
            .map(|n| n as u64))
    }

    fn collect(&self, value: &Value, depth: usize) -> Result<Vec<StoryEntry>, DecodeError> {
        if depth > MAX_DEPTH {
            return Ok(Vec::new());
        }

        match classify(value) {
            Shape::Success(inner) | Shape::Wrapped(inner) => self.collect(inner, depth + 1),
            Shape::Failure | Shape::Unknown => Ok(Vec::new()),
            Shape::Record(record) => Ok(vec![self.from_record(record, 0)?]),
            Shape::List(items) => {
                let mut entries = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    match find_record(item, ELEMENT_LAYERS) {
                        Some(record) => entries.push(self.from_record(record, index as u64)?),
                        None => {
                            tracing::debug!(index, "Skipping list element without story fields")
                        }
                    }
                }
                Ok(entries)
            }
        }
    }

    fn from_record(
        &self,
        record: &Map<String, Value>,
        fallback_id: u64,
    ) -> Result<StoryEntry, DecodeError> {
        let category = text_field(record, "category")?;
        Ok(StoryEntry {
            id: unsigned_field(record, "id")?.unwrap_or(fallback_id),
            word: text_field(record, "word")?,
            sender: text_field(record, "sender")?,
            timestamp: unsigned_field(record, "timestamp")?.unwrap_or(0),
            category: if category.trim().is_empty() {
                self.default_category.clone()
            } else {
                category
            },
        })
    }
}

/// Decode the whole story with a one-off decoder.
pub fn decode_entries(value: &Value, default_category: &str) -> Result<Vec<StoryEntry>, DecodeError> {
    StoryDecoder::new(default_category).entries(value)
}

pub fn decode_entry(
    value: &Value,
    id: u64,
    default_category: &str,
) -> Result<Option<StoryEntry>, DecodeError> {
    StoryDecoder::new(default_category).entry(value, id)
}

pub fn decode_count(value: &Value) -> Result<Option<u64>, DecodeError> {
    StoryDecoder::new("").count(value)
}

/// Follow at most `layers` envelopes or wrappers down to a record.
fn find_record(value: &Value, layers: usize) -> Option<&Map<String, Value>> {
    match classify(value) {
        Shape::Record(record) => Some(record),
        Shape::Success(inner) | Shape::Wrapped(inner) if layers > 0 => {
            find_record(inner, layers - 1)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clarity::ClarityValue;
    use serde_json::json;

    fn decoder() -> StoryDecoder {
        StoryDecoder::new("general")
    }

    fn tuple(word: &str, sender: &str, timestamp: u64, category: &str) -> Value {
        json!({
            "type": "tuple",
            "value": {
                "word": { "type": "ascii", "value": word },
                "sender": { "type": "address", "value": sender },
                "timestamp": { "type": "uint", "value": timestamp.to_string() },
                "category": { "type": "ascii", "value": category },
            }
        })
    }

    #[test]
    fn test_success_list_keeps_order_and_defaults_category() {
        let response = json!({
            "success": true,
            "list": [
                tuple("once", "SP1", 10, "fable"),
                tuple("upon", "SP2", 20, ""),
                tuple("a", "SP1", 30, "fable"),
            ]
        });

        let entries = decoder().entries(&response).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(
            entries.iter().map(|e| e.word.as_str()).collect::<Vec<_>>(),
            ["once", "upon", "a"]
        );
        assert_eq!(
            entries.iter().map(|e| e.id).collect::<Vec<_>>(),
            [0, 1, 2]
        );
        assert_eq!(entries[1].category, "general");
        assert_eq!(entries[0].category, "fable");
        assert_eq!(entries[2].timestamp, 30);
        assert_eq!(entries[1].sender, "SP2");
    }

    #[test]
    fn test_clarity_rendered_response() {
        let value = ClarityValue::ok(ClarityValue::List(vec![ClarityValue::tuple([
            ("word", ClarityValue::ascii("hello")),
            (
                "sender",
                ClarityValue::StandardPrincipal {
                    version: 26,
                    hash160: [0u8; 20],
                },
            ),
            ("timestamp", ClarityValue::UInt(1_700_000_000)),
            ("category", ClarityValue::ascii("")),
        ])]));

        let entries = decoder().entries(&value.to_json()).unwrap();
        assert_eq!(
            entries,
            vec![StoryEntry {
                id: 0,
                word: "hello".to_string(),
                sender: "ST000000000000000000002AMW42H".to_string(),
                timestamp: 1_700_000_000,
                category: "general".to_string(),
            }]
        );
    }

    #[test]
    fn test_historical_envelope_shapes() {
        let list = json!([tuple("x", "SP1", 1, "c")]);
        let shapes = [
            json!({ "type": "ok", "value": list.clone() }),
            json!({ "type": 7, "value": { "type": 11, "value": list.clone() } }),
            json!({ "type": "ResponseOk", "value": { "type": "list", "list": list.clone() } }),
            json!({ "typeName": "ResponseOk", "value": list.clone() }),
            json!({ "type": 9, "value": list.clone() }),
            json!({ "okay": true, "result": list.clone() }),
            json!({ "value": { "type": "ok", "value": list.clone() } }),
            json!({ "type": "unknown", "value": { "type": "ok", "value": list.clone() } }),
            json!({ "data": list.clone() }),
            list.clone(),
        ];

        for shape in shapes {
            let entries = decoder().entries(&shape).unwrap();
            assert_eq!(entries.len(), 1, "shape {} should decode", shape);
            assert_eq!(entries[0].word, "x");
        }
    }

    #[test]
    fn test_unrecognized_shapes_decode_to_empty() {
        let shapes = [
            json!(null),
            json!(42),
            json!("story"),
            json!({ "foo": 1, "bar": 2 }),
            json!({ "type": "ok" }),
            json!({ "type": "list", "value": "not a list" }),
            json!({ "type": "uint", "value": "3" }),
            json!({ "type": "err", "value": { "type": "uint", "value": "300" } }),
            json!({ "type": 9 }),
            json!({ "success": false, "list": [tuple("x", "SP1", 1, "c")] }),
        ];

        for shape in shapes {
            assert!(
                decoder().entries(&shape).unwrap().is_empty(),
                "shape {} should decode to nothing",
                shape
            );
        }
    }

    #[test]
    fn test_record_ids_take_precedence_over_position() {
        let response = json!([
            { "id": 4, "word": "late", "sender": "SP1", "timestamp": 5, "category": "c" },
            { "word": "no-id", "sender": "SP1" },
        ]);
        let entries = decoder().entries(&response).unwrap();
        assert_eq!(entries[0].id, 4);
        assert_eq!(entries[1].id, 1);
        assert_eq!(entries[1].timestamp, 0);
        assert_eq!(entries[1].category, "general");
    }

    #[test]
    fn test_list_elements_with_one_wrapper_layer() {
        let response = json!({
            "type": "list",
            "value": [
                { "data": { "word": { "data": "wrapped" }, "sender": "SP9" } },
                { "type": "some", "value": tuple("opt", "SP8", 2, "c") },
                "not a record",
                { "unrelated": true, "other": false },
            ]
        });
        let entries = decoder().entries(&response).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "wrapped");
        assert_eq!(entries[0].sender, "SP9");
        assert_eq!(entries[1].word, "opt");
        assert_eq!(entries[1].id, 1);
    }

    #[test]
    fn test_wide_integers_match_plain_integers() {
        let plain = json!({ "word": "w", "timestamp": 1_700_000_000u64 });
        let typed = json!({ "word": "w", "timestamp": { "type": "uint", "value": "1700000000" } });
        let literal = json!({ "word": "w", "timestamp": "1700000000n" });
        let numeric_id = json!({ "word": "w", "timestamp": { "type": 1, "value": 1_700_000_000u64 } });

        for value in [plain, typed, literal, numeric_id] {
            let entry = decoder().entry(&value, 0).unwrap().unwrap();
            assert_eq!(entry.timestamp, 1_700_000_000, "{}", value);
        }

        let max_safe = json!({ "word": "w", "timestamp": { "type": "uint", "value": "9007199254740991" } });
        assert_eq!(
            decoder().entry(&max_safe, 0).unwrap().unwrap().timestamp,
            9_007_199_254_740_991
        );
    }

    #[test]
    fn test_out_of_range_integer_fails_decode() {
        let response = json!({
            "type": "ok",
            "value": [{ "word": "w", "timestamp": { "type": "uint", "value": "340282366920938463463374607431768211455" } }]
        });
        assert_eq!(
            decoder().entries(&response).unwrap_err(),
            DecodeError::IntegerOutOfRange("340282366920938463463374607431768211455".to_string())
        );

        let too_big = json!({ "word": "w", "timestamp": u64::MAX });
        assert!(matches!(
            decoder().entry(&too_big, 0).unwrap_err(),
            DecodeError::IntegerOutOfRange(_)
        ));
    }

    #[test]
    fn test_negative_timestamp_is_rejected() {
        let value = json!({ "word": "w", "timestamp": { "type": "int", "value": "-5" } });
        assert_eq!(
            decoder().entry(&value, 0).unwrap_err(),
            DecodeError::NegativeValue {
                field: "timestamp",
                value: -5
            }
        );
    }

    #[test]
    fn test_numeric_words_stay_text() {
        let value = json!({ "word": { "type": "ascii", "value": "42" }, "sender": "SP1" });
        assert_eq!(decoder().entry(&value, 0).unwrap().unwrap().word, "42");
    }

    #[test]
    fn test_literal_looking_words_stay_text() {
        let response = json!({
            "type": "ok",
            "value": {
                "type": "list",
                "value": [
                    tuple("once", "SP1", 1, "c"),
                    tuple("99999999999999999999n", "SP2", 2, "c"),
                    tuple("7n", "SP3", 3, "c"),
                ]
            }
        });
        let entries = decoder().entries(&response).unwrap();
        assert_eq!(
            entries.iter().map(|e| e.word.as_str()).collect::<Vec<_>>(),
            ["once", "99999999999999999999n", "7n"]
        );

        let single = json!({ "word": { "type": "ascii", "value": "7n" }, "timestamp": "5n" });
        let entry = decoder().entry(&single, 0).unwrap().unwrap();
        assert_eq!(entry.word, "7n");
        assert_eq!(entry.timestamp, 5);
        assert_eq!(
            extract_scalar(&json!("12n")).unwrap(),
            Some(Scalar::Text("12n".to_string()))
        );
        assert_eq!(extract_integer(&json!("12n")).unwrap(), Some(12));
    }

    #[test]
    fn test_single_field_object_scalar() {
        assert_eq!(
            extract_scalar(&json!({ "type": "custom", "text": "hey" })).unwrap(),
            Some(Scalar::Text("hey".to_string()))
        );
        assert_eq!(extract_scalar(&json!({ "type": "true" })).unwrap(), None);
        assert_eq!(extract_scalar(&json!({ "a": 1, "b": 2 })).unwrap(), None);
        assert_eq!(
            extract_scalar(&json!({ "value": { "value": { "value": 3 } } })).unwrap(),
            Some(Scalar::Integer(3))
        );
    }

    #[test]
    fn test_single_entry_responses() {
        let ok = json!({ "type": "ok", "value": tuple("hi", "SP1", 9, "c") });
        let entry = decoder().entry(&ok, 12).unwrap().unwrap();
        assert_eq!(entry.id, 12);
        assert_eq!(entry.word, "hi");

        let not_found = json!({ "type": "err", "value": { "type": "uint", "value": "300" } });
        assert_eq!(decoder().entry(&not_found, 12).unwrap(), None);

        // A lone record at top level is a one-entry story.
        assert_eq!(decoder().entries(&ok).unwrap().len(), 1);
    }

    #[test]
    fn test_free_functions_use_given_category() {
        let value = json!([{ "word": "w", "category": "" }]);
        assert_eq!(decode_entries(&value, "misc").unwrap()[0].category, "misc");
        assert_eq!(
            decode_entry(&value[0], 3, "misc").unwrap().unwrap().id,
            3
        );
        assert_eq!(decode_count(&json!(2)).unwrap(), Some(2));
    }

    #[test]
    fn test_count_decoding() {
        let d = decoder();
        assert_eq!(
            d.count(&json!({ "type": "ok", "value": { "type": "uint", "value": "3" } })).unwrap(),
            Some(3)
        );
        assert_eq!(d.count(&json!({ "success": true, "value": 5 })).unwrap(), Some(5));
        assert_eq!(d.count(&json!("7")).unwrap(), Some(7));
        assert_eq!(d.count(&json!({ "type": "ok", "value": { "type": "uint", "value": "0" } })).unwrap(), None);
        assert_eq!(d.count(&json!({ "type": "ok", "value": "many" })).unwrap(), None);
        assert_eq!(d.count(&json!({ "type": "int", "value": "-2" })).unwrap(), None);
        assert_eq!(d.count(&json!({ "type": "err", "value": 1 })).unwrap(), None);
        assert_eq!(d.count(&json!(null)).unwrap(), None);
    }
}
