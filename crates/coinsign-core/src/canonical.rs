//! Canonical JSON for sign bytes.
//!
//! Every object is re-keyed in byte order at every depth, arrays keep their
//! order and the output is compact. Strings are escaped the way the chain's
//! JSON encoder escapes them: `<`, `>`, `&`, U+2028 and U+2029 become `\uXXXX`
//! sequences, as do backspace and form feed.
//!
//! Sorting is always applied to the parsed value, never trusted to the
//! serializer, so embedded fragments produced elsewhere are normalized too.

use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, Serializer};
use serde_json::{Map, Value};
use std::io;

use crate::error::CodecError;

/// Recursively sort object keys.
pub fn sort_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, sort_value(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_value).collect()),
        other => other,
    }
}

/// Serialize `value` to canonical bytes.
pub fn to_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let value = serde_json::to_value(value).map_err(|e| CodecError::Json(e.to_string()))?;
    write_compact(&sort_value(value))
}

/// Re-sort an already serialized JSON document.
pub fn sort_json(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| CodecError::Json(e.to_string()))?;
    write_compact(&sort_value(value))
}

fn write_compact(value: &Value) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut out, ChainFormatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CodecError::Json(e.to_string()))?;
    Ok(out)
}

/// Compact output with the chain encoder's extra string escapes.
struct ChainFormatter;

impl Formatter for ChainFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        match char_escape {
            CharEscape::Backspace => writer.write_all(b"\\u0008"),
            CharEscape::FormFeed => writer.write_all(b"\\u000c"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}
