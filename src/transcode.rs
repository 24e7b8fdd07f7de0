//! JSON value to XML fragment transcoding.
//!
//! Arrays become runs of sibling `<item>` elements, objects become one
//! element per key (in insertion order), nulls become self-closing
//! elements and scalars become escaped text nodes. A scalar at the top
//! level has no key to name it, so it is wrapped in `<value>`.
//!
//! Object keys are used verbatim as tag names. Keys that are not valid XML
//! names produce malformed output; only the empty key is replaced.

use quick_xml::escape::escape;
use serde_json::Value;

/// Tag used for every array element.
pub const ITEM_TAG: &str = "item";
/// Tag used for a scalar that is not nested under any key or index.
pub const VALUE_TAG: &str = "value";
/// Replacement for an empty object key.
pub const EMPTY_KEY_TAG: &str = "empty_key";

/// Encode any JSON value as an XML fragment.
///
/// Containers produce their children with no enclosing element; the
/// document wrapper is added by [`crate::formats::xml::to_document`].
pub fn encode_value(value: &Value) -> String {
    match value {
        Value::Array(_) | Value::Object(_) => encode_container(value),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            let mut out = String::new();
            push_element(&mut out, VALUE_TAG, value);
            out
        }
    }
}

/// Encode the entries of an array or object as concatenated sibling
/// elements. A scalar has no entries and yields an empty fragment.
pub fn encode_container(container: &Value) -> String {
    let mut out = String::new();
    push_entries(&mut out, container);
    out
}

/// Stringify a scalar and escape it for use as XML text content.
///
/// `&`, `<`, `>`, `"` and `'` are replaced by their predefined entities.
/// The replacement is a single pass, so inserted entities are never
/// escaped a second time.
///
/// Arrays and objects are not scalars; if one is passed anyway it is
/// rendered as compact JSON text and escaped like a string.
pub fn escape_xml(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s.as_str()).into_owned(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => escape(value.to_string().as_str()).into_owned(),
    }
}

fn push_entries(out: &mut String, container: &Value) {
    match container {
        Value::Array(items) => {
            for item in items {
                push_element(out, ITEM_TAG, item);
            }
        }
        Value::Object(map) => {
            for (key, entry) in map {
                push_element(out, tag_for_key(key), entry);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn push_element(out: &mut String, tag: &str, value: &Value) {
    match value {
        Value::Null => {
            out.push('<');
            out.push_str(tag);
            out.push_str("/>");
        }
        Value::Array(_) | Value::Object(_) => {
            push_open(out, tag);
            push_entries(out, value);
            push_close(out, tag);
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            push_open(out, tag);
            out.push_str(&escape_xml(value));
            push_close(out, tag);
        }
    }
}

fn tag_for_key(key: &str) -> &str {
    if key.is_empty() { EMPTY_KEY_TAG } else { key }
}

fn push_open(out: &mut String, tag: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
}

fn push_close(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
