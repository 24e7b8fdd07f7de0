//! Document-level properties of the transcoder.

use json2xml_bridge::formats::xml::to_document;
use json2xml_bridge::transcode::{encode_value, escape_xml};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Map, Value, json};

/// Keys that are valid XML names. Names starting with "xml" are reserved,
/// so they are left out.
fn xml_name() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}".prop_filter("reserved xml prefix", |k| {
        !k.to_ascii_lowercase().starts_with("xml")
    })
}

/// Strings made of printable characters, including the five XML specials.
fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,16}",
        "[&<>\"' a-z]{0,16}",
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9f64).prop_map(Value::from),
        text().prop_map(Value::String),
    ];
    leaf.prop_recursive(6, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::vec((xml_name(), inner), 0..8)
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn document_is_always_well_formed(value in json_value()) {
        let doc = to_document(&value);
        let parsed = roxmltree::Document::parse(&doc);
        prop_assert!(parsed.is_ok(), "{:?} for {}", parsed.err(), doc);
    }

    #[test]
    fn text_round_trips_through_parser(s in text()) {
        let doc = to_document(&json!({"t": s.clone()}));
        let parsed = roxmltree::Document::parse(&doc).unwrap();
        let node = parsed.root_element().first_element_child().unwrap();
        prop_assert_eq!(node.tag_name().name(), "t");
        prop_assert_eq!(node.text().unwrap_or(""), s.as_str());
    }

    #[test]
    fn escaped_text_has_no_raw_specials(s in text()) {
        let escaped = escape_xml(&Value::String(s));
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        for (i, _) in escaped.match_indices('&') {
            let rest = &escaped[i..];
            prop_assert!(
                ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"].iter().any(|e| rest.starts_with(e))
            );
        }
    }

    #[test]
    fn array_length_matches_item_count(items in prop::collection::vec(any::<i32>(), 0..32)) {
        let doc = to_document(&Value::from(items.clone()));
        let parsed = roxmltree::Document::parse(&doc).unwrap();
        let children: Vec<_> = parsed.root_element().children().filter(|n| n.is_element()).collect();
        prop_assert_eq!(children.len(), items.len());
        for (node, item) in children.iter().zip(&items) {
            prop_assert_eq!(node.tag_name().name(), "item");
            prop_assert_eq!(node.text().unwrap(), item.to_string());
        }
    }
}

#[test]
fn test_object_order_follows_insertion() {
    let mut map = Map::new();
    map.insert("k2".to_string(), json!(2));
    map.insert("k1".to_string(), json!(1));
    map.insert("k3".to_string(), json!(null));

    assert_eq!(
        encode_value(&Value::Object(map)),
        "<k2>2</k2><k1>1</k1><k3/>"
    );
}

#[test]
fn test_mixed_document() {
    let value = json!({
        "name": "Widget <Pro>",
        "price": 9.99,
        "tags": ["a", "b"],
        "stock": null,
        "dims": {"w": 1, "h": 2},
        "": false
    });

    assert_eq!(
        to_document(&value),
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?><root>"#,
            "<name>Widget &lt;Pro&gt;</name>",
            "<price>9.99</price>",
            "<tags><item>a</item><item>b</item></tags>",
            "<stock/>",
            "<dims><w>1</w><h>2</h></dims>",
            "<empty_key>false</empty_key>",
            "</root>"
        )
    );
}

#[test]
fn test_nested_arrays() {
    assert_eq!(
        encode_value(&json!([[1, 2], [], [null]])),
        "<item><item>1</item><item>2</item></item><item></item><item><item/></item>"
    );
}
