//! Fuzz target for inbound host message decoding
//!
//! # Strategy
//!
//! - Random text: arbitrary UTF-8 lines
//! - Deeply nested: `Update` payloads nested to arbitrary depth
//! - Shape confusion: known tags with payloads of the wrong JSON type
//! - Structured updates: well-formed snapshots with arbitrary field values
//!
//! # Invariants
//!
//! - Decoding NEVER panics
//! - Anything that decodes re-encodes and decodes to the same message

#![no_main]

use arbitrary::Arbitrary;
use kana_app::HostMessage;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Attack {
    RandomText(String),
    DeeplyNested { depth: u8 },
    ShapeConfusion { tag: Tag, payload: Payload },
    Update { page: u8, word: String, hits: u32, misses: u32, answer_time_ms: u64 },
}

#[derive(Debug, Arbitrary)]
enum Tag {
    Refresh,
    Update,
    Other(String),
}

#[derive(Debug, Arbitrary)]
enum Payload {
    Null,
    Bool(bool),
    Number(i64),
    Text(String),
    Array(Vec<u8>),
}

fuzz_target!(|attack: Attack| {
    let raw = match attack {
        Attack::RandomText(text) => text,
        Attack::DeeplyNested { depth } => {
            let depth = depth as usize;
            format!("{}{}{}", r#"{"Update":"#.repeat(depth), "null", "}".repeat(depth))
        }
        Attack::ShapeConfusion { tag, payload } => {
            let tag = match tag {
                Tag::Refresh => "Refresh".to_owned(),
                Tag::Update => "Update".to_owned(),
                Tag::Other(name) => name,
            };
            let payload = match payload {
                Payload::Null => serde_json::Value::Null,
                Payload::Bool(b) => b.into(),
                Payload::Number(n) => n.into(),
                Payload::Text(s) => s.into(),
                Payload::Array(items) => items.into(),
            };
            let mut object = serde_json::Map::new();
            object.insert(tag, payload);
            serde_json::Value::Object(object).to_string()
        }
        Attack::Update { page, word, hits, misses, answer_time_ms } => {
            let page = ["Start", "Training", "Summary", "Bogus"][(page % 4) as usize];
            serde_json::json!({ "Update": {
                "page": page, "word": word, "hits": hits, "misses": misses,
                "answer_time_ms": answer_time_ms,
            }})
            .to_string()
        }
    };

    if let Ok(message) = HostMessage::decode(&raw) {
        let line = message.encode().expect("decoded message must encode");
        let again = HostMessage::decode(&line).expect("encoded message must decode");
        assert_eq!(again, message);
    }
});
