// src/learning/extractor.rs — Lesson content → ordered token sequence

use serde::Deserialize;
use serde_json::Value;

/// Token classes that drive pattern mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A teaching method block (e.g. worked_example, think_pair_share).
    Method,
    /// A content block (e.g. an exercise, a reading passage).
    Content,
}

impl TokenKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Method => "method",
            Self::Content => "content",
        }
    }
}

/// One typed block from a lesson body, in original order.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub id: String,
    pub context: serde_json::Map<String, Value>,
}

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type")]
    block_type: String,
    id: String,
    #[serde(default)]
    context: serde_json::Map<String, Value>,
}

/// Parse a lesson content blob into its ordered token sequence.
///
/// Order is preserved: adjacency in the result is what the miner works on.
/// Anything that is not a well-formed method/content block is skipped, and a
/// blob that is not a JSON array yields an empty sequence. Empty is valid —
/// it simply produces no patterns downstream.
pub fn extract_sequence(content: &str) -> Vec<Token> {
    let blocks = match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(blocks)) => blocks,
        Ok(_) | Err(_) => {
            tracing::debug!("lesson content is not a block array, yielding empty sequence");
            return Vec::new();
        }
    };

    blocks
        .into_iter()
        .filter_map(|block| {
            let raw: RawBlock = serde_json::from_value(block).ok()?;
            let kind = match raw.block_type.as_str() {
                "method" => TokenKind::Method,
                "content" => TokenKind::Content,
                _ => return None,
            };
            Some(Token {
                kind,
                id: raw.id,
                context: raw.context,
            })
        })
        .collect()
}
