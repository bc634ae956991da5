// src/learning/pattern.rs — Pattern model and canonical keys

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kinds of patterns the miner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Two teaching methods used back to back.
    MethodCombination,
    /// Two content blocks used back to back.
    ContentRelationship,
    /// A method tied to a phase of the lesson (opening / core / closing).
    Timing,
}

impl PatternKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MethodCombination => "method_combination",
            Self::ContentRelationship => "content_relationship",
            Self::Timing => "timing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "method_combination" => Some(Self::MethodCombination),
            "content_relationship" => Some(Self::ContentRelationship),
            "timing" => Some(Self::Timing),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate or stored pattern: a kind plus its identifying payload.
///
/// Payload serialization must be canonical: two logically identical patterns
/// built by different code paths have to land on the same stored record.
/// serde_json's default `Map` is BTreeMap-backed, so keys serialize sorted
/// regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub payload: serde_json::Map<String, Value>,
}

impl Pattern {
    pub fn new(kind: PatternKind, payload: serde_json::Map<String, Value>) -> Self {
        Self { kind, payload }
    }

    pub fn method_combination(
        first: &str,
        second: &str,
        context: &serde_json::Map<String, Value>,
    ) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("first_method".into(), Value::String(first.into()));
        payload.insert("second_method".into(), Value::String(second.into()));
        payload.insert("context".into(), Value::Object(context.clone()));
        Self::new(PatternKind::MethodCombination, payload)
    }

    pub fn content_relationship(
        first: &str,
        second: &str,
        context: &serde_json::Map<String, Value>,
    ) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("first_content".into(), Value::String(first.into()));
        payload.insert("second_content".into(), Value::String(second.into()));
        payload.insert("context".into(), Value::Object(context.clone()));
        Self::new(PatternKind::ContentRelationship, payload)
    }

    pub fn timing(method: &str, phase: &str) -> Self {
        let mut payload = serde_json::Map::new();
        payload.insert("method".into(), Value::String(method.into()));
        payload.insert("phase".into(), Value::String(phase.into()));
        Self::new(PatternKind::Timing, payload)
    }

    /// Stable lookup key: the payload serialized with sorted field order.
    pub fn canonical_key(&self) -> String {
        serde_json::to_string(&self.payload).unwrap_or_default()
    }
}

/// Usage statistics for a stored pattern.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PatternStats {
    pub average_success: f64,
    pub usage_count: u64,
}
