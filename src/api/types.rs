// src/api/types.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::learning::feedback::FeedbackInput;

/// Request body for creating a lesson.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLessonRequest {
    pub title: String,
    /// Block array; stored verbatim and tokenized at analysis time.
    pub content: Value,
}

/// Response for lesson creation.
#[derive(Debug, Serialize)]
pub struct LessonCreatedResponse {
    pub lesson_id: String,
    pub status: String,
}

/// Request body for replacing a lesson's content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLessonRequest {
    pub content: Value,
}

/// Response for a lesson content update.
#[derive(Debug, Serialize)]
pub struct LessonUpdatedResponse {
    pub lesson_id: String,
    pub status: String,
}

/// Request body for suggestion retrieval: the in-progress editing buffer.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionRequest {
    pub content: Value,
}

/// Request body for feedback submission.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackRequest {
    pub lesson_id: String,
    #[serde(flatten)]
    pub ratings: FeedbackInput,
}

/// Acknowledgement for a recorded feedback submission.
#[derive(Debug, Serialize)]
pub struct FeedbackAckResponse {
    pub lesson_id: String,
    pub success_score: f64,
    /// Submissions recorded for this lesson so far, this one included.
    pub feedback_total: i64,
    pub status: String,
}

/// One stored pattern in API form.
#[derive(Debug, Serialize)]
pub struct PatternBody {
    pub id: String,
    pub kind: String,
    pub payload: Value,
    pub avg_success: f64,
    pub usage_count: i64,
    pub first_seen: String,
    pub last_seen: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
