// src/api/handlers.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::{types::*, ApiState};
use crate::infra::errors::LessonsmithError;
use crate::learning::engine::AnalysisReport;
use crate::learning::ranker::Suggestion;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(e: LessonsmithError) -> ApiError {
    let status = match &e {
        LessonsmithError::Validation(_) => StatusCode::BAD_REQUEST,
        LessonsmithError::LessonNotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if !e.is_client_error() {
        tracing::error!("request failed: {e}");
    }
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// POST /api/v1/lessons — Store a new lesson.
pub async fn create_lesson(
    State(state): State<ApiState>,
    Json(body): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonCreatedResponse>), ApiError> {
    if body.title.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Lesson title cannot be empty".into(),
            }),
        ));
    }

    let content = body.content.to_string();
    let lesson_id = state
        .engine
        .create_lesson(body.title, content)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(LessonCreatedResponse {
            lesson_id,
            status: "created".into(),
        }),
    ))
}

/// GET /api/v1/lessons/:id — Fetch a stored lesson.
pub async fn get_lesson(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let lesson = state
        .engine
        .get_lesson(id.clone())
        .await
        .map_err(error_response)?
        .ok_or_else(|| error_response(LessonsmithError::LessonNotFound { id }))?;

    Ok(Json(serde_json::json!({
        "lesson_id": lesson.id,
        "title": lesson.title,
        "content": serde_json::from_str::<serde_json::Value>(&lesson.content)
            .unwrap_or(serde_json::Value::Null),
        "created_at": lesson.created_at,
        "updated_at": lesson.updated_at,
    })))
}

/// PUT /api/v1/lessons/:id — Replace a lesson's content after an edit.
pub async fn update_lesson(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateLessonRequest>,
) -> Result<Json<LessonUpdatedResponse>, ApiError> {
    state
        .engine
        .update_lesson(id.clone(), body.content.to_string())
        .await
        .map_err(error_response)?;

    Ok(Json(LessonUpdatedResponse {
        lesson_id: id,
        status: "updated".into(),
    }))
}

/// POST /api/v1/lessons/:id/analyze — Mine the lesson for patterns.
pub async fn analyze_lesson(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = state
        .engine
        .analyze_lesson(id)
        .await
        .map_err(error_response)?;
    Ok(Json(report))
}

/// POST /api/v1/suggestions — Ranked suggestions for the editing buffer.
pub async fn get_suggestions(
    State(state): State<ApiState>,
    Json(body): Json<SuggestionRequest>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let suggestions = state
        .engine
        .suggest(body.content.to_string())
        .await
        .map_err(error_response)?;
    Ok(Json(suggestions))
}

/// POST /api/v1/feedback — Record feedback for a lesson.
pub async fn submit_feedback(
    State(state): State<ApiState>,
    Json(body): Json<FeedbackRequest>,
) -> Result<Json<FeedbackAckResponse>, ApiError> {
    let outcome = state
        .engine
        .submit_feedback(body.lesson_id.clone(), body.ratings)
        .await
        .map_err(error_response)?;

    Ok(Json(FeedbackAckResponse {
        lesson_id: body.lesson_id,
        success_score: outcome.success_score,
        feedback_total: outcome.feedback_total,
        status: "recorded".into(),
    }))
}

/// GET /api/v1/patterns — All stored patterns, best first.
pub async fn list_patterns(
    State(state): State<ApiState>,
) -> Result<Json<Vec<PatternBody>>, ApiError> {
    let rows = state.engine.list_patterns().await.map_err(error_response)?;
    let patterns = rows
        .into_iter()
        .map(|row| PatternBody {
            id: row.id,
            kind: row.pattern_type,
            payload: serde_json::from_str(&row.payload).unwrap_or(serde_json::Value::Null),
            avg_success: row.avg_success,
            usage_count: row.usage_count,
            first_seen: row.first_seen,
            last_seen: row.last_seen,
        })
        .collect();
    Ok(Json(patterns))
}

/// GET /api/v1/health — Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
