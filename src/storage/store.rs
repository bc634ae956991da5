// src/storage/store.rs — SQLite operations

use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Low-level SQLite operations for lessons, patterns, and feedback.
pub struct Store {
    conn: Connection,
}

const PATTERN_COLUMNS: &str =
    "id, pattern_type, canonical_key, payload, avg_success, usage_count, first_seen, last_seen";

impl Store {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    // -- Lessons --

    pub fn insert_lesson(&self, id: &str, title: &str, content: &str) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO lessons (id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![id, title, content, now],
        )?;
        Ok(())
    }

    pub fn update_lesson_content(&self, id: &str, content: &str) -> anyhow::Result<bool> {
        let now = Utc::now().to_rfc3339();
        let changed = self.conn.execute(
            "UPDATE lessons SET content = ?1, updated_at = ?2 WHERE id = ?3",
            params![content, now, id],
        )?;
        Ok(changed > 0)
    }

    pub fn get_lesson(&self, id: &str) -> anyhow::Result<Option<LessonRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, content, created_at, updated_at FROM lessons WHERE id = ?1",
        )?;

        let mut rows = stmt.query_map(params![id], |row| {
            Ok(LessonRow {
                id: row.get(0)?,
                title: row.get(1)?,
                content: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    // -- Patterns --

    /// Register a pattern occurrence in a lesson.
    ///
    /// Creates the pattern row if this (type, canonical key) pair has never
    /// been seen, then links it to the lesson. Idempotent per lesson; stats
    /// are untouched — only feedback folds move them.
    pub fn associate_pattern(
        &self,
        lesson_id: &str,
        pattern_type: &str,
        canonical_key: &str,
        payload: &str,
    ) -> anyhow::Result<String> {
        let now = Utc::now().to_rfc3339();
        let candidate_id = Uuid::new_v4().to_string();

        self.conn.execute(
            "INSERT INTO patterns (id, pattern_type, canonical_key, payload,
             avg_success, usage_count, first_seen, last_seen)
             VALUES (?1, ?2, ?3, ?4, 0, 0, ?5, ?5)
             ON CONFLICT(pattern_type, canonical_key) DO UPDATE SET last_seen = ?5",
            params![candidate_id, pattern_type, canonical_key, payload, now],
        )?;

        let pattern_id: String = self.conn.query_row(
            "SELECT id FROM patterns WHERE pattern_type = ?1 AND canonical_key = ?2",
            params![pattern_type, canonical_key],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT OR IGNORE INTO lesson_patterns (lesson_id, pattern_id, created_at)
             VALUES (?1, ?2, ?3)",
            params![lesson_id, pattern_id, now],
        )?;

        Ok(pattern_id)
    }

    pub fn get_pattern_stats(
        &self,
        pattern_type: &str,
        canonical_key: &str,
    ) -> anyhow::Result<Option<PatternStatsRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT avg_success, usage_count FROM patterns
             WHERE pattern_type = ?1 AND canonical_key = ?2",
        )?;

        let mut rows = stmt.query_map(params![pattern_type, canonical_key], |row| {
            Ok(PatternStatsRow {
                avg_success: row.get(0)?,
                usage_count: row.get(1)?,
            })
        })?;

        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// Fold one success score into a pattern's running average.
    ///
    /// Single upsert statement so avg_success and usage_count can never
    /// diverge, even under concurrent submissions.
    pub fn record_pattern_success(
        &self,
        pattern_type: &str,
        canonical_key: &str,
        payload: &str,
        score: f64,
    ) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        let candidate_id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO patterns (id, pattern_type, canonical_key, payload,
             avg_success, usage_count, first_seen, last_seen)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)
             ON CONFLICT(pattern_type, canonical_key) DO UPDATE SET
                avg_success = (avg_success * usage_count + ?5) / (usage_count + 1),
                usage_count = usage_count + 1,
                last_seen = ?6",
            params![candidate_id, pattern_type, canonical_key, payload, score, now],
        )?;
        Ok(())
    }

    pub fn list_patterns_for_lesson(&self, lesson_id: &str) -> anyhow::Result<Vec<PatternRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM patterns
             WHERE id IN (SELECT pattern_id FROM lesson_patterns WHERE lesson_id = ?1)
             ORDER BY first_seen"
        ))?;

        let rows = stmt.query_map(params![lesson_id], pattern_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    /// Method-combination patterns opening with the given method, with enough
    /// observations to be statistically meaningful.
    pub fn query_method_patterns_leading(
        &self,
        first_method: &str,
        min_count: u32,
        limit: u32,
    ) -> anyhow::Result<Vec<PatternRow>> {
        self.query_patterns_by_lead(
            "method_combination",
            "$.first_method",
            first_method,
            min_count,
            limit,
        )
    }

    /// Content-relationship patterns opening with the given content block.
    pub fn query_content_patterns_leading(
        &self,
        first_content: &str,
        min_count: u32,
        limit: u32,
    ) -> anyhow::Result<Vec<PatternRow>> {
        self.query_patterns_by_lead(
            "content_relationship",
            "$.first_content",
            first_content,
            min_count,
            limit,
        )
    }

    fn query_patterns_by_lead(
        &self,
        pattern_type: &str,
        lead_path: &str,
        lead_value: &str,
        min_count: u32,
        limit: u32,
    ) -> anyhow::Result<Vec<PatternRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM patterns
             WHERE pattern_type = ?1
               AND json_extract(payload, ?2) = ?3
               AND usage_count >= ?4
             ORDER BY avg_success DESC LIMIT ?5"
        ))?;

        let rows = stmt.query_map(
            params![pattern_type, lead_path, lead_value, min_count, limit],
            pattern_row,
        )?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    pub fn query_detected_patterns(&self) -> anyhow::Result<Vec<PatternRow>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PATTERN_COLUMNS} FROM patterns
             ORDER BY avg_success DESC, usage_count DESC"
        ))?;

        let rows = stmt.query_map([], pattern_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    // -- Feedback --

    #[allow(clippy::too_many_arguments)]
    pub fn insert_feedback(
        &self,
        id: &str,
        lesson_id: &str,
        success: f64,
        engagement: f64,
        comprehension: f64,
        timing: f64,
        success_score: f64,
    ) -> anyhow::Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO feedback (id, lesson_id, success, engagement, comprehension,
             timing, success_score, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                lesson_id,
                success,
                engagement,
                comprehension,
                timing,
                success_score,
                now
            ],
        )?;
        Ok(())
    }

    pub fn count_feedback_for_lesson(&self, lesson_id: &str) -> anyhow::Result<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM feedback WHERE lesson_id = ?1",
            params![lesson_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Get a reference to the underlying connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

fn pattern_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatternRow> {
    Ok(PatternRow {
        id: row.get(0)?,
        pattern_type: row.get(1)?,
        canonical_key: row.get(2)?,
        payload: row.get(3)?,
        avg_success: row.get(4)?,
        usage_count: row.get(5)?,
        first_seen: row.get(6)?,
        last_seen: row.get(7)?,
    })
}

// -- Row types --

#[derive(Debug, Clone)]
pub struct LessonRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct PatternRow {
    pub id: String,
    pub pattern_type: String,
    pub canonical_key: String,
    pub payload: String,
    pub avg_success: f64,
    pub usage_count: i64,
    pub first_seen: String,
    pub last_seen: String,
}

impl PatternRow {
    /// Extract a string field from the stored payload JSON.
    pub fn payload_field(&self, field: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.payload).ok()?;
        value.get(field)?.as_str().map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PatternStatsRow {
    pub avg_success: f64,
    pub usage_count: i64,
}
