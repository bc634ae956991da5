// tests/store_test.rs — Integration test: SQLite round-trip (store CRUD)

use lessonsmith::learning::pattern::Pattern;
use lessonsmith::storage::schema;
use lessonsmith::storage::store::Store;
use lessonsmith::storage::StorageManager;
use rusqlite::Connection;

fn test_store() -> Store {
    StorageManager::in_memory().unwrap().store
}

fn method_pair(first: &str, second: &str) -> Pattern {
    Pattern::method_combination(first, second, &serde_json::Map::new())
}

#[test]
fn test_insert_and_get_lesson() {
    let store = test_store();

    store
        .insert_lesson("les-1", "Fractions intro", r#"[{"type":"method","id":"recap"}]"#)
        .unwrap();

    let lesson = store.get_lesson("les-1").unwrap().unwrap();
    assert_eq!(lesson.title, "Fractions intro");
    assert!(lesson.content.contains("recap"));

    assert!(store.get_lesson("missing").unwrap().is_none());
}

#[test]
fn test_update_lesson_content() {
    let store = test_store();
    store.insert_lesson("les-1", "Draft", "[]").unwrap();

    let changed = store
        .update_lesson_content("les-1", r#"[{"type":"content","id":"c1"}]"#)
        .unwrap();
    assert!(changed);

    let lesson = store.get_lesson("les-1").unwrap().unwrap();
    assert!(lesson.content.contains("c1"));

    assert!(!store.update_lesson_content("missing", "[]").unwrap());
}

#[test]
fn test_associate_pattern_collapses_duplicates() {
    let store = test_store();
    store.insert_lesson("les-1", "A", "[]").unwrap();
    store.insert_lesson("les-2", "B", "[]").unwrap();

    let pattern = method_pair("recap", "quiz");
    let key = pattern.canonical_key();

    let id_a = store
        .associate_pattern("les-1", pattern.kind.as_str(), &key, &key)
        .unwrap();
    // Same pattern again, same lesson — no new row, no new association
    let id_b = store
        .associate_pattern("les-1", pattern.kind.as_str(), &key, &key)
        .unwrap();
    // Same pattern from a different lesson — same pattern row
    let id_c = store
        .associate_pattern("les-2", pattern.kind.as_str(), &key, &key)
        .unwrap();

    assert_eq!(id_a, id_b);
    assert_eq!(id_a, id_c);

    let pattern_count: i64 = store
        .conn()
        .query_row("SELECT COUNT(*) FROM patterns", [], |row| row.get(0))
        .unwrap();
    assert_eq!(pattern_count, 1);

    let association_count: i64 = store
        .conn()
        .query_row("SELECT COUNT(*) FROM lesson_patterns", [], |row| row.get(0))
        .unwrap();
    assert_eq!(association_count, 2);
}

#[test]
fn test_associations_leave_stats_untouched() {
    let store = test_store();
    store.insert_lesson("les-1", "A", "[]").unwrap();

    let pattern = method_pair("recap", "quiz");
    let key = pattern.canonical_key();
    store
        .associate_pattern("les-1", pattern.kind.as_str(), &key, &key)
        .unwrap();

    let stats = store
        .get_pattern_stats(pattern.kind.as_str(), &key)
        .unwrap()
        .unwrap();
    assert_eq!(stats.usage_count, 0);
    assert_eq!(stats.avg_success, 0.0);
}

#[test]
fn test_record_pattern_success_running_mean() {
    let store = test_store();
    let pattern = method_pair("recap", "quiz");
    let key = pattern.canonical_key();

    store
        .record_pattern_success(pattern.kind.as_str(), &key, &key, 4.0)
        .unwrap();
    store
        .record_pattern_success(pattern.kind.as_str(), &key, &key, 3.0)
        .unwrap();

    let stats = store
        .get_pattern_stats(pattern.kind.as_str(), &key)
        .unwrap()
        .unwrap();
    assert_eq!(stats.usage_count, 2);
    assert!((stats.avg_success - 3.5).abs() < 1e-9);

    // Third fold keeps the mean exact
    store
        .record_pattern_success(pattern.kind.as_str(), &key, &key, 5.0)
        .unwrap();
    let stats = store
        .get_pattern_stats(pattern.kind.as_str(), &key)
        .unwrap()
        .unwrap();
    assert_eq!(stats.usage_count, 3);
    assert!((stats.avg_success - 4.0).abs() < 1e-9);
}

#[test]
fn test_stats_absent_for_unknown_pattern() {
    let store = test_store();
    assert!(store
        .get_pattern_stats("method_combination", "{}")
        .unwrap()
        .is_none());
}

#[test]
fn test_same_key_different_type_is_a_different_record() {
    let store = test_store();

    store
        .record_pattern_success("method_combination", "{\"k\":1}", "{\"k\":1}", 4.0)
        .unwrap();
    store
        .record_pattern_success("content_relationship", "{\"k\":1}", "{\"k\":1}", 2.0)
        .unwrap();

    let a = store
        .get_pattern_stats("method_combination", "{\"k\":1}")
        .unwrap()
        .unwrap();
    let b = store
        .get_pattern_stats("content_relationship", "{\"k\":1}")
        .unwrap()
        .unwrap();
    assert!((a.avg_success - 4.0).abs() < 1e-9);
    assert!((b.avg_success - 2.0).abs() < 1e-9);
}

#[test]
fn test_list_patterns_for_lesson() {
    let store = test_store();
    store.insert_lesson("les-1", "A", "[]").unwrap();
    store.insert_lesson("les-2", "B", "[]").unwrap();

    let p1 = method_pair("recap", "quiz");
    let p2 = method_pair("quiz", "reflection");
    for p in [&p1, &p2] {
        let key = p.canonical_key();
        store
            .associate_pattern("les-1", p.kind.as_str(), &key, &key)
            .unwrap();
    }
    let p3 = method_pair("warmup", "recap");
    let key3 = p3.canonical_key();
    store
        .associate_pattern("les-2", p3.kind.as_str(), &key3, &key3)
        .unwrap();

    let for_lesson_1 = store.list_patterns_for_lesson("les-1").unwrap();
    assert_eq!(for_lesson_1.len(), 2);

    let for_lesson_2 = store.list_patterns_for_lesson("les-2").unwrap();
    assert_eq!(for_lesson_2.len(), 1);
    assert_eq!(
        for_lesson_2[0].payload_field("first_method").as_deref(),
        Some("warmup")
    );

    assert!(store.list_patterns_for_lesson("missing").unwrap().is_empty());
}

#[test]
fn test_query_method_patterns_leading_filters_and_sorts() {
    let store = test_store();

    // Two patterns leading with "recap" (one proven, one not), one leading elsewhere
    let proven = method_pair("recap", "quiz");
    let unproven = method_pair("recap", "reflection");
    let other = method_pair("warmup", "quiz");

    for (p, folds, score) in [(&proven, 4, 4.5), (&unproven, 2, 5.0), (&other, 3, 3.0)] {
        let key = p.canonical_key();
        for _ in 0..folds {
            store
                .record_pattern_success(p.kind.as_str(), &key, &key, score)
                .unwrap();
        }
    }

    let rows = store.query_method_patterns_leading("recap", 3, 25).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payload_field("second_method").as_deref(), Some("quiz"));

    // Lowering the floor surfaces the unproven one too, sorted by average
    let rows = store.query_method_patterns_leading("recap", 1, 25).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].payload_field("second_method").as_deref(),
        Some("reflection")
    );
}

#[test]
fn test_query_content_patterns_leading() {
    let store = test_store();

    let pattern = Pattern::content_relationship("intro", "worksheet", &serde_json::Map::new());
    let key = pattern.canonical_key();
    for _ in 0..3 {
        store
            .record_pattern_success(pattern.kind.as_str(), &key, &key, 4.2)
            .unwrap();
    }

    let rows = store.query_content_patterns_leading("intro", 3, 25).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].payload_field("second_content").as_deref(),
        Some("worksheet")
    );

    assert!(store
        .query_content_patterns_leading("unseen", 3, 25)
        .unwrap()
        .is_empty());
}

#[test]
fn test_insert_feedback_and_count() {
    let store = test_store();
    store.insert_lesson("les-1", "A", "[]").unwrap();

    store
        .insert_feedback("fb-1", "les-1", 4.0, 3.0, 2.0, 5.0, 3.4)
        .unwrap();

    assert_eq!(store.count_feedback_for_lesson("les-1").unwrap(), 1);
    assert_eq!(store.count_feedback_for_lesson("les-2").unwrap(), 0);

    let score: f64 = store
        .conn()
        .query_row(
            "SELECT success_score FROM feedback WHERE id = 'fb-1'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!((score - 3.4).abs() < 1e-9);
}

#[test]
fn test_query_detected_patterns_best_first() {
    let store = test_store();

    for (first, second, score) in [("a", "b", 2.0), ("c", "d", 4.5), ("e", "f", 3.0)] {
        let p = method_pair(first, second);
        let key = p.canonical_key();
        store
            .record_pattern_success(p.kind.as_str(), &key, &key, score)
            .unwrap();
    }

    let patterns = store.query_detected_patterns().unwrap();
    assert_eq!(patterns.len(), 3);
    assert!((patterns[0].avg_success - 4.5).abs() < 1e-9);
    assert!((patterns[2].avg_success - 2.0).abs() < 1e-9);
}

#[test]
fn test_schema_migrations_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    schema::run_migrations(&conn).unwrap();
    schema::run_migrations(&conn).unwrap();

    let count: i32 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='patterns'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_open_on_disk_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("lessonsmith.db");

    {
        let manager = StorageManager::open(&db_path).unwrap();
        manager
            .store
            .insert_lesson("les-1", "Persisted", "[]")
            .unwrap();
    }

    // Reopen and verify the lesson survived
    let manager = StorageManager::open(&db_path).unwrap();
    let lesson = manager.store.get_lesson("les-1").unwrap().unwrap();
    assert_eq!(lesson.title, "Persisted");
}
