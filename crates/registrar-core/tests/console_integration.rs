//! Integration tests for the console: adapters, persistence and the panel
//!
//! These run the full stack (adapter → store → query log → panel) against
//! both the in-memory and the redb-backed stores.

use std::sync::Arc;

use futures::future::join_all;
use registrar_core::{
    Console, ConsoleConfig, CoursePatch, DepartmentDraft, DurationModel, EnrollmentDraft,
    Operation, QueryLogConfig, RegistrarError, StudentDraft, StudentPatch,
};
use serde_json::Value;
use tempfile::TempDir;

fn config() -> ConsoleConfig {
    ConsoleConfig::default().with_query_log(
        QueryLogConfig::default().with_duration(DurationModel::Fixed(1.5)),
    )
}

fn ada() -> StudentDraft {
    StudentDraft {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.edu".into(),
        phone: Some("555-0100".into()),
        department_id: None,
        enrollment_year: Some(2023),
    }
}

// ============================================================================
// Query log through the adapters
// ============================================================================

#[tokio::test]
async fn test_crud_cycle_logs_each_operation() {
    let console = Console::in_memory(config());

    let student = console.students().create(ada()).await.unwrap();
    console.students().fetch_one(&student.id).await.unwrap();
    console
        .students()
        .update(
            &student.id,
            StudentPatch {
                email: Some("ada@lovelace.dev".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    console.students().delete(&student.id).await.unwrap();

    let ops: Vec<Operation> = console
        .logger()
        .get_all()
        .iter()
        .rev()
        .map(|e| e.operation)
        .collect();
    assert_eq!(
        ops,
        vec![
            Operation::Insert,
            Operation::Select,
            Operation::Update,
            Operation::Delete
        ]
    );

    let entries = console.logger().get_all();
    let insert = &entries[3];
    assert_eq!(
        insert.sql,
        "INSERT INTO students (first_name, last_name, email, phone, department_id, enrollment_year) VALUES (?, ?, ?, ?, ?, ?)"
    );
    assert_eq!(insert.params[0], Value::from("Ada"));
    assert_eq!(insert.params[5], Value::from(2023));

    let update = &entries[1];
    assert_eq!(update.sql, "UPDATE students SET email = ? WHERE id = ?");
    assert_eq!(
        update.params,
        vec![Value::from("ada@lovelace.dev"), Value::from(student.id)]
    );
}

#[tokio::test]
async fn test_validation_failure_is_not_logged() {
    let console = Console::in_memory(config());

    let err = console
        .students()
        .create(StudentDraft {
            email: "not-an-email".into(),
            ..ada()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrarError::Validation(_)));
    assert!(console.logger().is_empty());
    assert!(console.panel().is_empty());
}

#[tokio::test]
async fn test_panel_mirrors_and_clears() {
    let console = Console::in_memory(config());
    console.seed_demo().await.unwrap();

    assert_eq!(console.panel().logs(), console.logger().get_all());
    assert_eq!(console.panel().len(), 28);

    console.panel().clear();
    assert!(console.logger().is_empty());
    assert!(console.panel().is_empty());

    console.departments().fetch_all().await.unwrap();
    assert_eq!(console.panel().len(), 1);
    assert_eq!(console.panel().logs()[0].sql, "SELECT * FROM departments");
}

#[tokio::test]
async fn test_default_capacity_bounds_session_log() {
    let console = Console::in_memory(ConsoleConfig::default());
    for _ in 0..120 {
        console.courses().fetch_all().await.unwrap();
    }
    assert_eq!(console.logger().len(), 100);
    assert_eq!(console.panel().len(), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adapter_calls_all_logged() {
    let console = Arc::new(Console::in_memory(
        ConsoleConfig::default()
            .with_query_log(QueryLogConfig::default().with_capacity(500)),
    ));

    let handles = (0..8).map(|i| {
        let console = Arc::clone(&console);
        tokio::spawn(async move {
            for j in 0..10 {
                console
                    .departments()
                    .create(DepartmentDraft {
                        name: format!("Dept {}-{}", i, j),
                        head: None,
                    })
                    .await
                    .unwrap();
            }
        })
    });
    for result in join_all(handles).await {
        result.unwrap();
    }

    assert_eq!(console.logger().len(), 80);
    assert_eq!(console.panel().len(), 80);

    let mut ids: Vec<u64> = console
        .departments()
        .fetch_all()
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    ids.dedup();
    assert_eq!(ids.len(), 80);
}

#[tokio::test]
async fn test_channel_subscriber_receives_adapter_entries() {
    let console = Console::in_memory(config());
    let mut rx = console.logger().subscribe_channel();

    console.departments().fetch_all().await.unwrap();

    let entry = rx.recv().await.unwrap();
    assert_eq!(entry.sql, "SELECT * FROM departments");
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn test_records_persist_but_log_does_not() {
    let dir = TempDir::new().unwrap();

    let student_id = {
        let console = Console::open(dir.path(), config()).unwrap();
        console.seed_demo().await.unwrap();
        let student = console.students().create(ada()).await;
        // ada@example.edu is not part of the demo data
        let student = student.unwrap();
        assert!(!console.logger().is_empty());
        student.id
    };

    let console = Console::open(dir.path(), config()).unwrap();
    assert!(console.logger().is_empty());

    let student = console.students().fetch_one(&student_id).await.unwrap();
    assert_eq!(student.email, "ada@example.edu");

    // Already seeded; nothing new
    assert_eq!(console.seed_demo().await.unwrap(), 0);

    let summary = console.dashboard().await.unwrap();
    assert_eq!(summary.total_students, 7);
    assert_eq!(summary.total_enrollments, 12);
}

#[tokio::test]
async fn test_persistent_conflicts_and_missing_keys() {
    let dir = TempDir::new().unwrap();
    let console = Console::from_config(config().with_data_dir(dir.path())).unwrap();
    console.seed_demo().await.unwrap();
    console.logger().clear();

    let err = console
        .courses()
        .update(
            &"NOPE1".to_string(),
            CoursePatch {
                credits: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = console
        .students()
        .create(StudentDraft {
            email: "ada.lovelace@example.edu".into(),
            ..ada()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrarError::Conflict(_)));

    let enrollment = console
        .enrollments()
        .create(EnrollmentDraft {
            student_id: 1,
            course_code: "MA201".into(),
            grade: None,
        })
        .await
        .unwrap();
    assert_eq!(enrollment.id, 13);

    // Only the successful create was logged
    assert_eq!(console.logger().len(), 1);
}
