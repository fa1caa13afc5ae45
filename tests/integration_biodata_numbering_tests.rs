/*!
 * Biodata Numbering Integration Tests
 *
 * Concurrent biodata creation against a real PostgreSQL instance:
 * - distinct users always receive distinct, gap-free numbers
 * - racing requests for one user produce a single record
 */

use futures::future::join_all;
use serde_json::{json, Value};
use std::collections::BTreeSet;

use wedlock::db::BiodataFilter;
use wedlock::models::{BiodataWriteOutcome, Fields};
use wedlock::test_utils::TestContext;

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::test]
async fn concurrent_creations_get_unique_sequential_numbers() {
    let ctx = TestContext::new().await;
    let db = ctx.db();

    let writes = (0..20).map(|i| {
        let user_id = format!("user-{}", i);
        async move {
            db.upsert_biodata(&user_id, fields(json!({"userId": &user_id, "age": 20 + i})))
                .await
        }
    });
    let outcomes = join_all(writes).await;

    let numbers: BTreeSet<i64> = outcomes
        .into_iter()
        .map(|outcome| match outcome.expect("biodata write failed") {
            BiodataWriteOutcome::Inserted(result) => result.biodata_id.expect("number assigned"),
            BiodataWriteOutcome::Updated(_) => panic!("fresh users must be inserted"),
        })
        .collect();

    assert_eq!(numbers, (1..=20).collect::<BTreeSet<i64>>());

    let stored = db.list_biodatas(&BiodataFilter::default()).await.unwrap();
    let stored: Vec<i64> = stored
        .iter()
        .map(|b| b.get("biodataId").and_then(Value::as_i64).unwrap())
        .collect();
    assert_eq!(stored, (1..=20).collect::<Vec<i64>>());

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn racing_requests_for_one_user_create_one_record() {
    let ctx = TestContext::new().await;
    let db = ctx.db();

    let writes = (0..8).map(|i| async move {
        db.upsert_biodata("same-user", fields(json!({"userId": "same-user", "attempt": i})))
            .await
    });
    let outcomes: Vec<BiodataWriteOutcome> = join_all(writes)
        .await
        .into_iter()
        .map(|o| o.expect("biodata write failed"))
        .collect();

    let inserted = outcomes
        .iter()
        .filter(|o| matches!(o, BiodataWriteOutcome::Inserted(_)))
        .count();
    assert_eq!(inserted, 1);
    assert!(outcomes.iter().all(|o| match o {
        BiodataWriteOutcome::Inserted(r) => r.biodata_id == Some(1),
        BiodataWriteOutcome::Updated(u) => u.matched_count == 1,
    }));

    let stored = db.list_biodatas(&BiodataFilter::default()).await.unwrap();
    assert_eq!(stored.len(), 1);

    // the rolled-back attempts did not consume numbers
    let next = db
        .upsert_biodata("another-user", fields(json!({"userId": "another-user"})))
        .await
        .unwrap();
    match next {
        BiodataWriteOutcome::Inserted(result) => assert_eq!(result.biodata_id, Some(2)),
        other => panic!("expected insert, got {:?}", other),
    }

    ctx.cleanup_and_close().await;
}

#[tokio::test]
async fn concurrent_user_registration_keeps_one_account() {
    let ctx = TestContext::new().await;

    let registrations = (0..10).map(|i| {
        ctx.post(
            "/users",
            json!({"email": "popular@example.com", "attempt": i}),
        )
    });
    let responses = join_all(registrations).await;

    let created = responses
        .iter()
        .filter(|(_, body)| body["insertedId"].is_string())
        .count();
    assert_eq!(created, 1);
    assert!(responses
        .iter()
        .filter(|(_, body)| body["insertedId"].is_null())
        .all(|(_, body)| body["message"] == json!("User already exists")));

    let (_, users) = ctx.get("/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);

    ctx.cleanup_and_close().await;
}
