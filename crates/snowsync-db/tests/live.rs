//! Live integration tests for snowsync-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/snowsync-db/`), so `"../../migrations"` resolves to the workspace
//! migration directory.

use snowsync_core::ResortRecord;
use snowsync_db::{get_report, list_reports, replace_report};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record(name: &str, yesterday: Option<i32>) -> ResortRecord {
    ResortRecord {
        name: name.to_string(),
        snowfall_past: [Some(0), Some(2), None, Some(11), Some(4), yesterday],
        snowfall_forecast: [Some(1), Some(0), Some(0), None, Some(6), Some(3)],
        mid_mountain_snow: Some(52),
        lifts_open: Some("5/8 Lifts Open".to_string()),
        runs_open: Some("20/35 Runs Open".to_string()),
    }
}

async fn count_rows_named(pool: &sqlx::PgPool, name: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resort_reports WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("count query should succeed")
}

// ---------------------------------------------------------------------------
// replace_report
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn replace_inserts_a_row_when_none_exists(pool: sqlx::PgPool) {
    replace_report(&pool, &record("Alta", Some(7)))
        .await
        .expect("replace should succeed");

    let row = get_report(&pool, "Alta")
        .await
        .expect("get should succeed")
        .expect("row should exist");
    assert_eq!(row.snowfall_1_day_ago, Some(7));
    assert_eq!(row.mid_mountain_snow, Some(52));
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_leaves_exactly_one_row_per_name(pool: sqlx::PgPool) {
    replace_report(&pool, &record("Alta", Some(7)))
        .await
        .expect("first replace should succeed");
    replace_report(&pool, &record("Alta", Some(9)))
        .await
        .expect("second replace should succeed");

    assert_eq!(count_rows_named(&pool, "Alta").await, 1);

    let row = get_report(&pool, "Alta")
        .await
        .expect("get should succeed")
        .expect("row should exist");
    assert_eq!(row.snowfall_1_day_ago, Some(9), "newer run must win");
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_does_not_merge_prior_fields(pool: sqlx::PgPool) {
    replace_report(&pool, &record("Alta", Some(7)))
        .await
        .expect("first replace should succeed");

    // Second run knows less: depth and lifts are unknown this time.
    let mut sparse = record("Alta", None);
    sparse.mid_mountain_snow = None;
    sparse.lifts_open = None;
    replace_report(&pool, &sparse)
        .await
        .expect("second replace should succeed");

    let row = get_report(&pool, "Alta")
        .await
        .expect("get should succeed")
        .expect("row should exist");
    assert_eq!(row.mid_mountain_snow, None, "prior depth must not survive");
    assert_eq!(row.lifts_open, None, "prior lift status must not survive");
    assert_eq!(row.snowfall_1_day_ago, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn replace_for_one_resort_leaves_others_alone(pool: sqlx::PgPool) {
    replace_report(&pool, &record("Alta", Some(7)))
        .await
        .expect("replace should succeed");
    replace_report(&pool, &record("Snowbird", Some(3)))
        .await
        .expect("replace should succeed");

    replace_report(&pool, &record("Alta", Some(12)))
        .await
        .expect("replace should succeed");

    let snowbird = get_report(&pool, "Snowbird")
        .await
        .expect("get should succeed")
        .expect("row should exist");
    assert_eq!(snowbird.snowfall_1_day_ago, Some(3));
}

// ---------------------------------------------------------------------------
// get_report / list_reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn get_report_returns_none_for_unknown_resort(pool: sqlx::PgPool) {
    let row = get_report(&pool, "Nowhere").await.expect("get should succeed");
    assert!(row.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_reports_orders_by_name(pool: sqlx::PgPool) {
    replace_report(&pool, &record("Snowbird", Some(3)))
        .await
        .expect("replace should succeed");
    replace_report(&pool, &record("Alta", Some(7)))
        .await
        .expect("replace should succeed");
    replace_report(&pool, &record("Brighton", Some(0)))
        .await
        .expect("replace should succeed");

    let names: Vec<String> = list_reports(&pool)
        .await
        .expect("list should succeed")
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, ["Alta", "Brighton", "Snowbird"]);
}
