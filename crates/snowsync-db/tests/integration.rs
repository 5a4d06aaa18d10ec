//! Offline unit tests for snowsync-db pool configuration, row conversion,
//! and error classification. These tests do not require a live database.

use std::path::PathBuf;

use snowsync_core::{AppConfig, Environment, ResortRecord};
use snowsync_db::{DbError, PoolConfig, ResortReportRow};

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        resorts_path: PathBuf::from("./config/resorts.yaml"),
        render_url: "http://localhost:8787".to_string(),
        render_api_key: None,
        model_base_url: "http://localhost:4000".to_string(),
        model_api_key: "key".to_string(),
        model_id: "gpt-4o-mini".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        fetch_timeout_secs: 90,
        fetch_user_agent: "ua".to_string(),
        model_timeout_secs: 60,
        batch_size: 3,
        inter_batch_delay_ms: 2000,
        max_retries: 2,
        retry_backoff_base_secs: 2,
        store_failure_limit: 3,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn pool_config_default_values() {
    let pool_config = PoolConfig::default();
    assert_eq!(pool_config.max_connections, 10);
    assert_eq!(pool_config.min_connections, 1);
    assert_eq!(pool_config.acquire_timeout_secs, 10);
}

#[test]
fn row_converts_into_record_preserving_day_order() {
    let row = ResortReportRow {
        name: "Alta".to_string(),
        snowfall_6_days_ago: Some(0),
        snowfall_5_days_ago: Some(2),
        snowfall_4_days_ago: None,
        snowfall_3_days_ago: Some(11),
        snowfall_2_days_ago: Some(4),
        snowfall_1_day_ago: Some(0),
        snowfall_forecast_today: Some(1),
        snowfall_forecast_1_day: None,
        snowfall_forecast_2_days: Some(0),
        snowfall_forecast_3_days: Some(3),
        snowfall_forecast_4_days: Some(6),
        snowfall_forecast_5_days: Some(0),
        mid_mountain_snow: Some(52),
        lifts_open: Some("5/8 Lifts Open".to_string()),
        runs_open: None,
    };

    let record: ResortRecord = row.into();
    assert_eq!(record.name, "Alta");
    assert_eq!(
        record.snowfall_past,
        [Some(0), Some(2), None, Some(11), Some(4), Some(0)]
    );
    assert_eq!(
        record.snowfall_forecast,
        [Some(1), None, Some(0), Some(3), Some(6), Some(0)]
    );
    assert_eq!(record.mid_mountain_snow, Some(52));
    assert_eq!(record.lifts_open.as_deref(), Some("5/8 Lifts Open"));
    assert_eq!(record.runs_open, None);
}

#[test]
fn connectivity_errors_are_unreachable() {
    let err = DbError::from(sqlx::Error::PoolTimedOut);
    assert!(err.is_unreachable());

    let err = DbError::from(sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    )));
    assert!(err.is_unreachable());
}

#[test]
fn row_level_errors_are_not_unreachable() {
    let err = DbError::from(sqlx::Error::RowNotFound);
    assert!(!err.is_unreachable());
}
