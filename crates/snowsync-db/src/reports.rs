//! Database operations for the `resort_reports` table.

use snowsync_core::ResortRecord;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `resort_reports` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ResortReportRow {
    pub name: String,
    pub snowfall_6_days_ago: Option<i32>,
    pub snowfall_5_days_ago: Option<i32>,
    pub snowfall_4_days_ago: Option<i32>,
    pub snowfall_3_days_ago: Option<i32>,
    pub snowfall_2_days_ago: Option<i32>,
    pub snowfall_1_day_ago: Option<i32>,
    pub snowfall_forecast_today: Option<i32>,
    pub snowfall_forecast_1_day: Option<i32>,
    pub snowfall_forecast_2_days: Option<i32>,
    pub snowfall_forecast_3_days: Option<i32>,
    pub snowfall_forecast_4_days: Option<i32>,
    pub snowfall_forecast_5_days: Option<i32>,
    pub mid_mountain_snow: Option<i32>,
    pub lifts_open: Option<String>,
    pub runs_open: Option<String>,
}

impl From<ResortReportRow> for ResortRecord {
    fn from(row: ResortReportRow) -> Self {
        ResortRecord {
            name: row.name,
            snowfall_past: [
                row.snowfall_6_days_ago,
                row.snowfall_5_days_ago,
                row.snowfall_4_days_ago,
                row.snowfall_3_days_ago,
                row.snowfall_2_days_ago,
                row.snowfall_1_day_ago,
            ],
            snowfall_forecast: [
                row.snowfall_forecast_today,
                row.snowfall_forecast_1_day,
                row.snowfall_forecast_2_days,
                row.snowfall_forecast_3_days,
                row.snowfall_forecast_4_days,
                row.snowfall_forecast_5_days,
            ],
            mid_mountain_snow: row.mid_mountain_snow,
            lifts_open: row.lifts_open,
            runs_open: row.runs_open,
        }
    }
}

const ALL_COLUMNS: &str = "name, snowfall_6_days_ago, snowfall_5_days_ago, snowfall_4_days_ago, \
     snowfall_3_days_ago, snowfall_2_days_ago, snowfall_1_day_ago, \
     snowfall_forecast_today, snowfall_forecast_1_day, snowfall_forecast_2_days, \
     snowfall_forecast_3_days, snowfall_forecast_4_days, snowfall_forecast_5_days, \
     mid_mountain_snow, lifts_open, runs_open";

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Replaces the stored report for `record.name`: delete any existing row for
/// that key, then insert the new row, inside one transaction.
///
/// Replace, not merge — no field from a prior run survives. Because both
/// statements share a transaction, a failed insert rolls back the delete and
/// leaves the previous row intact.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the transaction cannot be started or either
/// statement fails.
pub async fn replace_report(pool: &PgPool, record: &ResortRecord) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM resort_reports WHERE name = $1")
        .bind(&record.name)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO resort_reports \
             (name, snowfall_6_days_ago, snowfall_5_days_ago, snowfall_4_days_ago, \
              snowfall_3_days_ago, snowfall_2_days_ago, snowfall_1_day_ago, \
              snowfall_forecast_today, snowfall_forecast_1_day, snowfall_forecast_2_days, \
              snowfall_forecast_3_days, snowfall_forecast_4_days, snowfall_forecast_5_days, \
              mid_mountain_snow, lifts_open, runs_open) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind(&record.name)
    .bind(record.snowfall_past[0])
    .bind(record.snowfall_past[1])
    .bind(record.snowfall_past[2])
    .bind(record.snowfall_past[3])
    .bind(record.snowfall_past[4])
    .bind(record.snowfall_past[5])
    .bind(record.snowfall_forecast[0])
    .bind(record.snowfall_forecast[1])
    .bind(record.snowfall_forecast[2])
    .bind(record.snowfall_forecast[3])
    .bind(record.snowfall_forecast[4])
    .bind(record.snowfall_forecast[5])
    .bind(record.mid_mountain_snow)
    .bind(record.lifts_open.as_deref())
    .bind(record.runs_open.as_deref())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Returns the stored report for one resort, or `None` if absent.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_report(pool: &PgPool, name: &str) -> Result<Option<ResortReportRow>, DbError> {
    let row = sqlx::query_as::<_, ResortReportRow>(&format!(
        "SELECT {ALL_COLUMNS} FROM resort_reports WHERE name = $1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns all stored reports, ordered by resort name.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reports(pool: &PgPool) -> Result<Vec<ResortReportRow>, DbError> {
    let rows = sqlx::query_as::<_, ResortReportRow>(&format!(
        "SELECT {ALL_COLUMNS} FROM resort_reports ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
