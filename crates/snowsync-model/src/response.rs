//! Validation of model output into a [`ResortRecord`].
//!
//! The backend's own formatting guarantees are not trusted: every key must be
//! present (explicit null for unknowns), declared-integer fields must arrive
//! as JSON integers or null, and status fields as strings or null. Anything
//! else fails the item — a partial record is never produced.

use serde::Deserialize;
use snowsync_core::ResortRecord;

use crate::error::ParseError;

/// The flat 16-key shape the model is instructed to return.
///
/// Every field is required; serde rejects a missing key outright, which is
/// exactly the contract — "unknown" must be an explicit null, never an
/// omitted key. Quoted numbers and floats fail integer deserialization
/// rather than being coerced.
#[derive(Debug, Deserialize)]
pub struct ReportFields {
    pub resort_name: Option<String>,
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

/// Deserializes and validates raw model output into a [`ResortRecord`].
///
/// `resort_name` is the configured target name and becomes the record key;
/// the model's own `resort_name` key must be present but is not trusted for
/// keying.
///
/// # Errors
///
/// - [`ParseError::MalformedJson`] — content is not JSON, a key is missing,
///   or a field has the wrong type.
/// - [`ParseError::Schema`] — values parse but are out of range (negative
///   snowfall or depth).
pub fn validate_report(resort_name: &str, content: &str) -> Result<ResortRecord, ParseError> {
    let fields: ReportFields =
        serde_json::from_str(content).map_err(|source| ParseError::MalformedJson { source })?;

    fields.into_record(resort_name)
}

impl ReportFields {
    /// Converts validated fields into the domain record keyed by `resort_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Schema`] if any snowfall or depth value is negative.
    pub fn into_record(self, resort_name: &str) -> Result<ResortRecord, ParseError> {
        let snowfall_past = [
            self.snowfall_6_days_ago,
            self.snowfall_5_days_ago,
            self.snowfall_4_days_ago,
            self.snowfall_3_days_ago,
            self.snowfall_2_days_ago,
            self.snowfall_1_day_ago,
        ];
        let snowfall_forecast = [
            self.snowfall_forecast_today,
            self.snowfall_forecast_1_day,
            self.snowfall_forecast_2_days,
            self.snowfall_forecast_3_days,
            self.snowfall_forecast_4_days,
            self.snowfall_forecast_5_days,
        ];

        for (label, value) in [
            ("snowfall history", &snowfall_past),
            ("snowfall forecast", &snowfall_forecast),
        ] {
            if let Some(bad) = value.iter().flatten().find(|v| **v < 0) {
                return Err(ParseError::Schema {
                    reason: format!("{label} contains negative value {bad}"),
                });
            }
        }

        if let Some(depth) = self.mid_mountain_snow {
            if depth < 0 {
                return Err(ParseError::Schema {
                    reason: format!("mid-mountain depth is negative: {depth}"),
                });
            }
        }

        Ok(ResortRecord {
            name: resort_name.to_owned(),
            snowfall_past,
            snowfall_forecast,
            mid_mountain_snow: self.mid_mountain_snow,
            lifts_open: self.lifts_open,
            runs_open: self.runs_open,
        })
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod tests;
