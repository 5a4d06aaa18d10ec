//! The fixed extraction instruction sent with every report.
//!
//! The schema is spelled out key by key so the backend has no latitude over
//! shape; everything it returns is still re-validated in [`crate::response`].

pub(crate) const SYSTEM_PROMPT: &str =
    "You are a careful assistant that extracts ski resort conditions from snow report text.";

/// Builds the user prompt: the 16-key schema description plus the report text.
///
/// Snowfall and depth values must come back as JSON numbers (text numbers
/// converted to digits), lift and run status as free-form text, and anything
/// the report does not state as null — never zero.
#[must_use]
pub fn build_user_prompt(report_text: &str) -> String {
    format!(
        r#"Extract the following information from this ski resort snow report. Return numbers for snowfall and snow depth (convert text numbers to digits), but keep lift and run status as text. Use null for any value the report does not state — never substitute zero for a missing value.

1. Resort name (text)
2. Snowfall in inches for each of the last 6 days
3. Forecasted snowfall in inches for today and the next 5 days
4. Mid mountain snow depth in inches
5. Lifts open (keep as text, e.g. "5/8 Lifts Open")
6. Runs open (keep as text, e.g. "20/35 Runs Open")

Report: {report_text}

Respond with a single JSON object with exactly these keys:
{{
    "resort_name": "text",
    "snowfall_6_days_ago": number,
    "snowfall_5_days_ago": number,
    "snowfall_4_days_ago": number,
    "snowfall_3_days_ago": number,
    "snowfall_2_days_ago": number,
    "snowfall_1_day_ago": number,
    "snowfall_forecast_today": number,
    "snowfall_forecast_1_day": number,
    "snowfall_forecast_2_days": number,
    "snowfall_forecast_3_days": number,
    "snowfall_forecast_4_days": number,
    "snowfall_forecast_5_days": number,
    "mid_mountain_snow": number,
    "lifts_open": "text",
    "runs_open": "text"
}}"#
    )
}
