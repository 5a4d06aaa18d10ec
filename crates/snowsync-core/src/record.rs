use serde::{Deserialize, Serialize};

/// Days of snowfall history and forecast carried by every report.
pub const SNOW_WINDOW_DAYS: usize = 6;

/// The structured snapshot of one resort's snowfall and operational status.
///
/// `name` always comes from the configured target, never from page content,
/// so each pipeline item touches a disjoint store key. Unknown values are
/// explicit `None`s — a missing measurement is never coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResortRecord {
    pub name: String,
    /// Snowfall in inches for days -6..-1 relative to the run, oldest first.
    pub snowfall_past: [Option<i32>; SNOW_WINDOW_DAYS],
    /// Forecasted snowfall in inches for today..+5 days.
    pub snowfall_forecast: [Option<i32>; SNOW_WINDOW_DAYS],
    /// Mid-mountain snow depth in inches.
    pub mid_mountain_snow: Option<i32>,
    /// Free-form lift status, e.g. "5/8 Lifts Open".
    pub lifts_open: Option<String>,
    /// Free-form run status, e.g. "20/35 Runs Open".
    pub runs_open: Option<String>,
}
