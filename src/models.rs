use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type HabitId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitListItem {
    pub id: HabitId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checked: bool,
    /// Negative habit: unchecking it records a failure and drops it from the list.
    #[serde(default)]
    pub is_default_made: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kpi<'a> {
    pub name: &'a str,
    pub higher_is_better: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorIntensity {
    Medium,
    High,
    // Must stay last: unknown strings fall back here.
    #[default]
    #[serde(other)]
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiDataPoint {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub kpi_name: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub exponential_moving_average: Option<f64>,
    #[serde(default)]
    pub trend_direction: Option<String>,
    #[serde(default)]
    pub color_intensity: Option<ColorIntensity>,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
}

impl KpiDataPoint {
    pub fn new(date: NaiveDate, value: Option<f64>, ema: Option<f64>) -> Self {
        Self {
            id: None,
            kpi_name: None,
            date,
            value,
            exponential_moving_average: ema,
            trend_direction: None,
            color_intensity: None,
            higher_is_better: None,
        }
    }

    pub fn with_intensity(mut self, intensity: ColorIntensity) -> Self {
        self.color_intensity = Some(intensity);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub key: HabitId,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

/// On-disk form of the board.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardSnapshot {
    pub items: Vec<HabitListItem>,
    #[serde(default)]
    pub streaks: BTreeMap<HabitId, u32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub checked: bool,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct KpiDataForm {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub higher_is_better: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardItemView {
    pub id: HabitId,
    pub name: String,
    pub checked: bool,
    pub is_default_made: bool,
    pub position: usize,
    pub streak: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub total: usize,
    pub checked_count: usize,
    pub items: Vec<BoardItemView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HabitStatus {
    ActiveCompleted,
    ActiveIncomplete,
    Inactive,
}

/// One day of the backend's history table. Map keys look like `Pair(key=<name>, value=<id>)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    pub date: NaiveDate,
    #[serde(default)]
    pub habits: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub habit_statuses: Option<BTreeMap<String, HabitStatus>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryUpdateRequest {
    pub date: NaiveDate,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryUpdateResponse {
    pub habit_id: HabitId,
    pub date: NaiveDate,
    pub checked: bool,
    pub applied: bool,
}
