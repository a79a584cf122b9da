//! Trend classification of KPI data points against their exponential moving average.

use crate::models::{ColorIntensity, Kpi, KpiDataPoint};
use serde::Serialize;

pub const NEUTRAL_COLOR: &str = "#6c757d";

const GOOD_HIGH: &str = "#28a745";
const GOOD_MEDIUM: &str = "#40c057";
const GOOD_LOW: &str = "#69db7c";
const BAD_HIGH: &str = "#dc3545";
const BAD_MEDIUM: &str = "#e74c3c";
const BAD_LOW: &str = "#f8d7da";

/// Below this relative deviation (in percent) a point reads as stable.
const STABLE_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendClass {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: String,
    pub class: TrendClass,
    pub is_good: bool,
    pub color: &'static str,
}

impl Classification {
    fn no_trend() -> Self {
        Self {
            label: "No trend".to_string(),
            class: TrendClass::Neutral,
            is_good: false,
            color: NEUTRAL_COLOR,
        }
    }
}

pub fn classify(point: &KpiDataPoint, kpi: Kpi<'_>) -> Classification {
    let (Some(value), Some(ema)) = (present(point.value), present(point.exponential_moving_average))
    else {
        return Classification::no_trend();
    };

    let diff = value - ema;
    let percent_change = (diff / ema).abs() * 100.0;
    let is_positive_trend = diff > 0.0;
    let is_good = (kpi.higher_is_better && is_positive_trend)
        || (!kpi.higher_is_better && !is_positive_trend);
    let color = trend_color(is_good, point.color_intensity.unwrap_or_default());

    if percent_change < STABLE_PERCENT {
        return Classification {
            label: "Stable".to_string(),
            class: TrendClass::Neutral,
            is_good,
            color,
        };
    }

    let direction = if is_positive_trend { "Up" } else { "Down" };
    // Ties round up to the next tenth, not to even.
    let tenths = (percent_change * 10.0).round() / 10.0;
    Classification {
        label: format!("{direction} {tenths:.1}%"),
        class: if is_good {
            TrendClass::Positive
        } else {
            TrendClass::Negative
        },
        is_good,
        color,
    }
}

fn trend_color(is_good: bool, intensity: ColorIntensity) -> &'static str {
    match (is_good, intensity) {
        (true, ColorIntensity::High) => GOOD_HIGH,
        (true, ColorIntensity::Medium) => GOOD_MEDIUM,
        (true, ColorIntensity::Low) => GOOD_LOW,
        (false, ColorIntensity::High) => BAD_HIGH,
        (false, ColorIntensity::Medium) => BAD_MEDIUM,
        (false, ColorIntensity::Low) => BAD_LOW,
    }
}

// Zero and NaN count as missing.
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
