//! Chart series for the KPI dashboard, ready for a line-chart renderer.

use crate::models::{Kpi, KpiDataPoint};
use crate::trend::{TrendClass, classify};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub latest: String,
    pub ema: String,
    pub trend: String,
    pub class: TrendClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiChart {
    pub name: String,
    pub higher_is_better: bool,
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub ema: Vec<Option<f64>>,
    pub point_colors: Vec<&'static str>,
    /// Segment into point `i` takes point `i`'s color.
    pub segment_colors: Vec<&'static str>,
    pub fill_colors: Vec<String>,
    pub tooltips: Vec<String>,
    pub summary: Option<KpiSummary>,
}

/// An explicit flag wins, then the first point's flag; an absent flag reads as lower-is-better.
pub fn resolve_direction(points: &[KpiDataPoint], explicit: Option<bool>) -> bool {
    explicit
        .or_else(|| points.first().and_then(|point| point.higher_is_better))
        .unwrap_or(false)
}

pub fn build_chart(name: &str, points: &[KpiDataPoint], higher_is_better: bool) -> KpiChart {
    let kpi = Kpi {
        name,
        higher_is_better,
    };
    let readings: Vec<_> = points.iter().map(|point| classify(point, kpi)).collect();

    let point_colors: Vec<&'static str> = readings.iter().map(|reading| reading.color).collect();
    let mut segment_colors: Vec<&'static str> = point_colors.iter().skip(1).copied().collect();
    if let Some(last) = point_colors.last().copied() {
        segment_colors.push(last);
    }
    let fill_colors = segment_colors.iter().map(|color| format!("{color}20")).collect();

    let tooltips = points
        .iter()
        .zip(&readings)
        .map(|(point, reading)| match point.value {
            Some(value) => format!("Value: {value:.2} ({})", reading.label),
            None => format!("Value: - ({})", reading.label),
        })
        .collect();

    let summary = points.last().zip(readings.last()).map(|(latest, reading)| KpiSummary {
        latest: format_stat(latest.value),
        ema: format_stat(latest.exponential_moving_average),
        trend: reading.label.clone(),
        class: reading.class,
    });

    KpiChart {
        name: name.to_string(),
        higher_is_better,
        labels: points
            .iter()
            .map(|point| point.date.format("%b %-d").to_string())
            .collect(),
        values: points.iter().map(|point| point.value).collect(),
        ema: points
            .iter()
            .map(|point| point.exponential_moving_average)
            .collect(),
        point_colors,
        segment_colors,
        fill_colors,
        tooltips,
        summary,
    }
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => format!("{v:.2}"),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorIntensity;
    use crate::trend::NEUTRAL_COLOR;
    use chrono::NaiveDate;

    fn point(day: u32, value: Option<f64>, ema: Option<f64>) -> KpiDataPoint {
        KpiDataPoint::new(NaiveDate::from_ymd_opt(2026, 10, day).unwrap(), value, ema)
    }

    #[test]
    fn segments_take_destination_color() {
        let points = vec![
            point(1, None, None),
            point(8, Some(120.0), Some(100.0)).with_intensity(ColorIntensity::High),
            point(15, Some(80.0), Some(100.0)).with_intensity(ColorIntensity::Medium),
        ];
        let chart = build_chart("steps", &points, true);

        assert_eq!(chart.point_colors, vec![NEUTRAL_COLOR, "#28a745", "#e74c3c"]);
        assert_eq!(chart.segment_colors, vec!["#28a745", "#e74c3c", "#e74c3c"]);
        assert_eq!(chart.fill_colors[0], "#28a74520");
        assert_eq!(chart.labels, vec!["Oct 1", "Oct 8", "Oct 15"]);
        assert_eq!(chart.tooltips[0], "Value: - (No trend)");
        assert_eq!(chart.tooltips[1], "Value: 120.00 (Up 20.0%)");
    }

    #[test]
    fn summary_describes_latest_point() {
        let points = vec![point(1, Some(61.0), Some(60.0)), point(2, Some(50.0), Some(60.0))];
        let chart = build_chart("weight", &points, false);
        let summary = chart.summary.unwrap();
        assert_eq!(summary.latest, "50.00");
        assert_eq!(summary.ema, "60.00");
        assert_eq!(summary.trend, "Down 16.7%");
        assert_eq!(summary.class, TrendClass::Positive);
    }

    #[test]
    fn empty_series_has_no_summary() {
        let chart = build_chart("empty", &[], true);
        assert!(chart.summary.is_none());
        assert!(chart.segment_colors.is_empty());
        assert!(chart.labels.is_empty());
    }

    #[test]
    fn direction_falls_back_to_first_point_then_lower_is_better() {
        let mut first = point(1, Some(1.0), Some(1.0));
        assert!(!resolve_direction(&[first.clone()], None));
        first.higher_is_better = Some(true);
        assert!(resolve_direction(&[first.clone()], None));
        assert!(!resolve_direction(&[first], Some(false)));
        assert!(!resolve_direction(&[], None));
    }
}
