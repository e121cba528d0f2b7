//! Traffic pattern analysis.
//!
//! Reduces raw per-timestamp samples into a [`TrafficPattern`] (frequency
//! score, peak hours, trend, weekly distribution) plus window-level
//! [`CongestionMetrics`]. Pure function of its input; empty input yields
//! a zeroed pattern rather than an error, since "no data" is a valid
//! real-world state that simply means "monitor only".

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Timelike};
use log::debug;

use crate::api::{
    AnalysisWindow, CongestionMetrics, TrafficPattern, TrafficSample, Trend, WeekdayCongestion,
};

/// A day counts as high-traffic when its average congestion reaches this
/// threshold. Tuned constant, not derived from data.
pub const HIGH_TRAFFIC_THRESHOLD: f64 = 0.70;

/// Trend classification requires the last third of the window to differ
/// from the first third by at least this many congestion points.
const TREND_MARGIN: f64 = 0.10;

/// Number of peak hours reported per pattern.
const PEAK_HOUR_COUNT: usize = 3;

/// Analyze one road's samples over the given lookback window.
///
/// The frequency denominator is the number of calendar days actually
/// observed in the data, not the window length, so incomplete windows
/// are not penalized.
pub fn analyze_pattern(
    samples: &[TrafficSample],
    window: AnalysisWindow,
) -> (TrafficPattern, CongestionMetrics) {
    if samples.is_empty() {
        return (empty_pattern(), empty_metrics());
    }
    debug!(
        "analyzing {} samples over a {}-day window",
        samples.len(),
        window.days()
    );

    // Accumulators: per calendar day, per hour of day, per day of week.
    let mut daily: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    let mut hourly: BTreeMap<u32, (f64, u32)> = BTreeMap::new();
    let mut weekday: [(f64, u32); 7] = [(0.0, 0); 7];

    let mut total = 0.0;
    let mut max_congestion: f64 = 0.0;

    for sample in samples {
        let congestion = sample.congestion();
        total += congestion;
        max_congestion = max_congestion.max(congestion);

        let day = daily.entry(sample.timestamp.date_naive()).or_insert((0.0, 0));
        day.0 += congestion;
        day.1 += 1;

        let hour = hourly.entry(sample.timestamp.hour()).or_insert((0.0, 0));
        hour.0 += congestion;
        hour.1 += 1;

        let wd = &mut weekday[sample.timestamp.weekday().num_days_from_monday() as usize];
        wd.0 += congestion;
        wd.1 += 1;
    }

    let daily_averages: Vec<f64> = daily
        .values()
        .map(|(sum, count)| sum / f64::from(*count))
        .collect();
    let observed_days = daily_averages.len() as u32;
    let high_traffic_day_count = daily_averages
        .iter()
        .filter(|&&c| c >= HIGH_TRAFFIC_THRESHOLD)
        .count() as u32;
    let frequency_score = f64::from(high_traffic_day_count) / f64::from(observed_days);

    let pattern = TrafficPattern {
        frequency_score,
        high_traffic_day_count,
        observed_days,
        peak_hours: peak_hours(&hourly),
        trend: trend(&daily_averages),
        weekly_average: weekly_average(&weekday),
    };

    let metrics = CongestionMetrics {
        avg_congestion: total / samples.len() as f64,
        max_congestion,
        peak_congestion: max_congestion,
    };

    (pattern, metrics)
}

fn empty_pattern() -> TrafficPattern {
    TrafficPattern {
        frequency_score: 0.0,
        high_traffic_day_count: 0,
        observed_days: 0,
        peak_hours: Vec::new(),
        trend: Trend::Stable,
        weekly_average: Vec::new(),
    }
}

fn empty_metrics() -> CongestionMetrics {
    CongestionMetrics {
        avg_congestion: 0.0,
        max_congestion: 0.0,
        peak_congestion: 0.0,
    }
}

/// Top hours of day by average congestion, worst first. Ties resolve to
/// the lower hour.
fn peak_hours(hourly: &BTreeMap<u32, (f64, u32)>) -> Vec<u32> {
    let mut averages: Vec<(u32, f64)> = hourly
        .iter()
        .map(|(&hour, (sum, count))| (hour, sum / f64::from(*count)))
        .collect();
    averages.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    averages
        .into_iter()
        .take(PEAK_HOUR_COUNT)
        .map(|(hour, _)| hour)
        .collect()
}

/// Compare the first third of the observed days against the last third.
fn trend(daily_averages: &[f64]) -> Trend {
    let n = daily_averages.len();
    if n < 3 {
        return Trend::Stable;
    }
    let k = n / 3;
    let first: f64 = daily_averages[..k].iter().sum::<f64>() / k as f64;
    let last: f64 = daily_averages[n - k..].iter().sum::<f64>() / k as f64;

    if last - first >= TREND_MARGIN {
        Trend::Increasing
    } else if first - last >= TREND_MARGIN {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

fn weekly_average(weekday: &[(f64, u32); 7]) -> Vec<WeekdayCongestion> {
    weekday
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(index, (sum, count))| WeekdayCongestion {
            day: weekday_name(index),
            avg_congestion: sum / f64::from(*count),
        })
        .collect()
}

/// Index follows `Weekday::num_days_from_monday`.
fn weekday_name(index: usize) -> String {
    match index {
        0 => "monday",
        1 => "tuesday",
        2 => "wednesday",
        3 => "thursday",
        4 => "friday",
        5 => "saturday",
        _ => "sunday",
    }
    .to_string()
}
