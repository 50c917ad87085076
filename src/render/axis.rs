//! Axis ranges, tick counts and tick label formatting

use chrono::{DateTime, Datelike, Duration, Utc};

const MAX_Y_TICKS: usize = 11;
/// Largest magnitude the y axis spans; keeps the axis width finite
pub const Y_LIMIT: f64 = f64::MAX / 4.0;
/// Approximate horizontal room one time label needs, padding included
const X_LABEL_WIDTH: u32 = 90;
/// Horizontal room of a label turned on its side
const ROTATED_X_LABEL_WIDTH: u32 = 20;
/// Approximate vertical room one value label needs
const Y_LABEL_HEIGHT: u32 = 30;

/// Time units for the x axis, smallest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl TimeUnit {
    const ALL: [TimeUnit; 7] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// (unit size in ms, steps per unit)
    fn interval(self) -> (f64, f64) {
        match self {
            TimeUnit::Millisecond => (1.0, 1000.0),
            TimeUnit::Second => (1_000.0, 60.0),
            TimeUnit::Minute => (60_000.0, 60.0),
            TimeUnit::Hour => (3_600_000.0, 24.0),
            TimeUnit::Day => (86_400_000.0, 30.0),
            TimeUnit::Month => (2.628e9, 12.0),
            TimeUnit::Year => (3.154e10, 1.0),
        }
    }

    fn format(self) -> &'static str {
        match self {
            TimeUnit::Millisecond => "%-I:%M:%S%.3f %p",
            TimeUnit::Second => "%-I:%M:%S %p",
            TimeUnit::Minute => "%-I:%M %p",
            TimeUnit::Hour => "%-I%p",
            TimeUnit::Day => "%b %-d",
            TimeUnit::Month => "%b %Y",
            TimeUnit::Year => "%Y",
        }
    }
}

/// Smallest unit whose tick count over the span fits the capacity
pub fn pick_unit(span_ms: i64, capacity: usize) -> TimeUnit {
    let span = span_ms.max(0) as f64;
    TimeUnit::ALL
        .into_iter()
        .find(|unit| {
            let (size, steps) = unit.interval();
            (span / (size * steps)).ceil() <= capacity as f64
        })
        .unwrap_or(TimeUnit::Year)
}

pub fn format_tick(ms: i64, unit: TimeUnit) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(dt) if unit == TimeUnit::Day && dt.month() == 1 && dt.day() == 1 => dt.format("%b %-d %Y").to_string(),
        Some(dt) => dt.format(unit.format()).to_string(),
        None => ms.to_string(),
    }
}

/// Number of x labels that fit across the plot
pub fn x_tick_count(plot_width: u32, rotated: bool) -> usize {
    let label_width = if rotated { ROTATED_X_LABEL_WIDTH } else { X_LABEL_WIDTH };
    (plot_width / label_width).max(2) as usize
}

pub fn y_tick_count(plot_height: u32) -> usize {
    ((plot_height / Y_LABEL_HEIGHT) as usize).clamp(2, MAX_Y_TICKS)
}

/// x range covering the data; a single instant is widened by half a day
/// each side, no data shows the current UTC day
pub fn x_bounds(xs: &[i64], now: DateTime<Utc>) -> (i64, i64) {
    let half_day = Duration::hours(12).num_milliseconds();
    match (xs.iter().min(), xs.iter().max()) {
        (Some(&min), Some(&max)) if min < max => (min, max),
        (Some(&min), Some(_)) => (min.saturating_sub(half_day), min.saturating_add(half_day)),
        _ => {
            let start = now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|d| d.and_utc().timestamp_millis())
                .unwrap_or_else(|| now.timestamp_millis());
            (start, start.saturating_add(2 * half_day))
        }
    }
}

/// Round `range` to 1, 2, 5 or 10 times a power of ten
fn nice_num(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10f64.powf(exponent);
    let nice = if round {
        match fraction {
            f if f < 1.5 => 1.0,
            f if f < 3.0 => 2.0,
            f if f < 7.0 => 5.0,
            _ => 10.0,
        }
    } else {
        match fraction {
            f if f <= 1.0 => 1.0,
            f if f <= 2.0 => 2.0,
            f if f <= 5.0 => 5.0,
            _ => 10.0,
        }
    };
    nice * 10f64.powf(exponent)
}

/// y range covering the finite values, expanded to nice tick boundaries
///
/// No finite data gives 0..1; a flat series is widened by 5% of its value
/// (1 when the value is 0). Values beyond `Y_LIMIT` are capped to it.
pub fn y_bounds(ys: &[f64], max_ticks: usize) -> (f64, f64) {
    let finite = ys.iter().copied().filter(|y| y.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if min > max {
        return (0.0, 1.0);
    }
    let (min, max) = (min.clamp(-Y_LIMIT, Y_LIMIT), max.clamp(-Y_LIMIT, Y_LIMIT));

    let (min, max) = if min == max {
        let offset = if max == 0.0 { 1.0 } else { (max * 0.05).abs() };
        (min - offset, max + offset)
    } else {
        (min, max)
    };

    let intervals = max_ticks.max(2) as f64 - 1.0;
    let spacing = nice_num(nice_num(max - min, false) / intervals, true);
    if !spacing.is_finite() || spacing <= 0.0 {
        return (min, max);
    }
    let (lo, hi) = ((min / spacing).floor() * spacing, (max / spacing).ceil() * spacing);
    if (hi - lo).is_finite() {
        (lo, hi)
    } else {
        (min, max)
    }
}

/// Value label without float noise (0.30000000000000004 -> 0.3)
pub fn format_value(v: f64) -> String {
    if v.abs() >= 1e15 {
        return format!("{:e}", v);
    }
    let rounded = (v * 1e8).round() / 1e8;
    let text = format!("{:.8}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_pick_unit() {
        assert_eq!(pick_unit(500, 5), TimeUnit::Millisecond);
        assert_eq!(pick_unit(3 * 3_600_000, 5), TimeUnit::Minute);
        assert_eq!(pick_unit(3 * 86_400_000, 5), TimeUnit::Hour);
        assert_eq!(pick_unit(60 * 86_400_000, 5), TimeUnit::Day);
        assert_eq!(pick_unit(3 * 31_536_000_000, 5), TimeUnit::Month);
        assert_eq!(pick_unit(100 * 31_536_000_000, 5), TimeUnit::Year);
    }

    #[test]
    fn test_format_tick() {
        let ms = Utc.with_ymd_and_hms(2024, 7, 20, 15, 4, 0).unwrap().timestamp_millis();
        assert_eq!(format_tick(ms, TimeUnit::Day), "Jul 20");
        assert_eq!(format_tick(ms, TimeUnit::Hour), "3PM");
        assert_eq!(format_tick(ms, TimeUnit::Minute), "3:04 PM");
        assert_eq!(format_tick(ms, TimeUnit::Month), "Jul 2024");
        assert_eq!(format_tick(ms, TimeUnit::Year), "2024");
    }

    #[test]
    fn test_x_bounds() {
        let now = Utc.with_ymd_and_hms(2024, 7, 20, 15, 4, 0).unwrap();
        assert_eq!(x_bounds(&[3000, 1000, 2000], now), (1000, 3000));
        assert_eq!(x_bounds(&[1000], now), (1000 - 43_200_000, 1000 + 43_200_000));
        assert_eq!(x_bounds(&[i64::MIN], now), (i64::MIN, i64::MIN + 43_200_000));
        assert_eq!(x_bounds(&[i64::MAX], now), (i64::MAX - 43_200_000, i64::MAX));

        let (start, end) = x_bounds(&[], now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 7, 20, 0, 0, 0).unwrap().timestamp_millis());
        assert_eq!(end - start, 86_400_000);
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[], 11), (0.0, 1.0));
        assert_eq!(y_bounds(&[f64::NAN], 11), (0.0, 1.0));
        let (lo, hi) = y_bounds(&[0.0, 0.0], 11);
        assert!((lo + 1.0).abs() < 1e-9 && (hi - 1.0).abs() < 1e-9);

        let (lo, hi) = y_bounds(&[-0.25, 1.5, f64::NAN], 11);
        assert!(lo <= -0.25 && hi >= 1.5);
        assert!(hi - lo < 2.5);
    }

    #[test]
    fn test_y_bounds_extreme_values_stay_finite() {
        let (lo, hi) = y_bounds(&[1e308, -1e308, 1.0], 11);
        assert!(lo < hi);
        assert!((hi - lo).is_finite());
        assert!(lo >= -f64::MAX && hi <= f64::MAX);

        let (lo, hi) = y_bounds(&[f64::MAX], 11);
        assert!(lo < hi && (hi - lo).is_finite());
    }

    #[test]
    fn test_y_bounds_flat_nonzero() {
        let (lo, hi) = y_bounds(&[100.0], 11);
        assert!(lo <= 95.0 && hi >= 105.0);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.1 + 0.2), "0.3");
        assert_eq!(format_value(-2.0), "-2");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_value(1.25), "1.25");
        assert_eq!(format_value(5e307), "5e307");
    }

    #[test]
    fn test_tick_counts() {
        assert_eq!(x_tick_count(400, false), 4);
        assert_eq!(x_tick_count(50, false), 2);
        assert_eq!(x_tick_count(400, true), 20);
        assert_eq!(y_tick_count(1000), 11);
    }
}
