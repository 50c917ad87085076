use crate::models::{ChartPayload, PlotPoint, ProfitValue};

/// Map raw chart entries to plot points, one per entry, order preserved
pub fn map_series(payload: &ChartPayload) -> Vec<PlotPoint> {
    payload
        .chart_data
        .iter()
        .map(|entry| PlotPoint {
            x: entry.timestamp.clone(),
            y: profit_to_f64(&entry.profit),
        })
        .collect()
}

pub fn profit_to_f64(profit: &ProfitValue) -> f64 {
    match profit {
        ProfitValue::Text(text) => parse_float(text),
        ProfitValue::Number(n) => *n,
    }
}

/// Parse the longest numeric prefix of `text`, NaN when there is none
///
/// Leading whitespace is skipped; trailing garbage is ignored, so "1.5 USDT"
/// gives 1.5 while "USDT" gives NaN.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawPoint, TimeValue};

    fn payload(entries: &[(i64, &str)]) -> ChartPayload {
        ChartPayload {
            base_asset: "BTC".to_string(),
            chart_data: entries
                .iter()
                .map(|(ts, profit)| RawPoint {
                    timestamp: TimeValue::Millis(*ts),
                    profit: ProfitValue::from(*profit),
                })
                .collect(),
            bot_name: None,
        }
    }

    #[test]
    fn test_map_series_example() {
        let points = map_series(&payload(&[(1000, "1.5"), (2000, "-0.25")]));
        assert_eq!(
            points,
            vec![
                PlotPoint { x: TimeValue::Millis(1000), y: 1.5 },
                PlotPoint { x: TimeValue::Millis(2000), y: -0.25 },
            ]
        );
    }

    #[test]
    fn test_map_series_preserves_count_and_order() {
        let entries: Vec<(i64, String)> = (0..50)
            .map(|i| ((50 - i) * 1000, format!("{}.125", i)))
            .collect();
        let borrowed: Vec<(i64, &str)> = entries.iter().map(|(t, p)| (*t, p.as_str())).collect();
        let points = map_series(&payload(&borrowed));

        assert_eq!(points.len(), 50);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.x, TimeValue::Millis((50 - i as i64) * 1000));
            assert_eq!(point.y, i as f64 + 0.125);
        }
    }

    #[test]
    fn test_map_series_empty() {
        assert!(map_series(&payload(&[])).is_empty());
    }

    #[test]
    fn test_non_numeric_profit_is_nan() {
        let points = map_series(&payload(&[(1, "abc"), (2, ""), (3, "0.5")]));
        assert_eq!(points.len(), 3);
        assert!(points[0].y.is_nan());
        assert!(points[1].y.is_nan());
        assert_eq!(points[2].y, 0.5);
    }

    #[test]
    fn test_parse_float_exact_decimals() {
        for text in ["0.1", "-0.25", "123456.789", "1e-7", "0.30000000000000004", "42"] {
            assert_eq!(parse_float(text), text.parse::<f64>().unwrap(), "{}", text);
        }
    }

    #[test]
    fn test_parse_float_prefix_semantics() {
        assert_eq!(parse_float("  3.5 USDT"), 3.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("2e+3x"), 2000.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("NaN").is_nan());
    }

    #[test]
    fn test_numeric_profit_passes_through() {
        assert_eq!(profit_to_f64(&ProfitValue::Number(-1.75)), -1.75);
    }
}
