//! Chart payload and plot point models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time value of a chart entry as sent by the producer
///
/// Numbers are epoch milliseconds. Strings may hold a date/time or a
/// number of milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

impl TimeValue {
    /// Resolve to epoch milliseconds, `None` if the value is not a recognisable time
    ///
    /// Instants outside the representable date range count as unrecognisable.
    pub fn to_millis(&self) -> Option<i64> {
        let ms = match self {
            TimeValue::Millis(ms) => Some(*ms),
            TimeValue::Fractional(ms) if ms.is_finite() => Some(ms.round() as i64),
            TimeValue::Fractional(_) => None,
            TimeValue::Text(text) => parse_time_text(text.trim()),
        }?;
        DateTime::<Utc>::from_timestamp_millis(ms).map(|_| ms)
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        self.to_millis().and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

fn parse_time_text(text: &str) -> Option<i64> {
    if let Ok(ms) = text.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(ms) = text.parse::<f64>() {
        return ms.is_finite().then(|| ms.round() as i64);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Profit of a chart entry, normally a string-encoded decimal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfitValue {
    Text(String),
    Number(f64),
}

impl From<&str> for ProfitValue {
    fn from(text: &str) -> Self {
        ProfitValue::Text(text.to_string())
    }
}

/// A single entry of the payload's `chartData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub timestamp: TimeValue,
    pub profit: ProfitValue,
}

/// The decoded chart input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub base_asset: String,
    pub chart_data: Vec<RawPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_name: Option<String>,
}

/// A plot-ready point; `y` may be NaN when the profit was not numeric
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: TimeValue,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_value_numbers() {
        assert_eq!(TimeValue::Millis(1000).to_millis(), Some(1000));
        assert_eq!(TimeValue::Fractional(1500.4).to_millis(), Some(1500));
        assert_eq!(TimeValue::Fractional(f64::NAN).to_millis(), None);
    }

    #[test]
    fn test_time_value_out_of_range() {
        assert_eq!(TimeValue::Millis(i64::MIN).to_millis(), None);
        assert_eq!(TimeValue::Millis(i64::MAX).to_millis(), None);
        assert_eq!(TimeValue::Fractional(1e300).to_millis(), None);
        assert_eq!(TimeValue::Text("1e300".into()).to_millis(), None);
        assert_eq!(TimeValue::Text("-9223372036854775808".into()).to_datetime(), None);
    }

    #[test]
    fn test_time_value_text() {
        assert_eq!(TimeValue::Text("2000".into()).to_millis(), Some(2000));
        assert_eq!(
            TimeValue::Text("1970-01-01T00:00:01Z".into()).to_millis(),
            Some(1000)
        );
        assert_eq!(
            TimeValue::Text("1970-01-02 00:00:00".into()).to_millis(),
            Some(86_400_000)
        );
        assert_eq!(TimeValue::Text("1970-01-02".into()).to_millis(), Some(86_400_000));
        assert_eq!(TimeValue::Text("yesterday".into()).to_millis(), None);
    }

    #[test]
    fn test_payload_deserializes_camel_case() {
        let json = r#"{"baseAsset":"BTC","chartData":[{"timestamp":1000,"profit":"1.5"}]}"#;
        let payload: ChartPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.base_asset, "BTC");
        assert_eq!(payload.bot_name, None);
        assert_eq!(payload.chart_data[0].timestamp, TimeValue::Millis(1000));
        assert_eq!(payload.chart_data[0].profit, ProfitValue::Text("1.5".into()));
    }

    #[test]
    fn test_payload_accepts_numeric_profit_and_string_time() {
        let json = r#"{"baseAsset":"USDT","botName":"TheBot","chartData":[{"timestamp":"2024-07-20 10:21:00","profit":-2.5}]}"#;
        let payload: ChartPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.bot_name.as_deref(), Some("TheBot"));
        assert_eq!(payload.chart_data[0].profit, ProfitValue::Number(-2.5));
        assert!(payload.chart_data[0].timestamp.to_datetime().is_some());
    }
}
