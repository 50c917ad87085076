use crate::models::ChartPayload;
use crate::utils::ChartError;

/// Return the fragment part of a URL (text after the first `#`)
/// Input without a `#` is returned unchanged
pub fn fragment_of(input: &str) -> &str {
    match input.split_once('#') {
        Some((_, fragment)) => fragment,
        None => input,
    }
}

/// Decode a percent-encoded JSON fragment into a chart payload
///
/// A single leading `#` is ignored, so both `location.hash` style and bare
/// fragments are accepted.
pub fn decode_fragment(fragment: &str) -> Result<ChartPayload, ChartError> {
    let encoded = fragment.strip_prefix('#').unwrap_or(fragment);
    let json = urlencoding::decode(encoded)
        .map_err(|e| ChartError::InvalidEncoding(e.to_string()))?;

    tracing::debug!("chart_json: {}", json);
    parse_payload(&json)
}

/// Parse raw (not percent-encoded) JSON into a chart payload
pub fn parse_payload(json: &str) -> Result<ChartPayload, ChartError> {
    let payload: ChartPayload = serde_json::from_str(json)?;
    tracing::debug!(
        "Decoded payload for {} with {} entries",
        payload.base_asset,
        payload.chart_data.len()
    );
    Ok(payload)
}

/// Encode a payload the way the producer puts it into the chart URL
pub fn encode_fragment(payload: &ChartPayload) -> Result<String, ChartError> {
    let json = serde_json::to_string(payload)?;
    Ok(urlencoding::encode(&json).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfitValue, RawPoint, TimeValue};

    const BTC_FRAGMENT: &str = "%7B%22baseAsset%22%3A%22BTC%22%2C%22chartData%22%3A%5B%7B%22timestamp%22%3A1000%2C%22profit%22%3A%221.5%22%7D%2C%7B%22timestamp%22%3A2000%2C%22profit%22%3A%22-0.25%22%7D%5D%7D";

    #[test]
    fn test_decode_encoded_fragment() {
        let payload = decode_fragment(BTC_FRAGMENT).expect("decode failed");
        assert_eq!(payload.base_asset, "BTC");
        assert_eq!(payload.chart_data.len(), 2);
        assert_eq!(payload.chart_data[1].profit, ProfitValue::Text("-0.25".into()));
    }

    #[test]
    fn test_decode_strips_hash() {
        let with_hash = format!("#{}", BTC_FRAGMENT);
        assert_eq!(
            decode_fragment(&with_hash).unwrap(),
            decode_fragment(BTC_FRAGMENT).unwrap()
        );
    }

    #[test]
    fn test_fragment_of_url() {
        assert_eq!(fragment_of("http://localhost:8080#abc"), "abc");
        assert_eq!(fragment_of("abc"), "abc");
        assert_eq!(fragment_of("http://h/#a#b"), "a#b");
    }

    #[test]
    fn test_invalid_json_is_invalid_payload() {
        let err = decode_fragment("%7Bnot-json").unwrap_err();
        assert!(matches!(err, ChartError::InvalidPayload(_)));
    }

    #[test]
    fn test_schema_mismatch_is_invalid_payload() {
        let missing_asset = parse_payload(r#"{"chartData":[]}"#).unwrap_err();
        assert!(matches!(missing_asset, ChartError::InvalidPayload(ref m) if m.contains("baseAsset")));

        let not_array = parse_payload(r#"{"baseAsset":"BTC","chartData":{}}"#).unwrap_err();
        assert!(matches!(not_array, ChartError::InvalidPayload(_)));
    }

    #[test]
    fn test_invalid_utf8_is_invalid_encoding() {
        let err = decode_fragment("%FF%FE").unwrap_err();
        assert!(matches!(err, ChartError::InvalidEncoding(_)));
    }

    #[test]
    fn test_encode_then_decode_preserves_payload() {
        let payload = ChartPayload {
            base_asset: "USDT".to_string(),
            chart_data: vec![RawPoint {
                timestamp: TimeValue::Millis(1_721_470_860_000),
                profit: ProfitValue::Text("12.75".into()),
            }],
            bot_name: Some("hummingbot #2".to_string()),
        };
        let fragment = encode_fragment(&payload).unwrap();
        assert!(!fragment.contains('#'));
        assert_eq!(decode_fragment(&fragment).unwrap(), payload);
    }
}
