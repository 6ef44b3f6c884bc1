//! 관대한 파싱 정책 (lenient parse)
//!
//! OKEx 는 숫자와 타임스탬프를 문자열로 보낸다. 형식이 깨진 값 하나 때문에
//! 호출 전체를 실패시키지 않고 0 (타임스탬프는 epoch) 으로 대체한다.
//! envelope 이 성공이면 호출자는 항상 구조적으로 완전한 도메인 객체를 받는다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 숫자 문자열 → f64. 실패하거나 유한하지 않으면 0.0
pub fn parse_f64(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// 정수 문자열 → i64. "2.0" 같은 소수 표기도 허용, 실패 시 0
pub fn parse_i64(s: &str) -> i64 {
    let s = s.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v as i64)
        })
        .unwrap_or(0)
}

/// "true" / "1" 만 true
pub fn parse_bool(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

/// RFC3339 → epoch milliseconds, 실패 시 0
pub fn rfc3339_millis(s: &str) -> i64 {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// RFC3339 → UTC 시각, 실패 시 epoch
pub fn rfc3339_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// 호가 배열의 셀 (문자열 또는 숫자) → f64
pub fn value_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::String(s)) => parse_f64(s),
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 문자열/숫자/bool/null 어느 것이 와도 문자열로 받는다.
/// `#[serde(default, deserialize_with = "lenient::string")]` 로 사용.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}
