use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Largest whole amount kept exactly (2^53 - 1). Larger values are treated
/// as malformed rather than clamped.
pub const MAX_AMOUNT: u64 = (1 << 53) - 1;

/// Parses an amount the way a loose numeric cast would. Returns 0 for
/// anything that is not a finite, strictly positive number; 0 means "drop".
pub fn coerce_amount(value: Option<&Value>) -> u64 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_number(s),
        _ => 0.0,
    };
    if !n.is_finite() || n <= 0.0 || n > MAX_AMOUNT as f64 {
        return 0;
    }
    // Fractional pledges round to the nearest whole unit; anything under
    // half a unit collapses to the drop sentinel.
    n.round() as u64
}

fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    // Reject the word forms Rust's float parser accepts ("inf", "nan").
    if !t
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return 0.0;
    }
    t.parse::<f64>().unwrap_or(0.0)
}

/// Milliseconds since the Unix epoch (UTC), or 0 for empty or unparseable
/// input. Accepts `DD/MM/YYYY` first, then common ISO-like forms.
pub fn coerce_date(value: &str) -> i64 {
    let t = value.trim();
    if t.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = t.split('/').collect();
    if parts.len() == 3 {
        return parse_dmy(parts[0], parts[1], parts[2]).unwrap_or(0);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return dt.timestamp_millis();
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, fmt) {
            return dt.and_utc().timestamp_millis();
        }
    }
    for fmt in ["%Y-%m-%d", "%Y.%m.%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(t, fmt) {
            return midnight_millis(d);
        }
    }
    0
}

fn parse_dmy(day: &str, month: &str, year: &str) -> Option<i64> {
    let d: u32 = day.trim().parse().ok()?;
    let m: u32 = month.trim().parse().ok()?;
    let y: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d).map(midnight_millis)
}

fn midnight_millis(d: NaiveDate) -> i64 {
    d.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Stringifies a scalar field, trimmed. Objects, arrays, null and absent
/// fields become the empty string.
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// First non-empty text among `keys`.
pub fn first_text(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| coerce_text(record.get(*k)))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Only an explicit `true` (or the string "true") sets a flag.
pub fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
