use chrono::DateTime;

/// Renders an epoch-millisecond timestamp as `YYYY-MM-DD HH:MM` (UTC).
/// Missing or zero input renders as "-".
pub fn format_time(timestamp_ms: Option<i64>) -> String {
  let Some(ms) = timestamp_ms.filter(|&ms| ms != 0) else {
    return "-".into();
  };
  match DateTime::from_timestamp_millis(ms) {
    Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
    None => "-".into(),
  }
}

/// Renders a seconds count as "Xm Ys", dropping the minutes component when
/// it is zero. Fractional seconds truncate.
pub fn format_duration(seconds: f64) -> String {
  if !seconds.is_finite() || seconds <= 0.0 {
    return "0s".into();
  }
  let total = seconds as u64;
  let m = total / 60;
  let s = total % 60;
  if m > 0 {
    format!("{}m {}s", m, s)
  } else {
    format!("{}s", s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duration_zero() {
    assert_eq!(format_duration(0.0), "0s");
  }

  #[test]
  fn duration_under_a_minute() {
    assert_eq!(format_duration(59.0), "59s");
  }

  #[test]
  fn duration_with_minutes() {
    assert_eq!(format_duration(65.0), "1m 5s");
  }

  #[test]
  fn duration_truncates_fractions() {
    assert_eq!(format_duration(65.9), "1m 5s");
    assert_eq!(format_duration(0.4), "0s");
  }

  #[test]
  fn time_placeholder_for_missing_input() {
    assert_eq!(format_time(None), "-");
    assert_eq!(format_time(Some(0)), "-");
  }

  #[test]
  fn time_renders_fixed_width_fields() {
    assert_eq!(format_time(Some(1_787_573_100_000)), "2026-08-24 12:05");
  }
}
