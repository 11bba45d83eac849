use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプを RFC 3339 (UTC) に変換できる
        // given (前提条件):
        let timestamp_ms = 1_672_498_800_000;

        // when (操作):
        let formatted = timestamp_to_rfc3339(timestamp_ms);

        // then (期待する結果):
        assert_eq!(formatted, "2022-12-31T15:00:00.000Z");
    }

    #[test]
    fn test_now_millis_is_monotonic_enough() {
        // テスト項目: 連続で取得したタイムスタンプが減少しない
        let first = now_millis();
        let second = now_millis();
        assert!(second >= first);
    }
}
