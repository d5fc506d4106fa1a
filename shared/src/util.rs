/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque record id in the `kind:uuid` convention used across
/// the whole stack (e.g. `table:9f3c...`).
///
/// The prefix is informational only; no component parses it back out.
pub fn record_id(kind: &str) -> String {
    format!("{}:{}", kind, uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_prefix() {
        let id = record_id("order");
        assert!(id.starts_with("order:"));
        assert!(id.len() > "order:".len());
    }

    #[test]
    fn test_record_ids_are_unique() {
        assert_ne!(record_id("table"), record_id("table"));
    }
}
