//! The relay's view of a Kafka record and the value transformation.

/// A record consumed from the input topic, decoded to UTF-8 text.
///
/// Partition and offset identify where the record sat in the input topic;
/// the broker assigns fresh ones on publish, so the output side carries only
/// key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record key, absent when the producer published without one.
    pub key: Option<String>,
    /// Record value as UTF-8 text.
    pub value: String,
    /// Partition the record was consumed from.
    pub partition: i32,
    /// Position of the record within its partition.
    pub offset: i64,
}

/// Transforms a record value for republication: strips leading and trailing
/// whitespace. Pure and total; `process_message(process_message(v))` equals
/// `process_message(v)` for any `v`.
pub fn process_message(value: &str) -> &str {
    value.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(process_message("  alice  "), "alice");
        assert_eq!(process_message("\tbob\n"), "bob");
    }

    #[test]
    fn test_interior_whitespace_is_preserved() {
        assert_eq!(process_message("  user login  "), "user login");
    }

    #[test]
    fn test_empty_value_stays_empty() {
        assert_eq!(process_message(""), "");
        assert_eq!(process_message("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for value in ["  alice  ", "bob", "", "  a b  c ", "\r\n x \r\n"] {
            let once = process_message(value);
            assert_eq!(process_message(once), once);
        }
    }
}
