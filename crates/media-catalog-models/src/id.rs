use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a catalog entry.
///
/// The metadata provider issues numeric ids, while imported records may carry
/// free-form strings. Both forms round-trip through serialization unchanged,
/// so a record written with `7` is never rewritten as `"7"` on the next save.
/// Equality is exact: `MediaId::Number(5)` and `MediaId::Text("5")` are
/// different ids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MediaId {
    Number(i64),
    Text(String),
}

impl MediaId {
    /// An id is usable when it can key a collection entry. A blank string is
    /// the serialized shape of "no id at all".
    pub fn is_usable(&self) -> bool {
        match self {
            MediaId::Number(_) => true,
            MediaId::Text(text) => !text.trim().is_empty(),
        }
    }
}

impl Default for MediaId {
    fn default() -> Self {
        MediaId::Text(String::new())
    }
}

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaId::Number(value) => write!(f, "{}", value),
            MediaId::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for MediaId {
    fn from(value: i64) -> Self {
        MediaId::Number(value)
    }
}

impl From<i32> for MediaId {
    fn from(value: i32) -> Self {
        MediaId::Number(value as i64)
    }
}

impl From<u32> for MediaId {
    fn from(value: u32) -> Self {
        MediaId::Number(value as i64)
    }
}

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        MediaId::Text(value.to_string())
    }
}

impl From<String> for MediaId {
    fn from(value: String) -> Self {
        MediaId::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_text_forms_round_trip_unchanged() {
        let numeric: MediaId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, MediaId::Number(7));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");

        let text: MediaId = serde_json::from_str("\"tt0133093\"").unwrap();
        assert_eq!(text, MediaId::Text("tt0133093".to_string()));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"tt0133093\"");
    }

    #[test]
    fn test_numeric_and_text_ids_never_compare_equal() {
        assert_ne!(MediaId::Number(5), MediaId::Text("5".to_string()));
    }

    #[test]
    fn test_plain_integer_literals_convert_to_numeric_ids() {
        // Unsuffixed literals infer as i32; all the integer widths callers
        // actually pass must land on the same numeric variant.
        assert_eq!(MediaId::from(603), MediaId::Number(603));
        assert_eq!(MediaId::from(603i64), MediaId::Number(603));
        assert_eq!(MediaId::from(603u32), MediaId::Number(603));
    }

    #[test]
    fn test_blank_text_is_not_usable() {
        assert!(!MediaId::default().is_usable());
        assert!(!MediaId::Text("   ".to_string()).is_usable());
        assert!(MediaId::Number(0).is_usable());
        assert!(MediaId::Text("tt0133093".to_string()).is_usable());
    }
}
