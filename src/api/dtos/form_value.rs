//! Serde helpers for form fields that browsers send either as strings or as
//! bare JSON numbers.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Reads a string, number, bool or null into its textual form. Null becomes
/// an empty string so the field fails the usual "required" check.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(value.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Field {
        #[serde(deserialize_with = "super::text")]
        value: String,
    }

    fn read(value: serde_json::Value) -> String {
        serde_json::from_value::<Field>(json!({ "value": value })).unwrap().value
    }

    #[test]
    fn test_numbers_and_strings_read_as_text() {
        assert_eq!(read(json!("4")), "4");
        assert_eq!(read(json!(4)), "4");
        assert_eq!(read(json!(-2)), "-2");
        assert_eq!(read(json!(4.0)), "4");
        assert_eq!(read(json!(null)), "");
    }

    #[test]
    fn test_objects_are_rejected() {
        assert!(serde_json::from_value::<Field>(json!({ "value": { "n": 1 } })).is_err());
    }
}
