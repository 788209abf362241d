//! Human-readable duration fields ("1h", "24h", "30min")
//!
//! An empty string, `none`, `never` or `off` maps to `None`, which disables
//! whatever the duration controls (token expiry, refresh window). Anything
//! else goes through `humantime_serde`.

use serde::de::value::StringDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

fn is_disabled(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || ["none", "never", "off"].iter().any(|w| value.eq_ignore_ascii_case(w))
}

/// Serde adapter for `Option<Duration>` with explicit "disabled" spellings
pub mod optional {
    use super::*;

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => humantime_serde::serialize(duration, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) if !is_disabled(&text) => {
                let text: StringDeserializer<D::Error> = text.trim().to_string().into_deserializer();
                humantime_serde::deserialize(text).map(Some)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Serialize, Deserialize)]
    struct Window {
        #[serde(with = "super::optional")]
        window: Option<Duration>,
    }

    fn parse(text: &str) -> Result<Option<Duration>, serde_json::Error> {
        serde_json::from_value::<Window>(serde_json::json!({ "window": text })).map(|w| w.window)
    }

    #[test]
    fn test_parse_compact_units() {
        assert_eq!(parse("1h").unwrap(), Some(Duration::from_secs(3600)));
        assert_eq!(parse("24h").unwrap(), Some(Duration::from_secs(86_400)));
        assert_eq!(parse(" 30min ").unwrap(), Some(Duration::from_secs(1800)));
    }

    #[test]
    fn test_parse_disabled_values() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
        assert_eq!(parse("none").unwrap(), None);
        assert_eq!(parse("Never").unwrap(), None);
        assert_eq!(parse("OFF").unwrap(), None);

        let window: Window = serde_json::from_str(r#"{"window":null}"#).unwrap();
        assert_eq!(window.window, None);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("soon").is_err());
    }

    #[test]
    fn test_serialize_as_humantime() {
        let json = serde_json::to_value(Window {
            window: Some(Duration::from_secs(86_400)),
        })
        .unwrap();
        assert_eq!(json["window"], "1day");

        let json = serde_json::to_value(Window { window: None }).unwrap();
        assert!(json["window"].is_null());
    }
}
