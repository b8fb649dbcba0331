//! Common types used across the advisory platform

use serde::{Deserialize, Serialize};

/// Language code used when no translation is requested
pub const DEFAULT_LANGUAGE: &str = "en";

/// Target language for advisory text (ISO-639 code such as "en" or "kn")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// English text is produced natively and never sent for translation
    pub fn is_default(&self) -> bool {
        self.0.is_empty() || self.0 == DEFAULT_LANGUAGE
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response payloads whose human-readable text can be translated in place.
///
/// Implementors hand out their free-text fields in a stable order. Enumerated
/// values (stage status, crop names) are left out so clients can still match
/// on them after translation.
pub trait Translatable {
    fn text_fields_mut(&mut self) -> Vec<&mut String>;
}

/// Forgiving field decoders for records read from the document store.
///
/// Farm records are written by mobile clients and are loosely typed: numbers
/// arrive as strings, lists arrive as objects, fields go missing. Every decoder
/// here maps malformed input to the field's default instead of failing.
pub mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Number or numeric string; anything else reads as `0.0`.
    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_f64(&value))
    }

    pub fn coerce_f64(value: &Value) -> f64 {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// String value; numbers are rendered, everything else is empty.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        })
    }

    /// Optional string; only the empty string collapses to `None`.
    pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
    }

    /// JSON array, or an object keyed by push id (values in key order).
    pub fn list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items.into_iter().filter(|v| !v.is_null()).collect(),
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            _ => Vec::new(),
        })
    }

    /// Any nested structure; falls back to `T::default()` when it does not fit.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}
