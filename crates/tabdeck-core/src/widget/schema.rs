//! Editable-field descriptions for widget props and themes.
//!
//! A schema drives the settings form of a widget and is used to validate
//! edits before they're written back into the widget.

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

/// Schema validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Missing field: {0}")]
    Missing(String),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
    #[error("Unknown field: {0}")]
    UnknownField(String),
}

/// The kind of value a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Boolean,
    /// Single-line text.
    String,
    /// Multi-line text.
    Text,
    /// Absolute URL.
    Url,
    /// `#rgb` or `#rrggbb`.
    Color,
    /// A number within the optional bounds; `integer` rejects fractions.
    Number {
        min: Option<f64>,
        max: Option<f64>,
        integer: bool,
    },
    /// One of the given `(value, label)` options.
    Select(Vec<(String, String)>),
    /// Free-form JSON, e.g. a list of links.
    Json,
}

/// One editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub hint: Option<String>,
}

/// Ordered list of editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field.
    pub fn field(mut self, key: &str, label: &str, kind: FieldKind) -> Self {
        self.fields.push(Field {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            hint: None,
        });
        self
    }

    /// Attach a hint to the most recently added field.
    pub fn hint(mut self, hint: &str) -> Self {
        if let Some(field) = self.fields.last_mut() {
            field.hint = Some(hint.to_string());
        }
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check that every field is present in `values` and well-typed.
    ///
    /// Keys not described by the schema are ignored.
    pub fn validate(&self, values: &Map<String, Value>) -> Result<(), SchemaError> {
        for field in &self.fields {
            let value = values
                .get(&field.key)
                .ok_or_else(|| SchemaError::Missing(field.key.clone()))?;
            check(field, value)?;
        }
        Ok(())
    }

    /// Check a single value against the field named `key`.
    pub fn validate_value(&self, key: &str, value: &Value) -> Result<(), SchemaError> {
        let field = self
            .get(key)
            .ok_or_else(|| SchemaError::UnknownField(key.to_string()))?;
        check(field, value)
    }
}

fn invalid(field: &Field, reason: impl Into<String>) -> SchemaError {
    SchemaError::Invalid {
        key: field.key.clone(),
        reason: reason.into(),
    }
}

fn is_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn check(field: &Field, value: &Value) -> Result<(), SchemaError> {
    match &field.kind {
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(invalid(field, "expected a boolean"));
            }
        }
        FieldKind::String | FieldKind::Text => {
            if !value.is_string() {
                return Err(invalid(field, "expected a string"));
            }
        }
        FieldKind::Url => {
            let s = value.as_str().ok_or_else(|| invalid(field, "expected a URL string"))?;
            Url::parse(s).map_err(|e| invalid(field, e.to_string()))?;
        }
        FieldKind::Color => {
            let s = value.as_str().ok_or_else(|| invalid(field, "expected a colour string"))?;
            if !is_color(s) {
                return Err(invalid(field, format!("{} is not a hex colour", s)));
            }
        }
        FieldKind::Number { min, max, integer } => {
            let n = value.as_f64().ok_or_else(|| invalid(field, "expected a number"))?;
            if *integer && !(value.is_i64() || value.is_u64()) {
                return Err(invalid(field, format!("{} is not a whole number", n)));
            }
            if min.is_some_and(|min| n < min) || max.is_some_and(|max| n > max) {
                return Err(invalid(field, format!("{} is out of range", n)));
            }
        }
        FieldKind::Select(options) => {
            let s = value.as_str().ok_or_else(|| invalid(field, "expected an option"))?;
            if !options.iter().any(|(option, _)| option == s) {
                return Err(invalid(field, format!("{} is not an option", s)));
            }
        }
        FieldKind::Json => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn search_schema() -> Schema {
        Schema::new()
            .field("searchTitle", "Search engine name", FieldKind::String)
            .field("searchURL", "URL", FieldKind::Url)
            .hint("The query is sent as the `q` parameter")
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_valid_props() {
        let props = object(json!({
            "searchTitle": "DuckDuckGo",
            "searchURL": "https://duckduckgo.com/",
            "extra": 1,
        }));
        assert_eq!(search_schema().validate(&props), Ok(()));
    }

    #[test]
    fn test_missing_field() {
        let props = object(json!({ "searchTitle": "DuckDuckGo" }));
        assert_eq!(
            search_schema().validate(&props),
            Err(SchemaError::Missing("searchURL".to_string()))
        );
    }

    #[test]
    fn test_bad_url() {
        let err = search_schema()
            .validate_value("searchURL", &json!("not a url"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Invalid { key, .. } if key == "searchURL"));
    }

    #[test]
    fn test_unknown_field() {
        assert_eq!(
            search_schema().validate_value("nope", &json!(1)),
            Err(SchemaError::UnknownField("nope".to_string()))
        );
    }

    #[test]
    fn test_hint_attaches_to_last_field() {
        let schema = search_schema();
        assert!(schema.get("searchTitle").unwrap().hint.is_none());
        assert!(schema.get("searchURL").unwrap().hint.is_some());
        assert_eq!(schema.fields().len(), 2);
    }

    #[test]
    fn test_colors() {
        let schema = Schema::new().field("textColor", "Text colour", FieldKind::Color);
        assert!(schema.validate_value("textColor", &json!("#fff")).is_ok());
        assert!(schema.validate_value("textColor", &json!("#A0b1C2")).is_ok());
        assert!(schema.validate_value("textColor", &json!("fff")).is_err());
        assert!(schema.validate_value("textColor", &json!("#ggg")).is_err());
        assert!(schema.validate_value("textColor", &json!(255)).is_err());
    }

    #[test]
    fn test_number_bounds_and_select() {
        let schema = Schema::new()
            .field(
                "decimalPlaces",
                "Decimal places",
                FieldKind::Number { min: Some(0.0), max: Some(5.0), integer: true },
            )
            .field("opacity", "Opacity", FieldKind::Number { min: Some(0.0), max: Some(1.0), integer: false })
            .field(
                "unit",
                "Unit",
                FieldKind::Select(vec![
                    ("Celsius".into(), "Celsius".into()),
                    ("Fahrenheit".into(), "Fahrenheit".into()),
                ]),
            );

        assert!(schema.validate_value("decimalPlaces", &json!(2)).is_ok());
        assert!(schema.validate_value("decimalPlaces", &json!(9)).is_err());
        assert!(schema.validate_value("decimalPlaces", &json!("2")).is_err());
        assert!(schema.validate_value("decimalPlaces", &json!(1.5)).is_err());
        assert!(schema.validate_value("decimalPlaces", &json!(-1)).is_err());
        assert!(schema.validate_value("opacity", &json!(0.5)).is_ok());
        assert!(schema.validate_value("opacity", &json!(2)).is_err());
        assert!(schema.validate_value("unit", &json!("Fahrenheit")).is_ok());
        assert!(schema.validate_value("unit", &json!("Kelvin")).is_err());
    }
}
