//! Age widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Key used for the birth date before it was renamed.
const LEGACY_BIRTH_DATE: &str = "age_birth_date";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeProps {
    /// ISO 8601 date.
    pub birth_date: String,
    pub decimal_places: u32,
}

impl Default for AgeProps {
    fn default() -> Self {
        Self {
            birth_date: "2000-01-01".to_string(),
            decimal_places: 1,
        }
    }
}

fn is_iso_date(s: &str) -> bool {
    let parts: Vec<_> = s.split('-').collect();
    matches!(parts.as_slice(), [y, m, d]
        if y.len() == 4 && m.len() == 2 && d.len() == 2
            && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())))
}

/// Shows your age, to a fixed number of decimal places.
pub struct Age;

impl WidgetType for Age {
    fn name(&self) -> &'static str {
        "Age"
    }

    fn description(&self) -> &'static str {
        "Shows your age"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 1.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&AgeProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new()
            .field("birthDate", "Birth date", FieldKind::String)
            .hint("YYYY-MM-DD")
            .field(
                "decimalPlaces",
                "Decimal places",
                FieldKind::Number { min: Some(0.0), max: Some(9.0), integer: true },
            )
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        let props: AgeProps = from_object(props)?;
        if !is_iso_date(&props.birth_date) {
            return Err(WidgetError::InvalidProps(format!(
                "{:?} is not a YYYY-MM-DD date",
                props.birth_date
            )));
        }
        Ok(())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            if let Some(legacy) = widget.props.remove(LEGACY_BIRTH_DATE) {
                widget.props.entry("birthDate").or_insert(legacy);
            }

            let mut props: AgeProps = widget.repair_props()?;
            if !is_iso_date(&props.birth_date) {
                log::warn!(
                    "Age widget #{} has unreadable birth date {:?}, resetting it",
                    widget.id,
                    props.birth_date
                );
                props.birth_date = AgeProps::default().birth_date;
                widget.set_props(&props)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn age(props: serde_json::Value) -> Widget {
        Widget {
            id: 1,
            kind: "Age".into(),
            position: None,
            size: Age.default_size(),
            props: props.as_object().cloned().unwrap_or_default(),
            theme: Default::default(),
        }
    }

    #[test]
    fn test_on_loaded_renames_legacy_key() {
        let mut widget = age(json!({ "age_birth_date": "1990-05-17" }));
        pollster::block_on(Age.on_loaded(&mut widget)).unwrap();

        let props: AgeProps = widget.props_as().unwrap();
        assert_eq!(props, AgeProps { birth_date: "1990-05-17".into(), decimal_places: 1 });
        assert!(!widget.props.contains_key(LEGACY_BIRTH_DATE));
    }

    #[test]
    fn test_on_loaded_resets_bad_dates() {
        let mut widget = age(json!({ "birthDate": "17/05/1990", "decimalPlaces": 2 }));
        pollster::block_on(Age.on_loaded(&mut widget)).unwrap();

        assert_eq!(widget.props["birthDate"], json!("2000-01-01"));
        assert_eq!(widget.props["decimalPlaces"], json!(2));
    }

    #[test]
    fn test_on_loaded_repairs_mistyped_props() {
        let mut widget = age(json!({ "birthDate": "1990-05-17", "decimalPlaces": 1.5 }));
        pollster::block_on(Age.on_loaded(&mut widget)).unwrap();

        let props: AgeProps = widget.props_as().unwrap();
        assert_eq!(props, AgeProps { birth_date: "1990-05-17".into(), decimal_places: 1 });
    }

    #[test]
    fn test_on_loaded_fills_empty_props() {
        let mut widget = age(json!({}));
        pollster::block_on(Age.on_loaded(&mut widget)).unwrap();
        assert_eq!(widget.props, Age.initial_props());
    }

    #[test]
    fn test_check_props() {
        let good = Age.initial_props();
        assert!(Age.check_props(&good).is_ok());

        let mut fractional = good.clone();
        fractional.insert("decimalPlaces".into(), json!(1.5));
        assert!(matches!(Age.check_props(&fractional), Err(WidgetError::InvalidProps(_))));

        let mut bad_date = good;
        bad_date.insert("birthDate".into(), json!("yesterday"));
        assert!(Age.check_props(&bad_date).is_err());
    }

    #[test]
    fn test_iso_dates() {
        assert!(is_iso_date("2000-01-01"));
        assert!(!is_iso_date("2000-1-01"));
        assert!(!is_iso_date("20x0-01-01"));
        assert!(!is_iso_date("2000-01"));
    }
}
