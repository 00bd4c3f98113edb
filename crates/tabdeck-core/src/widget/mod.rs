//! Widget model and lifecycle.
//!
//! This module provides the pieces the dashboard is built from:
//! - `Widget`: one persisted dashboard element
//! - `WidgetType`: per-kind defaults and migration hooks
//! - `WidgetRegistry`: the table that resolves a type name to its `WidgetType`
//! - `WidgetManager`: creation, removal, loading and saving of the widget list
//!
//! Widgets remain plain data. Everything kind-specific lives in the type.

mod manager;
mod registry;
mod schema;
mod types;

pub use manager::{DEFAULT_WIDGETS, ManagerError, WIDGETS_KEY, WidgetManager};
pub use registry::WidgetRegistry;
pub use schema::{Field, FieldKind, Schema, SchemaError};
pub use types::{SHOW_PANEL_BG, WidgetType, initial_theme_for, theme_schema_base};

use kurbo::{Point, Vec2};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Identifier of a widget within one dashboard.
pub type WidgetId = u64;

/// Type-specific widget properties, as a JSON object.
pub type Props = Map<String, Value>;

/// Per-widget visual overrides, as a JSON object.
pub type WidgetTheme = Map<String, Value>;

/// Errors raised by widget types.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Invalid props: {0}")]
    InvalidProps(String),
}

/// A single dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    /// Registry key of the widget's type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Grid position; `None` lets the grid place the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Extent in grid cells.
    pub size: Vec2,
    pub props: Props,
    pub theme: WidgetTheme,
}

impl Widget {
    /// Deserialize the props into a typed struct.
    pub fn props_as<T: DeserializeOwned>(&self) -> Result<T, WidgetError> {
        serde_json::from_value(Value::Object(self.props.clone()))
            .map_err(|e| WidgetError::InvalidProps(format!("{} #{}: {}", self.kind, self.id, e)))
    }

    /// Deserialize the props into a typed struct, first replacing every
    /// missing or unreadable key with its value in `T::default()`.
    ///
    /// Keys `T` doesn't declare are kept as they are.
    pub fn repair_props<T>(&mut self) -> Result<T, WidgetError>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let defaults = to_object(&T::default());
        for (key, default) in &defaults {
            let Some(current) = self.props.get(key).cloned() else {
                self.props.insert(key.clone(), default.clone());
                continue;
            };

            let mut candidate = defaults.clone();
            candidate.insert(key.clone(), current);
            if from_object::<T>(&candidate).is_err() {
                log::warn!(
                    "{} widget #{} has an unreadable {:?}, resetting it",
                    self.kind,
                    self.id,
                    key
                );
                self.props.insert(key.clone(), default.clone());
            }
        }
        self.props_as()
    }

    /// Replace the props with a typed struct.
    pub fn set_props<T: Serialize>(&mut self, props: &T) -> Result<(), WidgetError> {
        match serde_json::to_value(props) {
            Ok(Value::Object(map)) => {
                self.props = map;
                Ok(())
            }
            Ok(other) => Err(WidgetError::InvalidProps(format!(
                "expected an object, got {}",
                other
            ))),
            Err(e) => Err(WidgetError::InvalidProps(e.to_string())),
        }
    }
}

/// Widget record as found in storage, before defaults are filled in.
#[derive(Debug, Deserialize)]
pub(crate) struct StoredWidget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub size: Option<Vec2>,
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub theme: Option<WidgetTheme>,
}

/// Deserialize a JSON object into a typed value.
pub fn from_object<T: DeserializeOwned>(object: &Map<String, Value>) -> Result<T, WidgetError> {
    serde_json::from_value(Value::Object(object.clone()))
        .map_err(|e| WidgetError::InvalidProps(e.to_string()))
}

/// Serialize a typed value into a JSON object.
///
/// Values that don't serialize to an object yield an empty map.
pub fn to_object<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
