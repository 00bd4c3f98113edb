//! Weather widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherProps {
    /// Forecast provider's location code.
    pub location_id: String,
    pub location_name: String,
    pub unit: TemperatureUnit,
}

impl Default for WeatherProps {
    fn default() -> Self {
        Self {
            location_id: "51d45n2d59".to_string(),
            location_name: "Bristol".to_string(),
            unit: TemperatureUnit::Celsius,
        }
    }
}

/// Current weather and forecast.
pub struct Weather;

impl WidgetType for Weather {
    fn name(&self) -> &'static str {
        "Weather"
    }

    fn description(&self) -> &'static str {
        "Current weather and a three day forecast"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 3.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&WeatherProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new()
            .field("locationId", "Location code", FieldKind::String)
            .field("locationName", "Location name", FieldKind::String)
            .field(
                "unit",
                "Temperature unit",
                FieldKind::Select(vec![
                    ("Celsius".to_string(), "Celsius".to_string()),
                    ("Fahrenheit".to_string(), "Fahrenheit".to_string()),
                ]),
            )
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<WeatherProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            widget.repair_props::<WeatherProps>()?;
            Ok(())
        })
    }
}
