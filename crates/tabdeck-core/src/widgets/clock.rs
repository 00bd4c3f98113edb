//! Clock widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetTheme, WidgetType, SHOW_PANEL_BG,
    from_object, theme_schema_base, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const TEXT_COLOR: &str = "textColor";
const DATE_STYLE: &str = "dateStyle";
const DEFAULT_TEXT_COLOR: &str = "#ffffff";

/// How the date under the time is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateStyle {
    /// No date.
    #[default]
    None,
    Full,
    Long,
    Medium,
    Short,
}

impl DateStyle {
    pub const ALL: [DateStyle; 5] = [
        DateStyle::None,
        DateStyle::Full,
        DateStyle::Long,
        DateStyle::Medium,
        DateStyle::Short,
    ];

    /// Style stored by position in `ALL`, as older dashboards did.
    fn from_index(index: u64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    fn label(self) -> &'static str {
        match self {
            DateStyle::None => "None",
            DateStyle::Full => "Extended",
            DateStyle::Long => "Standard",
            DateStyle::Medium => "Abbreviated",
            DateStyle::Short => "Shortened",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockProps {
    pub show_seconds: bool,
    pub hour12: bool,
    pub date_style: DateStyle,
}

/// Shows the time.
pub struct Clock;

impl WidgetType for Clock {
    fn name(&self) -> &'static str {
        "Clock"
    }

    fn description(&self) -> &'static str {
        "Shows the time"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(15.0, 2.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&ClockProps::default())
    }

    fn initial_theme(&self) -> WidgetTheme {
        let mut theme = WidgetTheme::new();
        theme.insert(SHOW_PANEL_BG.to_string(), Value::Bool(false));
        theme.insert(TEXT_COLOR.to_string(), Value::from(DEFAULT_TEXT_COLOR));
        theme
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        let styles = DateStyle::ALL
            .iter()
            .map(|style| (format!("{:?}", style), style.label().to_string()))
            .collect();

        Schema::new()
            .field("showSeconds", "Show seconds", FieldKind::Boolean)
            .field("hour12", "12 hour clock", FieldKind::Boolean)
            .field(DATE_STYLE, "Date style", FieldKind::Select(styles))
            .hint("The time is based on your system's timezone")
    }

    fn theme_schema(&self) -> Schema {
        theme_schema_base().field(TEXT_COLOR, "Text colour", FieldKind::Color)
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<ClockProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            // Older clocks predate the text colour and date style settings
            widget
                .theme
                .entry(TEXT_COLOR)
                .or_insert_with(|| Value::from(DEFAULT_TEXT_COLOR));

            let numeric = widget.props.get(DATE_STYLE).and_then(Value::as_u64);
            if let Some(style) = numeric.and_then(DateStyle::from_index) {
                let value = serde_json::to_value(style)
                    .map_err(|e| WidgetError::Migration(e.to_string()))?;
                widget.props.insert(DATE_STYLE.to_string(), value);
            }

            widget.repair_props::<ClockProps>()?;
            Ok(())
        })
    }
}
