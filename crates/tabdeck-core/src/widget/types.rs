//! The per-kind widget contract.

use super::schema::{FieldKind, Schema};
use super::{Props, Widget, WidgetError, WidgetTheme};
use crate::storage::BoxFuture;
use kurbo::Vec2;
use serde_json::Value;

/// Theme key toggling the panel background.
pub const SHOW_PANEL_BG: &str = "showPanelBG";

/// Defaults and lifecycle hooks for one kind of widget.
///
/// Every method that returns a template (`initial_props`, `initial_theme`)
/// must build a fresh value on each call; the manager never shares them
/// between widgets.
pub trait WidgetType: Send + Sync {
    /// Registry key, persisted as the widget's `type`.
    fn name(&self) -> &'static str;

    /// Human-readable title.
    fn title(&self) -> &'static str {
        self.name()
    }

    /// One-line description shown when picking a widget to add.
    fn description(&self) -> &'static str;

    /// Size of a newly created widget, in grid cells.
    fn default_size(&self) -> Vec2;

    /// Props of a newly created widget.
    fn initial_props(&self) -> Props;

    /// Theme keys overriding the base theme for this kind.
    fn initial_theme(&self) -> WidgetTheme {
        WidgetTheme::new()
    }

    /// Editable props of `widget`.
    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new()
    }

    /// Editable theme keys.
    fn theme_schema(&self) -> Schema {
        theme_schema_base()
    }

    /// Check edited props before they replace a widget's props.
    ///
    /// Props accepted here must also be accepted by `on_loaded`.
    fn check_props(&self, _props: &Props) -> Result<(), WidgetError> {
        Ok(())
    }

    /// Called once right after a widget of this kind is created.
    fn on_created(&self, _widget: &mut Widget) {}

    /// Called for every restored widget of this kind, in dashboard order.
    ///
    /// This is where older persisted props get migrated to the current shape.
    fn on_loaded<'a>(&'a self, _widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async { Ok(()) })
    }
}

/// The theme schema shared by all kinds.
pub fn theme_schema_base() -> Schema {
    Schema::new().field(SHOW_PANEL_BG, "Show panel background", FieldKind::Boolean)
}

/// Base theme overlaid with the kind's own overrides.
pub fn initial_theme_for(widget_type: &dyn WidgetType) -> WidgetTheme {
    let mut theme = WidgetTheme::new();
    theme.insert(SHOW_PANEL_BG.to_string(), Value::Bool(true));
    theme.extend(widget_type.initial_theme());
    theme
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Plain;

    impl WidgetType for Plain {
        fn name(&self) -> &'static str {
            "Plain"
        }

        fn description(&self) -> &'static str {
            "Nothing to see"
        }

        fn default_size(&self) -> Vec2 {
            Vec2::new(1.0, 1.0)
        }

        fn initial_props(&self) -> Props {
            Props::new()
        }
    }

    struct Dark;

    impl WidgetType for Dark {
        fn name(&self) -> &'static str {
            "Dark"
        }

        fn description(&self) -> &'static str {
            "Dark panel"
        }

        fn default_size(&self) -> Vec2 {
            Vec2::new(2.0, 2.0)
        }

        fn initial_props(&self) -> Props {
            Props::new()
        }

        fn initial_theme(&self) -> WidgetTheme {
            let mut theme = WidgetTheme::new();
            theme.insert(SHOW_PANEL_BG.to_string(), json!(false));
            theme.insert("textColor".to_string(), json!("#000000"));
            theme
        }
    }

    #[test]
    fn test_base_theme() {
        let theme = initial_theme_for(&Plain);
        assert_eq!(Value::Object(theme), json!({ "showPanelBG": true }));
        assert_eq!(Plain.title(), "Plain");
    }

    #[test]
    fn test_theme_overrides() {
        let theme = initial_theme_for(&Dark);
        assert_eq!(
            Value::Object(theme),
            json!({ "showPanelBG": false, "textColor": "#000000" })
        );
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut widget = Widget {
            id: 1,
            kind: "Plain".to_string(),
            position: None,
            size: Plain.default_size(),
            props: Plain.initial_props(),
            theme: initial_theme_for(&Plain),
        };
        let before = widget.clone();

        Plain.on_created(&mut widget);
        pollster::block_on(Plain.on_loaded(&mut widget)).unwrap();

        assert_eq!(widget, before);
        assert!(Plain.schema(&widget).is_empty());
        assert!(Plain.theme_schema().get(SHOW_PANEL_BG).is_some());
    }
}
