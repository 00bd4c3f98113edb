//! Greeting widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GreetingProps {
    /// Name to greet; empty greets nobody in particular.
    pub name: String,
}

/// "Good morning" and friends.
pub struct Greeting;

impl WidgetType for Greeting {
    fn name(&self) -> &'static str {
        "Greeting"
    }

    fn description(&self) -> &'static str {
        "Greets you by the time of day"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(15.0, 1.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&GreetingProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new().field("name", "Your name", FieldKind::String)
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<GreetingProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            widget.repair_props::<GreetingProps>()?;
            Ok(())
        })
    }
}
