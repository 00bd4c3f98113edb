//! Notes widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesProps {
    pub notes: String,
}

impl Default for NotesProps {
    fn default() -> Self {
        Self {
            notes: "Welcome to TabDeck!\n\n\
                    Click the edit button on a widget to change its settings, \
                    or use \"Add Widget\" to add more."
                .to_string(),
        }
    }
}

/// Free-form text.
pub struct Notes;

impl WidgetType for Notes {
    fn name(&self) -> &'static str {
        "Notes"
    }

    fn description(&self) -> &'static str {
        "Write down your thoughts"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 3.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&NotesProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new().field("notes", "Notes", FieldKind::Text)
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<NotesProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            widget.repair_props::<NotesProps>()?;
            Ok(())
        })
    }
}
