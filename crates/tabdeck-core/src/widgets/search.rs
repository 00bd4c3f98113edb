//! Search box widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProps {
    pub search_title: String,
    #[serde(rename = "searchURL")]
    pub search_url: String,
}

impl Default for SearchProps {
    fn default() -> Self {
        Self {
            search_title: "Google".to_string(),
            search_url: "https://google.com/search".to_string(),
        }
    }
}

/// Search box to your favourite search engine.
pub struct Search;

impl WidgetType for Search {
    fn name(&self) -> &'static str {
        "Search"
    }

    fn description(&self) -> &'static str {
        "Search box to your favourite search engine"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(15.0, 1.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&SearchProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new()
            .field("searchTitle", "Search engine name", FieldKind::String)
            .field("searchURL", "URL", FieldKind::Url)
            .hint("The query is sent as the `q` parameter")
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<SearchProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            widget.repair_props::<SearchProps>()?;
            Ok(())
        })
    }
}
