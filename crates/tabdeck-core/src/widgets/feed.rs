//! RSS/Atom feed widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedProps {
    pub url: String,
}

impl Default for FeedProps {
    fn default() -> Self {
        Self {
            url: "https://feeds.bbci.co.uk/news/rss.xml".to_string(),
        }
    }
}

/// Shows the latest entries of an RSS or Atom feed.
pub struct Feed;

impl WidgetType for Feed {
    fn name(&self) -> &'static str {
        "Feed"
    }

    fn description(&self) -> &'static str {
        "Shows the latest entries of an RSS or Atom feed"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 6.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&FeedProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new().field("url", "Feed URL", FieldKind::Url)
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<FeedProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            widget.repair_props::<FeedProps>()?;
            Ok(())
        })
    }
}
