//! Links widget.

use crate::storage::BoxFuture;
use crate::widget::{
    FieldKind, Props, Schema, Widget, WidgetError, WidgetType, from_object, to_object,
};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

impl Link {
    fn new(title: &str, url: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinksProps {
    pub use_website_icons: bool,
    pub links: Vec<Link>,
}

impl Default for LinksProps {
    fn default() -> Self {
        Self {
            use_website_icons: false,
            links: vec![
                Link::new("Wikipedia", "https://en.wikipedia.org"),
                Link::new("Rust", "https://www.rust-lang.org"),
                Link::new("crates.io", "https://crates.io"),
                Link::new("OpenStreetMap", "https://www.openstreetmap.org"),
            ],
        }
    }
}

impl LinksProps {
    /// Links whose URL doesn't parse.
    pub fn broken_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| Url::parse(&link.url).is_err())
    }
}

/// A list of links.
pub struct Links;

impl WidgetType for Links {
    fn name(&self) -> &'static str {
        "Links"
    }

    fn description(&self) -> &'static str {
        "A list of links"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 6.0)
    }

    fn initial_props(&self) -> Props {
        to_object(&LinksProps::default())
    }

    fn schema(&self, _widget: &Widget) -> Schema {
        Schema::new()
            .field("useWebsiteIcons", "Show website icons", FieldKind::Boolean)
            .field("links", "Links", FieldKind::Json)
            .hint("A list of { \"title\", \"url\" } objects")
    }

    fn check_props(&self, props: &Props) -> Result<(), WidgetError> {
        from_object::<LinksProps>(props).map(|_| ())
    }

    fn on_loaded<'a>(&'a self, widget: &'a mut Widget) -> BoxFuture<'a, Result<(), WidgetError>> {
        Box::pin(async move {
            let props: LinksProps = widget.repair_props()?;
            for link in props.broken_links() {
                log::warn!("Links widget #{} has a broken link: {:?}", widget.id, link.url);
            }
            Ok(())
        })
    }
}
