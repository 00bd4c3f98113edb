//! Help and about widget.

use crate::widget::{Props, WidgetType};
use kurbo::Vec2;

/// Links to help, the changelog and the source code. Has no settings.
pub struct HelpAbout;

impl WidgetType for HelpAbout {
    fn name(&self) -> &'static str {
        "HelpAbout"
    }

    fn title(&self) -> &'static str {
        "Help and About"
    }

    fn description(&self) -> &'static str {
        "Links to help and information about TabDeck"
    }

    fn default_size(&self) -> Vec2 {
        Vec2::new(5.0, 3.0)
    }

    fn initial_props(&self) -> Props {
        Props::new()
    }
}
