//! Built-in widget kinds.

mod age;
mod clock;
mod feed;
mod greeting;
mod help_about;
mod links;
mod notes;
mod search;
mod weather;

pub use age::{Age, AgeProps};
pub use clock::{Clock, ClockProps, DateStyle};
pub use feed::{Feed, FeedProps};
pub use greeting::{Greeting, GreetingProps};
pub use help_about::HelpAbout;
pub use links::{Link, Links, LinksProps};
pub use notes::{Notes, NotesProps};
pub use search::{Search, SearchProps};
pub use weather::{TemperatureUnit, Weather, WeatherProps};

use crate::widget::WidgetRegistry;

/// Register every built-in kind, in "add widget" order.
pub fn register_builtin(registry: &mut WidgetRegistry) {
    registry.register(Clock);
    registry.register(Greeting);
    registry.register(Search);
    registry.register(Age);
    registry.register(Links);
    registry.register(HelpAbout);
    registry.register(Weather);
    registry.register(Feed);
    registry.register(Notes);
}
