//! TabDeck Core Library
//!
//! Widget model, widget-type registry, persistence and preferences for the
//! TabDeck new-tab dashboard. Rendering lives elsewhere; this crate only
//! decides what is on the dashboard and how it is stored.

pub mod settings;
pub mod storage;
pub mod widget;
pub mod widgets;

pub use settings::{DashboardSettings, GridSettings, ThemeConfig};
pub use storage::{MemoryStorage, PlatformStorage, Storage, StorageError, StorageResult};
pub use widget::{
    ManagerError, Props, Schema, Widget, WidgetError, WidgetId, WidgetManager, WidgetRegistry,
    WidgetTheme, WidgetType,
};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
