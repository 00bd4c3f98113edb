//! Widget manager: the dashboard's widget list and its persistence.

use super::registry::WidgetRegistry;
use super::types::initial_theme_for;
use super::{StoredWidget, Widget, WidgetError, WidgetId};
use crate::storage::{Storage, StorageError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Storage key holding the widget list.
pub const WIDGETS_KEY: &str = "widgets";

/// Widget types seeded on first run, in dashboard order.
pub const DEFAULT_WIDGETS: [&str; 9] = [
    "Clock",
    "Greeting",
    "Search",
    "Age",
    "Links",
    "HelpAbout",
    "Weather",
    "Feed",
    "Notes",
];

/// Widget manager errors.
#[derive(Debug, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),
    #[error("Failed to load {kind} widget #{id}: {source}")]
    Hook {
        id: WidgetId,
        kind: String,
        #[source]
        source: WidgetError,
    },
}

/// Owns the ordered list of widgets on the dashboard.
///
/// Callers may mutate widgets in place through `widgets_mut` / `widget_mut`
/// and then persist with `save`. Every other mutation saves on its own and
/// awaits the write, so writes reach storage in call order.
pub struct WidgetManager<S: Storage + ?Sized> {
    storage: Arc<S>,
    registry: Arc<WidgetRegistry>,
    /// Last id handed out.
    id_counter: WidgetId,
    widgets: Vec<Widget>,
}

impl<S: Storage + ?Sized> WidgetManager<S> {
    /// Create an empty manager. Call `load` to restore the persisted dashboard.
    pub fn new(storage: Arc<S>, registry: Arc<WidgetRegistry>) -> Self {
        Self {
            storage,
            registry,
            id_counter: 0,
            widgets: Vec::new(),
        }
    }

    /// Widgets in dashboard order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Mutable access to the widget list. Call `save` afterwards.
    pub fn widgets_mut(&mut self) -> &mut Vec<Widget> {
        &mut self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Mutable access to one widget. Call `save` afterwards.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    /// The most recently assigned id, 0 if none.
    pub fn last_id(&self) -> WidgetId {
        self.id_counter
    }

    /// Restore the persisted dashboard, or seed the default one.
    ///
    /// Entries of unknown types are dropped. Restored widgets get missing
    /// sizes and themes filled in, then each type's `on_loaded` hook runs in
    /// dashboard order. A failing hook aborts the load; widgets before it have
    /// already been migrated.
    pub async fn load(&mut self) -> Result<(), ManagerError> {
        let entries = match self.storage.get(WIDGETS_KEY).await? {
            None | Some(Value::Null) => {
                log::info!("No saved widgets, seeding default dashboard");
                return self.reset_to_default().await;
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(StorageError::Serialization(format!(
                    "Expected a widget list under {:?}, found {}",
                    WIDGETS_KEY, other
                ))
                .into());
            }
        };

        let registry = Arc::clone(&self.registry);
        let stored: Vec<StoredWidget> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<StoredWidget>(entry) {
                Ok(widget) if registry.contains(&widget.kind) => Some(widget),
                Ok(widget) => {
                    log::debug!("Dropping widget #{} of unknown type {}", widget.id, widget.kind);
                    None
                }
                Err(e) => {
                    log::warn!("Dropping undecodable widget: {}", e);
                    None
                }
            })
            .collect();

        self.id_counter = stored.iter().map(|w| w.id).max().unwrap_or(0);
        self.widgets.clear();

        for stored in stored {
            // Filtered above
            let Some(widget_type) = registry.get(&stored.kind) else {
                continue;
            };

            self.widgets.push(Widget {
                id: stored.id,
                kind: stored.kind,
                position: stored.position,
                size: stored.size.unwrap_or_else(|| widget_type.default_size()),
                props: stored.props,
                theme: stored
                    .theme
                    .unwrap_or_else(|| initial_theme_for(widget_type.as_ref())),
            });

            let Some(widget) = self.widgets.last_mut() else {
                continue;
            };
            let id = widget.id;
            widget_type
                .on_loaded(widget)
                .await
                .map_err(|source| ManagerError::Hook {
                    id,
                    kind: widget_type.name().to_string(),
                    source,
                })?;
        }

        log::debug!("Loaded {} widgets", self.widgets.len());
        Ok(())
    }

    /// Persist the widget list.
    pub async fn save(&self) -> Result<(), ManagerError> {
        let value = serde_json::to_value(&self.widgets)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(WIDGETS_KEY, value).await?;
        log::debug!("Saved {} widgets", self.widgets.len());
        Ok(())
    }

    /// Replace every widget with the default dashboard.
    ///
    /// Ids keep counting up from the last one handed out.
    pub async fn reset_to_default(&mut self) -> Result<(), ManagerError> {
        self.widgets.clear();
        for kind in DEFAULT_WIDGETS {
            self.push_new(kind)?;
        }
        log::info!("Reset dashboard to {} default widgets", self.widgets.len());
        self.save().await
    }

    /// Create a widget of the given type, append it, and persist.
    ///
    /// Returns the new widget so the caller can adjust it before the next `save`.
    pub async fn create_widget(&mut self, kind: &str) -> Result<&mut Widget, ManagerError> {
        let index = self.push_new(kind)?;
        self.save().await?;
        Ok(&mut self.widgets[index])
    }

    /// Remove every widget with the given id and persist.
    ///
    /// Returns how many widgets were removed; an unknown id is not an error.
    pub async fn remove_widget(&mut self, id: WidgetId) -> Result<usize, ManagerError> {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        let removed = before - self.widgets.len();
        self.save().await?;
        Ok(removed)
    }

    /// Build a widget from its type's templates and append it, without saving.
    fn push_new(&mut self, kind: &str) -> Result<usize, ManagerError> {
        let widget_type = self
            .registry
            .get(kind)
            .cloned()
            .ok_or_else(|| ManagerError::UnknownWidgetType(kind.to_string()))?;

        self.id_counter += 1;
        self.widgets.push(Widget {
            id: self.id_counter,
            kind: widget_type.name().to_string(),
            position: None,
            size: widget_type.default_size(),
            props: widget_type.initial_props(),
            theme: initial_theme_for(widget_type.as_ref()),
        });

        let index = self.widgets.len() - 1;
        widget_type.on_created(&mut self.widgets[index]);
        log::info!("Created {} widget #{}", kind, self.id_counter);
        Ok(index)
    }
}
