//! Widget type registry.

use super::types::WidgetType;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves type names to their `WidgetType`.
///
/// Iteration follows registration order, which is also the order the
/// "add widget" list is shown in.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    types: HashMap<&'static str, Arc<dyn WidgetType>>,
    order: Vec<&'static str>,
}

impl WidgetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in widget kind.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::widgets::register_builtin(&mut registry);
        registry
    }

    /// Register a widget type, replacing any type with the same name.
    pub fn register(&mut self, widget_type: impl WidgetType + 'static) {
        let name = widget_type.name();
        if self.types.insert(name, Arc::new(widget_type)).is_some() {
            log::debug!("Replaced widget type {}", name);
        } else {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn WidgetType>> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Type names in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    /// Types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn WidgetType>> {
        self.order.iter().filter_map(|name| self.types.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("types", &self.order)
            .finish()
    }
}
