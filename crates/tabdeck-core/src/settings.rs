//! Dashboard-wide preferences stored next to the widgets.

use crate::storage::{Storage, StorageError, StorageResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const LOCALE_KEY: &str = "locale";
pub const THEME_KEY: &str = "theme";
pub const LOCKED_KEY: &str = "locked";
pub const GRID_KEY: &str = "grid";

/// Default locale when none has been chosen.
pub const DEFAULT_LOCALE: &str = "en";

/// Global look of the dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

/// Layout grid the widgets snap to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Number of columns across the page.
    pub columns: u32,
    /// Gap between cells, in pixels.
    pub spacing: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            columns: 15,
            spacing: 15.0,
        }
    }
}

impl GridSettings {
    pub fn is_valid(&self) -> bool {
        self.columns > 0 && self.spacing > 0.0 && self.spacing.is_finite()
    }
}

/// All dashboard-wide preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub locale: String,
    pub theme: ThemeConfig,
    /// Locked dashboards can't be rearranged.
    pub locked: bool,
    pub grid: GridSettings,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            theme: ThemeConfig::default(),
            locked: false,
            grid: GridSettings::default(),
        }
    }
}

/// Read a typed value, falling back to `default` when missing or undecodable.
pub async fn get_or<S, T>(storage: &S, key: &str, default: T) -> StorageResult<T>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    match storage.get(key).await? {
        None => Ok(default),
        Some(value) => match serde_json::from_value(value) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("Ignoring unreadable setting {:?}: {}", key, e);
                Ok(default)
            }
        },
    }
}

/// Write a typed value.
pub async fn put<S, T>(storage: &S, key: &str, value: &T) -> StorageResult<()>
where
    S: Storage + ?Sized,
    T: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.set(key, value).await
}

impl DashboardSettings {
    /// Read every preference, using defaults for anything missing.
    pub async fn load<S: Storage + ?Sized>(storage: &S) -> StorageResult<Self> {
        let defaults = Self::default();

        let mut grid = get_or(storage, GRID_KEY, defaults.grid).await?;
        if !grid.is_valid() {
            log::warn!("Ignoring invalid grid settings {:?}", grid);
            grid = GridSettings::default();
        }

        Ok(Self {
            locale: get_or(storage, LOCALE_KEY, defaults.locale).await?,
            theme: get_or(storage, THEME_KEY, defaults.theme).await?,
            locked: get_or(storage, LOCKED_KEY, defaults.locked).await?,
            grid,
        })
    }

    /// Write every preference.
    pub async fn save<S: Storage + ?Sized>(&self, storage: &S) -> StorageResult<()> {
        put(storage, LOCALE_KEY, &self.locale).await?;
        put(storage, THEME_KEY, &self.theme).await?;
        put(storage, LOCKED_KEY, &self.locked).await?;
        put(storage, GRID_KEY, &self.grid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use pollster::block_on;
    use serde_json::json;

    #[test]
    fn test_defaults_when_empty() {
        let storage = MemoryStorage::new();
        let settings = block_on(DashboardSettings::load(&storage)).unwrap();
        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(settings.grid.columns, 15);
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let settings = DashboardSettings {
            locale: "fr".to_string(),
            theme: ThemeConfig {
                theme: Some("dark".to_string()),
                font_family: None,
                custom_css: Some("body { margin: 0 }".to_string()),
            },
            locked: true,
            grid: GridSettings { columns: 20, spacing: 10.0 },
        };

        block_on(settings.save(&storage)).unwrap();
        assert_eq!(block_on(storage.get(LOCKED_KEY)).unwrap(), Some(json!(true)));

        let loaded = block_on(DashboardSettings::load(&storage)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unreadable_values_fall_back() {
        let storage = MemoryStorage::new();
        block_on(storage.set(LOCALE_KEY, json!(12))).unwrap();
        block_on(storage.set(GRID_KEY, json!({ "columns": 0, "spacing": 10.0 }))).unwrap();

        let loaded = block_on(DashboardSettings::load(&storage)).unwrap();
        assert_eq!(loaded.locale, DEFAULT_LOCALE);
        assert_eq!(loaded.grid, GridSettings::default());
    }

    #[test]
    fn test_theme_omits_unset_fields() {
        let storage = MemoryStorage::new();
        let theme = ThemeConfig { font_family: Some("Roboto".into()), ..Default::default() };
        block_on(put(&storage, THEME_KEY, &theme)).unwrap();

        assert_eq!(
            block_on(storage.get(THEME_KEY)).unwrap(),
            Some(json!({ "fontFamily": "Roboto" }))
        );
    }
}
