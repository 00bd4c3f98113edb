//! Application state and command execution.

use crate::commands::{Command, CommandRegistry};
use kurbo::{Point, Vec2};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tabdeck_core::settings::{self, GRID_KEY, LOCALE_KEY, LOCKED_KEY};
use tabdeck_core::widget::SchemaError;
use tabdeck_core::{
    DashboardSettings, FileStorage, GridSettings, ManagerError, Storage, StorageError, Widget,
    WidgetError, WidgetId, WidgetManager, WidgetRegistry, WidgetType,
};
use thiserror::Error;

/// Environment variable overriding the storage directory.
pub const DATA_DIR_ENV: &str = "TABDECK_DATA_DIR";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Invalid(String),
    #[error("No widget with id {0}")]
    NoSuchWidget(WidgetId),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error(transparent)]
    Manager(#[from] ManagerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Storage directory; `None` uses the platform default.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Build the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        }
    }

    fn open_storage(&self) -> Result<FileStorage, StorageError> {
        match &self.data_dir {
            Some(dir) => FileStorage::new(dir.clone()),
            None => FileStorage::default_location(),
        }
    }
}

/// A loaded dashboard.
pub struct App {
    manager: WidgetManager<FileStorage>,
}

impl App {
    /// Open storage and load the dashboard, seeding it on first run.
    pub async fn open(config: &AppConfig) -> Result<Self, AppError> {
        let storage = Arc::new(config.open_storage()?);
        log::debug!("Using storage at {}", storage.base_path().display());

        let mut manager = WidgetManager::new(storage, Arc::new(WidgetRegistry::builtin()));
        manager.load().await?;
        Ok(Self { manager })
    }

    /// Parse `args`, run the command against the configured dashboard and
    /// print its output.
    pub async fn run(args: &[String]) -> Result<(), AppError> {
        let command = Command::parse(args)?;
        if command == Command::Help {
            print!("{}", CommandRegistry::help_text());
            return Ok(());
        }

        let mut app = Self::open(&AppConfig::from_env()).await?;
        let output = app.execute(command).await?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }

    pub fn manager(&self) -> &WidgetManager<FileStorage> {
        &self.manager
    }

    fn storage(&self) -> &FileStorage {
        self.manager.storage()
    }

    fn widget(&self, id: WidgetId) -> Result<&Widget, AppError> {
        self.manager.widget(id).ok_or(AppError::NoSuchWidget(id))
    }

    fn widget_mut(&mut self, id: WidgetId) -> Result<&mut Widget, AppError> {
        self.manager.widget_mut(id).ok_or(AppError::NoSuchWidget(id))
    }

    /// Run one command, returning the text to print.
    pub async fn execute(&mut self, command: Command) -> Result<String, AppError> {
        match command {
            Command::List => Ok(self.list()),
            Command::Types => Ok(self.types()),
            Command::Show(id) => self.show(id),
            Command::Add(kind) => {
                let widget = self.manager.create_widget(&kind).await?;
                Ok(format!("Added {} widget #{}", widget.kind, widget.id))
            }
            Command::Remove(id) => match self.manager.remove_widget(id).await? {
                0 => Err(AppError::NoSuchWidget(id)),
                _ => Ok(format!("Removed widget #{}", id)),
            },
            Command::Move { id, x, y } => {
                if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
                    return Err(AppError::Invalid(
                        "position must be a non-negative number".to_string(),
                    ));
                }
                self.widget_mut(id)?.position = Some(Point::new(x, y));
                self.manager.save().await?;
                Ok(String::new())
            }
            Command::Unplace(id) => {
                self.widget_mut(id)?.position = None;
                self.manager.save().await?;
                Ok(String::new())
            }
            Command::Resize { id, width, height } => {
                if !(width.is_finite() && height.is_finite()) || width < 1.0 || height < 1.0 {
                    return Err(AppError::Invalid("size must be a finite 1x1 or more".to_string()));
                }
                self.widget_mut(id)?.size = Vec2::new(width, height);
                self.manager.save().await?;
                Ok(String::new())
            }
            Command::Set { id, key, value } => {
                let widget_type = self.widget_type(id)?;
                let widget = self.widget(id)?;
                widget_type.schema(widget).validate_value(&key, &value)?;

                let mut props = widget.props.clone();
                props.insert(key, value);
                widget_type.check_props(&props)?;

                self.widget_mut(id)?.props = props;
                self.manager.save().await?;
                Ok(String::new())
            }
            Command::Theme { id, key, value } => {
                self.widget_type(id)?.theme_schema().validate_value(&key, &value)?;
                self.widget_mut(id)?.theme.insert(key, value);
                self.manager.save().await?;
                Ok(String::new())
            }
            Command::Reset => {
                self.manager.reset_to_default().await?;
                Ok(format!("Reset to {} widgets", self.manager.widgets().len()))
            }
            Command::Lock => {
                settings::put(self.storage(), LOCKED_KEY, &true).await?;
                Ok(String::new())
            }
            Command::Unlock => {
                settings::put(self.storage(), LOCKED_KEY, &false).await?;
                Ok(String::new())
            }
            Command::Locale(locale) => {
                settings::put(self.storage(), LOCALE_KEY, &locale).await?;
                Ok(String::new())
            }
            Command::Grid { columns, spacing } => {
                let grid = GridSettings { columns, spacing };
                if !grid.is_valid() {
                    return Err(AppError::Invalid(
                        "columns and spacing must be positive".to_string(),
                    ));
                }
                settings::put(self.storage(), GRID_KEY, &grid).await?;
                Ok(String::new())
            }
            Command::Settings => {
                let current = DashboardSettings::load(self.storage()).await?;
                serde_json::to_string_pretty(&current)
                    .map_err(|e| StorageError::Serialization(e.to_string()).into())
            }
            Command::Export => self.export().await,
            Command::Help => Ok(CommandRegistry::help_text()),
        }
    }

    fn widget_type(&self, id: WidgetId) -> Result<Arc<dyn WidgetType>, AppError> {
        let widget = self.widget(id)?;
        self.manager
            .registry()
            .get(&widget.kind)
            .cloned()
            .ok_or_else(|| ManagerError::UnknownWidgetType(widget.kind.clone()).into())
    }

    fn list(&self) -> String {
        let mut lines = Vec::new();
        for widget in self.manager.widgets() {
            let position = match widget.position {
                Some(p) => format!("{},{}", p.x, p.y),
                None => "auto".to_string(),
            };
            lines.push(format!(
                "#{:<4} {:<10} at {:<8} {}x{}",
                widget.id, widget.kind, position, widget.size.x, widget.size.y
            ));
        }
        lines.join("\n")
    }

    fn types(&self) -> String {
        self.manager
            .registry()
            .iter()
            .map(|t| format!("{:<10} {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn show(&self, id: WidgetId) -> Result<String, AppError> {
        let widget = self.widget(id)?;
        serde_json::to_string_pretty(widget)
            .map_err(|e| StorageError::Serialization(e.to_string()).into())
    }

    async fn export(&self) -> Result<String, AppError> {
        let all: BTreeMap<String, Value> = self.storage().get_all().await?.into_iter().collect();
        serde_json::to_string_pretty(&all)
            .map_err(|e| StorageError::Serialization(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use serde_json::json;
    use tabdeck_core::widget::DEFAULT_WIDGETS;
    use tempfile::tempdir;

    fn open(dir: &tempfile::TempDir) -> App {
        let config = AppConfig {
            data_dir: Some(dir.path().to_path_buf()),
        };
        block_on(App::open(&config)).unwrap()
    }

    fn run(app: &mut App, line: &str) -> Result<String, AppError> {
        let args: Vec<String> = line.split_whitespace().map(String::from).collect();
        let command = Command::parse(&args)?;
        block_on(app.execute(command))
    }

    #[test]
    fn test_first_run_seeds_defaults() {
        let dir = tempdir().unwrap();
        let app = open(&dir);

        assert_eq!(app.manager().widgets().len(), DEFAULT_WIDGETS.len());
        assert!(dir.path().join("widgets.json").exists());
    }

    #[test]
    fn test_add_move_and_reopen() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        assert_eq!(run(&mut app, "add Search").unwrap(), "Added Search widget #10");
        run(&mut app, "move 10 2 3").unwrap();
        run(&mut app, "set 10 searchTitle Ecosia").unwrap();
        run(&mut app, "remove 1").unwrap();

        let reopened = open(&dir);
        let search = reopened.manager().widget(10).unwrap();
        assert_eq!(search.position, Some(Point::new(2.0, 3.0)));
        assert_eq!(search.props["searchTitle"], json!("Ecosia"));
        assert!(reopened.manager().widget(1).is_none());
        assert_eq!(reopened.manager().last_id(), 10);
    }

    #[test]
    fn test_set_is_validated() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        // Widget 3 is the default search box
        assert!(matches!(
            run(&mut app, "set 3 searchURL nope"),
            Err(AppError::Schema(SchemaError::Invalid { .. }))
        ));
        assert!(matches!(
            run(&mut app, "set 3 colour red"),
            Err(AppError::Schema(SchemaError::UnknownField(_)))
        ));
        assert!(run(&mut app, "theme 1 textColor #abcdef").is_ok());
        assert!(run(&mut app, "theme 1 textColor red").is_err());
    }

    #[test]
    fn test_set_keeps_dashboard_loadable() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        // Widget 4 is the default age widget, 5 the default links
        assert!(run(&mut app, "set 4 decimalPlaces 1.5").is_err());
        assert!(matches!(
            run(&mut app, "set 4 birthDate yesterday"),
            Err(AppError::Widget(WidgetError::InvalidProps(_)))
        ));
        assert!(matches!(
            run(&mut app, "set 5 links 42"),
            Err(AppError::Widget(WidgetError::InvalidProps(_)))
        ));
        run(&mut app, "set 4 decimalPlaces 3").unwrap();
        run(&mut app, r#"set 5 links [{"title":"Home","url":"https://example.com"}]"#).unwrap();

        let reopened = open(&dir);
        let widgets = reopened.manager();
        assert_eq!(widgets.widgets().len(), DEFAULT_WIDGETS.len());
        assert_eq!(widgets.widget(4).unwrap().props["decimalPlaces"], json!(3));
        assert_eq!(
            widgets.widget(5).unwrap().props["links"],
            json!([{ "title": "Home", "url": "https://example.com" }])
        );
    }

    #[test]
    fn test_move_and_resize_reject_non_finite() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        for line in ["move 3 NaN 1", "move 3 1 inf", "resize 2 inf 1", "resize 2 1 NaN"] {
            assert!(matches!(run(&mut app, line), Err(AppError::Invalid(_))), "{}", line);
        }

        let reopened = open(&dir);
        let ids: Vec<WidgetId> = reopened.manager().widgets().iter().map(|w| w.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<WidgetId>>());
        assert_eq!(reopened.manager().widget(3).unwrap().position, None);
    }

    #[test]
    fn test_missing_widget() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        assert!(matches!(run(&mut app, "remove 99"), Err(AppError::NoSuchWidget(99))));
        assert!(matches!(run(&mut app, "show 99"), Err(AppError::NoSuchWidget(99))));
        assert!(matches!(
            run(&mut app, "add Teapot"),
            Err(AppError::Manager(ManagerError::UnknownWidgetType(_)))
        ));
    }

    #[test]
    fn test_settings_commands() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        run(&mut app, "lock").unwrap();
        run(&mut app, "locale de").unwrap();
        run(&mut app, "grid 20 10").unwrap();
        assert!(run(&mut app, "grid 0 10").is_err());

        let settings: DashboardSettings =
            serde_json::from_str(&run(&mut app, "settings").unwrap()).unwrap();
        assert!(settings.locked);
        assert_eq!(settings.locale, "de");
        assert_eq!(settings.grid, GridSettings { columns: 20, spacing: 10.0 });

        let export: Value = serde_json::from_str(&run(&mut app, "export").unwrap()).unwrap();
        assert_eq!(export["locale"], json!("de"));
        assert_eq!(export["widgets"].as_array().unwrap().len(), 9);
    }

    #[test]
    fn test_list_and_resize() {
        let dir = tempdir().unwrap();
        let mut app = open(&dir);

        run(&mut app, "resize 1 4 2").unwrap();
        assert!(run(&mut app, "resize 1 0 2").is_err());

        let list = run(&mut app, "list").unwrap();
        assert_eq!(list.lines().count(), 9);
        assert!(list.lines().next().unwrap().contains("Clock"));
        assert!(list.contains("4x2"));
        assert!(run(&mut app, "types").unwrap().contains("Weather"));
    }
}
