//! Hosted-app registry built from the TOML manifests under `manifests/`.
//!
//! `build.rs` validates the manifests and embeds them as JSON; this module parses that catalog
//! once and answers the lookups the shell needs before it issues an open command.

use std::sync::OnceLock;

use leptos::logging;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::model::{AppKind, AppSettings, IconId, IconState, PowerOffKind};

include!(concat!(env!("OUT_DIR"), "/app_catalog_generated.rs"));

/// Start-menu entry that requests a log-off confirmation.
pub const LOG_OFF_LABEL: &str = "Log Off";
/// Start-menu entry that requests a shutdown confirmation.
pub const TURN_OFF_LABEL: &str = "Turn Off Computer";
/// Message carried by the error window opened for unregistered command names.
pub const APP_NOT_FOUND_MESSAGE: &str = "C:\\\nApplication not found";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("app catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppDescriptor {
    pub app_id: AppKind,
    pub display_name: String,
    pub header_title: String,
    #[serde(default)]
    pub menu_aliases: Vec<String>,
    pub multi_instance: bool,
    pub show_in_launcher: bool,
    pub show_on_desktop: bool,
    pub open_on_boot: bool,
    pub sort_order: u32,
    #[serde(default)]
    pub inject_props: Option<Value>,
}

impl AppDescriptor {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            kind: self.app_id,
            title: self.header_title.clone(),
            multi_instance: self.multi_instance,
            maximized: false,
            inject_props: self.inject_props.clone().unwrap_or(Value::Null),
        }
    }

    fn answers_to(&self, label: &str) -> bool {
        self.display_name == label || self.menu_aliases.iter().any(|alias| alias == label)
    }
}

/// What a start-menu selection asks the shell to do.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuCommand {
    OpenApp(AppSettings),
    PowerOff(PowerOffKind),
}

/// Parses a JSON catalog in the format emitted by the build script.
///
/// # Errors
///
/// Returns [`CatalogError::Malformed`] when `raw` is not a list of app descriptors.
pub fn parse_app_catalog(raw: &str) -> Result<Vec<AppDescriptor>, CatalogError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn app_catalog() -> &'static [AppDescriptor] {
    static CATALOG: OnceLock<Vec<AppDescriptor>> = OnceLock::new();
    CATALOG.get_or_init(|| match parse_app_catalog(APP_MANIFEST_CATALOG_JSON) {
        Ok(catalog) => catalog,
        Err(err) => {
            logging::warn!("{err}");
            Vec::new()
        }
    })
}

pub fn app_descriptor(kind: AppKind) -> Option<&'static AppDescriptor> {
    app_catalog().iter().find(|entry| entry.app_id == kind)
}

/// Open settings for `kind`, falling back to single-instance defaults if it is not cataloged.
pub fn app_settings(kind: AppKind) -> AppSettings {
    app_descriptor(kind)
        .map(AppDescriptor::settings)
        .unwrap_or_else(|| AppSettings::new(kind))
}

pub fn launcher_apps() -> Vec<&'static AppDescriptor> {
    app_catalog()
        .iter()
        .filter(|entry| entry.show_in_launcher)
        .collect()
}

pub fn desktop_icon_apps() -> Vec<&'static AppDescriptor> {
    app_catalog()
        .iter()
        .filter(|entry| entry.show_on_desktop)
        .collect()
}

/// Desktop icons in catalog order, numbered from zero, none focused.
pub fn default_icon_state() -> Vec<IconState> {
    desktop_icon_apps()
        .into_iter()
        .zip(0u32..)
        .map(|(entry, id)| IconState {
            id: IconId(id),
            kind: entry.app_id,
            label: entry.display_name.clone(),
            is_focus: false,
        })
        .collect()
}

pub fn boot_app_settings() -> Vec<AppSettings> {
    app_catalog()
        .iter()
        .filter(|entry| entry.open_on_boot)
        .map(AppDescriptor::settings)
        .collect()
}

/// Settings for an error window showing `message`.
pub fn error_app_settings(message: &str) -> AppSettings {
    AppSettings {
        multi_instance: true,
        inject_props: json!({ "message": message }),
        ..app_settings(AppKind::Error)
    }
}

/// Resolves a start-menu command name. Unregistered names open an error window.
pub fn resolve_menu_command(label: &str) -> MenuCommand {
    match label {
        LOG_OFF_LABEL => MenuCommand::PowerOff(PowerOffKind::LogOff),
        TURN_OFF_LABEL => MenuCommand::PowerOff(PowerOffKind::Shutdown),
        _ => app_catalog()
            .iter()
            .find(|entry| entry.answers_to(label))
            .map(|entry| MenuCommand::OpenApp(entry.settings()))
            .unwrap_or_else(|| MenuCommand::OpenApp(error_app_settings(APP_NOT_FOUND_MESSAGE))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_catalog_parses_and_covers_every_kind() {
        let catalog = parse_app_catalog(APP_MANIFEST_CATALOG_JSON).expect("catalog parses");
        for kind in [
            AppKind::InternetExplorer,
            AppKind::Minesweeper,
            AppKind::MyComputer,
            AppKind::Notepad,
            AppKind::Winamp,
            AppKind::Paint,
            AppKind::DisplayProperties,
            AppKind::Error,
        ] {
            assert!(
                catalog.iter().any(|entry| entry.app_id == kind),
                "missing catalog entry for {}",
                kind.token()
            );
        }
    }

    #[test]
    fn catalog_is_in_sort_order() {
        let orders: Vec<u32> = app_catalog().iter().map(|entry| entry.sort_order).collect();
        let mut sorted = orders.clone();
        sorted.sort_unstable();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn malformed_catalog_is_reported() {
        assert!(matches!(
            parse_app_catalog("{\"not\":\"a list\"}"),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn instance_policy_comes_from_manifests() {
        assert!(!app_settings(AppKind::Notepad).multi_instance);
        assert!(app_settings(AppKind::MyComputer).multi_instance);
        assert_eq!(app_settings(AppKind::Notepad).title, "Untitled - Notepad");
    }

    #[test]
    fn menu_labels_and_aliases_resolve_to_apps() {
        match resolve_menu_command("Internet") {
            MenuCommand::OpenApp(settings) => assert_eq!(settings.kind, AppKind::InternetExplorer),
            other => panic!("unexpected command {other:?}"),
        }
        match resolve_menu_command("Paint") {
            MenuCommand::OpenApp(settings) => assert_eq!(settings.kind, AppKind::Paint),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn power_labels_resolve_to_power_commands() {
        assert_eq!(
            resolve_menu_command(LOG_OFF_LABEL),
            MenuCommand::PowerOff(PowerOffKind::LogOff)
        );
        assert_eq!(
            resolve_menu_command(TURN_OFF_LABEL),
            MenuCommand::PowerOff(PowerOffKind::Shutdown)
        );
    }

    #[test]
    fn unknown_labels_open_an_error_window() {
        let MenuCommand::OpenApp(settings) = resolve_menu_command("Solitaire") else {
            panic!("expected an error window");
        };
        assert_eq!(settings.kind, AppKind::Error);
        assert!(settings.multi_instance);
        assert_eq!(settings.inject_props["message"], APP_NOT_FOUND_MESSAGE);
    }

    #[test]
    fn desktop_icons_are_numbered_in_catalog_order() {
        let icons = default_icon_state();
        let expected: Vec<AppKind> = desktop_icon_apps().iter().map(|e| e.app_id).collect();

        assert_eq!(icons.iter().map(|icon| icon.kind).collect::<Vec<_>>(), expected);
        for (index, icon) in icons.iter().enumerate() {
            assert_eq!(icon.id, IconId(index as u32));
            assert!(!icon.is_focus);
        }
    }

    #[test]
    fn boot_apps_follow_open_on_boot_flags() {
        let kinds: Vec<AppKind> = boot_app_settings().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, vec![AppKind::InternetExplorer]);
    }

    #[test]
    fn launcher_lists_visible_apps_in_sort_order() {
        let launcher: Vec<AppKind> = launcher_apps().iter().map(|entry| entry.app_id).collect();
        assert_eq!(
            launcher,
            vec![
                AppKind::InternetExplorer,
                AppKind::Minesweeper,
                AppKind::MyComputer,
                AppKind::Notepad,
                AppKind::Winamp,
                AppKind::Paint,
            ]
        );
    }
}
