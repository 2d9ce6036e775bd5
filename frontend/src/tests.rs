use crate::config::{Config, DASHBOARD_CONFIG_KEY};
use crate::theme::LocalStorageThemeStore;
use beacon_shared::theme::{ThemeSettings, COLOR_PALETTE_CONFIG, THEME_CONFIG};
use beacon_shared::{DashboardConfig, DateUnit, SharedError, ThemeMode, ThemeStore};
use gloo_storage::{LocalStorage, Storage};
use pretty_assertions::assert_eq;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear() {
    LocalStorage::delete(THEME_CONFIG);
    LocalStorage::delete(COLOR_PALETTE_CONFIG);
    LocalStorage::delete(DASHBOARD_CONFIG_KEY);
}

#[wasm_bindgen_test]
fn test_theme_persists_in_local_storage() {
    clear();
    let settings = ThemeSettings::new(LocalStorageThemeStore);
    assert_eq!(settings.load().mode, ThemeMode::Light);

    settings.save_mode(ThemeMode::Dark).unwrap();
    let config = settings.apply_palette("ocean").unwrap();
    assert_eq!(config.mode, ThemeMode::Dark);
    assert_eq!(config.palette, "ocean");
    assert!(settings.has_custom_palette());

    assert_eq!(LocalStorageThemeStore.get_item(THEME_CONFIG).as_deref(), Some("dark"));
    clear();
}

#[wasm_bindgen_test]
fn test_unknown_palette_is_rejected() {
    clear();
    let settings = ThemeSettings::new(LocalStorageThemeStore);
    assert!(matches!(settings.apply_palette("neon"), Err(SharedError::NotFound(_))));
    assert!(!settings.has_custom_palette());
}

#[wasm_bindgen_test]
fn test_dashboard_config_round_trip() {
    clear();
    assert_eq!(Config::dashboard(), DashboardConfig::default());

    let config = DashboardConfig {
        locale: "fr-FR".to_string(),
        default_unit: DateUnit::Month,
        ..Default::default()
    };
    Config::save_dashboard(&config).unwrap();
    assert_eq!(Config::dashboard(), config);
    clear();
}

#[wasm_bindgen_test]
fn test_invalid_dashboard_config_falls_back() {
    clear();
    LocalStorage::set(DASHBOARD_CONFIG_KEY, r#"{"timezone": "Nowhere/City"}"#).unwrap();
    assert_eq!(Config::dashboard(), DashboardConfig::default());
    clear();
}
