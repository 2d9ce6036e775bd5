use beacon_shared::{DashboardConfig, Result, SharedError};
use gloo_storage::{LocalStorage, Storage};
use log::{debug, warn};
use std::rc::Rc;
use yew::prelude::*;

pub const DASHBOARD_CONFIG_KEY: &str = "beacon.dashboard-config";

pub struct Config;

impl Config {
    /// Dashboard settings saved in `LocalStorage`, or the defaults
    pub fn dashboard() -> DashboardConfig {
        let saved: String = match LocalStorage::get(DASHBOARD_CONFIG_KEY) {
            Ok(saved) => saved,
            Err(_) => return DashboardConfig::default(),
        };

        match DashboardConfig::from_json(&saved) {
            Ok(config) => {
                debug!("Loaded dashboard config for locale {}", config.locale);
                config
            }
            Err(e) => {
                warn!("Ignoring saved dashboard config: {}", e);
                DashboardConfig::default()
            }
        }
    }

    pub fn save_dashboard(config: &DashboardConfig) -> Result<()> {
        let json = config.to_json()?;
        LocalStorage::set(DASHBOARD_CONFIG_KEY, json).map_err(|e| SharedError::Storage(e.to_string()))
    }
}

#[hook]
pub fn use_dashboard_config() -> Rc<DashboardConfig> {
    use_memo((), |_| Config::dashboard())
}
