use beacon_shared::theme::{theme_from_query, ThemeSettings};
use beacon_shared::{ResolvedTheme, Result, SharedError, ThemeConfig, ThemeMode, ThemeStore};
use gloo_storage::{LocalStorage, Storage};
use log::{debug, warn};
use std::rc::Rc;
use yew::prelude::*;

/// Theme settings persisted in the browser's `LocalStorage`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalStorageThemeStore;

impl ThemeStore for LocalStorageThemeStore {
    fn get_item(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        LocalStorage::set(key, value).map_err(|e| SharedError::Storage(e.to_string()))
    }
}

fn settings() -> ThemeSettings<LocalStorageThemeStore> {
    ThemeSettings::new(LocalStorageThemeStore)
}

/// Saved theme, with a `?theme=` query parameter taking precedence
fn initial_theme() -> ThemeConfig {
    let mut config = settings().load();
    let query = gloo_utils::window().location().search().unwrap_or_default();
    if let Some(mode) = theme_from_query(&query) {
        debug!("Theme {} requested by URL", mode);
        config.mode = mode;
    }
    config
}

/// Inline `style` value declaring the theme's CSS custom properties
pub fn css_variables_style(theme: &ResolvedTheme) -> String {
    theme
        .css_variables
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ThemeContext {
    pub theme: Rc<ResolvedTheme>,
    pub set_mode: Callback<ThemeMode>,
    pub set_palette: Callback<String>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct ThemeProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ThemeProvider)]
pub fn theme_provider(props: &ThemeProviderProps) -> Html {
    let config = use_state(initial_theme);
    let theme = use_memo((*config).clone(), |config| config.resolve());

    let set_mode = {
        let config = config.clone();
        Callback::from(move |mode: ThemeMode| match settings().save_mode(mode) {
            Ok(saved) => config.set(saved),
            Err(e) => warn!("Failed to save theme: {}", e),
        })
    };

    let set_palette = {
        let config = config.clone();
        Callback::from(move |key: String| match settings().apply_palette(&key) {
            Ok(saved) => config.set(ThemeConfig {
                mode: config.mode,
                ..saved
            }),
            Err(e) => warn!("Failed to apply palette: {}", e),
        })
    };

    let style = css_variables_style(&theme);
    let mode = theme.mode.to_string();
    let context = ThemeContext {
        theme,
        set_mode,
        set_palette,
    };

    html! {
        <ContextProvider<ThemeContext> context={context}>
            <div class="beacon-theme" data-theme={mode} style={style}>
                {props.children.clone()}
            </div>
        </ContextProvider<ThemeContext>>
    }
}

/// The provided theme, or the default light theme outside a [`ThemeProvider`]
#[hook]
pub fn use_theme() -> Rc<ResolvedTheme> {
    let context = use_context::<ThemeContext>();
    let fallback = use_memo((), |_| ResolvedTheme::default());
    context.map(|context| context.theme).unwrap_or(fallback)
}
