use crate::error::{Result, SharedError};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use validator::Validate;

/// Default series palette, cycled by series or slice index
pub const CHART_COLORS: [&str; 12] = [
    "#2680eb", "#9256d9", "#44b556", "#e68619", "#e34850", "#f7bd12", "#01bad7", "#6734bc",
    "#89c541", "#ffc301", "#ec1562", "#ffec16",
];

/// Store key of the light/dark mode
pub const THEME_CONFIG: &str = "beacon.theme";
/// Store key of the selected palette preset
pub const COLOR_PALETTE_CONFIG: &str = "beacon.color-palette";
pub const DEFAULT_PALETTE: &str = "default";

pub fn chart_palette() -> Vec<String> {
    CHART_COLORS.iter().map(|c| c.to_string()).collect()
}

/// Color at `index` in `palette`, cycling; falls back to [`CHART_COLORS`] when empty
pub fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        CHART_COLORS[index % CHART_COLORS.len()].to_string()
    } else {
        palette[index % palette.len()].clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(SharedError::Validation(format!("Unknown theme: {}", s))),
        }
    }
}

/// Base colors of a theme mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub gray50: String,
    pub gray75: String,
    pub gray100: String,
    pub gray200: String,
    pub gray300: String,
    pub gray400: String,
    pub gray500: String,
    pub gray600: String,
    pub gray700: String,
    pub gray800: String,
    pub gray900: String,
}

impl ThemeColors {
    pub fn for_mode(mode: ThemeMode) -> Self {
        let grays: [&str; 11] = match mode {
            ThemeMode::Light => [
                "#ffffff", "#fafafa", "#f5f5f5", "#eaeaea", "#e1e1e1", "#cacaca", "#b3b3b3",
                "#8e8e8e", "#6e6e6e", "#4b4b4b", "#2c2c2c",
            ],
            ThemeMode::Dark => [
                "#252525", "#2f2f2f", "#323232", "#3e3e3e", "#4a4a4a", "#5a5a5a", "#6e6e6e",
                "#909090", "#b9b9b9", "#e3e3e3", "#ffffff",
            ],
        };
        let [gray50, gray75, gray100, gray200, gray300, gray400, gray500, gray600, gray700, gray800, gray900] =
            grays.map(str::to_string);

        Self {
            primary: "#2680eb".to_string(),
            gray50,
            gray75,
            gray100,
            gray200,
            gray300,
            gray400,
            gray500,
            gray600,
            gray700,
            gray800,
            gray900,
        }
    }
}

/// A named primary/secondary/accent triple offered in appearance settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalettePreset {
    pub key: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

pub const COLOR_PALETTES: [PalettePreset; 6] = [
    PalettePreset { key: DEFAULT_PALETTE, name: "Default", primary: "#2680eb", secondary: "#4a9af5", accent: "#1a5fb4" },
    PalettePreset { key: "ocean", name: "Ocean", primary: "#0ea5e9", secondary: "#0284c7", accent: "#06b6d4" },
    PalettePreset { key: "forest", name: "Forest", primary: "#16a34a", secondary: "#15803d", accent: "#84cc16" },
    PalettePreset { key: "sunset", name: "Sunset", primary: "#f97316", secondary: "#ea580c", accent: "#f43f5e" },
    PalettePreset { key: "lavender", name: "Lavender", primary: "#8b5cf6", secondary: "#7c3aed", accent: "#d946ef" },
    PalettePreset { key: "crimson", name: "Crimson", primary: "#dc2626", secondary: "#b91c1c", accent: "#f59e0b" },
];

pub fn find_palette(key: &str) -> Option<&'static PalettePreset> {
    COLOR_PALETTES.iter().find(|p| p.key == key)
}

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rgb` or `#rrggbb`
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SharedError::InvalidColor(hex.to_string()));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(SharedError::InvalidColor(hex.to_string())),
        };

        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map_err(|_| SharedError::InvalidColor(hex.to_string()))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_rgb_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_rgba_string(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

/// Fill and stroke variants of one metric series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesColors {
    pub hover_background_color: String,
    pub background_color: String,
    pub border_color: String,
    pub hover_border_color: String,
    /// Solid color for direct use
    pub color: String,
}

impl SeriesColors {
    fn from_primary(primary: &str, rgb: Option<Rgb>, fill_alpha: f64, border_alpha: f64) -> Self {
        match rgb {
            Some(rgb) => Self {
                hover_background_color: rgb.to_rgba_string(border_alpha),
                background_color: rgb.to_rgba_string(fill_alpha),
                border_color: rgb.to_rgba_string(border_alpha),
                hover_border_color: rgb.to_rgb_string(),
                color: primary.to_string(),
            },
            None => Self {
                hover_background_color: primary.to_string(),
                background_color: primary.to_string(),
                border_color: primary.to_string(),
                hover_border_color: primary.to_string(),
                color: primary.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColors {
    pub text: String,
    pub line: String,
    pub views: SeriesColors,
    pub visitors: SeriesColors,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapColors {
    pub base_color: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub hover_color: String,
}

/// Persisted theme choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ThemeConfig {
    pub mode: ThemeMode,
    #[validate(length(min = 1, max = 32, message = "Palette key must be 1-32 characters"))]
    pub palette: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            mode: ThemeMode::default(),
            palette: DEFAULT_PALETTE.to_string(),
        }
    }
}

/// Everything the chart components need to paint with a theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    pub mode: ThemeMode,
    pub colors: ThemeColors,
    pub chart: ChartColors,
    pub map: MapColors,
    /// Series palette, cycled by dataset index
    pub palette: Vec<String>,
    /// CSS custom properties to set on the document root
    pub css_variables: Vec<(String, String)>,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ThemeConfig::default().resolve()
    }
}

impl ThemeConfig {
    pub fn resolve(&self) -> ResolvedTheme {
        let base = ThemeColors::for_mode(self.mode);
        let preset = find_palette(&self.palette).filter(|p| p.key != DEFAULT_PALETTE);
        let primary = preset.map(|p| p.primary.to_string()).unwrap_or_else(|| base.primary.clone());

        let rgb = match Rgb::from_hex(&primary) {
            Ok(rgb) => Some(rgb),
            Err(e) => {
                warn!("Theme primary is not a hex color: {}", e);
                None
            }
        };

        let mut palette = chart_palette();
        if let Some(preset) = preset {
            palette.splice(0..3, [preset.primary, preset.secondary, preset.accent].map(str::to_string));
        }

        ResolvedTheme {
            mode: self.mode,
            chart: ChartColors {
                text: base.gray700.clone(),
                line: base.gray200.clone(),
                views: SeriesColors::from_primary(&primary, rgb, 0.4, 0.7),
                visitors: SeriesColors::from_primary(&primary, rgb, 0.6, 0.9),
            },
            map: MapColors {
                base_color: primary.clone(),
                fill_color: base.gray100.clone(),
                stroke_color: primary.clone(),
                hover_color: primary.clone(),
            },
            css_variables: palette_variables(&self.palette, self.mode),
            colors: ThemeColors { primary, ..base },
            palette,
        }
    }
}

/// CSS custom properties for a palette preset
pub fn palette_variables(key: &str, mode: ThemeMode) -> Vec<(String, String)> {
    let vars = |pairs: Vec<(&str, String)>| {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect::<Vec<_>>()
    };

    match find_palette(key).filter(|p| p.key != DEFAULT_PALETTE) {
        None => vars(vec![
            ("--custom-primary", ThemeColors::for_mode(mode).primary),
            ("--custom-secondary", String::new()),
            ("--custom-accent", String::new()),
        ]),
        Some(p) => vars(vec![
            ("--custom-primary", p.primary.to_string()),
            ("--custom-secondary", p.secondary.to_string()),
            ("--custom-accent", p.accent.to_string()),
            ("--primary400", p.primary.to_string()),
            ("--primary500", p.secondary.to_string()),
            ("--primary600", p.accent.to_string()),
            ("--primary700", p.accent.to_string()),
        ]),
    }
}

/// Key-value collaborator that persists theme settings
pub trait ThemeStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, used by tests and server-side rendering
#[derive(Debug, Default)]
pub struct MemoryThemeStore {
    items: Mutex<HashMap<String, String>>,
}

impl ThemeStore for MemoryThemeStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| SharedError::Storage(e.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads and saves the theme choice through a [`ThemeStore`]
pub struct ThemeSettings<S: ThemeStore> {
    store: S,
}

impl<S: ThemeStore> ThemeSettings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> ThemeConfig {
        let mode = match self.store.get_item(THEME_CONFIG) {
            Some(saved) => saved.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored theme: {}", e);
                ThemeMode::default()
            }),
            None => ThemeMode::default(),
        };

        let palette = match self.store.get_item(COLOR_PALETTE_CONFIG) {
            Some(key) if find_palette(&key).is_some() => key,
            Some(key) => {
                warn!("Ignoring unknown palette '{}'", key);
                DEFAULT_PALETTE.to_string()
            }
            None => DEFAULT_PALETTE.to_string(),
        };

        ThemeConfig { mode, palette }
    }

    pub fn save_mode(&self, mode: ThemeMode) -> Result<ThemeConfig> {
        self.store.set_item(THEME_CONFIG, &mode.to_string())?;
        debug!("Theme set to {}", mode);
        Ok(self.load())
    }

    pub fn apply_palette(&self, key: &str) -> Result<ThemeConfig> {
        let preset = find_palette(key)
            .ok_or_else(|| SharedError::NotFound(format!("palette {}", key)))?;
        self.store.set_item(COLOR_PALETTE_CONFIG, preset.key)?;
        debug!("Palette set to {}", preset.key);
        Ok(self.load())
    }

    pub fn reset_palette(&self) -> Result<ThemeConfig> {
        self.apply_palette(DEFAULT_PALETTE)
    }

    pub fn has_custom_palette(&self) -> bool {
        self.store
            .get_item(COLOR_PALETTE_CONFIG)
            .map(|key| key != DEFAULT_PALETTE)
            .unwrap_or(false)
    }
}

/// Reads `theme=light|dark` from a URL query string
pub fn theme_from_query(query: &str) -> Option<ThemeMode> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "theme")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .and_then(|value| value.parse().ok())
}
