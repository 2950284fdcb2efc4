use crate::items::{ItemError, NavItem, NavItems};
use crate::menu::{MOBILE_BREAKPOINT, Settings};
use crate::theme::ColorTheme;
use directories::ProjectDirs;
use orbital::{LayoutError, LayoutPreset, OrbitalLayout, Period, RadiusProfile};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default)]
    pub preset: LayoutPreset,
    pub radii: Option<Vec<f64>>,
    pub radius: Option<f64>,
    pub ring_period: Option<f64>,
    pub pulse_period: Option<f64>,
    pub bulge: Option<f64>,
    pub dismissal_radius: Option<f64>,
}

impl LayoutConfig {
    /// Preset values with any explicit overrides applied on top.
    pub fn to_layout(&self) -> OrbitalLayout {
        let mut layout = OrbitalLayout::from_preset(self.preset);

        if let Some(radii) = &self.radii {
            if self.radius.is_some() {
                log::warn!("Both 'radii' and 'radius' are set, using 'radii'");
            }
            layout.radii = RadiusProfile::PerItem(radii.clone());
        } else if let Some(radius) = self.radius {
            layout.radii = RadiusProfile::Uniform(radius);
            layout.guides = vec![radius];
        }

        if let Some(p) = self.ring_period {
            layout.ring_period = Period::new(p);
        }
        if let Some(p) = self.pulse_period {
            layout.pulse_period = Period::new(p);
        }
        if let Some(b) = self.bulge {
            layout.bulge = b;
        }
        if let Some(r) = self.dismissal_radius {
            layout.dismissal_radius = r;
        }
        layout
    }
}

fn default_breakpoint() -> f64 {
    MOBILE_BREAKPOINT
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ViewportConfig {
    #[serde(default = "default_breakpoint")]
    pub mobile_breakpoint: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: MOBILE_BREAKPOINT,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ItemConfig {
    pub name: Option<String>,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub theme: Option<ColorTheme>,
}

impl ItemConfig {
    pub fn to_item(&self, index: usize) -> Result<NavItem, ItemError> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or(ItemError::MissingName(index))?;
        let href = self
            .href
            .as_deref()
            .ok_or_else(|| ItemError::MissingHref(name.to_string()))?;
        let icon = self
            .icon
            .clone()
            .unwrap_or_else(|| name.to_lowercase());
        let theme = self.theme.unwrap_or_else(|| ColorTheme::cycle(index));

        Ok(NavItem::new(name, href, &icon, theme))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Empty means the built-in items.
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    /// Validates everything up front; a bad item list is a startup error.
    pub fn build(&self) -> Result<Settings, ConfigError> {
        let items = if self.items.is_empty() {
            NavItems::defaults()
        } else {
            let items = self
                .items
                .iter()
                .enumerate()
                .map(|(i, cfg)| cfg.to_item(i))
                .collect::<Result<Vec<_>, _>>()?;
            NavItems::new(items)?
        };

        let layout = self.layout.to_layout();
        layout.validate(items.len())?;

        let mobile_breakpoint = self.viewport.mobile_breakpoint;
        if !(mobile_breakpoint.is_finite() && mobile_breakpoint > 0.0) {
            return Err(ConfigError::InvalidBreakpoint(mobile_breakpoint));
        }

        Ok(Settings {
            items,
            layout,
            mobile_breakpoint,
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No home directory to keep a config file in")]
    NoConfigDir,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid item: {0}")]
    Item(#[from] ItemError),
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
    #[error("Mobile breakpoint {0} must be positive and finite")]
    InvalidBreakpoint(f64),
}

/// `config.toml` in the platform's per-user config directory for orrery.
pub fn user_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "orrery", "orrery")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&user_config_path()?, false)
}

pub fn load_config_from(path: &Path, required: bool) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix("ORRERY")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

/// Writes the bundled defaults to `path`, creating parent directories. An
/// existing file is left alone; the return value says whether anything was written.
pub fn install_default_config(path: &Path) -> Result<bool, ConfigError> {
    if path.exists() {
        log::debug!("Config already present at {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    log::info!("Wrote default config to {}", path.display());
    Ok(true)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Href;

    #[test]
    fn test_default_config_matches_builtin_settings() {
        let settings = parse_config(DEFAULT_CONFIG).unwrap().build().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = parse_config("").unwrap().build().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_uniform_preset_with_overrides() {
        let toml = r#"
            [layout]
            preset = "Uniform"
            radius = 90.0
            ring_period = 30.0

            [viewport]
            mobile_breakpoint = 640.0
        "#;
        let settings = parse_config(toml).unwrap().build().unwrap();

        assert_eq!(settings.layout.radii, RadiusProfile::Uniform(90.0));
        assert_eq!(settings.layout.guides, vec![90.0]);
        assert_eq!(*settings.layout.ring_period, 30.0);
        assert_eq!(*settings.layout.pulse_period, 50.0);
        assert_eq!(settings.mobile_breakpoint, 640.0);
    }

    #[test]
    fn test_custom_items_fill_in_icon_and_theme() {
        let toml = r##"
            [layout]
            preset = "u"

            [[items]]
            name = "About"
            href = "#about"

            [[items]]
            name = "Blog"
            href = "#blog"
            icon = "quill"
            theme = "amber"
        "##;
        let settings = parse_config(toml).unwrap().build().unwrap();

        assert_eq!(settings.items.len(), 2);
        assert_eq!(settings.items[0].icon.as_str(), "about");
        assert_eq!(settings.items[0].theme, ColorTheme::Cyan);
        assert_eq!(settings.items[1].href, Href::new("#blog"));
        assert_eq!(settings.items[1].theme, ColorTheme::Amber);
    }

    #[test]
    fn test_missing_href_fails_fast() {
        let toml = r#"
            [[items]]
            name = "About"
        "#;
        let err = parse_config(toml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Item(ItemError::MissingHref(ref n)) if n == "About"));
    }

    #[test]
    fn test_missing_name_fails_fast() {
        let toml = r##"
            [[items]]
            href = "#about"
        "##;
        let err = parse_config(toml).unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Item(ItemError::MissingName(0))));
    }

    #[test]
    fn test_staggered_needs_a_radius_per_item() {
        let toml = r##"
            [[items]]
            name = "Home"
            href = "#home"

            [[items]]
            name = "Work"
            href = "#work"
        "##;
        let err = parse_config(toml).unwrap().build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Layout(LayoutError::RadiusCountMismatch {
                expected: 2,
                found: 4
            })
        ));
    }

    #[test]
    fn test_install_default_config_keeps_existing_file() {
        let dir = std::env::temp_dir().join(format!("orrery-install-{}", std::process::id()));
        let path = dir.join("nested").join("config.toml");

        assert!(install_default_config(&path).unwrap());
        let written = fs_err::read_to_string(&path).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);

        fs_err::write(&path, "[viewport]\nmobile_breakpoint = 500.0\n").unwrap();
        assert!(!install_default_config(&path).unwrap());
        let kept = load_config_from(&path, true).unwrap();
        assert_eq!(kept.viewport.mobile_breakpoint, 500.0);

        fs_err::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_config("[layout]\nbulge = 2.0").unwrap().build().unwrap_err();
        assert!(matches!(err, ConfigError::Layout(LayoutError::InvalidBulge(_))));

        let err = parse_config("[viewport]\nmobile_breakpoint = 0.0")
            .unwrap()
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBreakpoint(_)));

        assert!(parse_config("[layout]\npreset = \"spiral\"")
            .and_then(|c| c.build())
            .is_err());
    }
}
