//! Load runtime configuration.

use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Classic,
    BlackOrange,
    Premium,
}

impl Theme {
    pub fn default_ticker(self) -> &'static str {
        match self {
            Theme::Classic => "AAPL",
            Theme::BlackOrange | Theme::Premium => "MSTR",
        }
    }

    /// ANSI SGR code for headings and labels.
    pub fn accent(self) -> &'static str {
        match self {
            Theme::Classic => "1;34",                           // bold blue
            Theme::BlackOrange | Theme::Premium => "1;38;5;208", // bold orange
        }
    }

    /// Wide layout also shows the id and roll link columns.
    pub fn wide(self) -> bool {
        matches!(self, Theme::Premium)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct UiCfg {
    pub theme: Theme,
    pub default_ticker: Option<String>, // falls back to the theme's ticker
    pub color: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ExportCfg {
    pub dir: Option<String>, // None -> download dir, then cwd
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ValidationCfg {
    pub allow_past_expiration: bool,
    pub reject_dangling_roll: bool,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub ui: UiCfg,
    pub export: ExportCfg,
    pub validation: ValidationCfg,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let s = fs::read_to_string(path)?;
        Self::from_yaml(&s)
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(s: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(s)?;
        Ok(cfg)
    }

    pub fn default_ticker(&self) -> String {
        self.ui
            .default_ticker
            .clone()
            .unwrap_or_else(|| self.ui.theme.default_ticker().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let cfg = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(cfg.ui.theme, Theme::Classic);
        assert_eq!(cfg.default_ticker(), "AAPL");
        assert!(!cfg.validation.allow_past_expiration);
        assert!(!cfg.validation.reject_dangling_roll);
        assert!(cfg.export.dir.is_none());
    }

    #[test]
    fn partial_sections_parse() {
        let cfg = AppConfig::from_yaml(
            "ui:\n  theme: black_orange\n  color: true\nvalidation:\n  reject_dangling_roll: true\n",
        )
        .unwrap();
        assert_eq!(cfg.ui.theme, Theme::BlackOrange);
        assert!(cfg.ui.color);
        assert_eq!(cfg.default_ticker(), "MSTR");
        assert!(cfg.validation.reject_dangling_roll);
    }

    #[test]
    fn explicit_ticker_overrides_theme() {
        let cfg = AppConfig::from_yaml("ui:\n  theme: premium\n  default_ticker: NVDA\n").unwrap();
        assert_eq!(cfg.default_ticker(), "NVDA");
        assert!(cfg.ui.theme.wide());
    }

    #[test]
    fn unknown_theme_is_an_error() {
        assert!(AppConfig::from_yaml("ui:\n  theme: neon\n").is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load_or_default("/definitely/not/here.yaml").unwrap();
        assert_eq!(cfg.ui.theme, Theme::Classic);
    }
}
