//! Optional `lilconv.xml` settings, overridden by command-line flags.

use std::path::{Path, PathBuf};

use serde_derive::Deserialize;

use crate::messages::Language;

pub const DEFAULT_CONFIG: &str = "lilconv.xml";

toon_xml::enums! {
    /// What to do when two different AO textures need packing into one.
    #[derive(clap::ValueEnum)]
    AoPolicy {
        Ask,
        Always,
        Never,
    }

    #[derive(clap::ValueEnum)]
    LanguageSetting {
        Auto,
        En,
        Ja,
    }
}

impl Default for AoPolicy {
    fn default() -> Self {
        Self::Ask
    }
}

impl LanguageSetting {
    pub fn resolve(self) -> Language {
        match self {
            Self::Auto => Language::detect(),
            Self::En => Language::English,
            Self::Ja => Language::Japanese,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Xml(#[from] quick_xml::DeError),
}

/// Every field is optional so a file and the command line can be layered.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(rename = "@language", default)]
    pub language: Option<LanguageSetting>,
    #[serde(rename = "@ao_bake", default)]
    pub ao_bake: Option<AoPolicy>,
    #[serde(rename = "@asset_root", default)]
    pub asset_root: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub language: Language,
    pub ao_bake: AoPolicy,
    pub asset_root: PathBuf,
}

impl Config {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(quick_xml::de::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&s)
    }

    /// Fields set in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            language: overrides.language.or(self.language),
            ao_bake: overrides.ao_bake.or(self.ao_bake),
            asset_root: overrides.asset_root.or(self.asset_root),
        }
    }

    pub fn resolve(self) -> Settings {
        Settings {
            language: self.language.unwrap_or(LanguageSetting::Auto).resolve(),
            ao_bake: self.ao_bake.unwrap_or_default(),
            asset_root: self.asset_root.unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
