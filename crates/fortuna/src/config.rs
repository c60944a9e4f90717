use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use sortition::source::SheetUrl;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_POOL_SIZE: u32 = 500;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[strum(serialize = "numbers", serialize = "fixed")]
    Numbers,
    #[strum(serialize = "sheet", serialize = "remote")]
    Sheet,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub count: Option<u32>,
    pub url: Option<SheetUrl>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Numbers,
            count: Some(DEFAULT_POOL_SIZE),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
}

/// The draw source with the config's optional fields validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawSource {
    Numbers { count: u32 },
    Sheet { url: SheetUrl },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("source.kind = \"sheet\" requires source.url")]
    MissingSheetUrl,
}

impl Config {
    pub fn draw_source(&self) -> Result<DrawSource, ConfigError> {
        match self.source.kind {
            SourceKind::Numbers => Ok(DrawSource::Numbers {
                count: self.source.count.unwrap_or(DEFAULT_POOL_SIZE),
            }),
            SourceKind::Sheet => self
                .source
                .url
                .clone()
                .map(|url| DrawSource::Sheet { url })
                .ok_or(ConfigError::MissingSheetUrl),
        }
    }
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "fortuna").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("FORTUNA"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_deserialization() {
        let cases = vec![
            ("\"numbers\"", SourceKind::Numbers),
            ("\"Numbers\"", SourceKind::Numbers),
            ("\"NUMBERS\"", SourceKind::Numbers),
            ("\"fixed\"", SourceKind::Numbers),
            ("\"sheet\"", SourceKind::Sheet),
            ("\"Sheet\"", SourceKind::Sheet),
            ("\"remote\"", SourceKind::Sheet),
        ];

        for (json, expected) in cases {
            let deserialized: SourceKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn default_config_is_a_fixed_pool() {
        assert_eq!(
            Config::default().draw_source().unwrap(),
            DrawSource::Numbers {
                count: DEFAULT_POOL_SIZE
            }
        );
    }

    #[test]
    fn sheet_without_url_fails_closed() {
        let config = Config {
            source: SourceConfig {
                kind: SourceKind::Sheet,
                count: None,
                url: None,
            },
        };
        assert!(matches!(
            config.draw_source(),
            Err(ConfigError::MissingSheetUrl)
        ));
    }

    #[test]
    fn sheet_with_url_resolves() {
        let config = Config {
            source: SourceConfig {
                kind: SourceKind::Sheet,
                count: None,
                url: Some(SheetUrl::new("https://example.com/rows.json")),
            },
        };
        assert_eq!(
            config.draw_source().unwrap(),
            DrawSource::Sheet {
                url: SheetUrl::new("https://example.com/rows.json")
            }
        );
    }

    #[test]
    fn shipped_default_config_parses() {
        let config: Config = toml_from_str(DEFAULT_CONFIG);
        assert_eq!(
            config.draw_source().unwrap(),
            DrawSource::Numbers {
                count: DEFAULT_POOL_SIZE
            }
        );
    }

    fn toml_from_str(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
