use std::path::PathBuf;

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

pub const CONFIG_FILE: &str = "nextvolume.toml";
pub const ENV_PREFIX: &str = "NEXTVOLUME_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let content = content.to_string().style(&self.style_content);
        if self.description.is_empty() {
            format!("{prefix}{content}{suffix}")
        } else {
            let description = self.description.style(&self.style_description);
            format!("{description} {prefix}{content}{suffix}")
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

/// How to reach a calibre library through `calibredb`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibreConfig {
    pub calibredb:       PathBuf,
    /// Library path or content server url, calibre's default library when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library:         Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username:        Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password:        Option<String>,
    /// Appended to the `calibredb list` command line, shell quoted.
    pub extra_args:      String,
    pub read_column:     String,
    pub archived_column: String,
}

impl Default for CalibreConfig {
    fn default() -> Self {
        Self {
            calibredb:       PathBuf::from("calibredb"),
            library:         None,
            username:        None,
            password:        None,
            extra_args:      "".into(),
            read_column:     "*read".into(),
            archived_column: "*archived".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub goodreads_export:  PathBuf,
    pub calibre:           CalibreConfig,
    pub output_heading:    OutputConfig,
    pub output_series:     OutputConfig,
    pub output_progress:   OutputConfig,
    pub output_book:       OutputConfig,
    pub output_author:     OutputConfig,
    pub output_part_index: OutputConfig,
    pub output_date_read:  OutputConfig,
    pub output_rating:     OutputConfig,
    pub output_isbn:       OutputConfig,
    pub output_count:      OutputConfig,
    pub output_error:      OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    /// Defaults, then the config file, then the environment.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// The export path with `~` expanded.
    pub fn goodreads_export_path(&self) -> PathBuf {
        shellexpand::path::tilde(&self.goodreads_export).into_owned()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goodreads_export:  PathBuf::from("~/goodreads_library_export.csv"),
            calibre:           CalibreConfig::default(),
            output_heading:    OutputConfig {
                prefix: "# ".into(),
                style_content: StyleConfig {
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_series:     OutputConfig {
                prefix: "**".into(),
                suffix: "**".into(),
                style_content: StyleConfig {
                    color: COLOR_SERIES,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_progress:   OutputConfig {
                prefix: "(".into(),
                suffix: " books read)".into(),
                style_content: StyleConfig {
                    color: COLOR_PROGRESS,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_book:       OutputConfig {
                prefix: "**".into(),
                suffix: "**".into(),
                style_content: StyleConfig {
                    color: COLOR_BOOK,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:     OutputConfig {
                description: "by".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_part_index: OutputConfig {
                prefix: "(Book #".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_PART_INDEX,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_date_read:  OutputConfig {
                description: "read".into(),
                style_content: StyleConfig {
                    color: COLOR_TIMESTAMP,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_rating:     OutputConfig {
                description: "Rating:".into(),
                suffix: "/5".into(),
                style_content: StyleConfig {
                    color: COLOR_RATING,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_isbn:       OutputConfig {
                description: "ISBN".into(),
                ..OutputConfig::default()
            },
            output_count:      OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_PAGE_COUNT,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:      OutputConfig {
                description: "Error".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let s = Config::default_as_string().unwrap();
        let parsed: Config = Figment::new().merge(Toml::string(&s)).extract().unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                goodreads_export = "/data/export.csv"

                [calibre]
                library = "/books"
                "#,
            )?;
            jail.set_env("NEXTVOLUME_CALIBRE__READ_COLUMN", "#done");
            let config = Config::read_config().map_err(|e| e.to_string())?;
            assert_eq!(config.goodreads_export, PathBuf::from("/data/export.csv"));
            assert_eq!(config.calibre.library.as_deref(), Some("/books"));
            assert_eq!(config.calibre.read_column, "#done");
            assert_eq!(config.calibre.archived_column, "*archived");
            Ok(())
        });
    }
}
