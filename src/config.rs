use std::path::PathBuf;

use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    default_colors::*,
    format::{Layout, LineFormat},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub separator:         String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_separator:   StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format_str(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let content = content.to_string().style(&self.style_content);
        format!("{description} {prefix}{content}{suffix}")
    }

    pub fn format_vec<T: ToString>(&self, content: impl IntoIterator<Item = T>) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let separator = self.separator.style(&self.style_separator);
        let mut s = format!("{description} {prefix}");
        let mut i = content.into_iter().peekable();
        while let Some(x) = i.next() {
            s.push_str(&x.to_string().style(&self.style_content));
            if i.peek().is_some() {
                s.push_str(&separator);
            }
        }
        s.push_str(&suffix);
        s
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            separator:         "; ".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_separator:   StyleConfig::default(),
            style_content:     StyleConfig::default(),
        }
    }
}

/// How the catalog file is framed. Unset fields fall back to the layout's preset.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatConfig {
    pub layout:    Layout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header:    Option<bool>,
}

impl FormatConfig {
    pub fn line_format(&self) -> Result<LineFormat> {
        Ok(LineFormat::new(
            self.layout,
            self.delimiter
                .unwrap_or_else(|| self.layout.default_delimiter()),
            self.header.unwrap_or_else(|| self.layout.default_header()),
        )?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub data_file:          PathBuf,
    pub format:             FormatConfig,
    /// Refuse to add a book whose ISBN is already in the catalog.
    pub unique_isbn:        bool,
    pub output_title:       OutputConfig,
    pub output_isbn:        OutputConfig,
    pub output_ebook_true:  OutputConfig,
    pub output_ebook_false: OutputConfig,
    pub output_year:        OutputConfig,
    pub output_edition:     OutputConfig,
    pub output_author:      OutputConfig,
    pub output_separator:   OutputConfig,
    pub output_error:       OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Ok(Self::figment().extract()?)
    }

    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Yaml::file("config.yaml"))
            .merge(Env::prefixed("BOOKSHELF_").split("__"))
    }

    /// The data file with `~` and environment variables expanded.
    pub fn data_path(&self) -> Result<PathBuf> {
        Ok(shellexpand::path::full(&self.data_file)?.into_owned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file:          PathBuf::from("~/.local/share/bookshelf/library.csv"),
            format:             FormatConfig::default(),
            unique_isbn:        false,
            output_title:       OutputConfig {
                description: "Title:".into(),
                style_content: StyleConfig {
                    color: COLOR_BOOK,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_isbn:        OutputConfig {
                description: "ISBN:".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_ebook_true:  OutputConfig {
                description: "eBook:".into(),
                style_content: StyleConfig {
                    color: COLOR_EBOOK_TRUE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_ebook_false: OutputConfig {
                description: "eBook:".into(),
                style_content: StyleConfig {
                    color: COLOR_EBOOK_FALSE,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_year:        OutputConfig {
                description: "Year Published:".into(),
                style_content: StyleConfig {
                    color: COLOR_TIMESTAMP,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_edition:     OutputConfig {
                description: "Edition:".into(),
                style_content: StyleConfig {
                    color: COLOR_EDITION,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:      OutputConfig {
                description: "Authors:".into(),
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_separator:   OutputConfig {
                description: "-----------------------------------".into(),
                style_description: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:       OutputConfig {
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
