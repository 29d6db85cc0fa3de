use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_INPUT: &str = "publications.csv";
pub const DEFAULT_OUTPUT: &str = "publications.html";
/// Picked up from the working directory when `--config` isn't given.
pub const DEFAULT_CONFIG: &str = "pubpage.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Everything one generation run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub site: Site,
}

/// Page chrome around the four publication sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Site {
    /// Shown in the header and the page title.
    pub owner: String,
    pub subtitle: String,
    /// Image shown in the masthead.
    pub avatar: String,
    pub nav: Vec<NavLink>,
    /// Load MathJax so `$...$` in titles and abstracts is typeset.
    pub mathjax: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    /// Mark as the current page.
    #[serde(default)]
    pub current: bool,
}

impl Default for Site {
    fn default() -> Self {
        let nav = |label: &str, href: &str, current| NavLink {
            label: label.to_string(),
            href: href.to_string(),
            current,
        };
        Site {
            owner: String::new(),
            subtitle: "Browse my research: journal papers, conference proceedings, and working papers."
                .to_string(),
            avatar: "./assets/me.jpg".to_string(),
            nav: vec![
                nav("Home", "./index.html", false),
                nav("Publications", "./publications.html", true),
                nav("Teaching", "./teaching.html", false),
                nav("CV", "./cv.html", false),
            ],
            mathjax: true,
        }
    }
}

impl Site {
    pub fn page_title(&self) -> String {
        if self.owner.is_empty() {
            "Publications".to_string()
        } else {
            format!("Publications | {}", self.owner)
        }
    }
}

/// The on-disk config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    site: Site,
}

impl Config {
    /// Resolve the configuration for this invocation.
    ///
    /// Command line flags override the config file, which overrides the
    /// built-in defaults.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG);
                if path.is_file() {
                    ConfigFile::load(path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        Ok(Config {
            input: cli
                .input
                .clone()
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: cli
                .output
                .clone()
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            site: file.site,
        })
    }
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
