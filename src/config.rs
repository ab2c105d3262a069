use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::routing::Deployment;

/// Site-wide settings
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Appended to page titles ("Pancakes | Prashant Cooks")
    #[serde(default = "default_site_name")]
    pub site_name: String,
    /// Location of the recipe data file, relative to the site base
    #[serde(default = "default_data_path")]
    pub data_path: String,
    /// Directory holding recipe images, relative to the site base
    #[serde(default = "default_image_dir")]
    pub image_dir: String,
    /// How the deployment base path is determined
    #[serde(default)]
    pub deployment: DeploymentMode,
    /// Sub-path segment used when `deployment = "sub_path"`
    #[serde(default)]
    pub sub_path: Option<String>,
    /// Delay applied to search input before filtering, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentMode {
    /// Guess the base path from the first URL segment
    #[default]
    Auto,
    Root,
    SubPath,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            data_path: default_data_path(),
            image_dir: default_image_dir(),
            deployment: DeploymentMode::default(),
            sub_path: None,
            search_debounce_ms: default_search_debounce_ms(),
            timeout: default_timeout(),
        }
    }
}

fn default_site_name() -> String {
    "Prashant Cooks".to_string()
}

fn default_data_path() -> String {
    "data/recipes.json".to_string()
}

fn default_image_dir() -> String {
    "assets/images".to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_timeout() -> u64 {
    30
}

impl SiteConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SITE__ prefix
    /// 2. site.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SITE__SITE_NAME
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// The deployment strategy described by `deployment` and `sub_path`.
    ///
    /// `sub_path` mode without a segment falls back to the URL heuristic.
    pub fn deployment(&self) -> Deployment {
        match (self.deployment, self.sub_path.as_deref()) {
            (DeploymentMode::Root, _) => Deployment::Root,
            (DeploymentMode::SubPath, Some(segment)) if !segment.trim_matches('/').is_empty() => {
                Deployment::SubPath(segment.trim_matches('/').to_string())
            }
            (DeploymentMode::SubPath, _) => {
                log::warn!("deployment is sub_path but no sub_path is set, using auto detection");
                Deployment::Auto
            }
            (DeploymentMode::Auto, _) => Deployment::Auto,
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`SiteConfig::load`] for the source priority.
pub fn load_config() -> Result<SiteConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("site").required(false))
        // Use double underscore for nested: RECIPE_SITE__SEARCH_DEBOUNCE_MS
        .add_source(
            Environment::with_prefix("RECIPE_SITE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
