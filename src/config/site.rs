//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::ThemeConfig;

/// Environment variables consulted for the CMS base URL, in priority order
const API_URL_ENV: [&str; 2] = ["API_URL", "NEXT_PUBLIC_API_URL"];

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub url: String,

    // CMS
    pub api_url: String,
    pub page_size: usize,
    pub request_timeout_secs: Option<u64>,

    // Directory
    pub public_dir: String,
    pub static_dir: String,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Section colors
    #[serde(default)]
    pub themes: ThemeConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Andrew Bock".to_string(),
            author: "Andrew Bock".to_string(),
            url: "http://example.com".to_string(),

            api_url: "http://localhost:1337".to_string(),
            page_size: 100,
            request_timeout_secs: None,

            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            home: HomeConfig::default(),
            themes: ThemeConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Let the environment override the CMS base URL
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides read through `lookup`; the first non-blank variable wins
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = API_URL_ENV
            .iter()
            .find_map(|key| lookup(key).filter(|v| !v.trim().is_empty()));
        if let Some(url) = from_env {
            self.set_api_url(url.trim());
        }
    }

    /// Set the CMS base URL, dropping any trailing slash
    pub fn set_api_url(&mut self, url: &str) {
        self.api_url = url.trim_end_matches('/').to_string();
        tracing::debug!("Using CMS at {}", self.api_url);
    }

    /// Per-request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub writing_links: usize,
    pub photography_thumbs: usize,
    pub design_thumbs: usize,
    pub about_thumbs: usize,
    /// Fixed seed for thumbnail sampling; random per render when unset
    pub seed: Option<u64>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            writing_links: 18,
            photography_thumbs: 3,
            design_thumbs: 3,
            about_thumbs: 1,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.api_url, "http://localhost:1337");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.home.writing_links, 18);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r##"
title: My Portfolio
author: Test User
api_url: https://cms.example.com/
page_size: 25
request_timeout_secs: 5
home:
  design_thumbs: 6
  seed: 42
themes:
  design:
    accent: "#123456"
"##;
        let mut config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Portfolio");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.home.design_thumbs, 6);
        assert_eq!(config.home.photography_thumbs, 3);
        assert_eq!(config.home.seed, Some(42));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));

        let url = config.api_url.clone();
        config.set_api_url(&url);
        assert_eq!(config.api_url, "https://cms.example.com");
    }

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_api_url_env_precedence() {
        let mut config = SiteConfig::default();
        config.apply_overrides_from(env(&[
            ("API_URL", "https://primary.example.com/"),
            ("NEXT_PUBLIC_API_URL", "https://public.example.com"),
        ]));
        assert_eq!(config.api_url, "https://primary.example.com");

        let mut config = SiteConfig::default();
        config.apply_overrides_from(env(&[
            ("API_URL", "  "),
            ("NEXT_PUBLIC_API_URL", "https://public.example.com"),
        ]));
        assert_eq!(config.api_url, "https://public.example.com");

        let mut config = SiteConfig {
            api_url: "https://from-config.example.com".to_string(),
            ..SiteConfig::default()
        };
        config.apply_overrides_from(env(&[("API_URL", ""), ("NEXT_PUBLIC_API_URL", "")]));
        assert_eq!(config.api_url, "https://from-config.example.com");
    }

    #[test]
    fn test_cli_url_beats_env() {
        let mut config = SiteConfig::default();
        config.apply_overrides_from(env(&[("API_URL", "https://env.example.com")]));
        // main.rs applies --api-url after the environment
        config.set_api_url("https://cli.example.com/");
        assert_eq!(config.api_url, "https://cli.example.com");
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config = SiteConfig {
            request_timeout_secs: Some(0),
            ..SiteConfig::default()
        };
        assert!(config.request_timeout().is_none());
    }
}
