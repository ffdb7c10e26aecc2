//! Per-page color themes
//!
//! Each section of the site has its own palette. A theme is handed to the
//! layout as a plain value and rendered into the page root's `style`
//! attribute as CSS custom properties, so nothing global is ever mutated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::content::ContentType;

const ABOUT: [(&str, &str); 6] = [
    ("background", "#A7A9AC"),
    ("accent", "#EDBE1C"),
    ("menuText", "#000000"),
    ("menuHover", "#EDBE1C"),
    ("logoText", "#000000"),
    ("sectionColor", "#000000"),
];

const WRITING: [(&str, &str); 6] = [
    ("background", "#ffffff"),
    ("accent", "#9FD5B9"),
    ("menuText", "#000000"),
    ("menuHover", "#9FD5B9"),
    ("logoText", "#000000"),
    ("sectionColor", "#808080"),
];

const DESIGN: [(&str, &str); 6] = [
    ("background", "#ffffff"),
    ("accent", "#E8553E"),
    ("menuText", "#000000"),
    ("menuHover", "#E8553E"),
    ("logoText", "#000000"),
    ("sectionColor", "#808080"),
];

const PHOTOGRAPHY: [(&str, &str); 6] = [
    ("background", "#1A1A1A"),
    ("accent", "#B5D334"),
    ("menuText", "#ffffff"),
    ("menuHover", "#B5D334"),
    ("logoText", "#ffffff"),
    ("sectionColor", "#A7A9AC"),
];

/// CSS custom properties for one page, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageTheme {
    vars: IndexMap<String, String>,
}

impl PageTheme {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            vars: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Overlay `overrides` on top of this theme
    fn merged(mut self, overrides: &IndexMap<String, String>) -> Self {
        for (key, value) in overrides {
            self.vars.insert(key.clone(), value.clone());
        }
        self
    }

    /// Render as an inline style declaration, e.g. `--accent: #9FD5B9;`
    pub fn style_attr(&self) -> String {
        self.vars
            .iter()
            .filter(|(k, v)| is_css_token(k) && is_css_value(v))
            .map(|(k, v)| format!("--{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// User overrides per section, merged over the built-in palettes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub home: IndexMap<String, String>,
    pub about: IndexMap<String, String>,
    pub writing: IndexMap<String, String>,
    pub photography: IndexMap<String, String>,
    pub design: IndexMap<String, String>,
}

impl ThemeConfig {
    /// Theme for a section page, or the home page when `section` is `None`
    pub fn theme_for(&self, section: Option<ContentType>) -> PageTheme {
        match section {
            None => PageTheme::default().merged(&self.home),
            Some(ContentType::About) => PageTheme::from_pairs(&ABOUT).merged(&self.about),
            Some(ContentType::Writing) => PageTheme::from_pairs(&WRITING).merged(&self.writing),
            Some(ContentType::Design) => PageTheme::from_pairs(&DESIGN).merged(&self.design),
            Some(ContentType::Photography) => {
                PageTheme::from_pairs(&PHOTOGRAPHY).merged(&self.photography)
            }
        }
    }
}

fn is_css_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_css_value(s: &str) -> bool {
    !s.is_empty() && !s.contains([';', '"', '<', '>', '{', '}'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes() {
        let themes = ThemeConfig::default();
        let about = themes.theme_for(Some(ContentType::About)).style_attr();
        assert!(about.starts_with("--background: #A7A9AC; --accent: #EDBE1C;"));

        let writing = themes.theme_for(Some(ContentType::Writing)).style_attr();
        assert!(writing.contains("--sectionColor: #808080;"));

        assert_eq!(themes.theme_for(None).style_attr(), "");
    }

    #[test]
    fn test_overrides_keep_order_and_other_keys() {
        let mut themes = ThemeConfig::default();
        themes
            .writing
            .insert("accent".to_string(), "#000fff".to_string());
        let writing = themes.theme_for(Some(ContentType::Writing));
        assert!(writing
            .style_attr()
            .starts_with("--background: #ffffff; --accent: #000fff;"));
    }

    #[test]
    fn test_style_attr_drops_unsafe_values() {
        let mut themes = ThemeConfig::default();
        themes
            .home
            .insert("accent".to_string(), "red\"><script>".to_string());
        themes
            .home
            .insert("background".to_string(), "#fff".to_string());
        assert_eq!(themes.theme_for(None).style_attr(), "--background: #fff;");
    }
}
