//! Built-in portfolio templates using the Tera template engine
//!
//! All templates are embedded in the binary. Autoescaping is off, as the
//! templates escape CMS text explicitly and leave site paths untouched.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::resolve::{RelatedLink, Thumb};

/// Template renderer with the embedded portfolio theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("folio/layout.html")),
            ("home.html", include_str!("folio/home.html")),
            ("article.html", include_str!("folio/article.html")),
            ("404.html", include_str!("folio/404.html")),
            // Partials
            (
                "partials/style.html",
                include_str!("folio/partials/style.html"),
            ),
            ("partials/nav.html", include_str!("folio/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("folio/partials/footer.html"),
            ),
            (
                "partials/top_strokes.html",
                include_str!("folio/partials/top_strokes.html"),
            ),
            (
                "partials/mid_strokes.html",
                include_str!("folio/partials/mid_strokes.html"),
            ),
            (
                "partials/related.html",
                include_str!("folio/partials/related.html"),
            ),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template_name, context)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => " .....".to_string(),
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        )))
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub sections: Vec<NavItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub name: String,
    pub path: String,
    pub active: bool,
}

/// Everything an article or intro page shows
#[derive(Debug, Clone, Serialize)]
pub struct ArticleView {
    pub title: String,
    pub subtitle: Option<String>,
    pub paragraphs: Vec<String>,
    pub is_intro: bool,
    pub hero: Option<String>,
    pub thumb: Option<String>,
    pub related: Vec<RelatedLink>,
    pub related_thumbs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThumbRow {
    pub title: String,
    pub thumbs: Vec<Thumb>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub writing_links: Vec<RelatedLink>,
    pub rows: Vec<ThumbRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truncate(s: &str, length: usize) -> String {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(length));
        args.insert("omission".to_string(), tera::Value::from("..."));
        truncate_chars_filter(&tera::Value::from(s), &args)
            .unwrap()
            .as_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate("Hello World", 5), "Hello...");
        assert_eq!(truncate("Hi", 10), "Hi");
    }
}
