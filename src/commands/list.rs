//! List CMS content

use anyhow::Result;

use crate::content::{ContentFetcher, ContentType, Section};
use crate::resolve::{item_href, pick_thumb};
use crate::Folio;

/// List the items of a content type as the site would see them
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let Some(content_type) = ContentType::from_section(content_type) else {
        anyhow::bail!(
            "Unknown type: {}. Available: about, writing, photography, design",
            content_type
        );
    };

    let fetcher = ContentFetcher::new(&folio.config)?;
    let (section, slugs) = tokio::join!(
        fetcher.fetch_section(content_type),
        fetcher.fetch_slugs(content_type)
    );

    println!("{} intro: {}", content_type.placeholder_title(), section.intro.title);
    println!("Items ({}):", section.items.len());
    for item in &section.items {
        println!(
            "  {} [{}]{}",
            item.title,
            item_href(content_type, item),
            pick_thumb(item)
                .map(|t| format!(" thumb: {}", t))
                .unwrap_or_default()
        );
    }

    if content_type.is_categorized() {
        let categories = section.categories();
        println!("Categories ({}):", categories.len());
        for category in categories {
            let count = section
                .items
                .iter()
                .filter(|a| a.in_category(&category))
                .count();
            println!("  {} ({})", category, count);
        }
    }

    println!("Slugs ({}):", slugs.len());
    for slug in &slugs {
        println!("  {}", slug);
    }
    for slug in unlisted_slugs(&section, &slugs) {
        tracing::warn!("Slug {} has no {} page", slug, content_type);
    }

    Ok(())
}

/// Slugs the CMS reports that no fetched item carries
fn unlisted_slugs<'a>(section: &Section, slugs: &'a [String]) -> Vec<&'a str> {
    slugs
        .iter()
        .map(String::as_str)
        .filter(|slug| !section.items.iter().any(|item| item.slug() == Some(*slug)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentItem;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_unlisted_slugs() {
        let section = Section::new(
            ContentType::Design,
            ContentItem::intro("Design"),
            vec![ContentItem::article("A", "a")],
        );
        let slugs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(unlisted_slugs(&section, &slugs), vec!["b"]);
    }

    #[tokio::test]
    async fn test_list_queries_slugs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/designs"))
            .and(query_param("fields[0]", "slug"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "id": 1, "slug": "a" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.set_api_url(&server.uri());
        let folio = Folio::with_config(dir.path(), config);

        assert!(run(&folio, "design").await.is_ok());
        assert!(run(&folio, "videos").await.is_err());
    }
}
