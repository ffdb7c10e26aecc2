//! Generator module - renders portfolio pages from CMS content
//!
//! Rendering is a pure function of a fetched `Section` (or `HomeContent`)
//! and a `Route`. `generate` fetches every section once and writes all
//! routes to the public directory; the preview server calls the same
//! render functions per request.

use anyhow::Result;
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tera::Context;
use walkdir::WalkDir;

use crate::config::PageTheme;
use crate::content::{ContentFetcher, ContentItem, ContentType, HomeContent, Section};
use crate::error::PageError;
use crate::helpers::{capitalize, decode_segment, section_path};
use crate::resolve::{
    build_related, hero_image, item_href, lookup, pick_thumb, resolve, resolve_categorized,
    sample_thumbs, RelatedLink,
};
use crate::templates::{ArticleView, HomeView, NavItem, SiteData, TemplateRenderer, ThumbRow};
use crate::Folio;

/// A page within one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/{section}/`
    Intro,
    /// `/{section}/{category}/`
    Category(String),
    /// `/{section}/{slug}/` or `/{section}/{category}/{slug}/`
    Article {
        category: Option<String>,
        slug: String,
    },
}

/// Static site generator using Tera templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    fetcher: ContentFetcher,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        let fetcher = ContentFetcher::new(&folio.config)?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
            fetcher,
        })
    }

    pub fn fetcher(&self) -> &ContentFetcher {
        &self.fetcher
    }

    /// RNG for home-page sampling, seeded from config when set
    pub fn home_rng(&self) -> StdRng {
        match self.folio.config.home.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Fetch and write the whole site
    pub async fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;
        self.copy_static_assets()?;

        let (writing, photography, design, about) = tokio::join!(
            self.fetcher.fetch_section(ContentType::Writing),
            self.fetcher.fetch_section(ContentType::Photography),
            self.fetcher.fetch_section(ContentType::Design),
            self.fetcher.fetch_section(ContentType::About),
        );
        let sections = [writing, photography, design, about];
        for section in &sections {
            tracing::info!(
                "Loaded {} {} items",
                section.items.len(),
                section.content_type
            );
        }

        let mut written = 0;

        let home = HomeContent::from_sections(&sections);
        let html = self.render_home(&home, &mut self.home_rng())?;
        self.write_page("/", &html)?;
        written += 1;

        let html = self.render_not_found(None)?;
        fs::write(self.folio.public_dir.join("404.html"), html)?;
        written += 1;

        for section in &sections {
            for route in routes(section) {
                let html = self.render_route(section, &route)?;
                self.write_page(&route_path(section.content_type, &route), &html)?;
                written += 1;
            }
        }

        self.generate_search_index(&sections[0])?;

        tracing::info!("Generated {} pages", written);
        Ok(written)
    }

    /// Render one page of a section
    pub fn render_route(&self, section: &Section, route: &Route) -> Result<String, PageError> {
        let ct = section.content_type;
        let items = section.items.as_slice();

        let (active, related, category) = match route {
            Route::Intro => {
                let active = &section.intro;
                (active, build_related(ct, items, active, None), None)
            }
            Route::Category(category) => {
                if !ct.is_categorized() || !items.iter().any(|a| a.in_category(category)) {
                    return Err(PageError::not_found(ct, category.as_str()));
                }
                let category = category.as_str();
                let active = resolve_categorized(items, &section.intro, Some(category), None);
                // The category page lists the whole category, active item included
                let related = build_related(ct, items, &section.intro, Some(category));
                (active, related, Some(category))
            }
            Route::Article { category, slug } => {
                let category = category.as_deref();
                if ct.is_categorized() != category.is_some() {
                    return Err(PageError::not_found(ct, slug.as_str()));
                }
                lookup(ct, items, category, slug)?;
                let slug = Some(slug.as_str());
                let active = match category {
                    Some(_) => resolve_categorized(items, &section.intro, category, slug),
                    None => resolve(items, &section.intro, slug),
                };
                (active, build_related(ct, items, active, category), category)
            }
        };

        let view = article_view(ct, active, related);
        let sub_menu = sub_menu(section, category);

        let mut context = self.base_context(Some(ct));
        context.insert("page_title", &active.title);
        context.insert("description", &first_paragraph(active));
        context.insert("sub_menu", &sub_menu);
        context.insert("article", &view);

        Ok(self.renderer.render("article.html", &context)?)
    }

    /// Render the home page
    pub fn render_home<R: Rng + ?Sized>(
        &self,
        home: &HomeContent,
        rng: &mut R,
    ) -> Result<String, PageError> {
        let settings = &self.folio.config.home;

        let writing_links: Vec<RelatedLink> = home
            .writing
            .iter()
            .take(settings.writing_links)
            .map(|item| RelatedLink {
                label: item.title.clone(),
                href: item_href(ContentType::Writing, item),
                thumb: None,
            })
            .collect();

        let rows = [
            (
                ContentType::Photography,
                &home.photography,
                settings.photography_thumbs,
            ),
            (ContentType::Design, &home.design, settings.design_thumbs),
            (ContentType::About, &home.about, settings.about_thumbs),
        ]
        .into_iter()
        .map(|(ct, items, n)| ThumbRow {
            title: ct.placeholder_title().to_string(),
            thumbs: sample_thumbs(ct, items, n, &mut *rng),
        })
        .collect();

        let view = HomeView {
            writing_links,
            rows,
        };

        let mut context = self.base_context(None);
        context.insert(
            "page_title",
            &format!("{} – Home", self.folio.config.title),
        );
        context.insert("description", &"");
        context.insert("sub_menu", &Vec::<NavItem>::new());
        context.insert("home", &view);

        Ok(self.renderer.render("home.html", &context)?)
    }

    /// Render the not-found page
    pub fn render_not_found(&self, message: Option<&str>) -> Result<String, PageError> {
        let mut context = self.base_context(None);
        context.insert("page_title", "Not found");
        context.insert("description", &"");
        context.insert("sub_menu", &Vec::<NavItem>::new());
        if let Some(message) = message {
            context.insert("message", message);
        }
        Ok(self.renderer.render("404.html", &context)?)
    }

    /// Create a base context with the layout chrome for a section
    fn base_context(&self, section: Option<ContentType>) -> Context {
        let config = &self.folio.config;
        let theme: PageTheme = config.themes.theme_for(section);

        let site = SiteData {
            title: config.title.clone(),
            author: config.author.clone(),
            year: chrono::Local::now().year(),
            sections: ContentType::ALL
                .iter()
                .map(|ct| NavItem {
                    name: ct.placeholder_title().to_string(),
                    path: section_path(ct.section(), &[]),
                    active: section == Some(*ct),
                })
                .collect(),
        };

        let mut context = Context::new();
        context.insert("site", &site);
        context.insert("theme_style", &theme.style_attr());
        context.insert(
            "current_section",
            section.map(ContentType::section).unwrap_or("home"),
        );
        context
    }

    /// Write a page to `<public>/<path>/index.html`
    fn write_page(&self, href: &str, html: &str) -> Result<()> {
        let Some(dir) = output_dir(&self.folio.public_dir, href) else {
            tracing::warn!("Skipping page with unsafe path: {}", href);
            return Ok(());
        };
        fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", dir, e))?;
        let output_path = dir.join("index.html");
        fs::write(&output_path, html)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Generate search index (JSON) over writing
    fn generate_search_index(&self, writing: &Section) -> Result<()> {
        let search_data: Vec<serde_json::Value> = writing
            .items
            .iter()
            .map(|item| {
                serde_json::json!({
                    "title": item.title,
                    "url": item_href(writing.content_type, item),
                    "category": item.category,
                    "content": item.body.plain_text(),
                })
            })
            .collect();

        let output_path = self.folio.public_dir.join("search.json");
        let json = serde_json::to_string_pretty(&search_data)?;
        fs::write(&output_path, json)?;
        tracing::info!("Generated search.json");

        Ok(())
    }

    /// Copy the static directory to `<public>/static`
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }
        let target = self.folio.public_dir.join("static");

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() {
                let relative = path.strip_prefix(static_dir)?;
                let dest = target.join(relative);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(path, &dest)?;
            }
        }

        Ok(())
    }
}

/// Every route a section produces, in CMS order
pub fn routes(section: &Section) -> Vec<Route> {
    let mut routes = vec![Route::Intro];
    if section.content_type.is_categorized() {
        for category in section.categories() {
            routes.push(Route::Category(category));
        }
        for item in &section.items {
            if let (Some(slug), Some(category)) = (item.slug(), item.category()) {
                routes.push(Route::Article {
                    category: Some(category.to_string()),
                    slug: slug.to_string(),
                });
            }
        }
    } else {
        routes.extend(section.items.iter().filter_map(|item| {
            item.slug().map(|slug| Route::Article {
                category: None,
                slug: slug.to_string(),
            })
        }));
    }
    routes
}

/// Site path of a route
pub fn route_path(content_type: ContentType, route: &Route) -> String {
    let section = content_type.section();
    match route {
        Route::Intro => section_path(section, &[]),
        Route::Category(category) => section_path(section, &[category.as_str()]),
        Route::Article {
            category: Some(category),
            slug,
        } => section_path(section, &[category.as_str(), slug.as_str()]),
        Route::Article {
            category: None,
            slug,
        } => section_path(section, &[slug.as_str()]),
    }
}

/// Map a site path to a directory under `public`, refusing traversal
fn output_dir(public_dir: &Path, href: &str) -> Option<PathBuf> {
    let mut dir = public_dir.to_path_buf();
    for segment in href.split('/').filter(|s| !s.is_empty()) {
        let decoded = decode_segment(segment);
        let mut components = Path::new(&decoded).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => dir.push(name),
            _ => return None,
        }
    }
    Some(dir)
}

fn article_view(ct: ContentType, active: &ContentItem, related: Vec<RelatedLink>) -> ArticleView {
    let thumb = match ct {
        ContentType::About if active.is_intro() => pick_thumb(active).map(str::to_string),
        _ => None,
    };

    ArticleView {
        title: active.title.clone(),
        subtitle: active.subtitle.clone(),
        paragraphs: active.body.paragraphs(),
        is_intro: active.is_intro(),
        hero: hero_image(active).map(str::to_string),
        thumb,
        related,
        related_thumbs: ct.has_positional_thumbs(),
    }
}

fn sub_menu(section: &Section, current: Option<&str>) -> Vec<NavItem> {
    if !section.content_type.is_categorized() {
        return Vec::new();
    }
    section
        .categories()
        .into_iter()
        .map(|category| NavItem {
            name: capitalize(&category),
            path: section_path(section.content_type.section(), &[category.as_str()]),
            active: current == Some(category.as_str()),
        })
        .collect()
}

fn first_paragraph(item: &ContentItem) -> String {
    item.subtitle
        .clone()
        .or_else(|| item.body.paragraphs().into_iter().find(|p| !p.is_empty()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{Body, ThumbPos};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(base: &Path) -> Generator {
        let mut config = SiteConfig::default();
        config.author = "Test Author".to_string();
        config.home.seed = Some(3);
        let folio = Folio::with_config(base, config);
        Generator::new(&folio).unwrap()
    }

    fn design_section() -> Section {
        let mut a = ContentItem::article("Poster A", "a");
        a.positional_thumbs = true;
        a.thumb_pos = Some(ThumbPos::Top);
        a.images.image_thumb_top = Some("http://cms/a-top.jpg".to_string());
        a.images.image_full = Some("http://cms/a-full.jpg".to_string());
        a.body = Body::PlainText("First paragraph.\n\nSecond <b>paragraph</b>.".to_string());
        let b = ContentItem::article("Poster B", "b");
        let c = ContentItem::article("Poster C", "c");
        Section::new(
            ContentType::Design,
            ContentItem::intro("Design"),
            vec![a, b, c],
        )
    }

    fn writing_section() -> Section {
        Section::new(
            ContentType::Writing,
            ContentItem::intro("Writing"),
            vec![
                ContentItem::article("One", "one").with_category("essays"),
                ContentItem::article("Two", "two").with_category("poems"),
                ContentItem::article("Three", "three").with_category("essays"),
            ],
        )
    }

    #[test]
    fn test_intro_page_lists_all_items() {
        let dir = tempfile::tempdir().unwrap();
        let html = generator(dir.path())
            .render_route(&design_section(), &Route::Intro)
            .unwrap();
        assert!(html.contains("<title>Design</title>"));
        assert!(html.contains(r#"href="/design/a/""#));
        assert!(html.contains(r#"href="/design/b/""#));
        assert!(html.contains(r#"href="/design/c/""#));
        assert!(html.contains("--accent: #E8553E;"));
        assert!(html.contains("Test Author"));
    }

    #[test]
    fn test_article_page() {
        let dir = tempfile::tempdir().unwrap();
        let html = generator(dir.path())
            .render_route(
                &design_section(),
                &Route::Article {
                    category: None,
                    slug: "a".to_string(),
                },
            )
            .unwrap();
        assert!(html.contains("<h1>Poster A</h1>"));
        assert!(html.contains("a-full.jpg"));
        assert!(html.contains("<p>First paragraph.</p>"));
        assert!(html.contains("Second &lt;b&gt;paragraph&lt;&#x2F;b&gt;."));
        assert!(!html.contains(r#"href="/design/a/""#));
        assert!(html.contains(r#"href="/design/b/""#));
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator(dir.path());
        let err = gen
            .render_route(
                &design_section(),
                &Route::Article {
                    category: None,
                    slug: "zzz".to_string(),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());

        let empty = Section::new(ContentType::About, ContentItem::intro("About"), vec![]);
        let err = gen
            .render_route(
                &empty,
                &Route::Article {
                    category: None,
                    slug: "a".to_string(),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_writing_category_pages() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator(dir.path());
        let section = writing_section();

        let html = gen
            .render_route(&section, &Route::Category("essays".to_string()))
            .unwrap();
        assert!(html.contains("<h1>One</h1>"));
        assert!(html.contains(r#"href="/writing/essays/one/""#));
        assert!(html.contains(r#"href="/writing/essays/three/""#));
        assert!(!html.contains(r#"href="/writing/poems/two/""#));
        assert!(html.contains(">Poems</a>"));

        let html = gen
            .render_route(
                &section,
                &Route::Article {
                    category: Some("essays".to_string()),
                    slug: "three".to_string(),
                },
            )
            .unwrap();
        assert!(html.contains("<h1>Three</h1>"));
        assert!(html.contains(r#"href="/writing/essays/one/""#));
        assert!(!html.contains(r#"href="/writing/essays/three/""#));

        let err = gen
            .render_route(&section, &Route::Category("plays".to_string()))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = gen
            .render_route(
                &section,
                &Route::Article {
                    category: Some("poems".to_string()),
                    slug: "one".to_string(),
                },
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_about_intro_shows_thumb() {
        let dir = tempfile::tempdir().unwrap();
        let mut intro = ContentItem::intro("About me");
        intro.images.hero_image = Some("http://cms/me.jpg".to_string());
        let section = Section::new(ContentType::About, intro, vec![]);
        let html = generator(dir.path())
            .render_route(&section, &Route::Intro)
            .unwrap();
        assert!(html.contains("intro-thumb"));
        assert!(html.contains("me.jpg"));
        assert!(html.contains("--background: #A7A9AC;"));
    }

    #[test]
    fn test_home_page() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator(dir.path());
        let sections = [writing_section(), design_section()];
        let home = HomeContent::from_sections(&sections);

        let html = gen.render_home(&home, &mut gen.home_rng()).unwrap();
        assert!(html.contains(r#"href="/writing/poems/two/""#));
        assert!(html.contains("aria-hidden=\"true\""));
        assert!(html.contains(r#"<a href="/design/a/"><img"#));
        assert!(html.contains("Photography"));

        // Fixed seed gives the same page every time
        let again = gen.render_home(&home, &mut gen.home_rng()).unwrap();
        assert_eq!(html, again);
    }

    #[test]
    fn test_routes() {
        let routes = routes(&writing_section());
        assert_eq!(routes[0], Route::Intro);
        assert_eq!(routes[1], Route::Category("essays".to_string()));
        assert_eq!(routes[2], Route::Category("poems".to_string()));
        assert_eq!(routes.len(), 6);
        assert_eq!(
            route_path(ContentType::Writing, &routes[5]),
            "/writing/essays/three/"
        );
    }

    #[test]
    fn test_output_dir_refuses_traversal() {
        let public = Path::new("/tmp/public");
        assert_eq!(
            output_dir(public, "/writing/short%20stories/x/"),
            Some(public.join("writing").join("short stories").join("x"))
        );
        assert_eq!(output_dir(public, "/"), Some(public.to_path_buf()));
        assert_eq!(output_dir(public, "/design/..%2F..%2Fetc/"), None);
        assert_eq!(output_dir(public, "/design/%2E%2E/"), None);
    }

    #[tokio::test]
    async fn test_generate_writes_site() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/designs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 1, "attributes": { "title": "Poster", "slug": "poster", "imageThumb": "/p.jpg" } }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/writings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "id": 1, "title": "Essay", "slug": "essay", "category": "essays", "content": "Body text" }
                ]
            })))
            .mount(&server)
            .await;
        // Everything else answers 404 and degrades to empty sections

        let dir = tempfile::tempdir().unwrap();
        let static_dir = dir.path().join("static");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("site.css"), "body{}").unwrap();

        let mut config = SiteConfig::default();
        config.set_api_url(&server.uri());
        let folio = Folio::with_config(dir.path(), config);
        let written = Generator::new(&folio).unwrap().generate().await.unwrap();

        let public = &folio.public_dir;
        assert!(public.join("index.html").exists());
        assert!(public.join("404.html").exists());
        assert!(public.join("design/index.html").exists());
        assert!(public.join("design/poster/index.html").exists());
        assert!(public.join("writing/essays/index.html").exists());
        assert!(public.join("writing/essays/essay/index.html").exists());
        assert!(public.join("about/index.html").exists());
        assert!(public.join("photography/index.html").exists());
        assert!(public.join("static/site.css").exists());
        // home, 404, 4 intros, design article, writing category and article
        assert_eq!(written, 9);

        let search = fs::read_to_string(public.join("search.json")).unwrap();
        assert!(search.contains("/writing/essays/essay/"));
        assert!(search.contains("Body text"));
    }
}
