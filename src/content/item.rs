//! Content item model shared by every section

use super::Body;

/// The four kinds of content the CMS serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    About,
    Writing,
    Photography,
    Design,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Writing,
        ContentType::Photography,
        ContentType::Design,
        ContentType::About,
    ];

    /// URL section, e.g. `/writing/...`
    pub fn section(self) -> &'static str {
        match self {
            ContentType::About => "about",
            ContentType::Writing => "writing",
            ContentType::Photography => "photography",
            ContentType::Design => "design",
        }
    }

    /// Collection endpoint under `/api/`
    pub fn collection_endpoint(self) -> &'static str {
        match self {
            ContentType::About => "abouts",
            ContentType::Writing => "writings",
            ContentType::Photography => "photographies",
            ContentType::Design => "designs",
        }
    }

    /// Single-type endpoint holding the section intro
    pub fn intro_endpoint(self) -> &'static str {
        match self {
            ContentType::About => "about-intro",
            ContentType::Writing => "writing-intro",
            ContentType::Photography => "photography-intro",
            ContentType::Design => "design-intro",
        }
    }

    /// Title shown when the intro cannot be fetched
    pub fn placeholder_title(self) -> &'static str {
        match self {
            ContentType::About => "About",
            ContentType::Writing => "Writing",
            ContentType::Photography => "Photography",
            ContentType::Design => "Design",
        }
    }

    /// Whether items carry top/center/bottom thumbnail crops
    pub fn has_positional_thumbs(self) -> bool {
        !matches!(self, ContentType::Writing)
    }

    /// Whether items are grouped under a category in their URLs
    pub fn is_categorized(self) -> bool {
        matches!(self, ContentType::Writing | ContentType::Photography)
    }

    pub fn from_section(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "about" | "abouts" => Some(ContentType::About),
            "writing" | "writings" => Some(ContentType::Writing),
            "photography" | "photographies" | "photo" | "photos" => {
                Some(ContentType::Photography)
            }
            "design" | "designs" => Some(ContentType::Design),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}

/// Which crop of the thumbnail an item prefers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThumbPos {
    Top,
    #[default]
    Center,
    Bottom,
}

impl ThumbPos {
    /// Parse the CMS value; anything unrecognized is treated as unset
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(ThumbPos::Top),
            "center" => Some(ThumbPos::Center),
            "bottom" => Some(ThumbPos::Bottom),
            _ => None,
        }
    }
}

/// Named image slots; every one is independently optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSlots {
    pub hero_image: Option<String>,
    pub image_full: Option<String>,
    pub image_watermarked: Option<String>,
    /// Legacy single thumbnail
    pub image_thumb: Option<String>,
    pub image_thumb_top: Option<String>,
    pub image_thumb_center: Option<String>,
    pub image_thumb_bottom: Option<String>,
}

impl ImageSlots {
    pub fn positional(&self, pos: ThumbPos) -> Option<&str> {
        match pos {
            ThumbPos::Top => self.image_thumb_top.as_deref(),
            ThumbPos::Center => self.image_thumb_center.as_deref(),
            ThumbPos::Bottom => self.image_thumb_bottom.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Article,
    Intro,
}

/// A piece of content: either an article or a section intro
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub kind: ItemKind,
    pub id: Option<u64>,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: Body,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub images: ImageSlots,
    pub thumb_pos: Option<ThumbPos>,
    pub positional_thumbs: bool,
}

impl ContentItem {
    /// An article with only a title and slug set
    pub fn article(title: &str, slug: &str) -> Self {
        Self {
            kind: ItemKind::Article,
            id: None,
            title: title.to_string(),
            subtitle: None,
            body: Body::default(),
            slug: Some(slug.to_string()),
            category: None,
            images: ImageSlots::default(),
            thumb_pos: None,
            positional_thumbs: false,
        }
    }

    /// The intro shown when a section's intro cannot be fetched
    pub fn placeholder_intro(content_type: ContentType) -> Self {
        Self::intro(content_type.placeholder_title())
    }

    pub fn intro(title: &str) -> Self {
        Self {
            kind: ItemKind::Intro,
            slug: None,
            ..Self::article(title, "")
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn is_intro(&self) -> bool {
        self.kind == ItemKind::Intro
    }

    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category() == Some(category)
    }
}
