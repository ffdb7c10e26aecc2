//! Related navigation lists

use serde::Serialize;

use super::pick_thumb;
use crate::content::{ContentItem, ContentType};
use crate::helpers::section_path;

/// One entry of the "Explore more" list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedLink {
    pub label: String,
    pub href: String,
    pub thumb: Option<String>,
}

impl RelatedLink {
    fn from_item(content_type: ContentType, item: &ContentItem) -> Self {
        Self {
            label: item.title.clone(),
            href: item_href(content_type, item),
            thumb: pick_thumb(item).map(str::to_string),
        }
    }
}

/// Site path of an item's page
///
/// Categorized sections nest the slug under its category; items without a
/// category, and intros, link to the flat form.
pub fn item_href(content_type: ContentType, item: &ContentItem) -> String {
    let section = content_type.section();
    match (item.slug(), item.category()) {
        (Some(slug), Some(category)) if content_type.is_categorized() => {
            section_path(section, &[category, slug])
        }
        (Some(slug), _) => section_path(section, &[slug]),
        (None, _) => section_path(section, &[]),
    }
}

/// Sibling links for the active item, in fetch order
///
/// The intro lists everything; an article lists everything but itself.
/// With `category` set, only items of that category are listed.
pub fn build_related(
    content_type: ContentType,
    items: &[ContentItem],
    active: &ContentItem,
    category: Option<&str>,
) -> Vec<RelatedLink> {
    let active_slug = if active.is_intro() { None } else { active.slug() };

    items
        .iter()
        .filter(|item| category.map_or(true, |c| item.in_category(c)))
        .filter(|item| active_slug.is_none() || item.slug() != active_slug)
        .map(|item| RelatedLink::from_item(content_type, item))
        .collect()
}
