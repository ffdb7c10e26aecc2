//! Active-item resolution

use crate::content::{ContentItem, ContentType};
use crate::error::PageError;

/// Resolve by slug alone (About and Design)
///
/// No slug selects the intro; an unknown slug falls back to it as well.
pub fn resolve<'a>(
    items: &'a [ContentItem],
    intro: &'a ContentItem,
    slug: Option<&str>,
) -> &'a ContentItem {
    match slug {
        Some(slug) => items.iter().find(|a| a.slug() == Some(slug)).unwrap_or(intro),
        None => intro,
    }
}

/// Resolve within a category (Writing and Photography)
///
/// With a category, the slug is looked up among that category's items and
/// the category's first item stands in for a missing match. Without a
/// category, or when the category is empty, `fallback` stays active.
pub fn resolve_categorized<'a>(
    items: &'a [ContentItem],
    fallback: &'a ContentItem,
    category: Option<&str>,
    slug: Option<&str>,
) -> &'a ContentItem {
    let Some(category) = category else {
        return fallback;
    };
    let mut in_category = items.iter().filter(|a| a.in_category(category));

    match slug {
        Some(slug) => {
            let first = items.iter().find(|a| a.in_category(category));
            in_category
                .find(|a| a.slug() == Some(slug))
                .or(first)
                .unwrap_or(fallback)
        }
        None => in_category.next().unwrap_or(fallback),
    }
}

/// Strict lookup used when generating a slug page
///
/// Unlike the resolvers above this never falls back: an unknown slug (or a
/// slug filed under another category) is reported as `NotFound`.
pub fn lookup<'a>(
    content_type: ContentType,
    items: &'a [ContentItem],
    category: Option<&str>,
    slug: &str,
) -> Result<&'a ContentItem, PageError> {
    items
        .iter()
        .find(|a| a.slug() == Some(slug) && category.map_or(true, |c| a.in_category(c)))
        .ok_or_else(|| match category {
            Some(category) => PageError::not_found(content_type, format!("{}/{}", category, slug)),
            None => PageError::not_found(content_type, slug),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> (Vec<ContentItem>, ContentItem) {
        (
            vec![
                ContentItem::article("A", "a"),
                ContentItem::article("B", "b"),
                ContentItem::article("C", "c"),
            ],
            ContentItem::intro("Intro"),
        )
    }

    fn writing() -> Vec<ContentItem> {
        vec![
            ContentItem::article("One", "one").with_category("essays"),
            ContentItem::article("Two", "two").with_category("poems"),
            ContentItem::article("Three", "three").with_category("essays"),
        ]
    }

    #[test]
    fn test_resolve_by_slug() {
        let (items, intro) = abc();
        assert_eq!(resolve(&items, &intro, Some("b")).slug(), Some("b"));
        assert_eq!(resolve(&items, &intro, Some("z")), &intro);
        assert_eq!(resolve(&items, &intro, None), &intro);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (items, intro) = abc();
        let first = resolve(&items, &intro, Some("c"));
        let second = resolve(&items, &intro, Some("c"));
        assert_eq!(first.slug(), second.slug());
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_first_match_wins() {
        let items = vec![
            ContentItem::article("First", "same"),
            ContentItem::article("Second", "same"),
        ];
        let intro = ContentItem::intro("Intro");
        assert_eq!(resolve(&items, &intro, Some("same")).title, "First");
    }

    #[test]
    fn test_resolve_categorized() {
        let items = writing();
        let intro = ContentItem::intro("Writing");

        let active = resolve_categorized(&items, &intro, Some("essays"), Some("three"));
        assert_eq!(active.slug(), Some("three"));

        // Slug exists but lives in another category
        let active = resolve_categorized(&items, &intro, Some("essays"), Some("two"));
        assert_eq!(active.slug(), Some("one"));

        let active = resolve_categorized(&items, &intro, Some("poems"), None);
        assert_eq!(active.slug(), Some("two"));

        assert_eq!(resolve_categorized(&items, &intro, Some("plays"), None), &intro);
        assert_eq!(resolve_categorized(&items, &intro, None, Some("one")), &intro);
    }

    #[test]
    fn test_resolve_categorized_keeps_previous() {
        let items = writing();
        let previous = items[1].clone();
        let active = resolve_categorized(&items, &previous, Some("plays"), Some("x"));
        assert_eq!(active, &previous);
    }

    #[test]
    fn test_lookup() {
        let items = writing();
        let found = lookup(ContentType::Writing, &items, Some("essays"), "one").unwrap();
        assert_eq!(found.title, "One");

        let err = lookup(ContentType::Writing, &items, Some("poems"), "one").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "writing item not found: poems/one");

        assert!(lookup(ContentType::Design, &[], None, "x").is_err());
    }
}
