//! Normalize CMS JSON into `ContentItem`s
//!
//! Entries may arrive flat (`{id, title, ...}`) or wrapped in an
//! `attributes` envelope (`{id, attributes: {title, ...}}`). Media fields
//! come in several nested shapes. Everything here is total: malformed
//! input produces defaults, never errors.

use serde_json::Value;

use super::{BlockNode, Body, ContentItem, ContentType, ImageSlots, InlineSpan, ItemKind, ThumbPos};
use crate::helpers::absolutize;

/// Category given to categorized items the CMS left unfiled
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// The field map of an entry, looking through an `attributes` envelope
fn attributes(entry: &Value) -> &Value {
    match entry.get("attributes") {
        Some(attr) if attr.is_object() => attr,
        _ => entry,
    }
}

fn string_field(attr: &Value, key: &str) -> Option<String> {
    attr.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract a media URL from any of the shapes the CMS uses
fn media_url(value: Option<&Value>, base: &str) -> Option<String> {
    let value = value?;
    if let Some(s) = value.as_str() {
        return absolutize(base, s);
    }

    let candidates = [
        value.get("url"),
        value
            .get("data")
            .and_then(|d| d.get("attributes"))
            .and_then(|a| a.get("url")),
        value.get("data").and_then(|d| d.get("url")),
        value.get("attributes").and_then(|a| a.get("url")),
    ];

    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .and_then(|url| absolutize(base, url))
}

fn image_slots(attr: &Value, base: &str) -> ImageSlots {
    let url = |key: &str| media_url(attr.get(key), base);
    ImageSlots {
        hero_image: url("heroImage"),
        image_full: url("imageFull"),
        image_watermarked: url("imageWatermarked"),
        image_thumb: url("imageThumb"),
        image_thumb_top: url("imageThumbTop"),
        image_thumb_center: url("imageThumbCenter"),
        image_thumb_bottom: url("imageThumbBottom"),
    }
}

/// Convert a body value into the tagged `Body` union
pub fn parse_body(value: Option<&Value>) -> Body {
    match value {
        Some(Value::String(text)) => Body::PlainText(text.clone()),
        Some(Value::Array(blocks)) => Body::RichBlocks(blocks.iter().map(parse_block).collect()),
        _ => Body::default(),
    }
}

fn parse_block(block: &Value) -> BlockNode {
    let children = block
        .get("children")
        .and_then(Value::as_array)
        .map(|spans| {
            spans
                .iter()
                .map(|span| InlineSpan {
                    text: span
                        .get("text")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    BlockNode {
        kind: block
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        children,
    }
}

/// Normalize one entry of a collection response
pub fn normalize_article(content_type: ContentType, entry: &Value, base: &str) -> ContentItem {
    let attr = attributes(entry);
    let id = entry
        .get("id")
        .or_else(|| attr.get("id"))
        .and_then(Value::as_u64);

    // Articles prefer `body` when it is a block list, then `content`
    let body = match attr.get("body") {
        Some(Value::Array(_)) => parse_body(attr.get("body")),
        _ => match attr.get("content") {
            Some(content) if !content.is_null() => parse_body(Some(content)),
            _ => parse_body(attr.get("body")),
        },
    };

    let slug = string_field(attr, "slug").unwrap_or_else(|| match id {
        Some(id) => format!("no-slug-{}", id),
        None => "no-slug".to_string(),
    });

    ContentItem {
        kind: ItemKind::Article,
        id,
        title: string_field(attr, "title").unwrap_or_else(|| "Untitled".to_string()),
        subtitle: string_field(attr, "subtitle"),
        body,
        slug: Some(slug),
        category: string_field(attr, "category").or_else(|| {
            content_type
                .is_categorized()
                .then(|| DEFAULT_CATEGORY.to_string())
        }),
        images: image_slots(attr, base),
        thumb_pos: attr
            .get("thumbPos")
            .and_then(Value::as_str)
            .and_then(ThumbPos::parse),
        positional_thumbs: content_type.has_positional_thumbs(),
    }
}

/// Normalize a full collection response (`{data: [...]}`)
pub fn normalize_collection(content_type: ContentType, json: &Value, base: &str) -> Vec<ContentItem> {
    let Some(entries) = json.get("data").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut items: Vec<ContentItem> = Vec::with_capacity(entries.len());
    for entry in entries {
        let item = normalize_article(content_type, entry, base);
        if items.iter().any(|existing| existing.slug == item.slug) {
            tracing::warn!(
                "Duplicate {} slug {:?}, keeping the first entry",
                content_type,
                item.slug
            );
            continue;
        }
        items.push(item);
    }
    items
}

/// Normalize a single-type intro response (`{data: {...}}`)
pub fn normalize_intro(content_type: ContentType, json: &Value, base: &str) -> ContentItem {
    let data = match json.get("data") {
        Some(data) if data.is_object() => data,
        _ => return ContentItem::placeholder_intro(content_type),
    };
    let attr = attributes(data);

    ContentItem {
        kind: ItemKind::Intro,
        id: data.get("id").and_then(Value::as_u64),
        title: string_field(attr, "title")
            .unwrap_or_else(|| content_type.placeholder_title().to_string()),
        subtitle: string_field(attr, "subtitle"),
        body: parse_body(attr.get("content")),
        slug: None,
        category: None,
        images: image_slots(attr, base),
        thumb_pos: None,
        positional_thumbs: false,
    }
}

/// Slugs from a `fields[0]=slug` projection response
pub fn normalize_slugs(json: &Value) -> Vec<String> {
    json.get("data")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| string_field(attributes(entry), "slug"))
                .collect()
        })
        .unwrap_or_default()
}
