//! Thumbnail selection

use crate::content::{ContentItem, ContentType};

/// The canonical thumbnail for an item
///
/// Items with positional crops use the slot named by `thumb_pos`
/// (center when unset). Anything else, or an empty slot, falls back to the
/// legacy `image_thumb`, then the hero image, then the full image.
pub fn pick_thumb(item: &ContentItem) -> Option<&str> {
    let images = &item.images;
    let positional = if item.positional_thumbs {
        images.positional(item.thumb_pos.unwrap_or_default())
    } else {
        None
    };

    positional
        .or(images.image_thumb.as_deref())
        .or(images.hero_image.as_deref())
        .or(images.image_full.as_deref())
}

/// The large image shown at the top of an article
pub fn hero_image(item: &ContentItem) -> Option<&str> {
    let images = &item.images;
    images
        .image_watermarked
        .as_deref()
        .or(images.image_full.as_deref())
        .or(images.hero_image.as_deref())
}

/// Thumbnail for a home-page row
///
/// Photography only shows items with a crop (center, top, bottom); design
/// also accepts the full image; about uses the legacy thumb, then the full
/// image. Writing has no thumb row and uses the canonical thumb.
pub fn preview_thumb(content_type: ContentType, item: &ContentItem) -> Option<&str> {
    let images = &item.images;
    let crop = images
        .image_thumb_center
        .as_deref()
        .or(images.image_thumb_top.as_deref())
        .or(images.image_thumb_bottom.as_deref());

    match content_type {
        ContentType::Photography => crop,
        ContentType::Design => crop.or(images.image_full.as_deref()),
        ContentType::About => images
            .image_thumb
            .as_deref()
            .or(images.image_full.as_deref()),
        ContentType::Writing => pick_thumb(item),
    }
}
