//! Random thumbnail rows for the home page

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::{item_href, preview_thumb};
use crate::content::{ContentItem, ContentType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Thumb {
    pub src: String,
    pub href: String,
    pub alt: String,
}

/// Pick up to `n` items that have a preview image, without replacement
///
/// The caller owns the randomness: pass a seeded RNG for stable output.
pub fn sample_thumbs<R: Rng + ?Sized>(
    content_type: ContentType,
    items: &[ContentItem],
    n: usize,
    rng: &mut R,
) -> Vec<Thumb> {
    let with_image: Vec<(&ContentItem, &str)> = items
        .iter()
        .filter_map(|item| preview_thumb(content_type, item).map(|src| (item, src)))
        .collect();

    with_image
        .choose_multiple(rng, n)
        .map(|(item, src)| Thumb {
            src: src.to_string(),
            href: item_href(content_type, item),
            alt: item.title.clone(),
        })
        .collect()
}
