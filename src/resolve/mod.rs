//! Selecting what a page shows: the active item, its thumbnail and the
//! related navigation list. Everything here is pure.

mod related;
mod resolver;
mod sample;
mod thumb;

pub use related::{build_related, item_href, RelatedLink};
pub use resolver::{lookup, resolve, resolve_categorized};
pub use sample::{sample_thumbs, Thumb};
pub use thumb::{hero_image, pick_thumb, preview_thumb};
