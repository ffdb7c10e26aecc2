//! Content module - the content model and the CMS client

mod body;
pub mod fetcher;
mod item;
pub mod normalize;

pub use body::{BlockNode, Body, InlineSpan};
pub use fetcher::{ContentFetcher, FetchError, HomeContent, Section};
pub use item::{ContentItem, ContentType, ImageSlots, ItemKind, ThumbPos};
