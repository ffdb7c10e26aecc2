//! Helper functions shared by the fetcher, resolver and templates

mod url;

pub use url::*;
