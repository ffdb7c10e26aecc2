//! Configuration module

mod site;
mod theme;

pub use site::HomeConfig;
pub use site::SiteConfig;
pub use theme::{PageTheme, ThemeConfig};
