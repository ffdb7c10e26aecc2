//! Errors surfaced while building a page

use thiserror::Error;

use crate::content::ContentType;

#[derive(Debug, Error)]
pub enum PageError {
    /// No item matches the requested identifier
    #[error("{content_type} item not found: {identifier}")]
    NotFound {
        content_type: ContentType,
        identifier: String,
    },

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(#[from] tera::Error),
}

impl PageError {
    pub fn not_found(content_type: ContentType, identifier: impl Into<String>) -> Self {
        PageError::NotFound {
            content_type,
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PageError::NotFound { .. })
    }
}
