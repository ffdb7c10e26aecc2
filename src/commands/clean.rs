//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the generated site
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    #[test]
    fn test_clean_removes_public() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(folio.public_dir.join("design")).unwrap();
        fs::write(folio.public_dir.join("index.html"), "<html>").unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());

        // Cleaning twice is fine
        run(&folio).unwrap();
    }
}
