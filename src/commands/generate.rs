//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Fetch all content and write the site
pub async fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(folio)?;
    tracing::info!("Fetching content from {}", generator.fetcher().api_url());
    let pages = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        pages,
        duration.as_secs_f64()
    );

    Ok(())
}
