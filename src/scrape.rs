use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, info};
use url::Url;

use crate::fetch::PageFetcher;
use crate::parser::listing::{extract_tiles, ProductTile};
use crate::parser::{description, price};
use crate::report::{size_label, ProductRecord, ScrapeResult};

/// Fetch a listing page and every product page it links to.
pub async fn scrape_url(
    fetcher: Arc<dyn PageFetcher>,
    url: &str,
    concurrency: usize,
) -> Result<ScrapeResult> {
    info!("Fetching listing page: {}", url);
    let listing = fetcher
        .fetch(url)
        .await
        .with_context(|| format!("Failed to fetch listing page {url}"))?;
    scrape_listing(fetcher, url, &listing, concurrency).await
}

/// Scrape an already fetched listing page. `url` is only used to resolve
/// relative product links.
pub async fn scrape_listing(
    fetcher: Arc<dyn PageFetcher>,
    url: &str,
    listing: &str,
    concurrency: usize,
) -> Result<ScrapeResult> {
    let base = Url::parse(url).ok();
    let tiles = extract_tiles(listing, base.as_ref())
        .with_context(|| format!("Malformed product listing at {url}"))?;
    info!("Found {} products", tiles.len());

    let pb = ProgressBar::new(tiles.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let records = if concurrency <= 1 {
        scrape_sequential(fetcher.as_ref(), tiles, &pb).await
    } else {
        scrape_bounded(fetcher, tiles, concurrency, &pb).await
    };
    pb.finish_and_clear();

    let result = ScrapeResult::new(records?);
    info!(
        "Scraped {} products, total {:.2}",
        result.results.len(),
        result.total
    );
    Ok(result)
}

async fn scrape_sequential(
    fetcher: &dyn PageFetcher,
    tiles: Vec<ProductTile>,
    pb: &ProgressBar,
) -> Result<Vec<ProductRecord>> {
    let mut records = Vec::with_capacity(tiles.len());
    for tile in tiles {
        records.push(build_record(fetcher, tile).await?);
        pb.inc(1);
    }
    Ok(records)
}

/// Fetch up to `concurrency` product pages at once. Records are collected
/// in listing order; the first failure in that order aborts the rest.
async fn scrape_bounded(
    fetcher: Arc<dyn PageFetcher>,
    tiles: Vec<ProductTile>,
    concurrency: usize,
    pb: &ProgressBar,
) -> Result<Vec<ProductRecord>> {
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut handles = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let fetcher = Arc::clone(&fetcher);
        let sem = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire_owned().await?;
            build_record(fetcher.as_ref(), tile).await
        }));
    }

    let mut records = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();
    while let Some(handle) = pending.next() {
        let outcome = handle
            .await
            .context("Product page task panicked")
            .and_then(|record| record);
        match outcome {
            Ok(record) => {
                records.push(record);
                pb.inc(1);
            }
            Err(e) => {
                for rest in pending {
                    rest.abort();
                }
                return Err(e);
            }
        }
    }
    Ok(records)
}

async fn build_record(fetcher: &dyn PageFetcher, tile: ProductTile) -> Result<ProductRecord> {
    let unit_price = price::extract_price(&tile.price_text);
    let page = fetcher
        .fetch(&tile.url)
        .await
        .with_context(|| format!("Failed to fetch product page for {:?}", tile.title))?;
    let description = description::extract_description(&page)
        .with_context(|| format!("No description on product page {}", tile.url))?;
    debug!(title = %tile.title, unit_price, "built record");

    Ok(ProductRecord {
        description,
        size: size_label(&page),
        title: tile.title,
        unit_price,
    })
}

// ── Tests ──
