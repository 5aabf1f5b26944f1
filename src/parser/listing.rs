use scraper::Html;
use url::Url;

use super::marker;
use super::tree::TreeNode;
use super::ExtractError;

/// One product's summary entry on the listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductTile {
    /// Full text of the price node, annotations included.
    pub price_text: String,
    pub title: String,
    pub url: String,
}

/// Every product container below `root`, in document order.
pub fn containers<N: TreeNode>(root: N) -> Vec<N> {
    root.descendants_matching(|n| n.has_class(marker::PRODUCT_CONTAINER))
}

/// Read the price fragment, title and detail link out of one container.
pub fn tile_from_container<N: TreeNode>(index: usize, container: N) -> Result<ProductTile, ExtractError> {
    let price = container
        .first_descendant(|n| n.has_class(marker::PRICE))
        .ok_or(ExtractError::MissingTilePart {
            index,
            class: marker::PRICE,
        })?;
    let info = container
        .first_descendant(|n| n.has_class(marker::PRODUCT_INFO))
        .ok_or(ExtractError::MissingTilePart {
            index,
            class: marker::PRODUCT_INFO,
        })?;
    let link = info
        .first_descendant(|n| n.tag_name() == "a")
        .ok_or(ExtractError::MissingLink { index })?;
    let href = link
        .attribute("href")
        .ok_or(ExtractError::MissingHref { index })?;

    Ok(ProductTile {
        price_text: price.text_content(),
        title: link.text_content().trim().to_string(),
        url: href.to_string(),
    })
}

/// Parse a listing page and return its tiles, with links resolved against `base`.
pub fn extract_tiles(html: &str, base: Option<&Url>) -> Result<Vec<ProductTile>, ExtractError> {
    let document = Html::parse_document(html);
    containers(document.root_element())
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            let mut tile = tile_from_container(i, node)?;
            if let Some(base) = base {
                tile.url = resolve(base, &tile.url);
            }
            Ok(tile)
        })
        .collect()
}

fn resolve(base: &Url, href: &str) -> String {
    base.join(href)
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

// ── Tests ──
