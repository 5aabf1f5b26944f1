use scraper::Html;

use super::marker;
use super::tree::TreeNode;
use super::ExtractError;

const DESCRIPTION_LABEL: &str = "Description";

/// Find the description text below `root`.
///
/// Detail pages carry several `productDataItemHeader` headings; the first one
/// whose text contains "Description" wins and later ones are ignored.
pub fn description_from<N: TreeNode>(root: N) -> Result<String, ExtractError> {
    let header = root
        .first_descendant(|n| {
            n.has_class(marker::DATA_ITEM_HEADER) && n.text_content().contains(DESCRIPTION_LABEL)
        })
        .ok_or(ExtractError::MissingDescriptionHeader)?;
    let body = header
        .next_sibling_matching(|n| n.has_class(marker::PRODUCT_TEXT))
        .ok_or(ExtractError::MissingDescriptionText)?;
    Ok(body.text_content().trim().to_string())
}

pub fn extract_description(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);
    description_from(document.root_element())
}

// ── Tests ──
