pub mod description;
pub mod listing;
pub mod price;
pub mod tree;

use thiserror::Error;

/// Marker classes used by the retailer's markup.
pub mod marker {
    pub const PRODUCT_CONTAINER: &str = "productInner";
    pub const PRICE: &str = "pricePerUnit";
    pub const PRODUCT_INFO: &str = "productInfo";
    pub const DATA_ITEM_HEADER: &str = "productDataItemHeader";
    pub const PRODUCT_TEXT: &str = "productText";
}

/// A page did not have the structure the extractors rely on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("product container #{index} has no `{class}` node")]
    MissingTilePart { index: usize, class: &'static str },

    #[error("product container #{index} has no link inside its `productInfo` node")]
    MissingLink { index: usize },

    #[error("link in product container #{index} has no href")]
    MissingHref { index: usize },

    #[error("no `productDataItemHeader` node labelled \"Description\"")]
    MissingDescriptionHeader,

    #[error("description header has no following `productText` sibling")]
    MissingDescriptionText,
}
