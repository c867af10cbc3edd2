//! Declarative per-field selector cascades.
//!
//! Each field is extracted by trying an ordered list of [`Source`] strategies
//! and keeping the first non-empty result. Order encodes reliability:
//! explicit data attributes beat semantic classes, which beat generic
//! class-substring matches. Appending a new fallback source is a data change,
//! not a control-flow change.

/// One strategy in a field's cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Text content of elements matching the selector.
    Text(&'static str),
    /// An attribute value of elements matching the selector.
    Attr(&'static str, &'static str),
}

use Source::{Attr, Text};

pub(super) const PRODUCT_ID: &[Source] = &[
    Attr("div[data-product-id]", "data-product-id"),
    Attr("input[name='product_id']", "value"),
];

pub(super) const TITLE: &[Source] = &[
    Text("h1.product-title"),
    Text("h1"),
    Text(".product-name"),
];

pub(super) const VOLUME: &[Source] = &[
    Attr("[data-volume]", "data-volume"),
    Text(".product-volume"),
];

pub(super) const BRAND: &[Source] = &[
    Text(".brand-name"),
    Attr("[data-brand]", "data-brand"),
    Text("a.brand-link"),
];

pub(super) const SKU: &[Source] = &[
    Attr("[data-sku]", "data-sku"),
    Attr("input[name='sku']", "value"),
];

pub(super) const BREADCRUMBS: &[Source] = &[
    Text(".breadcrumb a"),
    Text(".breadcrumb-link"),
    Text("nav.breadcrumb a"),
];

pub(super) const MARKETING_TAGS: &[Source] = &[
    Text(".product-tag"),
    Text(".tag"),
    Text("[class*='badge']"),
];

pub(super) const CURRENT_PRICE: &[Source] = &[
    Text(".price-current"),
    Text(".product-price"),
    Attr("[data-price]", "data-price"),
    Text("span[class*='price']"),
];

pub(super) const ORIGINAL_PRICE: &[Source] = &[
    Text(".price-old"),
    Text(".price-original"),
    Attr("[data-original-price]", "data-original-price"),
    Text(".product-original-price"),
];

pub(super) const DESCRIPTION: &[Source] = &[
    Text(".product-description"),
    Text("[class*='description']"),
    Text("p.product-text"),
];

pub(super) const STOCK_STATUS: &[Source] = &[
    Text(".stock-status"),
    Text(".availability-text"),
];

pub(super) const RATING: &[Source] = &[Text("span.rating-value")];

pub(super) const REVIEW_COUNT: &[Source] = &[Text("span.review-count")];

pub(super) const MAIN_IMAGE: &[Source] = &[
    Attr(".product-image-main img", "src"),
    Attr(".product-main-image", "src"),
    Attr("img[class*='main']", "src"),
    Attr("[data-main-image]", "data-main-image"),
];

pub(super) const GALLERY: &[Source] = &[
    Attr(".product-gallery img", "src"),
    Attr(".product-carousel img", "src"),
    Attr("[class*='gallery'] img", "src"),
    Attr("img[class*='product']", "src"),
];

pub(super) const VIEW_360: &[Source] = &[
    Attr("[data-360]", "data-360"),
    Attr(".view-360 img", "src"),
    Attr("img[data-type*='360']", "src"),
];
