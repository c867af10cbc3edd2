//! Shared Selectors

use once_cell::sync::Lazy;
use scraper::Selector;

/// Selector for JSON-LD script tags.
pub static JSONLD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("valid jsonld selector")
});

/// Selector for plain embedded-JSON script tags.
pub static JSON_SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script[type='application/json']").expect("valid json script selector")
});

/// Selector for the markup a product page is expected to carry.
pub static PRODUCT_MARKUP_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, .product-title, .title").expect("valid product selector"));
