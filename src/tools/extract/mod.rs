//! Extraction Cascade Engine
//!
//! Turns a parsed product page into a [`RawProduct`] candidate record. Every
//! field runs an ordered cascade of selector strategies and keeps the first
//! non-empty result; a field whose whole cascade misses stays absent. The
//! engine itself never fails: bad markup produces a sparse record, and it is
//! the normalization pipeline's job to accept or reject it.

pub mod types;
mod utils;

pub use types::Source;
pub(crate) use utils::{cascade_all, cascade_first};
use utils::*;

use chrono::Utc;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::page::ProductPage;
use crate::tools::parse::{calculate_discount, clean_title, extract_float, extract_number};
use crate::tools::variants::detect_variants;
use crate::types::RawProduct;

const VOLUME_KEYS: &[&str] = &["объем", "volume", "size"];
const ALCOHOL_KEYS: &[&str] = &["крепость", "alcohol", "abv"];
const COUNTRY_KEYS: &[&str] = &["страна", "country", "производство"];
const YEAR_KEYS: &[&str] = &["год", "year", "vintage"];
const SKU_KEYS: &[&str] = &["артикул", "sku", "product code"];

/// Extract a candidate product record from a page.
pub fn extract(page: &ProductPage) -> RawProduct {
    let mut raw = RawProduct {
        product_id: Some(extract_product_id(page)),
        product_url: Some(page.url().to_string()),
        scraped_at: Some(Utc::now().timestamp()),
        ..RawProduct::default()
    };

    let volume = extract_volume(page);
    raw.name = extract_title(page, volume.as_deref());
    raw.volume = volume;

    raw.brand = cascade_first(page, types::BRAND).map(|b| clean_title(&b));
    raw.sku = cascade_first(page, types::SKU);
    raw.category = extract_breadcrumbs(page).into_iter().last();

    let marketing_tags = extract_marketing_tags(page);
    if !marketing_tags.is_empty() {
        raw.marketing_tags = Some(marketing_tags);
    }

    if let Some(price_data) = extract_price_data(page) {
        raw.price = price_data.current;
        raw.original_price = price_data.original;
        raw.discount_percentage = price_data
            .original
            .zip(price_data.current)
            .and_then(|(original, current)| calculate_discount(original, current));
        raw.price_data = Some(price_data);
    }

    if let Some(stock_data) = extract_stock_data(page) {
        raw.in_stock = stock_data.in_stock;
        raw.stock_quantity = stock_data.count;
        raw.availability_status = stock_data.status.clone();
        raw.stock_data = Some(stock_data);
    }

    if let Some(assets) = extract_assets(page) {
        raw.image_url = assets.main_image.clone();
        if !assets.gallery_images.is_empty() {
            raw.image_urls = Some(assets.gallery_images.clone());
        }
        raw.assets = Some(assets);
    }

    raw.description = extract_description(page);

    let mut attributes = BTreeMap::new();
    for (key, value) in extract_characteristics(page) {
        let lower = key.to_lowercase();
        if contains_any(&lower, VOLUME_KEYS) {
            raw.volume.get_or_insert(value);
        } else if contains_any(&lower, ALCOHOL_KEYS) {
            if raw.alcohol_content.is_none() {
                raw.alcohol_content = extract_float(&value);
            }
        } else if contains_any(&lower, COUNTRY_KEYS) {
            raw.country.get_or_insert(value);
        } else if contains_any(&lower, YEAR_KEYS) {
            if raw.year.is_none() {
                raw.year = extract_number(&value).map(|y| y.to_string());
            }
        } else if raw.sku.is_none() && contains_any(&lower, SKU_KEYS) {
            raw.sku = Some(value);
        } else {
            attributes.insert(key, Value::String(value));
        }
    }

    raw.rating = cascade_first(page, types::RATING).and_then(|t| extract_float(&t));
    raw.review_count = cascade_first(page, types::REVIEW_COUNT).and_then(|t| extract_number(&t));

    let variants = detect_variants(page);
    if variants > 0 {
        attributes.insert("variants_count".to_string(), Value::from(variants));
    }

    if !attributes.is_empty() {
        raw.attributes = Some(attributes);
    }

    raw
}

/// Product title, with the volume appended when the page shows it separately
/// and the title does not already carry it.
fn extract_title(page: &ProductPage, volume: Option<&str>) -> Option<String> {
    let title = clean_title(&cascade_first(page, types::TITLE)?);
    if title.is_empty() {
        return None;
    }
    match volume {
        Some(v) if !v.is_empty() && !title.contains(v) => Some(format!("{title} {v}")),
        _ => Some(title),
    }
}
