use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Currency attached to every price on the storefront.
pub const DEFAULT_CURRENCY: &str = "RUB";
/// Region the storefront prices and stock are quoted for.
pub const DEFAULT_REGION: &str = "krasnodar";
/// Identifier of the storefront records come from.
pub const DEFAULT_SOURCE: &str = "alkoteka.com";

/// Nested price block: current/original pair plus an optional sale label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub current: Option<f64>,
    pub original: Option<f64>,
    /// Human-readable sale label, only set when a discount applies.
    pub sale_tag: Option<String>,
    #[serde(default)]
    pub currency: String,
}

/// Nested stock block. `in_stock` is tri-state at extraction time: markup can
/// say available, say unavailable, or (pre-order, ambiguous) say nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub in_stock: Option<bool>,
    pub count: Option<i64>,
    pub status: Option<String>,
    #[serde(default)]
    pub available_regions: Vec<String>,
}

/// Nested media block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    pub main_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub view_360: Vec<String>,
    #[serde(default)]
    pub video: Vec<String>,
    /// Local paths filled in by a downloader stage, if any.
    #[serde(default)]
    pub cached_images: Vec<String>,
}

/// Loosely-typed candidate record straight out of extraction.
///
/// Every field is optional and nothing is guaranteed yet: a field whose whole
/// selector cascade missed is simply `None` and is omitted when serialized.
/// [`crate::normalize`] turns this into a [`ProductRecord`] or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    /// Unix timestamp of the scrape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraped_at: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alcohol_content: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasting_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_pairing: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_urls: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_data: Option<PriceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_data: Option<StockData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Normalized product record: fixed schema, required fields guaranteed
/// present, defaults filled, numeric ranges repaired.
///
/// Optional fields that normalization cleared (e.g. an untrustworthy rating)
/// serialize as explicit `null`, never as an omitted key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: String,
    pub name: String,
    pub product_url: String,
    pub scraped_at: i64,

    pub category: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,

    pub volume: Option<String>,
    pub alcohol_content: Option<f64>,
    pub country: Option<String>,
    pub year: Option<String>,

    pub description: Option<String>,
    pub tasting_notes: Option<String>,
    pub food_pairing: Option<String>,

    pub price: Option<f64>,
    pub original_price: Option<f64>,
    pub discount_percentage: Option<i64>,
    pub currency: String,

    /// Star rating in [0, 5]; cleared when the page carried garbage.
    pub rating: Option<f64>,
    pub review_count: i64,

    pub in_stock: bool,
    pub stock_quantity: i64,
    pub availability_status: Option<String>,

    pub image_url: Option<String>,
    pub image_urls: Vec<String>,
    pub tags: Vec<String>,
    pub marketing_tags: Vec<String>,
    pub attributes: BTreeMap<String, Value>,

    pub price_data: Option<PriceData>,
    pub stock_data: Option<StockData>,
    pub assets: Option<Assets>,

    pub region: String,
    pub source: String,

    pub is_valid: bool,
    pub validation_errors: Vec<String>,
    pub scraper_notes: String,
}

/// Validation verdict for a candidate record: the aggregated names of the
/// required fields it was missing. Terminal for that record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record rejected: missing required fields: {}", .missing.join(", "))]
pub struct Rejected {
    pub missing: Vec<String>,
}
