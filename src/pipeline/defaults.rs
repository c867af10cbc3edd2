use chrono::Utc;

use crate::types::{
    ProductRecord, RawProduct, DEFAULT_CURRENCY, DEFAULT_REGION, DEFAULT_SOURCE,
};

/// Stage 2: fill in everything the page did not say.
///
/// Collection fields become fresh empty containers (one per record, never a
/// shared instance), flags and counters get their zero values, currency,
/// region and source get their fixed literals, and a still-missing
/// `scraped_at` is stamped from the clock. Nested structures get their own
/// sub-default pass so every declared sub-key is present afterwards; an
/// unknown `sale_tag` stays an explicit null on the wire rather than a
/// missing key.
pub fn apply_defaults(raw: RawProduct) -> ProductRecord {
    let price_data = raw.price_data.map(|mut price_data| {
        if price_data.currency.is_empty() {
            price_data.currency = DEFAULT_CURRENCY.to_string();
        }
        price_data
    });

    let stock_data = raw.stock_data.map(|mut stock_data| {
        stock_data.in_stock.get_or_insert(false);
        stock_data.count.get_or_insert(0);
        stock_data.status.get_or_insert_with(|| "unknown".to_string());
        stock_data
    });

    // Assets carry list-valued sub-keys only; the struct shape already
    // materializes them as owned empty lists.
    let assets = raw.assets;

    let in_stock = raw
        .in_stock
        .or_else(|| stock_data.as_ref().and_then(|s| s.in_stock))
        .unwrap_or(false);

    ProductRecord {
        product_id: raw.product_id.unwrap_or_default(),
        name: raw.name.unwrap_or_default(),
        product_url: raw.product_url.unwrap_or_default(),
        scraped_at: raw.scraped_at.unwrap_or_else(|| Utc::now().timestamp()),

        category: raw.category,
        brand: raw.brand,
        sku: raw.sku,

        volume: raw.volume,
        alcohol_content: raw.alcohol_content,
        country: raw.country,
        year: raw.year,

        description: raw.description,
        tasting_notes: raw.tasting_notes,
        food_pairing: raw.food_pairing,

        price: raw.price,
        original_price: raw.original_price,
        discount_percentage: raw.discount_percentage,
        currency: raw.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),

        rating: raw.rating,
        review_count: raw.review_count.unwrap_or(0),

        in_stock,
        stock_quantity: raw.stock_quantity.unwrap_or(0),
        availability_status: raw.availability_status,

        image_url: raw.image_url,
        image_urls: raw.image_urls.unwrap_or_default(),
        tags: raw.tags.unwrap_or_default(),
        marketing_tags: raw.marketing_tags.unwrap_or_default(),
        attributes: raw.attributes.unwrap_or_default(),

        price_data,
        stock_data,
        assets,

        region: raw.region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        source: raw.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),

        is_valid: true,
        validation_errors: Vec::new(),
        scraper_notes: String::new(),
    }
}
