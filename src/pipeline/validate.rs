use tracing::warn;

use crate::types::{RawProduct, Rejected};

/// Stage 1, the integrity gate.
///
/// A record missing any required field is rejected outright, with every
/// violated field name aggregated into the verdict; nothing downstream runs
/// for it. Records that pass get two cross-field contradictions repaired in
/// place: a current price above the original is clamped down to the original
/// (nested and top-level), and a negative stock count becomes zero.
pub fn validate(mut raw: RawProduct) -> Result<RawProduct, Rejected> {
    let mut missing = Vec::new();
    if raw.product_id.as_deref().map_or(true, str::is_empty) {
        missing.push("product_id");
    }
    if raw.name.as_deref().map_or(true, str::is_empty) {
        missing.push("name");
    }
    if raw.product_url.as_deref().map_or(true, str::is_empty) {
        missing.push("product_url");
    }
    if raw.scraped_at.is_none() {
        missing.push("scraped_at");
    }
    if !missing.is_empty() {
        return Err(Rejected {
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    if let Some(price_data) = raw.price_data.as_mut() {
        if let (Some(current), Some(original)) = (price_data.current, price_data.original) {
            if current != 0.0 && original != 0.0 && current > original {
                warn!(current, original, "current price above original, corrected");
                price_data.current = Some(original);
            }
        }
    }

    if let Some(stock_data) = raw.stock_data.as_mut() {
        if let Some(count) = stock_data.count {
            if count < 0 {
                warn!(count, "negative stock count, set to 0");
                stock_data.count = Some(0);
            }
        }
    }

    if let (Some(price), Some(original)) = (raw.price, raw.original_price) {
        if price > original {
            warn!(price, original_price = original, "price above original price, corrected");
            raw.price = Some(original);
        }
    }

    Ok(raw)
}
