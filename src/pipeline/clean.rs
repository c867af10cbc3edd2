use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

use crate::dedupe;
use crate::tools::parse::clean_title;
use crate::types::ProductRecord;

/// Stage 3, the final scrub. Never rejects: out-of-range values are
/// repaired or cleared, never dropped with the record.
pub fn clean(mut record: ProductRecord) -> ProductRecord {
    record.name = clean_title(&record.name);
    record.brand = record.brand.map(|s| clean_title(&s));
    record.category = record.category.map(|s| clean_title(&s));
    // Free-text fields: line breaks collapse into the whitespace pass.
    record.description = record.description.map(|s| clean_title(&s));
    record.tasting_notes = record.tasting_notes.map(|s| clean_title(&s));
    record.food_pairing = record.food_pairing.map(|s| clean_title(&s));

    record.marketing_tags = clean_tags(record.marketing_tags);
    record.tags = clean_tags(record.tags);
    record.attributes = clean_attributes(record.attributes);

    record.image_urls = dedupe!(record.image_urls);
    if let Some(assets) = record.assets.as_mut() {
        assets.gallery_images = dedupe!(std::mem::take(&mut assets.gallery_images));
        assets.view_360 = dedupe!(std::mem::take(&mut assets.view_360));
        assets.video = dedupe!(std::mem::take(&mut assets.video));
        assets.cached_images = dedupe!(std::mem::take(&mut assets.cached_images));
    }

    if let Some(price) = record.price {
        if price < 0.0 {
            warn!(price, "negative price set to 0");
            record.price = Some(0.0);
        }
    }
    if let Some(original) = record.original_price {
        if original < 0.0 {
            warn!(original_price = original, "negative original price set to 0");
            record.original_price = Some(0.0);
        }
    }
    if let Some(rating) = record.rating {
        if !(0.0..=5.0).contains(&rating) {
            // An impossible rating is untrustworthy, not miscoded: clear it
            // instead of clamping.
            warn!(rating, "rating out of range, cleared");
            record.rating = None;
        }
    }
    if let Some(discount) = record.discount_percentage {
        if !(0..=100).contains(&discount) {
            warn!(discount, "discount percentage out of range, set to 0");
            record.discount_percentage = Some(0);
        }
    }

    record
}

/// Tag-like lists: trimmed, falsy-dropped, deduplicated on the exact trimmed
/// value and alphabetically sorted.
fn clean_tags(tags: Vec<String>) -> Vec<String> {
    let trimmed: Vec<String> = tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let mut unique = dedupe!(trimmed);
    unique.sort();
    unique
}

fn clean_attributes(attributes: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    let mut cleaned = BTreeMap::new();
    for (key, value) in attributes {
        if key.is_empty() || value.is_null() {
            continue;
        }
        let value = match value {
            Value::String(s) => Value::String(clean_title(&s)),
            Value::Array(items) => {
                Value::Array(items.into_iter().filter(|v| !is_falsy(v)).collect())
            }
            other => other,
        };
        cleaned.insert(key, value);
    }
    cleaned
}

/// Loose-value emptiness, for scrubbing nested attribute lists.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
