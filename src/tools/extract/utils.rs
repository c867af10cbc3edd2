use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;
use serde_json::Value;

use super::types::*;
use crate::page::{element_text, sel, ProductPage};
use crate::selectors::{JSONLD_SELECTOR, JSON_SCRIPT_SELECTOR};
use crate::tools::parse::{calculate_discount, parse_price};
use crate::types::{Assets, PriceData, StockData, DEFAULT_CURRENCY};
use crate::{dedupe, merge};

static STOCK_COUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*шт").expect("valid regex"));

/// Evaluate a cascade, returning the first strategy's non-empty result.
pub(crate) fn cascade_first(page: &ProductPage, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| match source {
        Source::Text(css) => page.first_text(css),
        Source::Attr(css, attr) => page.first_attr(css, attr),
    })
}

/// Evaluate a cascade for list-valued fields: the first strategy that
/// matches anything supplies the whole list, later strategies are skipped.
pub(crate) fn cascade_all(page: &ProductPage, sources: &[Source]) -> Vec<String> {
    for source in sources {
        let values = match source {
            Source::Text(css) => page.all_texts(css),
            Source::Attr(css, attr) => page.all_attrs(css, attr),
        };
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

fn child_text(el: &ElementRef, css: &str) -> Option<String> {
    let s = sel(css)?;
    el.select(&s)
        .map(|e| element_text(&e))
        .find(|t| !t.is_empty())
}

fn child_texts(el: &ElementRef, css: &str) -> Vec<String> {
    match sel(css) {
        Some(s) => el
            .select(&s)
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

pub(super) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Stringify a loose JSON value the way a characteristics table would show it.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Product id: explicit markup first, then a numeric URL segment, then the
/// last path segment as an opaque slug.
pub(super) fn extract_product_id(page: &ProductPage) -> String {
    if let Some(id) = cascade_first(page, PRODUCT_ID) {
        return id;
    }

    let url = page.url();
    let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
    if let Some(numeric) = segments
        .iter()
        .rev()
        .find(|s| s.chars().all(|c| c.is_ascii_digit()))
    {
        return (*numeric).to_string();
    }

    segments
        .last()
        .map(|s| (*s).to_string())
        .unwrap_or_else(|| url.to_string())
}

/// Volume string, with a free-text fallback for pages that only mention it
/// inside a span ("0,7 л", "750 мл").
pub(super) fn extract_volume(page: &ProductPage) -> Option<String> {
    cascade_first(page, VOLUME).or_else(|| page.first_text_containing("span", &["мл", "л"]))
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// Current/original price pair. A missing original means the product is not
/// on sale, so the original collapses onto the current price and the sale tag
/// stays empty.
pub(super) fn extract_price_data(page: &ProductPage) -> Option<PriceData> {
    let current = cascade_first(page, CURRENT_PRICE).and_then(|t| parse_price(&t))?;
    let original = cascade_first(page, ORIGINAL_PRICE)
        .and_then(|t| parse_price(&t))
        .unwrap_or(current);

    let discount = calculate_discount(original, current);
    let sale_tag = discount.filter(|d| *d > 0).map(|d| format!("Скидка {d}%"));

    Some(PriceData {
        current: Some(current),
        original: Some(original),
        sale_tag,
        currency: DEFAULT_CURRENCY.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

/// Tri-state availability: a purchase button or explicit stock text decides,
/// pre-order and everything ambiguous stays unknown.
pub(super) fn check_in_stock(page: &ProductPage) -> Option<bool> {
    if page.exists("button.buy-btn, button[data-action='add-to-cart']") {
        return Some(true);
    }
    if let Some(text) = page.first_text(".in-stock, .availability-in-stock") {
        if text.to_lowercase().contains("в наличии") {
            return Some(true);
        }
    }
    if let Some(text) = page.first_text(".out-of-stock, .availability-out") {
        if text.to_lowercase().contains("нет") {
            return Some(false);
        }
    }
    None
}

pub(super) fn extract_stock_count(page: &ProductPage) -> Option<i64> {
    let text = page.full_text();
    if let Some(caps) = STOCK_COUNT_REGEX.captures(&text) {
        if let Ok(count) = caps[1].parse() {
            return Some(count);
        }
    }
    page.first_attr("[data-stock-count]", "data-stock-count")
        .and_then(|v| v.parse().ok())
}

pub(super) fn extract_stock_status(page: &ProductPage) -> Option<String> {
    if let Some(status) = cascade_first(page, STOCK_STATUS) {
        return Some(status);
    }
    if page.exists(".preorder") || page.exists("[data-preorder]") {
        return Some("Предзаказ".to_string());
    }
    if page.exists(".on-order") {
        return Some("Под заказ".to_string());
    }
    if page.exists(".out-of-stock") {
        return Some("Нет в наличии".to_string());
    }
    if page.exists(".in-stock") {
        return Some("В наличии".to_string());
    }
    None
}

/// Nested stock block, emitted only when the page said something about
/// availability at all.
pub(super) fn extract_stock_data(page: &ProductPage) -> Option<StockData> {
    let in_stock = check_in_stock(page);
    let count = extract_stock_count(page);
    let status = extract_stock_status(page);

    if in_stock.is_none() && status.is_none() {
        return None;
    }

    Some(StockData {
        in_stock,
        count,
        status,
        available_regions: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Characteristics
// ---------------------------------------------------------------------------

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    if let Some(slot) = pairs.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        pairs.push((key, value));
    }
}

fn table_characteristics(page: &ProductPage) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for row in page.select_all("table.characteristics tr, table.specs tr, table[class*='char'] tr")
    {
        let mut key = child_text(&row, ".char-name, .spec-name, td:first-child");
        let mut value = child_text(&row, ".char-value, .spec-value, td:last-child");

        if key.is_none() {
            let cells = child_texts(&row, "td");
            if cells.len() >= 2 {
                key = cells.first().cloned();
                value = cells.last().cloned();
            }
        }

        if let (Some(k), Some(v)) = (key, value) {
            upsert(&mut pairs, k, v);
        }
    }
    pairs
}

fn list_characteristics(page: &ProductPage) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for item in page.select_all(".specs-list, .characteristics-list, [class*='specs']") {
        let key = child_text(&item, "dt, .spec-label, .label");
        let value = child_text(&item, "dd, .spec-value, .value");
        if let (Some(k), Some(v)) = (key, value) {
            upsert(&mut pairs, k, v);
        }
    }
    pairs
}

fn div_characteristics(page: &ProductPage) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for div in page.select_all("[class*='specification'], [class*='feature'], [class*='attribute']")
    {
        let key = child_text(&div, "[class*='key'], [class*='name'], [class*='label']");
        let value = child_text(&div, "[class*='value'], [class*='content']");
        if let (Some(k), Some(v)) = (key, value) {
            upsert(&mut pairs, k, v);
        }
    }
    pairs
}

/// Characteristic pairs from embedded JSON-LD blocks: `additionalProperty`
/// name/value entries plus short top-level string values. A block that fails
/// to parse contributes nothing.
fn jsonld_characteristics(page: &ProductPage) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for script in page.select_static(&JSONLD_SELECTOR) {
        let raw = element_text(&script);
        let Ok(Value::Object(data)) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };

        if let Some(Value::Array(props)) = data.get("additionalProperty") {
            for prop in props {
                if let Value::Object(prop) = prop {
                    let name = prop.get("name").map(value_to_string).unwrap_or_default();
                    let value = prop.get("value").map(value_to_string).unwrap_or_default();
                    if !name.is_empty() && !value.is_empty() {
                        upsert(&mut pairs, name, value);
                    }
                }
            }
        }

        for (key, value) in &data {
            if matches!(
                key.as_str(),
                "@context" | "@type" | "url" | "image" | "name" | "description"
            ) {
                continue;
            }
            if let Value::String(s) = value {
                if s.len() < 200 {
                    upsert(&mut pairs, key.clone(), s.clone());
                }
            }
        }
    }
    pairs
}

/// Key-value characteristics from four structural sources. Table rows,
/// definition lists and attribute divs are strict alternatives (first
/// non-empty source wins); the JSON-LD source is always merged in afterwards
/// but only contributes novel keys; it never overwrites a value an earlier
/// source produced.
pub(super) fn extract_characteristics(page: &ProductPage) -> Vec<(String, String)> {
    let mut pairs = table_characteristics(page);
    if pairs.is_empty() {
        pairs = list_characteristics(page);
    }
    if pairs.is_empty() {
        pairs = div_characteristics(page);
    }

    for (key, value) in jsonld_characteristics(page) {
        if !pairs.iter().any(|(k, _)| *k == key) {
            pairs.push((key, value));
        }
    }
    pairs
}

// ---------------------------------------------------------------------------
// Media assets
// ---------------------------------------------------------------------------

/// Gallery image URLs from embedded plain-JSON scripts, the fallback for
/// templates that render the carousel client-side.
fn images_from_embedded_json(page: &ProductPage) -> Vec<String> {
    let mut images = Vec::new();
    for script in page.select_static(&JSON_SCRIPT_SELECTOR) {
        let raw = element_text(&script);
        let lower = raw.to_lowercase();
        if !lower.contains("image") && !lower.contains("src") {
            continue;
        }
        let Ok(Value::Object(data)) = serde_json::from_str::<Value>(&raw) else {
            continue;
        };
        for (key, value) in &data {
            let key = key.to_lowercase();
            match value {
                Value::String(s) if key.contains("image") || key.contains("src") => {
                    images.push(s.clone());
                }
                Value::Array(items) => {
                    for item in items {
                        if let Value::Object(item) = item {
                            for (k, v) in item {
                                let k = k.to_lowercase();
                                if (k.contains("image") || k.contains("src")) && v.is_string() {
                                    images.push(v.as_str().unwrap_or_default().to_string());
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    images
}

fn extract_gallery(page: &ProductPage) -> Vec<String> {
    let mut urls = cascade_all(page, GALLERY);
    if urls.is_empty() {
        urls = images_from_embedded_json(page);
    }
    let normalized: Vec<String> = urls.iter().filter_map(|u| page.urljoin(u)).collect();
    let mut unique = dedupe!(normalized);
    unique.sort();
    unique
}

fn extract_view_360(page: &ProductPage) -> Vec<String> {
    let normalized: Vec<String> = cascade_all(page, VIEW_360)
        .iter()
        .filter_map(|u| page.urljoin(u))
        .collect();
    let mut unique = dedupe!(normalized);
    unique.sort();
    unique
}

/// Video URLs keep their document order; unlike image galleries there is no
/// stable sort key worth imposing.
fn extract_videos(page: &ProductPage) -> Vec<String> {
    let urls: Vec<String> = merge!(
        page.all_attrs("video source", "src"),
        page.all_attrs("iframe[src*='youtube']", "src"),
        page.all_attrs("iframe[src*='vimeo']", "src"),
        page.all_attrs("video", "src"),
    )
    .iter()
    .filter_map(|u| page.urljoin(u))
    .collect();
    dedupe!(urls)
}

pub(super) fn extract_assets(page: &ProductPage) -> Option<Assets> {
    let main_image = cascade_first(page, MAIN_IMAGE).and_then(|u| page.urljoin(&u));
    let gallery_images = extract_gallery(page);
    let view_360 = extract_view_360(page);
    let video = extract_videos(page);

    if main_image.is_none() && gallery_images.is_empty() && video.is_empty() {
        return None;
    }

    Some(Assets {
        main_image,
        gallery_images,
        view_360,
        video,
        cached_images: Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

pub(super) fn extract_description(page: &ProductPage) -> Option<String> {
    cascade_first(page, DESCRIPTION)
}

pub(super) fn extract_breadcrumbs(page: &ProductPage) -> Vec<String> {
    cascade_all(page, BREADCRUMBS)
}

/// Marketing tags: badge-like labels longer than one character.
pub(super) fn extract_marketing_tags(page: &ProductPage) -> Vec<String> {
    cascade_all(page, MARKETING_TAGS)
        .into_iter()
        .filter(|t| t.chars().count() > 1)
        .collect()
}
