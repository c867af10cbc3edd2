//! Variant Detector
//!
//! Counts the purchasable options (bottle volumes, colors) a product page
//! exposes. Labels come from several structural sources and pass through a
//! plausibility filter that throws out apparel sizing and placeholder
//! labels, since storefront templates shared with clothing shops leak those
//! into otherwise volume-shaped selectors.

mod tests;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::page::{element_text, ProductPage};
use crate::selectors::JSON_SCRIPT_SELECTOR;
use crate::tools::extract::{cascade_all, Source};
use crate::{dedupe, merge};

const VOLUME_OPTIONS: &[Source] = &[
    Source::Text(".volume-selector option"),
    Source::Text("select[name*='volume'] option"),
    Source::Text("select[class*='volume'] option"),
];

const VOLUME_BUTTONS: &[Source] = &[
    Source::Text(".volume-btn"),
    Source::Text("[class*='volume'][class*='btn']"),
    Source::Text(".size-button[data-volume]"),
];

const COLOR_OPTIONS: &[Source] = &[
    Source::Text(".color-selector option"),
    Source::Text("select[name*='color'] option"),
    Source::Text("select[class*='color'] option"),
];

const COLOR_BUTTONS: &[Source] = &[
    Source::Text(".color-btn"),
    Source::Text("[class*='color'][class*='btn']"),
    Source::Text("[data-color]"),
];

/// Labels that mean the page is selling clothes, not drinks.
const EXCLUDED_KEYWORDS: &[&str] = &[
    "размер", "size", "одежда", "clothing", "shirt", "pants", "dress",
    "обувь", "shoe", "носок", "sock",
    "width", "длина", "height", "высота",
    "material", "материал", "ткань", "fabric",
    "large", "small", "medium", "extra",
];

const PLACEHOLDER_LABELS: &[&str] = &["select", "выбрать", "choose", "выбор"];

static SIZE_TOKEN_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^\s*(xs|s|m|l|xl|xxl)\s*$",
        r"^size\s+(xs|s|m|l|xl|xxl)",
        r"^(xs|s|m|l|xl|xxl)\s*size",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Whether a candidate label plausibly names a purchasable variant.
///
/// Rejects empty and overlong labels, apparel/sizing vocabulary (bilingual),
/// standalone clothing-size tokens and generic placeholder labels.
pub fn is_plausible_variant(label: &str) -> bool {
    let normalized = label.trim().to_lowercase();

    if normalized.is_empty() || normalized.chars().count() > 100 {
        return false;
    }
    if EXCLUDED_KEYWORDS.iter().any(|kw| normalized.contains(kw)) {
        return false;
    }
    if SIZE_TOKEN_REGEXES.iter().any(|re| re.is_match(&normalized)) {
        return false;
    }
    if PLACEHOLDER_LABELS.contains(&normalized.as_str()) {
        return false;
    }
    true
}

/// Count the validated variants a product exposes.
///
/// An embedded variants/options JSON block, when present and parseable,
/// short-circuits markup detection entirely: its validated count is the
/// answer. Otherwise volume and color labels are collected from the markup,
/// deduplicated case-insensitively (first-seen casing kept) and validated.
pub fn detect_variants(page: &ProductPage) -> usize {
    let json_count = variants_from_json(page);
    if json_count > 0 {
        return json_count;
    }

    let labels = merge!(volume_variants(page), color_variants(page));
    dedupe!(labels, |l: &String| l.trim().to_lowercase())
        .iter()
        .filter(|l| is_plausible_variant(l))
        .count()
}

fn volume_variants(page: &ProductPage) -> Vec<String> {
    let labels = merge!(
        cascade_all(page, VOLUME_OPTIONS),
        cascade_all(page, VOLUME_BUTTONS),
    );
    let valid: Vec<String> = labels
        .into_iter()
        .filter(|l| is_plausible_variant(l))
        .collect();
    dedupe!(valid, |l: &String| l.trim().to_lowercase())
}

fn color_variants(page: &ProductPage) -> Vec<String> {
    let mut labels = Vec::new();

    // Option lists are only trusted as colors in a color-bearing context:
    // the URL mentions colors or the label itself does.
    let color_context = page.url().as_str().to_lowercase().contains("color");
    for label in cascade_all(page, COLOR_OPTIONS) {
        if (color_context || label.to_lowercase().contains("цвет")) && is_plausible_variant(&label)
        {
            labels.push(label);
        }
    }

    for label in cascade_all(page, COLOR_BUTTONS) {
        if is_plausible_variant(&label) {
            labels.push(label);
        }
    }

    if let Some(json) = page.first_attr("[data-available-colors]", "data-available-colors") {
        if let Ok(Value::Array(colors)) = serde_json::from_str(&json) {
            for color in colors {
                if let Value::String(color) = color {
                    if is_plausible_variant(&color) {
                        labels.push(color);
                    }
                }
            }
        }
    }

    dedupe!(labels, |l: &String| l.trim().to_lowercase())
}

/// Validated variant count from an embedded JSON block, 0 when there is none
/// or it does not parse.
fn variants_from_json(page: &ProductPage) -> usize {
    let payload = page
        .first_attr("[data-variants]", "data-variants")
        .or_else(|| {
            page.select_static(&JSON_SCRIPT_SELECTOR)
                .into_iter()
                .map(|el| element_text(&el))
                .find(|t| t.contains("variants"))
        });

    let Some(payload) = payload else { return 0 };
    let Ok(data) = serde_json::from_str::<Value>(&payload) else {
        return 0;
    };

    match &data {
        Value::Object(obj) => match (obj.get("variants"), obj.get("options")) {
            (Some(Value::Array(variants)), _) => count_valid(variants),
            (_, Some(Value::Array(options))) => count_valid(options),
            _ => 0,
        },
        Value::Array(items) => count_valid(items),
        _ => 0,
    }
}

fn count_valid(items: &[Value]) -> usize {
    items
        .iter()
        .filter(|item| {
            let label = match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            is_plausible_variant(&label)
        })
        .count()
}
