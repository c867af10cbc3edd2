//! Shared Macros

/// Merge multiple vectors into one.
#[macro_export]
macro_rules! merge {
    ($($vec:expr),+ $(,)?) => {{
        let mut result = Vec::new();
        $(result.extend($vec);)+
        result
    }};
}

/// Deduplicate a collection while preserving first-occurrence order.
#[macro_export]
macro_rules! dedupe {
    ($list:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            if seen.insert(item.clone()) {
                result.push(item);
            }
        }
        result
    }};
    // Dedupe on a derived key, keeping the original item (e.g. case-insensitive
    // identity that preserves first-seen casing).
    ($list:expr, $key:expr) => {{
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for item in $list {
            let key = $key(&item);
            if seen.insert(key) {
                result.push(item);
            }
        }
        result
    }};
}
