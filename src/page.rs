use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::selectors::PRODUCT_MARKUP_SELECTOR;

/// Parse a selector string, tolerating garbage: a selector that does not
/// parse matches nothing instead of failing the extraction.
pub(crate) fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Collected, trimmed text content of an element.
pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// A fetched product page: parsed document plus the base URL it was served
/// from. This is the query capability everything in `tools::extract` and
/// `tools::variants` runs against.
pub struct ProductPage {
    doc: Html,
    base: Url,
}

impl ProductPage {
    pub fn parse(html: &str, url: &str) -> Result<Self> {
        let base = Url::parse(url).map_err(|_| ScrapeError::InvalidUrl(url.to_string()))?;
        Ok(Self {
            doc: Html::parse_document(html),
            base,
        })
    }

    pub fn url(&self) -> &Url {
        &self.base
    }

    /// Whether the page carries product markup at all. Pages failing this are
    /// usually error or redirect shells and not worth extracting.
    pub fn has_product_markup(&self) -> bool {
        self.doc.select(&PRODUCT_MARKUP_SELECTOR).next().is_some()
    }

    pub(crate) fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match sel(css) {
            Some(s) => self.doc.select(&s).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn select_static<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.doc.select(selector).collect()
    }

    /// First non-empty text content matching `css`.
    pub(crate) fn first_text(&self, css: &str) -> Option<String> {
        self.select_all(css)
            .into_iter()
            .map(|el| element_text(&el))
            .find(|t| !t.is_empty())
    }

    /// All non-empty text contents matching `css`.
    pub(crate) fn all_texts(&self, css: &str) -> Vec<String> {
        self.select_all(css)
            .into_iter()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// First non-empty `attr` value on an element matching `css`.
    pub(crate) fn first_attr(&self, css: &str, attr: &str) -> Option<String> {
        self.select_all(css)
            .into_iter()
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// All non-empty `attr` values on elements matching `css`.
    pub(crate) fn all_attrs(&self, css: &str, attr: &str) -> Vec<String> {
        self.select_all(css)
            .into_iter()
            .filter_map(|el| el.value().attr(attr))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }

    pub(crate) fn exists(&self, css: &str) -> bool {
        !self.select_all(css).is_empty()
    }

    /// First element matching `css` whose text contains any of `needles`.
    /// The keyword-matching tier of a cascade, for markup with no usable
    /// classes or attributes.
    pub(crate) fn first_text_containing(&self, css: &str, needles: &[&str]) -> Option<String> {
        self.select_all(css)
            .into_iter()
            .map(|el| element_text(&el))
            .find(|t| !t.is_empty() && needles.iter().any(|n| t.contains(n)))
    }

    /// Full text content of the document, for free-text pattern searches.
    pub(crate) fn full_text(&self) -> String {
        self.doc.root_element().text().collect::<String>()
    }

    /// Resolve a possibly relative or protocol-relative reference against the
    /// page URL.
    pub(crate) fn urljoin(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return Some(href.to_string());
        }
        if let Some(rest) = href.strip_prefix("//") {
            return Some(format!("https://{rest}"));
        }
        self.base.join(href).ok().map(|u| u.to_string())
    }
}
