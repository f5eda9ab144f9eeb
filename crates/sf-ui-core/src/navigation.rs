//! Query-string driven listing state.
//!
//! Filters, search, sorting and paging live in the address bar. Every change
//! rewrites the current URL and reloads the page at it; nothing is updated
//! in place.

use sf_api_types::FilterKey;
use tracing::{debug, info};
use url::Url;

use crate::error::NavigationError;
use crate::{Dom, Storefront};

/// Apply `updates` to the query of `href`.
///
/// A non-empty value replaces the key (keeping its position, like
/// `URLSearchParams.set`), an empty or missing value deletes it. Unrelated
/// parameters are kept. The `?` is dropped once no parameter is left.
pub fn with_params(
    href: &str,
    updates: &[(FilterKey, Option<&str>)],
) -> Result<String, NavigationError> {
    let mut url = Url::parse(href).map_err(|source| NavigationError::InvalidUrl {
        href: href.to_owned(),
        source,
    })?;
    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    for (key, value) in updates {
        let key = key.as_str();
        match value.filter(|v| !v.is_empty()) {
            Some(value) => set_pair(&mut pairs, key, value),
            None => pairs.retain(|(k, _)| k != key),
        }
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(&pairs);
    }
    Ok(url.to_string())
}

fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_owned();
            let mut idx = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || idx == first;
                idx += 1;
                keep
            });
        }
        None => pairs.push((key.to_owned(), value.to_owned())),
    }
}

impl<D: Dom> Storefront<D> {
    fn navigate_with(&self, updates: &[(FilterKey, Option<&str>)]) -> Result<String, NavigationError> {
        let href = with_params(&self.dom.location_href(), updates)?;
        info!(%href, "navigating");
        self.dom.navigate(&href);
        Ok(href)
    }

    fn field_value(&self, id: &str) -> String {
        self.dom
            .by_id(id)
            .map(|el| self.dom.value(&el))
            .unwrap_or_default()
    }

    /// Set (or clear, with an empty value) one parameter and reload.
    pub fn set_filter(&self, key: FilterKey, value: &str) -> Result<String, NavigationError> {
        self.navigate_with(&[(key, Some(value))])
    }

    pub fn search_products(&self, query: &str) -> Result<String, NavigationError> {
        self.set_filter(FilterKey::Search, query)
    }

    pub fn go_to_page(&self, page: u32) -> Result<String, NavigationError> {
        self.set_filter(FilterKey::Page, &page.to_string())
    }

    pub fn sort_products(&self, sort_by: &str) -> Result<String, NavigationError> {
        self.set_filter(FilterKey::Sort, sort_by)
    }

    /// Change handler of the category select.
    pub fn on_category_change(&self) -> Result<String, NavigationError> {
        let category = self.field_value(&self.config.selectors.category_id);
        self.set_filter(FilterKey::Category, &category)
    }

    /// Read category and price range inputs and apply all three in a single
    /// navigation. Inputs missing from the page count as empty.
    pub fn apply_filters(&self) -> Result<String, NavigationError> {
        let selectors = &self.config.selectors;
        let category = self.field_value(&selectors.category_id);
        let min_price = self.field_value(&selectors.min_price_id);
        let max_price = self.field_value(&selectors.max_price_id);
        self.navigate_with(&[
            (FilterKey::Category, Some(category.as_str())),
            (FilterKey::MinPrice, Some(min_price.as_str())),
            (FilterKey::MaxPrice, Some(max_price.as_str())),
        ])
    }

    /// Cart quantity change. A quantity of zero or less asks before removing
    /// the item; declining leaves the page alone. Returns the path navigated
    /// to, if any.
    pub fn update_cart_quantity(&self, item_id: u64, quantity: i64) -> Option<String> {
        let endpoints = &self.config.endpoints;
        let path = if quantity <= 0 {
            if !self.dom.confirm(&self.config.messages.confirm_remove_cart_item) {
                debug!(item_id, "cart item removal declined");
                return None;
            }
            endpoints.remove_from_cart_path(item_id)
        } else {
            endpoints.update_cart_path(item_id, quantity)
        };
        info!(item_id, quantity, %path, "updating cart");
        self.dom.navigate(&path);
        Some(path)
    }
}
