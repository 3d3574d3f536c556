//! HTTP client for the remote catalog API
//!
//! Three GET endpoints, all JSON: the product listing and one facet
//! endpoint per dimension. Query-parameter construction is kept in pure
//! functions so the exact wire format is unit-testable without a server.
//!
//! The client itself carries no retry or timeout policy beyond the
//! transport's own behavior; failures are terminal for that attempt and
//! surface as an [`ApiError`] the caller degrades from.

mod error;
mod types;

pub use error::ApiError;
pub use types::{FacetOption, PageDto, Product};

use crate::facets::{FacetDimension, FilterContext};
use crate::query::QueryState;
use serde::de::DeserializeOwned;

/// Client for the catalog endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client against the given base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of the product listing
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, a non-success status, or
    /// an undecodable body.
    pub async fn fetch_products(
        &self,
        query: &QueryState,
        size: u32,
    ) -> Result<PageDto<Product>, ApiError> {
        let url = format!("{}/product", self.base_url);
        self.get_json(&url, &product_params(query, size)).await
    }

    /// Fetch one page of facet options for a dimension
    ///
    /// The request carries the context's search text and the *other*
    /// dimension's selections, so the returned counts are cross-filtered.
    ///
    /// # Errors
    /// Returns `ApiError` on transport failure, a non-success status, or
    /// an undecodable body.
    pub async fn fetch_facet_page(
        &self,
        dimension: FacetDimension,
        context: &FilterContext,
        page: u32,
        size: u32,
    ) -> Result<PageDto<FacetOption>, ApiError> {
        let url = format!("{}{}", self.base_url, dimension.endpoint());
        self.get_json(&url, &facet_params(dimension, context, page, size))
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self.http.get(url).query(params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

/// Build the query parameters for a product listing fetch
///
/// `page` and `size` are always present; a trimmed-empty search is
/// omitted; each selected id becomes a repeated parameter.
#[must_use]
pub fn product_params(query: &QueryState, size: u32) -> Vec<(String, String)> {
    let mut params = vec![
        ("page".to_string(), query.page.to_string()),
        ("size".to_string(), size.to_string()),
    ];

    let trimmed = query.search.trim();
    if !trimmed.is_empty() {
        params.push(("search".to_string(), trimmed.to_string()));
    }

    for brand in &query.brands {
        params.push(("brands".to_string(), brand.to_string()));
    }
    for category in &query.categories {
        params.push(("categories".to_string(), category.to_string()));
    }

    params
}

/// Build the query parameters for a facet page fetch
#[must_use]
pub fn facet_params(
    dimension: FacetDimension,
    context: &FilterContext,
    page: u32,
    size: u32,
) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(search) = context.trimmed_search() {
        params.push(("search".to_string(), search.to_string()));
    }

    for brand in &context.brands {
        params.push(("brands".to_string(), brand.to_string()));
    }
    for category in &context.categories {
        params.push(("categories".to_string(), category.to_string()));
    }

    params.push((dimension.page_param().to_string(), page.to_string()));
    params.push((dimension.size_param().to_string(), size.to_string()));

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_product_params_full_query() {
        let query = QueryState {
            search: "lamp".to_string(),
            page: 2,
            brands: BTreeSet::from([5, 9]),
            categories: BTreeSet::new(),
        };

        assert_eq!(
            pairs(&product_params(&query, 12)),
            vec![
                ("page", "2"),
                ("size", "12"),
                ("search", "lamp"),
                ("brands", "5"),
                ("brands", "9"),
            ]
        );
    }

    #[test]
    fn test_product_params_omit_blank_search() {
        let query = QueryState {
            search: "   ".to_string(),
            ..QueryState::default()
        };

        assert_eq!(
            pairs(&product_params(&query, 12)),
            vec![("page", "0"), ("size", "12")]
        );
    }

    #[test]
    fn test_facet_params_carry_both_selection_sets() {
        let context = FilterContext {
            search: " lamp ".to_string(),
            brands: BTreeSet::from([5]),
            categories: BTreeSet::from([2, 4]),
        };

        assert_eq!(
            pairs(&facet_params(FacetDimension::Brand, &context, 1, 10)),
            vec![
                ("search", "lamp"),
                ("brands", "5"),
                ("categories", "2"),
                ("categories", "4"),
                ("pageBrand", "1"),
                ("sizeBrand", "10"),
            ]
        );
    }

    #[test]
    fn test_facet_params_use_dimension_paging_keys() {
        let context = FilterContext::default();
        let params = facet_params(FacetDimension::Category, &context, 0, 10);

        assert_eq!(
            pairs(&params),
            vec![("pageCategory", "0"), ("sizeCategory", "10")]
        );
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new("http://shop.example/");
        assert_eq!(client.base_url(), "http://shop.example");
    }
}
