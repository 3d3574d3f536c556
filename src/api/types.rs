//! Wire types for the catalog API
//!
//! All response DTOs deserialize defensively: every field carries a
//! default so a missing field becomes an empty list or zero count instead
//! of a decode failure. The server's JSON uses camelCase keys.

use serde::{Deserialize, Serialize};

/// A server-paginated slice of a result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    /// Items on this page, in server order
    #[serde(default)]
    pub content: Vec<T>,
    /// Total matching items across all pages
    #[serde(default)]
    pub total_elements: u64,
    /// Total page count
    #[serde(default)]
    pub total_pages: u32,
    /// 0-based index of this page
    #[serde(default)]
    pub page_number: u32,
}

impl<T> Default for PageDto<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            page_number: 0,
        }
    }
}

/// One product as returned by the listing endpoint
///
/// Immutable on the client; replaced wholesale with each page fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    /// Image URL, when the product has one
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    /// Category names in server order; the first is the display category
    #[serde(default)]
    pub categories_names: Vec<String>,
}

impl Product {
    /// The category shown on the product card, if any
    #[must_use]
    pub fn display_category(&self) -> Option<&str> {
        self.categories_names.first().map(String::as_str)
    }
}

/// One selectable option of a facet dimension
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FacetOption {
    /// Stable id; uniqueness falls back to `value` when absent
    #[serde(default)]
    pub id: Option<i64>,
    /// Display label
    #[serde(default)]
    pub value: String,
    /// Result count if this option were additionally selected
    #[serde(default)]
    pub count: u64,
}

impl FacetOption {
    /// Uniqueness key: the id when present, the label otherwise
    #[must_use]
    pub fn key(&self) -> String {
        self.id
            .map_or_else(|| self.value.clone(), |id| id.to_string())
    }
}
