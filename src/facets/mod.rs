//! Facet dimensions and per-dimension option accumulation
//!
//! A facet is a filterable dimension (brand, category) with discrete
//! options and live result counts. Each dimension accumulates its options
//! independently: a fresh page-0 fetch replaces the list wholesale, a
//! "load more" fetch appends with set-union-by-id semantics.
//!
//! The two dimensions cross-filter each other: the option counts for
//! brands depend on the selected categories and vice versa. That coupling
//! is made explicit through [`FilterContext`], a read-only snapshot of the
//! search text and both draft selection sets that both dimensions receive
//! when their fetches are built.

use crate::api::{FacetOption, PageDto};
use std::collections::{BTreeSet, HashSet};

/// A filterable dimension of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetDimension {
    Brand,
    Category,
}

impl FacetDimension {
    /// API endpoint path for this dimension
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Brand => "/facets/brand",
            Self::Category => "/facets/category",
        }
    }

    /// Name of the page-index query parameter
    #[must_use]
    pub const fn page_param(self) -> &'static str {
        match self {
            Self::Brand => "pageBrand",
            Self::Category => "pageCategory",
        }
    }

    /// Name of the page-size query parameter
    #[must_use]
    pub const fn size_param(self) -> &'static str {
        match self {
            Self::Brand => "sizeBrand",
            Self::Category => "sizeCategory",
        }
    }

    /// Section title shown in the filter panel
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Brand => "Brands",
            Self::Category => "Categories",
        }
    }

    /// The opposite dimension
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Brand => Self::Category,
            Self::Category => Self::Brand,
        }
    }
}

/// Read-only filter snapshot shared by both facet fetches
///
/// Built from the committed search text and the panel's draft selections.
/// Each dimension's request carries the *other* dimension's selections so
/// its counts reflect the cross-filtered result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterContext {
    pub search: String,
    pub brands: BTreeSet<i64>,
    pub categories: BTreeSet<i64>,
}

impl FilterContext {
    /// Search text trimmed, or `None` when effectively empty
    #[must_use]
    pub fn trimmed_search(&self) -> Option<&str> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// The draft selections of the given dimension
    #[must_use]
    pub const fn selections(&self, dimension: FacetDimension) -> &BTreeSet<i64> {
        match dimension {
            FacetDimension::Brand => &self.brands,
            FacetDimension::Category => &self.categories,
        }
    }
}

/// Accumulated option state for one facet dimension
#[derive(Debug, Clone)]
pub struct FacetState {
    pub dimension: FacetDimension,
    /// Accumulated options in first-seen order
    pub options: Vec<FacetOption>,
    /// Total page count from the latest response
    pub total_pages: u32,
    /// Page index of the latest response
    pub page: u32,
    /// Whether a request for this dimension is in flight
    pub loading: bool,
}

impl FacetState {
    /// Create empty state for a dimension
    #[must_use]
    pub const fn new(dimension: FacetDimension) -> Self {
        Self {
            dimension,
            options: Vec::new(),
            total_pages: 0,
            page: 0,
            loading: false,
        }
    }

    /// Drop all accumulated options and paging metadata
    pub fn reset(&mut self) {
        self.options.clear();
        self.total_pages = 0;
        self.page = 0;
        self.loading = false;
    }

    /// Apply a fetched page: replace the list, or merge it in when
    /// appending. Paging metadata always takes the response's values.
    pub fn apply_page(&mut self, page: PageDto<FacetOption>, append: bool) {
        if append {
            merge_unique(&mut self.options, page.content);
        } else {
            self.options = page.content;
        }
        self.total_pages = page.total_pages;
        self.page = page.page_number;
    }

    /// Whether further pages exist beyond the latest one
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// The page index a "load more" request should ask for
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.page + 1
    }
}

/// Merge `incoming` into `existing` by uniqueness key
///
/// Existing options keep their positions; unseen options append in their
/// incoming order. Duplicates (same id, or same label when the id is
/// absent) are dropped, so merging the same page twice is a no-op.
pub fn merge_unique(existing: &mut Vec<FacetOption>, incoming: Vec<FacetOption>) {
    let mut seen: HashSet<String> = existing.iter().map(FacetOption::key).collect();

    for option in incoming {
        if seen.insert(option.key()) {
            existing.push(option);
        }
    }
}
