//! Filter panel state: draft selections over two facet sections
//!
//! The panel presents brands and categories as an exclusive accordion
//! (opening one section collapses the other) with checkbox multi-select.
//! Selections made here are drafts: they drive the cross-filtered facet
//! fetches while the panel is open, but nothing reaches the product query
//! until "Apply" publishes both sets at once. Dismissing the panel any
//! other way discards the drafts.

use crate::api::FacetOption;
use crate::facets::{FacetDimension, FacetState, FilterContext};
use std::collections::BTreeSet;

/// The combined selection published by "Apply"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedFilters {
    pub brands: BTreeSet<i64>,
    pub categories: BTreeSet<i64>,
}

/// State of the filter panel
#[derive(Debug, Clone)]
pub struct FilterPanel {
    /// Brand facet accumulation
    pub brands: FacetState,
    /// Category facet accumulation
    pub categories: FacetState,
    /// Draft brand ids, seeded from the committed selection on open
    pub draft_brands: BTreeSet<i64>,
    /// Draft category ids, seeded from the committed selection on open
    pub draft_categories: BTreeSet<i64>,
    /// Currently expanded section; `None` when both are collapsed
    pub open_section: Option<FacetDimension>,
    /// Cursor row within the expanded section's option list
    pub cursor: usize,
}

impl FilterPanel {
    #[must_use]
    pub fn new() -> Self {
        Self {
            brands: FacetState::new(FacetDimension::Brand),
            categories: FacetState::new(FacetDimension::Category),
            draft_brands: BTreeSet::new(),
            draft_categories: BTreeSet::new(),
            open_section: Some(FacetDimension::Brand),
            cursor: 0,
        }
    }

    /// Reset the panel for opening: seed drafts from the committed
    /// selections, drop accumulated options, expand the brand section
    pub fn open_with(&mut self, brands: &BTreeSet<i64>, categories: &BTreeSet<i64>) {
        self.draft_brands = brands.clone();
        self.draft_categories = categories.clone();
        self.brands.reset();
        self.categories.reset();
        self.open_section = Some(FacetDimension::Brand);
        self.cursor = 0;
    }

    /// Expand a section, collapsing the other; expanding the already-open
    /// section collapses it
    pub fn toggle_section(&mut self, dimension: FacetDimension) {
        self.open_section = if self.open_section == Some(dimension) {
            None
        } else {
            Some(dimension)
        };
        self.cursor = 0;
    }

    /// Facet accumulation state for a dimension
    #[must_use]
    pub const fn facet(&self, dimension: FacetDimension) -> &FacetState {
        match dimension {
            FacetDimension::Brand => &self.brands,
            FacetDimension::Category => &self.categories,
        }
    }

    /// Mutable facet accumulation state for a dimension
    pub const fn facet_mut(&mut self, dimension: FacetDimension) -> &mut FacetState {
        match dimension {
            FacetDimension::Brand => &mut self.brands,
            FacetDimension::Category => &mut self.categories,
        }
    }

    /// Draft selections for a dimension
    #[must_use]
    pub const fn drafts(&self, dimension: FacetDimension) -> &BTreeSet<i64> {
        match dimension {
            FacetDimension::Brand => &self.draft_brands,
            FacetDimension::Category => &self.draft_categories,
        }
    }

    /// Whether an option is currently selected in its dimension's draft
    #[must_use]
    pub fn is_selected(&self, dimension: FacetDimension, option: &FacetOption) -> bool {
        option
            .id
            .is_some_and(|id| self.drafts(dimension).contains(&id))
    }

    /// Whether an option may be toggled
    ///
    /// An option with a zero count is disabled unless it is already
    /// selected: deselection must always remain possible, even when the
    /// cross-filtered count has dropped to zero. Options without an id
    /// cannot enter a selection set at all.
    #[must_use]
    pub fn can_toggle(&self, dimension: FacetDimension, option: &FacetOption) -> bool {
        if option.id.is_none() {
            return false;
        }
        option.count > 0 || self.is_selected(dimension, option)
    }

    /// Toggle an option in its dimension's draft set
    ///
    /// Returns `true` when the draft changed (the caller re-triggers both
    /// facet fetches on any draft change).
    pub fn toggle_option(&mut self, dimension: FacetDimension, option: &FacetOption) -> bool {
        if !self.can_toggle(dimension, option) {
            return false;
        }
        let Some(id) = option.id else {
            return false;
        };

        let drafts = match dimension {
            FacetDimension::Brand => &mut self.draft_brands,
            FacetDimension::Category => &mut self.draft_categories,
        };
        if !drafts.insert(id) {
            drafts.remove(&id);
        }
        true
    }

    /// Empty both draft sets without closing the panel
    ///
    /// Returns `true` when anything was cleared.
    pub fn clear_drafts(&mut self) -> bool {
        let had_any = !self.draft_brands.is_empty() || !self.draft_categories.is_empty();
        self.draft_brands.clear();
        self.draft_categories.clear();
        had_any
    }

    /// The combined selection "Apply" publishes
    #[must_use]
    pub fn applied(&self) -> AppliedFilters {
        AppliedFilters {
            brands: self.draft_brands.clone(),
            categories: self.draft_categories.clone(),
        }
    }

    /// Total number of drafted selections across both dimensions
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.draft_brands.len() + self.draft_categories.len()
    }

    /// Snapshot of search text and both drafts for the facet fetches
    #[must_use]
    pub fn context(&self, search: &str) -> FilterContext {
        FilterContext {
            search: search.to_string(),
            brands: self.draft_brands.clone(),
            categories: self.draft_categories.clone(),
        }
    }

    /// Number of cursor rows in the expanded section: one per option,
    /// plus a trailing "load more" row when further pages exist
    #[must_use]
    pub fn cursor_rows(&self) -> usize {
        self.open_section.map_or(0, |dimension| {
            let facet = self.facet(dimension);
            facet.options.len() + usize::from(facet.has_more())
        })
    }

    /// Whether the cursor sits on the trailing "load more" row
    #[must_use]
    pub fn cursor_on_load_more(&self) -> bool {
        self.open_section.is_some_and(|dimension| {
            let facet = self.facet(dimension);
            facet.has_more() && self.cursor == facet.options.len()
        })
    }

    /// Option under the cursor, if the cursor is on an option row
    #[must_use]
    pub fn option_under_cursor(&self) -> Option<(FacetDimension, FacetOption)> {
        let dimension = self.open_section?;
        let option = self.facet(dimension).options.get(self.cursor)?;
        Some((dimension, option.clone()))
    }

    /// Move the cursor up one row
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor down one row, clamped to the row count
    pub fn cursor_down(&mut self) {
        let rows = self.cursor_rows();
        if rows > 0 && self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    /// Clamp the cursor after the option list changed
    pub fn clamp_cursor(&mut self) {
        let rows = self.cursor_rows();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self::new()
    }
}
