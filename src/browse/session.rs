//! Browse session state machine
//!
//! `BrowseSession` owns all mutable state of an interactive run. It is
//! deliberately terminal-free: the UI layer feeds it [`BrowseAction`]s,
//! calls [`BrowseSession::tick`] with the current instant, and drains
//! fetch completions with [`BrowseSession::pump`]. Everything it does is
//! therefore reproducible in tests by handing it actions and crafted
//! [`FetchMessage`]s.

use super::{BrowseAction, Mode};
use crate::api::Product;
use crate::debounce::Debouncer;
use crate::facets::FacetDimension;
use crate::fetch::{FetchCoordinator, FetchMessage, FetchTarget};
use crate::filters::FilterPanel;
use crate::paging::{PageItem, page_window};
use crate::query::{QueryState, QueryStateStore};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;

/// Neighbor spread of the pagination strip
const PAGE_WINDOW_DELTA: u32 = 2;

/// Tunables a session is created with
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Products per listing page
    pub page_size: u32,
    /// Options per facet page
    pub facet_page_size: u32,
    /// Search settle delay
    pub debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            facet_page_size: 10,
            debounce: Duration::from_millis(350),
        }
    }
}

/// The currently displayed product listing page
#[derive(Debug, Clone, Default)]
pub struct ProductsView {
    /// Products of the current page, in server order
    pub items: Vec<Product>,
    /// Total matching products across all pages
    pub total_elements: u64,
    /// Total page count
    pub total_pages: u32,
    /// Whether a listing request is in flight
    pub loading: bool,
}

/// Orchestrator for an interactive browse run
pub struct BrowseSession {
    /// Current input mode
    pub mode: Mode,
    /// Raw search box contents (keystroke-fresh, not yet settled)
    pub search_input: String,
    /// Committed query state: debounced search, page, applied selections
    pub query: QueryState,
    /// Current product listing page
    pub products: ProductsView,
    /// Filter panel state
    pub panel: FilterPanel,
    /// Cursor index into the product list
    pub cursor: usize,
    /// Transient status line (fetch failures, open errors)
    pub status: Option<String>,
    /// Set when the session should terminate
    pub should_exit: bool,
    config: SessionConfig,
    debouncer: Debouncer,
    store: Box<dyn QueryStateStore>,
    coordinator: FetchCoordinator,
    messages: UnboundedReceiver<FetchMessage>,
}

impl BrowseSession {
    /// Create a session seeded with `initial` and issue the first listing
    /// fetch
    #[must_use]
    pub fn new(
        coordinator: FetchCoordinator,
        messages: UnboundedReceiver<FetchMessage>,
        store: Box<dyn QueryStateStore>,
        initial: QueryState,
        config: SessionConfig,
    ) -> Self {
        let mut session = Self {
            mode: Mode::Browse,
            search_input: initial.search.clone(),
            debouncer: Debouncer::new(config.debounce, initial.search.clone()),
            query: initial,
            products: ProductsView::default(),
            panel: FilterPanel::new(),
            cursor: 0,
            status: None,
            should_exit: false,
            config,
            store,
            coordinator,
            messages,
        };
        session.refetch_products();
        session
    }

    /// Apply one semantic action
    pub fn handle_action(&mut self, action: BrowseAction, now: Instant) {
        match action {
            BrowseAction::Quit => self.quit(),
            BrowseAction::SearchChar(c) => {
                self.search_input.push(c);
                self.search_edited(now);
            }
            BrowseAction::SearchBackspace => {
                if self.search_input.pop().is_some() {
                    self.search_edited(now);
                }
            }
            BrowseAction::SearchClear => {
                if !self.search_input.is_empty() {
                    self.search_input.clear();
                    self.search_edited(now);
                }
            }
            BrowseAction::NextPage => self.go_to_page(self.query.page.saturating_add(1)),
            BrowseAction::PrevPage => self.go_to_page(self.query.page.saturating_sub(1)),
            BrowseAction::FirstPage => self.go_to_page(0),
            BrowseAction::LastPage => {
                self.go_to_page(self.products.total_pages.saturating_sub(1));
            }
            BrowseAction::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            BrowseAction::CursorDown => {
                if self.cursor + 1 < self.products.items.len() {
                    self.cursor += 1;
                }
            }
            BrowseAction::OpenSelected => self.open_selected(),
            BrowseAction::OpenFilters => self.open_filters(),
            BrowseAction::CloseFilters => self.close_filters(),
            BrowseAction::ApplyFilters => self.apply_filters(),
            BrowseAction::ClearFilters => self.clear_filters(),
            BrowseAction::ToggleSection(dimension) => {
                if self.mode == Mode::Filters {
                    self.panel.toggle_section(dimension);
                }
            }
            BrowseAction::PanelCursorUp => self.panel.cursor_up(),
            BrowseAction::PanelCursorDown => self.panel.cursor_down(),
            BrowseAction::ToggleOption => self.toggle_option(),
            BrowseAction::LoadMore => self.load_more(),
            BrowseAction::Help => self.mode = Mode::Help,
            BrowseAction::CloseHelp => {
                if self.mode == Mode::Help {
                    self.mode = Mode::Browse;
                }
            }
        }
    }

    /// Advance time-based state: settle the debounced search if due
    pub fn tick(&mut self, now: Instant) {
        let settled = self.debouncer.poll(now).map(ToString::to_string);
        if let Some(text) = settled {
            self.commit_search(text);
        }
    }

    /// Drain and apply all pending fetch completions
    pub fn pump(&mut self) {
        while let Ok(message) = self.messages.try_recv() {
            self.apply_message(message);
        }
    }

    /// Apply one fetch completion, discarding it when superseded
    ///
    /// A stale message causes no state change at all: the loading flag is
    /// owned by the request that superseded it.
    pub fn apply_message(&mut self, message: FetchMessage) {
        if !self.coordinator.is_current(&message) {
            tracing::debug!(
                target_kind = ?message.target(),
                generation = message.generation(),
                "discarding superseded fetch result"
            );
            return;
        }

        match message {
            FetchMessage::Products { result, .. } => {
                self.products.loading = false;
                match result {
                    Ok(page) => {
                        self.products.total_pages = page.total_pages;
                        self.products.total_elements = page.total_elements;
                        self.products.items = page.content;
                        if self.cursor >= self.products.items.len() {
                            self.cursor = self.products.items.len().saturating_sub(1);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "product fetch failed");
                        self.status = Some(format!("Product fetch failed: {err}"));
                    }
                }
            }
            FetchMessage::Facet {
                dimension,
                append,
                result,
                ..
            } => {
                let facet = self.panel.facet_mut(dimension);
                facet.loading = false;
                match result {
                    Ok(page) => {
                        facet.apply_page(page, append);
                        self.panel.clamp_cursor();
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, ?dimension, "facet fetch failed");
                        self.status = Some(format!("Filter options unavailable: {err}"));
                    }
                }
            }
        }
    }

    /// The committed query state
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// The fetch coordinator (exposed for generation inspection)
    #[must_use]
    pub const fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    /// Pagination strip entries for the current listing
    #[must_use]
    pub fn page_items(&self) -> Vec<PageItem> {
        page_window(self.query.page, self.products.total_pages, PAGE_WINDOW_DELTA)
    }

    /// Product under the cursor, if any
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        self.products.items.get(self.cursor)
    }

    /// Whether the empty state (with its clear-search hint) applies
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        !self.products.loading && self.products.items.is_empty() && self.query.has_criteria()
    }

    // --- actions ---

    fn quit(&mut self) {
        self.debouncer.cancel();
        self.coordinator.abort_all();
        self.should_exit = true;
    }

    /// A keystroke changed the search box: page resets immediately, the
    /// store reflects the raw text right away, the fetch waits for settle
    fn search_edited(&mut self, now: Instant) {
        self.query.page = 0;
        self.debouncer.update(&self.search_input, now);
        self.sync_store();
    }

    fn commit_search(&mut self, text: String) {
        self.query.search = text;
        self.refetch_products();
        if self.mode == Mode::Filters {
            self.refetch_facets();
        }
    }

    fn go_to_page(&mut self, page: u32) {
        let last = self.products.total_pages.saturating_sub(1);
        let page = page.min(last);
        if page == self.query.page {
            return;
        }
        self.query.page = page;
        self.sync_store();
        self.refetch_products();
    }

    fn open_filters(&mut self) {
        if self.mode == Mode::Filters {
            return;
        }
        self.mode = Mode::Filters;
        self.panel
            .open_with(&self.query.brands, &self.query.categories);
        self.refetch_facets();
    }

    fn close_filters(&mut self) {
        if self.mode == Mode::Filters {
            self.mode = Mode::Browse;
        }
    }

    fn apply_filters(&mut self) {
        if self.mode != Mode::Filters {
            return;
        }
        let applied = self.panel.applied();
        self.query.brands = applied.brands;
        self.query.categories = applied.categories;
        self.query.page = 0;
        self.mode = Mode::Browse;
        self.sync_store();
        self.refetch_products();
    }

    fn clear_filters(&mut self) {
        if self.mode == Mode::Filters && self.panel.clear_drafts() {
            self.refetch_facets();
        }
    }

    fn toggle_option(&mut self) {
        if self.mode != Mode::Filters {
            return;
        }
        if self.panel.cursor_on_load_more() {
            self.load_more();
            return;
        }
        if let Some((dimension, option)) = self.panel.option_under_cursor() {
            if self.panel.toggle_option(dimension, &option) {
                // Both dimensions refetch on any draft change, the changed
                // one included, so its counts reflect the new selection.
                self.refetch_facets();
            }
        }
    }

    fn load_more(&mut self) {
        if self.mode != Mode::Filters {
            return;
        }
        let Some(dimension) = self.panel.open_section else {
            return;
        };
        let context = self.panel.context(&self.query.search);
        let facet = self.panel.facet_mut(dimension);
        if facet.loading || !facet.has_more() {
            return;
        }
        facet.loading = true;
        let next_page = facet.next_page();
        self.coordinator.request_facet(
            dimension,
            &context,
            next_page,
            self.config.facet_page_size,
            true,
        );
    }

    fn open_selected(&mut self) {
        if self.mode != Mode::Browse {
            return;
        }
        let Some(product) = self.selected_product() else {
            return;
        };
        let name = product.name.clone();
        match product.image.clone() {
            Some(url) => {
                if let Err(err) = open::that(&url) {
                    tracing::warn!(error = %err, "failed to open image");
                    self.status = Some(format!("Could not open image: {err}"));
                }
            }
            None => self.status = Some(format!("{name} has no image")),
        }
    }

    // --- fetch plumbing ---

    fn refetch_products(&mut self) {
        self.products.loading = true;
        self.status = None;
        self.coordinator
            .request_products(&self.query, self.config.page_size);
    }

    /// Re-issue page-0, non-append fetches for both dimensions
    fn refetch_facets(&mut self) {
        let context = self.panel.context(&self.query.search);
        for dimension in [FacetDimension::Brand, FacetDimension::Category] {
            self.panel.facet_mut(dimension).loading = true;
            self.coordinator.request_facet(
                dimension,
                &context,
                0,
                self.config.facet_page_size,
                false,
            );
        }
    }

    /// Mirror the visible state into the store (replace semantics)
    ///
    /// The stored search is the raw box contents, not the debounced value:
    /// what the user sees is what a restart restores.
    fn sync_store(&mut self) {
        let visible = QueryState {
            search: self.search_input.clone(),
            page: self.query.page,
            brands: self.query.brands.clone(),
            categories: self.query.categories.clone(),
        };
        if let Err(err) = self.store.write(&visible) {
            tracing::warn!(error = %err, "failed to persist view state");
        }
    }

    /// Current request generation of a target (stable across discards)
    #[must_use]
    pub const fn current_generation(&self, target: FetchTarget) -> u64 {
        self.coordinator.current_generation(target)
    }
}
