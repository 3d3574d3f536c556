//! Interactive catalog browse session
//!
//! This module implements the orchestrator behind the TUI: a state
//! machine owning the search text and its debounced derivative, the page
//! index, the committed facet selections, and the filter panel, wired to
//! the fetch coordinator and the view-state store.
//!
//! # Data flow
//!
//! ```text
//! key event → BrowseAction → BrowseSession state change
//!     ├─ store.write (replace semantics, every state-changing action)
//!     ├─ product fetch when (page | debounced search | selections) change
//!     └─ facet fetches while the filter panel is open
//! fetch completion → generation check → apply or discard
//! ```
//!
//! The session never touches the terminal; rendering and key decoding
//! live in the `ui` module, which drives the session through
//! [`BrowseAction`] values and periodic ticks.

mod session;

pub use session::{BrowseSession, ProductsView, SessionConfig};

use crate::facets::FacetDimension;

/// Current input mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Product grid with live search box
    #[default]
    Browse,
    /// Filter panel is open; drafts are being edited
    Filters,
    /// Help overlay is visible
    Help,
}

/// Semantic actions the UI layer feeds into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    /// Exit the session
    Quit,
    /// Append a character to the search box
    SearchChar(char),
    /// Delete the last search character
    SearchBackspace,
    /// Empty the search box
    SearchClear,
    /// Go to the next result page
    NextPage,
    /// Go to the previous result page
    PrevPage,
    /// Jump to the first result page
    FirstPage,
    /// Jump to the last result page
    LastPage,
    /// Move the product cursor up
    CursorUp,
    /// Move the product cursor down
    CursorDown,
    /// Open the selected product's image externally
    OpenSelected,
    /// Open the filter panel
    OpenFilters,
    /// Close the filter panel, discarding drafts
    CloseFilters,
    /// Publish the drafts and close the panel
    ApplyFilters,
    /// Empty both draft sets, keeping the panel open
    ClearFilters,
    /// Expand/collapse a facet section
    ToggleSection(FacetDimension),
    /// Move the panel cursor up
    PanelCursorUp,
    /// Move the panel cursor down
    PanelCursorDown,
    /// Toggle the option under the panel cursor (or load more)
    ToggleOption,
    /// Fetch the next facet page of the expanded section
    LoadMore,
    /// Show the help overlay
    Help,
    /// Dismiss the help overlay
    CloseHelp,
}
