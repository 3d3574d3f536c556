//! Event handling for the ratatui TUI
//!
//! Maps keyboard events to semantic [`BrowseAction`]s depending on the
//! session's current mode. All state changes happen in the session; this
//! module only decodes keys.

use crate::browse::{BrowseAction, Mode};
use crate::facets::FacetDimension;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key event to an action for the current mode
///
/// `open_section` is the filter panel's expanded section, used to decide
/// which section Tab moves to. Returns `None` for keys without a meaning
/// in the given mode.
#[must_use]
pub fn map_key(
    mode: Mode,
    open_section: Option<FacetDimension>,
    key: KeyEvent,
) -> Option<BrowseAction> {
    match mode {
        Mode::Browse => map_browse_key(key),
        Mode::Filters => map_filters_key(open_section, key),
        Mode::Help => Some(BrowseAction::CloseHelp),
    }
}

fn map_browse_key(key: KeyEvent) -> Option<BrowseAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            Some(BrowseAction::Quit)
        }
        (KeyCode::Enter, _) => Some(BrowseAction::OpenSelected),

        // Navigation
        (KeyCode::Up, _) => Some(BrowseAction::CursorUp),
        (KeyCode::Down, _) => Some(BrowseAction::CursorDown),
        (KeyCode::Left, _) | (KeyCode::PageUp, _) => Some(BrowseAction::PrevPage),
        (KeyCode::Right, _) | (KeyCode::PageDown, _) => Some(BrowseAction::NextPage),
        (KeyCode::Home, _) => Some(BrowseAction::FirstPage),
        (KeyCode::End, _) => Some(BrowseAction::LastPage),

        // Overlays
        (KeyCode::F(1), _) => Some(BrowseAction::Help),
        (KeyCode::F(2), _) | (KeyCode::Char('f'), KeyModifiers::CONTROL) => {
            Some(BrowseAction::OpenFilters)
        }

        // Search editing
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(BrowseAction::SearchClear),
        (KeyCode::Backspace, _) => Some(BrowseAction::SearchBackspace),
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            Some(BrowseAction::SearchChar(c))
        }

        _ => None,
    }
}

fn map_filters_key(open_section: Option<FacetDimension>, key: KeyEvent) -> Option<BrowseAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(BrowseAction::CloseFilters),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(BrowseAction::Quit),

        (KeyCode::Up, _) => Some(BrowseAction::PanelCursorUp),
        (KeyCode::Down, _) => Some(BrowseAction::PanelCursorDown),

        // Tab expands the other section (or the first when both are closed).
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Some(BrowseAction::ToggleSection(
            open_section.map_or(FacetDimension::Brand, FacetDimension::other),
        )),

        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => Some(BrowseAction::ToggleOption),
        (KeyCode::Char('l'), KeyModifiers::NONE) => Some(BrowseAction::LoadMore),
        (KeyCode::Char('a'), KeyModifiers::NONE) => Some(BrowseAction::ApplyFilters),
        (KeyCode::Char('x'), KeyModifiers::NONE) => Some(BrowseAction::ClearFilters),

        (KeyCode::F(1), _) => Some(BrowseAction::Help),

        _ => None,
    }
}
