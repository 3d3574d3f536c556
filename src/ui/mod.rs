//! Ratatui front end for the browse session
//!
//! Owns the terminal: raw mode, the alternate screen, the draw loop, and
//! key decoding. All application state lives in [`BrowseSession`]; each
//! loop iteration draws the current state, feeds decoded actions in,
//! ticks the debouncer, and drains fetch completions.

mod events;
mod theme;

pub use theme::Theme;

use crate::browse::{BrowseSession, Mode};
use crate::facets::FacetDimension;
use crate::paging::PageItem;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// UI error type
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// Terminal I/O error
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Poll interval of the event loop; bounds debounce settle latency
const TICK: Duration = Duration::from_millis(50);

/// Run the interactive browser until the session exits
///
/// # Errors
///
/// Returns `UiError` if the terminal cannot be set up or event polling
/// fails. The terminal is restored before returning in either case.
pub fn run(session: &mut BrowseSession, theme: &Theme) -> Result<(), UiError> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, session, theme);
    cleanup_terminal()?;
    result
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, UiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<(), UiError> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    session: &mut BrowseSession,
    theme: &Theme,
) -> Result<(), UiError> {
    loop {
        terminal.draw(|frame| render(frame, session, theme))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                let action = events::map_key(session.mode, session.panel.open_section, key);
                if let Some(action) = action {
                    session.handle_action(action, Instant::now());
                }
            }
        }

        session.tick(Instant::now());
        session.pump();

        if session.should_exit {
            return Ok(());
        }
    }
}

/// Render the UI
fn render(frame: &mut Frame, session: &BrowseSession, theme: &Theme) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Product list
            Constraint::Length(2), // Pagination + status
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_search_bar(frame, session, theme, main_layout[0]);
    render_products(frame, session, theme, main_layout[1]);
    render_footer(frame, session, theme, main_layout[2]);
    render_help_bar(frame, session, theme, main_layout[3]);

    match session.mode {
        Mode::Filters => render_filter_panel(frame, session, theme),
        Mode::Help => render_help_overlay(frame, theme),
        Mode::Browse => {}
    }
}

fn render_search_bar(frame: &mut Frame, session: &BrowseSession, theme: &Theme, area: Rect) {
    let summary = if session.products.loading {
        "Loading…".to_string()
    } else {
        format!("{} item(s)", session.products.total_elements)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Search ")
        .title_top(Line::from(format!(" {summary} ")).right_aligned());

    let mut spans = vec![Span::raw(session.search_input.clone())];
    if session.mode == Mode::Browse {
        spans.push(Span::styled("▏", theme.cursor_style()));
    }
    if session.search_input.is_empty() {
        spans.push(Span::styled(
            "type to search products…",
            theme.dimmed_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_products(frame: &mut Frame, session: &BrowseSession, theme: &Theme, area: Rect) {
    let filter_count = session.query.brands.len() + session.query.categories.len();
    let title = if filter_count > 0 {
        format!(" Products ({filter_count} filter(s)) ")
    } else {
        " Products ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if session.products.loading {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("Loading…", theme.dimmed_style()))),
            inner,
        );
        return;
    }

    if session.products.items.is_empty() {
        let mut lines = vec![Line::from("No products found.")];
        if session.is_empty_result() {
            lines.push(Line::from(Span::styled(
                "Try a different query, or press ctrl-u to clear the search.",
                theme.dimmed_style(),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    }

    let items: Vec<ListItem> = session
        .products
        .items
        .iter()
        .enumerate()
        .map(|(idx, product)| {
            let is_cursor = idx == session.cursor;
            let cursor_char = if is_cursor { ">" } else { " " };

            let mut spans = vec![
                Span::styled(cursor_char, theme.cursor_style()),
                Span::raw(" "),
                Span::styled(
                    product.name.clone(),
                    if is_cursor {
                        theme.selected_style()
                    } else {
                        theme.normal_style()
                    },
                ),
            ];

            if let Some(brand) = &product.brand_name {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("[{brand}]"), theme.brand_style()));
            }
            if let Some(category) = product.display_category() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("({category})"), theme.category_style()));
            }
            if product.image.is_none() {
                spans.push(Span::raw(" "));
                spans.push(Span::styled("no image", theme.dimmed_style()));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_footer(frame: &mut Frame, session: &BrowseSession, theme: &Theme, area: Rect) {
    let mut lines = Vec::new();

    let total_pages = session.products.total_pages;
    if total_pages > 1 {
        let mut spans = Vec::new();

        let prev_style = if session.query.page == 0 {
            theme.dimmed_style()
        } else {
            theme.normal_style()
        };
        spans.push(Span::styled("← Prev ", prev_style));

        for item in session.page_items() {
            match item {
                PageItem::Page(page) => {
                    let label = format!(" {} ", page + 1);
                    if page == session.query.page {
                        spans.push(Span::styled(label, theme.selected_style()));
                    } else {
                        spans.push(Span::raw(label));
                    }
                }
                PageItem::Gap => spans.push(Span::styled(" … ", theme.dimmed_style())),
            }
        }

        let next_style = if session.query.page + 1 >= total_pages {
            theme.dimmed_style()
        } else {
            theme.normal_style()
        };
        spans.push(Span::styled(" Next →", next_style));

        lines.push(Line::from(spans));
    } else {
        lines.push(Line::from(""));
    }

    match &session.status {
        Some(status) => lines.push(Line::from(Span::styled(status.clone(), theme.error_style()))),
        None => lines.push(Line::from("")),
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help_bar(frame: &mut Frame, session: &BrowseSession, theme: &Theme, area: Rect) {
    let hints = match session.mode {
        Mode::Filters => "↑/↓ move · Space toggle · Tab section · l more · a apply · x clear · Esc close",
        _ => "type to search · ←/→ page · ↑/↓ select · Enter open · F2 filters · F1 help · Esc quit",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, theme.dimmed_style()))),
        area,
    );
}

fn render_filter_panel(frame: &mut Frame, session: &BrowseSession, theme: &Theme) {
    let area = centered_rect(60, 75, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Filters ")
        .title_bottom(
            Line::from(format!(" Selected: {} ", session.panel.selected_count()))
                .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for dimension in [FacetDimension::Brand, FacetDimension::Category] {
        render_facet_section(session, theme, dimension, &mut lines);
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_facet_section(
    session: &BrowseSession,
    theme: &Theme,
    dimension: FacetDimension,
    lines: &mut Vec<Line<'static>>,
) {
    let panel = &session.panel;
    let facet = panel.facet(dimension);
    let is_open = panel.open_section == Some(dimension);

    let marker = if is_open { "▾" } else { "▸" };
    let selected = panel.drafts(dimension).len();
    let mut header = vec![Span::raw(format!("{marker} {}", dimension.title()))];
    if selected > 0 {
        header.push(Span::styled(
            format!("  {selected} selected"),
            theme.info_style(),
        ));
    }
    lines.push(Line::from(header));

    if !is_open {
        return;
    }

    if facet.options.is_empty() && !facet.loading {
        lines.push(Line::from(Span::styled(
            "   No options found",
            theme.dimmed_style(),
        )));
    }

    for (idx, option) in facet.options.iter().enumerate() {
        let is_cursor = idx == panel.cursor;
        let is_selected = panel.is_selected(dimension, option);
        let disabled = !panel.can_toggle(dimension, option);

        let cursor_char = if is_cursor { ">" } else { " " };
        let checkbox = if is_selected { "[x]" } else { "[ ]" };

        let text_style = if disabled {
            theme.dimmed_style()
        } else if is_cursor {
            theme.selected_style()
        } else {
            theme.normal_style()
        };

        lines.push(Line::from(vec![
            Span::styled(cursor_char.to_string(), theme.cursor_style()),
            Span::raw(format!("{checkbox} ")),
            Span::styled(option.value.clone(), text_style),
            Span::styled(format!("  {}", option.count), theme.dimmed_style()),
        ]));
    }

    if facet.loading {
        lines.push(Line::from(Span::styled(
            "   Loading…",
            theme.dimmed_style(),
        )));
    } else if facet.has_more() {
        let is_cursor = panel.cursor == facet.options.len();
        let cursor_char = if is_cursor { ">" } else { " " };
        lines.push(Line::from(vec![
            Span::styled(cursor_char.to_string(), theme.cursor_style()),
            Span::styled("More…".to_string(), theme.info_style()),
        ]));
    }

    lines.push(Line::from(""));
}

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(50, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Help ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let binds: &[(&str, &str)] = &[
        ("type", "edit search (debounced)"),
        ("ctrl-u", "clear search"),
        ("←/→", "previous/next page"),
        ("Home/End", "first/last page"),
        ("↑/↓", "move product cursor"),
        ("Enter", "open product image"),
        ("F2", "open filter panel"),
        ("Esc", "quit / close panel"),
        ("", ""),
        ("In filters:", ""),
        ("Space", "toggle option"),
        ("Tab", "switch section"),
        ("l", "load more options"),
        ("a / x", "apply / clear"),
    ];

    let lines: Vec<Line> = binds
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(format!("{key:>12}  "), theme.info_style()),
                Span::raw(*description),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Centered sub-rectangle taking the given percentages of the area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
