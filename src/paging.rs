//! Pagination windowing
//!
//! Maps (current page, total pages, neighbor spread) to a compact list of
//! page indices with gap markers, so a 200-page result set renders as
//! `1 … 9 10 11 12 13 … 200` instead of two hundred buttons.

/// One entry in a rendered pagination strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A directly navigable page index (0-based)
    Page(u32),
    /// An elided run of pages, rendered as an ellipsis
    Gap,
}

/// Total page count below which the full range is shown without gaps
const FULL_RANGE_LIMIT: u32 = 9;

/// Build the compact page window around `current`
///
/// `delta` is the number of neighbors kept on each side of the current
/// page. The first and last pages are always present; runs elided between
/// them collapse to a single [`PageItem::Gap`].
#[must_use]
pub fn page_window(current: u32, total_pages: u32, delta: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let last = total_pages - 1;

    if total_pages <= FULL_RANGE_LIMIT {
        return (0..=last).map(PageItem::Page).collect();
    }

    let left = current.saturating_sub(delta).max(1);
    let right = (current + delta).min(last - 1);

    let mut items = vec![PageItem::Page(0)];

    if left > 1 {
        items.push(PageItem::Gap);
    }
    items.extend((left..=right).map(PageItem::Page));
    if right < last - 1 {
        items.push(PageItem::Gap);
    }

    items.push(PageItem::Page(last));
    items
}
