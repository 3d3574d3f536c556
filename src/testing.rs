//! Testing utilities for vitrin
//!
//! This module provides helper constructors for wire types and a fully
//! wired [`BrowseSession`] whose fetch results are driven by hand.
//!
//! Only available when compiled with `cfg(test)`.

use crate::api::{ApiClient, FacetOption, PageDto, Product};
use crate::browse::{BrowseSession, SessionConfig};
use crate::fetch::FetchCoordinator;
use crate::query::{MemoryStore, QueryState};

/// Build a product with the given id and name
#[must_use]
pub fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        image: None,
        brand_name: None,
        categories_names: Vec::new(),
    }
}

/// Build a product listing page
#[must_use]
pub fn product_page(items: Vec<Product>, total_pages: u32, page_number: u32) -> PageDto<Product> {
    PageDto {
        total_elements: items.len() as u64,
        content: items,
        total_pages,
        page_number,
    }
}

/// Build a facet option with the given id, label, and count
#[must_use]
pub fn facet_option(id: i64, value: &str, count: u64) -> FacetOption {
    FacetOption {
        id: Some(id),
        value: value.to_string(),
        count,
    }
}

/// Build a facet option page
#[must_use]
pub fn facet_page(
    items: Vec<FacetOption>,
    total_pages: u32,
    page_number: u32,
) -> PageDto<FacetOption> {
    PageDto {
        total_elements: items.len() as u64,
        content: items,
        total_pages,
        page_number,
    }
}

/// Build a session wired to an in-memory store and a dead API endpoint
///
/// The client points at a discard address, so any task the session spawns
/// fails fast and its result is never pumped; tests feed results in
/// directly through [`BrowseSession::apply_message`]. The returned
/// runtime must stay alive for the session's lifetime.
#[must_use]
pub fn test_session(initial: QueryState) -> (BrowseSession, tokio::runtime::Runtime) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to create test runtime");
    let client = ApiClient::new("http://127.0.0.1:9");
    let (coordinator, messages) = FetchCoordinator::new(client, runtime.handle().clone());

    let session = BrowseSession::new(
        coordinator,
        messages,
        Box::new(MemoryStore::new()),
        initial,
        SessionConfig::default(),
    );

    (session, runtime)
}
