//! Integration tests for the vitrin browse workflow
//!
//! These tests drive a fully wired [`BrowseSession`] end to end: actions
//! go in through the same entry point the TUI uses, and fetch results are
//! fed back in by hand so every scenario is deterministic.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use vitrin::api::{ApiClient, FacetOption, PageDto, Product, product_params};
use vitrin::browse::{BrowseAction, BrowseSession, Mode, SessionConfig};
use vitrin::facets::FacetDimension;
use vitrin::fetch::{FetchCoordinator, FetchMessage, FetchTarget};
use vitrin::query::{MemoryStore, QueryState};

fn product(id: i64, name: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        image: None,
        brand_name: None,
        categories_names: Vec::new(),
    }
}

fn facet_option(id: i64, value: &str, count: u64) -> FacetOption {
    FacetOption {
        id: Some(id),
        value: value.to_string(),
        count,
    }
}

fn page<T>(items: Vec<T>, total_pages: u32, page_number: u32) -> PageDto<T> {
    PageDto {
        total_elements: items.len() as u64,
        content: items,
        total_pages,
        page_number,
    }
}

/// Session wired to an in-memory store and a dead endpoint; results are
/// applied by hand, so the runtime only hosts ignored failing tasks.
fn setup_session(initial: QueryState) -> (BrowseSession, tokio::runtime::Runtime) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
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

fn products_generation(session: &BrowseSession) -> u64 {
    session
        .coordinator()
        .current_generation(FetchTarget::Products)
}

fn facet_generation(session: &BrowseSession, dimension: FacetDimension) -> u64 {
    session
        .coordinator()
        .current_generation(FetchTarget::Facet(dimension))
}

fn deliver_products(session: &mut BrowseSession, result: PageDto<Product>) {
    let generation = products_generation(session);
    session.apply_message(FetchMessage::Products {
        generation,
        result: Ok(result),
    });
}

fn deliver_facets(
    session: &mut BrowseSession,
    dimension: FacetDimension,
    append: bool,
    result: PageDto<FacetOption>,
) {
    let generation = facet_generation(session, dimension);
    session.apply_message(FetchMessage::Facet {
        dimension,
        generation,
        append,
        result: Ok(result),
    });
}

#[test]
fn test_request_parameters_for_a_composed_query() {
    // search "lamp", page 2, brands {5, 9} must produce exactly one
    // request's worth of parameters, repeated ids included.
    let query = QueryState {
        search: "lamp".to_string(),
        page: 2,
        brands: BTreeSet::from([5, 9]),
        categories: BTreeSet::new(),
    };

    let params = product_params(&query, 12);
    let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    assert_eq!(
        rendered.join("&"),
        "page=2&size=12&search=lamp&brands=5&brands=9"
    );

    // The same state round-trips through its shareable string form.
    assert_eq!(query.to_query_string(), "q=lamp&page=2&brands=5&brands=9");
    assert_eq!(QueryState::parse(&query.to_query_string()), query);
}

#[test]
fn test_full_search_filter_paginate_workflow() {
    let (mut session, _runtime) = setup_session(QueryState::default());
    let start = Instant::now();

    // Initial listing arrives.
    deliver_products(&mut session, page(vec![product(1, "Desk Lamp")], 4, 0));
    assert_eq!(session.products.items.len(), 1);

    // The user types "lamp"; the query commits only after the delay.
    for (i, c) in "lamp".chars().enumerate() {
        session.handle_action(
            BrowseAction::SearchChar(c),
            start + Duration::from_millis(60 * i as u64),
        );
    }
    session.tick(start + Duration::from_secs(1));
    assert_eq!(session.query().search, "lamp");
    assert_eq!(session.query().page, 0);

    deliver_products(&mut session, page(vec![product(2, "Floor Lamp")], 3, 0));

    // Open filters, select a brand, apply.
    session.handle_action(BrowseAction::OpenFilters, start);
    assert_eq!(session.mode, Mode::Filters);
    deliver_facets(
        &mut session,
        FacetDimension::Brand,
        false,
        page(vec![facet_option(5, "Lumen", 2)], 1, 0),
    );
    deliver_facets(
        &mut session,
        FacetDimension::Category,
        false,
        page(vec![facet_option(2, "Lighting", 3)], 1, 0),
    );

    session.handle_action(BrowseAction::ToggleOption, start);
    session.handle_action(BrowseAction::ApplyFilters, start);

    assert_eq!(session.mode, Mode::Browse);
    assert_eq!(session.query().brands, BTreeSet::from([5]));
    deliver_products(&mut session, page(vec![product(2, "Floor Lamp")], 2, 0));

    // Page forward: search and filters are preserved.
    session.handle_action(BrowseAction::NextPage, start);
    assert_eq!(session.query().page, 1);
    assert_eq!(session.query().search, "lamp");
    assert_eq!(session.query().brands, BTreeSet::from([5]));

    assert_eq!(session.query().to_query_string(), "q=lamp&page=1&brands=5");
}

#[test]
fn test_out_of_order_responses_cannot_clobber_newer_state() {
    let (mut session, _runtime) = setup_session(QueryState::default());

    let first = products_generation(&session);
    session.products.total_pages = 10;
    session.handle_action(BrowseAction::NextPage, Instant::now());
    session.handle_action(BrowseAction::NextPage, Instant::now());
    let latest = products_generation(&session);
    assert_eq!(latest, first + 2);

    // Responses arrive out of order: the newest first, then stragglers.
    session.apply_message(FetchMessage::Products {
        generation: latest,
        result: Ok(page(vec![product(3, "Current")], 10, 2)),
    });
    session.apply_message(FetchMessage::Products {
        generation: first,
        result: Ok(page(vec![product(1, "Ancient")], 10, 0)),
    });
    session.apply_message(FetchMessage::Products {
        generation: first + 1,
        result: Ok(page(vec![product(2, "Stale")], 10, 1)),
    });

    assert_eq!(session.products.items[0].name, "Current");
    assert!(!session.products.loading);
}

#[test]
fn test_facet_load_more_accumulates_across_pages() {
    let (mut session, _runtime) = setup_session(QueryState::default());
    session.handle_action(BrowseAction::OpenFilters, Instant::now());

    deliver_facets(
        &mut session,
        FacetDimension::Brand,
        false,
        page(
            vec![facet_option(1, "Lumen", 4), facet_option(2, "Nord", 2)],
            3,
            0,
        ),
    );
    assert!(session.panel.brands.has_more());

    session.handle_action(BrowseAction::LoadMore, Instant::now());
    deliver_facets(
        &mut session,
        FacetDimension::Brand,
        true,
        // The server repeats an option across page boundaries; the
        // duplicate must not appear twice.
        page(
            vec![facet_option(2, "Nord", 2), facet_option(3, "Kivi", 1)],
            3,
            1,
        ),
    );

    let labels: Vec<&str> = session
        .panel
        .brands
        .options
        .iter()
        .map(|o| o.value.as_str())
        .collect();
    assert_eq!(labels, vec!["Lumen", "Nord", "Kivi"]);
    assert_eq!(session.panel.brands.page, 1);
}

#[test]
fn test_drafts_drive_facets_but_not_products_until_apply() {
    let (mut session, _runtime) = setup_session(QueryState::default());
    session.handle_action(BrowseAction::OpenFilters, Instant::now());

    deliver_facets(
        &mut session,
        FacetDimension::Brand,
        false,
        page(vec![facet_option(5, "Lumen", 2)], 1, 0),
    );

    let products_before = products_generation(&session);
    session.handle_action(BrowseAction::ToggleOption, Instant::now());

    // Toggling refetches both facet dimensions but not the listing.
    assert_eq!(facet_generation(&session, FacetDimension::Brand), 2);
    assert_eq!(facet_generation(&session, FacetDimension::Category), 2);
    assert_eq!(products_generation(&session), products_before);

    // Discarding the panel leaves the committed query untouched.
    session.handle_action(BrowseAction::CloseFilters, Instant::now());
    assert!(session.query().brands.is_empty());
}

#[test]
fn test_empty_result_offers_clear_search() {
    let initial = QueryState {
        search: "zzz".to_string(),
        ..QueryState::default()
    };
    let (mut session, _runtime) = setup_session(initial);

    deliver_products(&mut session, page(vec![], 0, 0));
    assert!(session.is_empty_result());

    // Clearing the search recovers after the debounce settles.
    let start = Instant::now();
    session.handle_action(BrowseAction::SearchClear, start);
    session.tick(start + Duration::from_secs(1));
    assert_eq!(session.query().search, "");

    deliver_products(&mut session, page(vec![product(1, "Desk Lamp")], 1, 0));
    assert!(!session.is_empty_result());
    assert_eq!(session.products.items.len(), 1);
}
