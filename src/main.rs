//! Vitrin CLI application entry point
//!
//! This is the main executable for the vitrin catalog browser. It
//! provides a command-line interface for browsing a remote product
//! catalog with live search, facet filters, and server-side paging.
//!
//! # Features
//!
//! - **Browse Mode**: Interactive TUI with debounced search, a brand/
//!   category filter panel, and compact pagination
//! - **Search**: One-shot product listing for scripting
//! - **Facets**: One-shot facet option listing with cross-filtered counts
//! - **View State**: The last view persists across runs and can be
//!   restored or shared as a query string
//! - **Quiet Mode**: Suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog interactively (default command)
//! vitrin
//! vitrin browse
//!
//! # Restore a saved view
//! vitrin browse "q=lamp&page=2&brands=5"
//!
//! # One-shot search
//! vitrin search lamp -b 5 -b 9
//! vitrin -q search lamp
//!
//! # List brand options cross-filtered by a category
//! vitrin facets brand -c 2
//!
//! # Configure the API endpoint
//! vitrin config set api_base_url=http://shop.example:8080
//! ```
//!
//! # Configuration
//!
//! On first run, vitrin will prompt for the catalog API base URL.
//! Configuration is stored in the user's config directory
//! (`~/.config/vitrin/config.toml` on Linux).

use std::collections::BTreeSet;
use tracing::Level;
use vitrin::{
    VitrinError,
    api::ApiClient,
    browse::{BrowseSession, SessionConfig},
    cli::{Cli, Commands, ConfigCommands, browse_initial_state},
    config::VitrinConfig,
    facets::{FacetDimension, FilterContext},
    fetch::FetchCoordinator,
    logging, output,
    query::{FileStore, MemoryStore, QueryState, QueryStateStore},
    ui,
};

type Result<T> = std::result::Result<T, VitrinError>;

fn main() -> Result<()> {
    let config = VitrinConfig::load_or_setup()?;

    let cli = Cli::parse_args();
    let quiet = cli.quiet || config.quiet;
    let command = cli.into_command();

    // Interactive mode keeps stderr quiet so the alternate screen stays
    // clean; one-shot commands log at info.
    let default_level = match &command {
        Commands::Browse { .. } => Level::WARN,
        _ => Level::INFO,
    };
    logging::init(default_level);

    if let Commands::Config { command } = &command {
        return handle_config_command(config, command, quiet);
    }

    if config.api_base_url.is_empty() {
        return Err(VitrinError::InvalidInput(
            "No API base URL configured. Run 'vitrin config set api_base_url=<url>' first.".into(),
        ));
    }

    let runtime = tokio::runtime::Runtime::new()?;

    match command {
        Commands::Browse {
            view,
            search,
            brands,
            categories,
            page,
            ephemeral,
        } => handle_browse_command(
            &config,
            &runtime,
            view.as_deref(),
            search.as_deref(),
            &brands,
            &categories,
            page,
            ephemeral,
            quiet,
        ),
        Commands::Search {
            text,
            brands,
            categories,
            page,
            json,
        } => runtime.block_on(handle_search_command(
            &config, text, &brands, &categories, page, json, quiet,
        )),
        Commands::Facets {
            dimension,
            search,
            brands,
            categories,
            page,
            json,
        } => runtime.block_on(handle_facets_command(
            &config,
            dimension.into(),
            search,
            &brands,
            &categories,
            page,
            json,
            quiet,
        )),
        Commands::Config { .. } => unreachable!(),
    }
}

/// Handle the browse command - run the interactive catalog browser
///
/// Seeds the initial view from the persisted state (unless `--ephemeral`)
/// and any CLI overrides, runs the TUI until exit, and prints the final
/// view string so it can be restored later.
///
/// # Errors
///
/// Returns `VitrinError` if the view state cannot be read or the terminal
/// setup fails.
#[allow(clippy::too_many_arguments)]
fn handle_browse_command(
    config: &VitrinConfig,
    runtime: &tokio::runtime::Runtime,
    view: Option<&str>,
    search: Option<&str>,
    brands: &[i64],
    categories: &[i64],
    page: Option<u32>,
    ephemeral: bool,
    quiet: bool,
) -> Result<()> {
    let store: Box<dyn QueryStateStore> = if ephemeral {
        Box::new(MemoryStore::new())
    } else {
        Box::new(FileStore::default_location()?)
    };

    let base = store.read()?;
    let initial = browse_initial_state(base, view, search, brands, categories, page);

    let client = ApiClient::new(config.api_base_url.as_str());
    let (coordinator, messages) = FetchCoordinator::new(client, runtime.handle().clone());
    let session_config = SessionConfig {
        page_size: config.page_size,
        facet_page_size: config.facet_page_size,
        debounce: config.debounce(),
    };

    let mut session = BrowseSession::new(coordinator, messages, store, initial, session_config);
    ui::run(&mut session, &ui::Theme::default())?;

    if !quiet {
        let view_string = session.query().to_query_string();
        if !view_string.is_empty() {
            println!("Current view: {view_string}");
            println!("Restore with: vitrin browse '{view_string}'");
        }
    }

    Ok(())
}

/// Handle the search command - fetch and print one product page
///
/// # Errors
///
/// Returns `VitrinError` if the request fails or the response cannot be
/// decoded.
async fn handle_search_command(
    config: &VitrinConfig,
    text: Option<String>,
    brands: &[i64],
    categories: &[i64],
    page: Option<u32>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let query = QueryState {
        search: text.unwrap_or_default(),
        page: page.unwrap_or(0),
        brands: brands.iter().copied().collect::<BTreeSet<i64>>(),
        categories: categories.iter().copied().collect::<BTreeSet<i64>>(),
    };

    let client = ApiClient::new(config.api_base_url.as_str());
    let result = client.fetch_products(&query, config.page_size).await?;

    if json {
        output::print_json(&result)?;
    } else {
        output::print_products(&result, quiet);
    }

    Ok(())
}

/// Handle the facets command - fetch and print one facet option page
///
/// The printed counts are cross-filtered by the given search text and
/// selections, exactly as the filter panel would see them.
///
/// # Errors
///
/// Returns `VitrinError` if the request fails or the response cannot be
/// decoded.
#[allow(clippy::too_many_arguments)]
async fn handle_facets_command(
    config: &VitrinConfig,
    dimension: FacetDimension,
    search: Option<String>,
    brands: &[i64],
    categories: &[i64],
    page: Option<u32>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let context = FilterContext {
        search: search.unwrap_or_default(),
        brands: brands.iter().copied().collect::<BTreeSet<i64>>(),
        categories: categories.iter().copied().collect::<BTreeSet<i64>>(),
    };

    let client = ApiClient::new(config.api_base_url.as_str());
    let result = client
        .fetch_facet_page(dimension, &context, page.unwrap_or(0), config.facet_page_size)
        .await?;

    if json {
        output::print_json(&result)?;
    } else {
        output::print_facets(dimension, &result, quiet);
    }

    Ok(())
}

/// Handle the config command - manage application settings
///
/// # Errors
///
/// Returns `VitrinError` if the configuration key is invalid, value
/// parsing fails, or configuration save fails.
fn handle_config_command(
    mut config: VitrinConfig,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let parts: Vec<&str> = setting.splitn(2, '=').collect();
            if parts.len() != 2 {
                return Err(VitrinError::InvalidInput(
                    "Invalid format. Use: vitrin config set key=value".into(),
                ));
            }

            let key = parts[0].trim();
            let value = parts[1].trim();

            config.set_value(key, value)?;
            config.save()?;
            if !quiet {
                println!("Set {key} = {value}");
            }
        }
        ConfigCommands::Get { key } => {
            println!("{}", config.get_value(key)?);
        }
    }
    Ok(())
}
