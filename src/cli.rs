//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for vitrin using the
//! `clap` crate. It provides command parsing, argument validation, and
//! helper methods for turning command-specific flags into an initial
//! query state.
//!
//! # Commands
//!
//! - **browse**: Interactive catalog browser (default)
//! - **search**: One-shot product listing printed to stdout
//! - **facets**: One-shot facet option listing for one dimension
//! - **config**: Get and set configuration values
//!
//! # Design Features
//!
//! - A saved view can be restored from a positional query string
//!   (`vitrin browse "q=lamp&page=2&brands=5"`) or assembled from flags
//! - Global `--quiet` flag for scripting-friendly output
//! - Command aliases (e.g., `b` for `browse`, `s` for `search`)

use crate::facets::FacetDimension;
use crate::query::QueryState;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;

/// Facet dimension argument for the `facets` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetArg {
    /// Brand options
    Brand,
    /// Category options
    Category,
}

impl From<FacetArg> for FacetDimension {
    fn from(arg: FacetArg) -> Self {
        match arg {
            FacetArg::Brand => Self::Brand,
            FacetArg::Category => Self::Category,
        }
    }
}

/// Command-line interface for vitrin
#[derive(Parser, Debug)]
#[command(
    name = "vitrin",
    about = "A fast, keyboard-driven product catalog browser for the command line",
    version
)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The selected command, defaulting to an unparameterized browse
    #[must_use]
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Browse {
            view: None,
            search: None,
            brands: Vec::new(),
            categories: Vec::new(),
            page: None,
            ephemeral: false,
        })
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Browse the catalog interactively (default)
    #[command(alias = "b")]
    Browse {
        /// Restore a view from its query string, e.g. "q=lamp&brands=5"
        #[arg(value_name = "VIEW")]
        view: Option<String>,

        /// Initial search text
        #[arg(short, long)]
        search: Option<String>,

        /// Pre-selected brand ids (repeatable)
        #[arg(short = 'b', long = "brand", value_name = "ID")]
        brands: Vec<i64>,

        /// Pre-selected category ids (repeatable)
        #[arg(short = 'c', long = "category", value_name = "ID")]
        categories: Vec<i64>,

        /// Initial result page (0-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Don't restore or persist the view state
        #[arg(long)]
        ephemeral: bool,
    },

    /// Fetch one page of products and print it
    #[command(alias = "s")]
    Search {
        /// Search text
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Brand ids to filter by (repeatable)
        #[arg(short = 'b', long = "brand", value_name = "ID")]
        brands: Vec<i64>,

        /// Category ids to filter by (repeatable)
        #[arg(short = 'c', long = "category", value_name = "ID")]
        categories: Vec<i64>,

        /// Result page (0-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch one page of facet options and print it
    #[command(alias = "f")]
    Facets {
        /// Which dimension to list
        #[arg(value_enum)]
        dimension: FacetArg,

        /// Search text the counts are filtered by
        #[arg(short, long)]
        search: Option<String>,

        /// Selected brand ids (repeatable)
        #[arg(short = 'b', long = "brand", value_name = "ID")]
        brands: Vec<i64>,

        /// Selected category ids (repeatable)
        #[arg(short = 'c', long = "category", value_name = "ID")]
        categories: Vec<i64>,

        /// Option page (0-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Print the raw page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage application settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Set a configuration value (key=value)
    Set {
        /// Setting in key=value form, e.g. api_base_url=http://shop.example
        setting: String,
    },
    /// Get a configuration value
    Get {
        /// Setting key
        key: String,
    },
}

/// Assemble the initial query state for a browse command
///
/// The positional view string (when given) replaces `base` wholesale;
/// individual flags then override single fields on top of the result.
#[must_use]
pub fn browse_initial_state(
    base: QueryState,
    view: Option<&str>,
    search: Option<&str>,
    brands: &[i64],
    categories: &[i64],
    page: Option<u32>,
) -> QueryState {
    let mut state = view.map_or(base, QueryState::parse);

    if let Some(search) = search {
        state.search = search.to_string();
    }
    if !brands.is_empty() {
        state.brands = brands.iter().copied().collect::<BTreeSet<i64>>();
    }
    if !categories.is_empty() {
        state.categories = categories.iter().copied().collect::<BTreeSet<i64>>();
    }
    if let Some(page) = page {
        state.page = page;
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_defaults_to_browse() {
        let cli = parse(&["vitrin"]);
        assert!(matches!(cli.into_command(), Commands::Browse { .. }));
    }

    #[test]
    fn test_browse_accepts_view_string() {
        let cli = parse(&["vitrin", "browse", "q=lamp&brands=5"]);
        match cli.into_command() {
            Commands::Browse { view, .. } => {
                assert_eq!(view.as_deref(), Some("q=lamp&brands=5"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_collects_repeated_ids() {
        let cli = parse(&["vitrin", "search", "lamp", "-b", "5", "-b", "9", "-c", "2"]);
        match cli.into_command() {
            Commands::Search {
                text,
                brands,
                categories,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("lamp"));
                assert_eq!(brands, vec![5, 9]);
                assert_eq!(categories, vec![2]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_facets_requires_dimension() {
        assert!(Cli::try_parse_from(["vitrin", "facets"]).is_err());
        let cli = parse(&["vitrin", "facets", "brand", "--json"]);
        match cli.into_command() {
            Commands::Facets {
                dimension, json, ..
            } => {
                assert_eq!(FacetDimension::from(dimension), FacetDimension::Brand);
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_quiet_flag() {
        let cli = parse(&["vitrin", "-q", "search", "lamp"]);
        assert!(cli.quiet);
    }

    #[test]
    fn test_browse_initial_state_view_replaces_base() {
        let base = QueryState {
            search: "old".to_string(),
            page: 7,
            ..QueryState::default()
        };

        let state = browse_initial_state(base, Some("q=lamp&brands=5"), None, &[], &[], None);
        assert_eq!(state.search, "lamp");
        assert_eq!(state.page, 0);
        assert_eq!(state.brands, BTreeSet::from([5]));
    }

    #[test]
    fn test_browse_initial_state_flags_override_fields() {
        let base = QueryState {
            search: "old".to_string(),
            page: 7,
            brands: BTreeSet::from([1]),
            categories: BTreeSet::from([2]),
        };

        let state = browse_initial_state(base, None, Some("lamp"), &[5, 9], &[], Some(1));
        assert_eq!(state.search, "lamp");
        assert_eq!(state.page, 1);
        assert_eq!(state.brands, BTreeSet::from([5, 9]));
        // Untouched flag keeps the base value.
        assert_eq!(state.categories, BTreeSet::from([2]));
    }
}
