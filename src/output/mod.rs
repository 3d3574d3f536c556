//! Output formatting for non-interactive commands
//!
//! Renders product and facet pages to stdout. Quiet mode reduces output
//! to one bare value per line for piping into other tools; `--json`
//! bypasses formatting entirely and prints the raw page.

use crate::api::{FacetOption, PageDto, Product};
use crate::facets::FacetDimension;
use colored::Colorize;

/// Print one page of products
///
/// Quiet mode prints names only. Otherwise each product gets one line
/// with its brand and display category, followed by a paging summary.
pub fn print_products(page: &PageDto<Product>, quiet: bool) {
    if quiet {
        for product in &page.content {
            println!("{}", product.name);
        }
        return;
    }

    if page.content.is_empty() {
        println!("No products found.");
        return;
    }

    for product in &page.content {
        let mut line = format!("  {}", product.name.bold());

        if let Some(brand) = &product.brand_name {
            line.push_str(&format!(" {}", format!("[{brand}]").cyan()));
        }
        if let Some(category) = product.display_category() {
            line.push_str(&format!(" {}", format!("({category})").magenta()));
        }
        if product.image.is_none() {
            line.push_str(&format!(" {}", "no image".dimmed()));
        }

        println!("{line}");
    }

    println!(
        "\n{}",
        format!(
            "Page {}/{}, {} item(s) total",
            page.page_number + 1,
            page.total_pages.max(1),
            page.total_elements
        )
        .dimmed()
    );
}

/// Print one page of facet options
///
/// Quiet mode prints `id\tvalue` pairs. Otherwise each option gets one
/// line with its count, zero-count options dimmed.
pub fn print_facets(dimension: FacetDimension, page: &PageDto<FacetOption>, quiet: bool) {
    if quiet {
        for option in &page.content {
            match option.id {
                Some(id) => println!("{id}\t{}", option.value),
                None => println!("-\t{}", option.value),
            }
        }
        return;
    }

    if page.content.is_empty() {
        println!("No {} options found.", dimension.title().to_lowercase());
        return;
    }

    println!("{}:", dimension.title().bold());
    for option in &page.content {
        let count = format!("({})", option.count);
        if option.count == 0 {
            println!("  {} {}", option.value.dimmed(), count.dimmed());
        } else {
            println!("  {} {}", option.value, count.dimmed());
        }
    }

    println!(
        "\n{}",
        format!("Page {}/{}", page.page_number + 1, page.total_pages.max(1)).dimmed()
    );
}

/// Print a page as pretty JSON
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn print_json<T: serde::Serialize>(page: &PageDto<T>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(page)?);
    Ok(())
}
