//! Catalog commands: list, options, show, compare, stats

use std::collections::HashSet;
use std::path::Path;

use colored::Colorize;

use lapview::cli::FilterArgs;
use lapview::compare::ComparisonTable;
use lapview::config::Config;
use lapview::error::{LapviewError, Result};
use lapview::fetch::{CatalogSource, FileSource, HttpSource};
use lapview::normalize::{format_price, format_rating};
use lapview::record::Record;
use lapview::stats::CatalogStats;
use lapview::view::ExploreView;

use crate::utils::{or_missing, pad};

/// Pick the catalog source: a saved file when given, else the API
pub fn open_source(config: &Config, file: Option<&Path>) -> Result<Box<dyn CatalogSource>> {
    match file {
        Some(path) => {
            // Fail loudly on a bad path instead of showing an empty catalog
            std::fs::metadata(path)?;
            Ok(Box::new(FileSource::new(path)))
        }
        None => Ok(Box::new(HttpSource::new(config)?)),
    }
}

fn loaded_view(source: &dyn CatalogSource) -> ExploreView {
    let mut view = ExploreView::new();
    view.load(source);
    view
}

/// List laptops passing the filters
pub fn cmd_list(
    source: &dyn CatalogSource,
    config: &Config,
    filters: &FilterArgs,
    details: bool,
    json: bool,
) -> Result<()> {
    let criteria = if filters.is_empty() {
        config.default_criteria.clone().unwrap_or_default()
    } else {
        filters.to_criteria()?
    };

    let mut view = loaded_view(source);
    view.set_criteria(criteria);
    let laptops = view.filtered_view();

    if json {
        println!("{}", serde_json::to_string_pretty(&laptops)?);
        return Ok(());
    }

    if view.snapshot().is_empty() {
        println!("No laptops available. Is the catalog service running?");
        return Ok(());
    }

    let active = view.criteria().active();
    if laptops.is_empty() {
        println!("No laptops match these filters:");
        for (field, value) in &active {
            println!("  {} = {}", field, value);
        }
        return Ok(());
    }

    println!("\nResults ({} laptops):\n", laptops.len());

    if details {
        for laptop in &laptops {
            print_details(laptop);
            println!();
        }
    } else {
        let id_width = laptops
            .iter()
            .map(|l| l.id.as_deref().unwrap_or("-").len())
            .max()
            .unwrap_or(2);

        for laptop in &laptops {
            println!(
                "  {}  {}  {}  {}",
                pad(laptop.id.as_deref().unwrap_or("-"), id_width).dimmed(),
                pad(&laptop.label(), 36).bold(),
                pad(&format_price(laptop.price()), 20).green(),
                star(laptop.rating()),
            );
        }
        println!();
    }

    if !active.is_empty() {
        let summary: Vec<String> = active
            .iter()
            .map(|(field, value)| format!("{}={}", field, value))
            .collect();
        println!("Filters: {}", summary.join(", ").dimmed());
    }
    Ok(())
}

/// Show the filter vocabularies declared by the catalog service
pub fn cmd_options(source: &dyn CatalogSource, json: bool) -> Result<()> {
    let view = loaded_view(source);
    let snapshot = view.snapshot();
    let options = snapshot.options();

    if json {
        println!("{}", serde_json::to_string_pretty(options)?);
        return Ok(());
    }

    if options.is_empty() {
        println!("No filter options available.");
        return Ok(());
    }

    let groups = [
        ("Brands", &options.brands),
        ("Processors", &options.processors),
        ("Memory", &options.memory),
        ("Storage", &options.storage),
        ("Displays", &options.displays),
    ];
    for (title, values) in groups {
        println!("\n{} ({}):", title.bold(), values.len());
        for value in values {
            println!("  {}", value);
        }
    }
    println!();
    Ok(())
}

/// Show one laptop in full
pub fn cmd_show(source: &dyn CatalogSource, id: &str, json: bool) -> Result<()> {
    let view = loaded_view(source);
    let snapshot = view.snapshot();
    let laptop = snapshot
        .by_id(id)
        .ok_or_else(|| LapviewError::RecordNotFound(id.to_string()))?;

    if json {
        let out = serde_json::json!({
            "laptop": laptop,
            "price": laptop.price(),
            "rating": laptop.rating(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    print_details(laptop);
    println!();
    Ok(())
}

/// Compare two or more laptops side by side
pub fn cmd_compare(source: &dyn CatalogSource, ids: &[String], json: bool) -> Result<()> {
    let mut view = loaded_view(source);
    let snapshot = view.snapshot();

    let mut seen = HashSet::new();
    for id in ids {
        if snapshot.by_id(id).is_none() {
            return Err(LapviewError::RecordNotFound(id.clone()));
        }
        if seen.insert(id.as_str()) {
            view.toggle_selection(id);
        }
    }

    if !view.compare() {
        return Err(LapviewError::CompareUnavailable(view.selection().len()));
    }

    let table = view.comparison_table();
    view.close_comparison();

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print_table(&table);
    Ok(())
}

/// Price and rating summary
pub fn cmd_stats(source: &dyn CatalogSource, json: bool) -> Result<()> {
    let view = loaded_view(source);
    let stats = CatalogStats::compute(&view.snapshot());

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("\n{}", "Catalog".bold());
    println!("  Laptops:      {}", stats.ratings.total_products);
    println!("  With price:   {}", stats.price.priced);
    println!("  With rating:  {}", stats.ratings.products_with_reviews);

    if stats.price.priced > 0 {
        println!("\n{}", "Price".bold());
        println!("  Lowest:   {}", format_price(stats.price.min));
        println!("  Highest:  {}", format_price(stats.price.max));
        println!("  Average:  {}", format_price(stats.price.avg));
    }

    if stats.ratings.products_with_reviews > 0 {
        println!("\n{}", "Ratings".bold());
        println!("  Average:  {}", format_rating(stats.ratings.avg_rating));
        for (bucket, count) in &stats.ratings.distribution {
            println!("  {:>5}  {}", bucket, "#".repeat(*count).cyan());
        }
    }
    println!();
    Ok(())
}

fn print_details(laptop: &Record) {
    println!(
        "  {} ({})",
        laptop.label().bold(),
        laptop.id.as_deref().unwrap_or("no id")
    );
    println!("    Processor:  {}", or_missing(laptop.processor.as_deref()));
    println!("    Memory:     {}", or_missing(laptop.memory.as_deref()));
    println!("    Storage:    {}", or_missing(laptop.storage.as_deref()));
    println!("    Display:    {}", or_missing(laptop.display.as_deref()));
    println!("    Price:      {}", format_price(laptop.price()).green());
    println!("    Rating:     {}", star(laptop.rating()));
}

fn print_table(table: &ComparisonTable) {
    const LABEL_WIDTH: usize = 10;
    const COLUMN_WIDTH: usize = 28;

    let header: Vec<String> = table
        .columns
        .iter()
        .map(|c| pad(c, COLUMN_WIDTH).bold().to_string())
        .collect();
    println!("\n  {}  {}", pad("", LABEL_WIDTH), header.join("  "));

    for row in &table.rows {
        let cells: Vec<String> = row.values.iter().map(|v| pad(v, COLUMN_WIDTH)).collect();
        println!("  {}  {}", pad(&row.label, LABEL_WIDTH).dimmed(), cells.join("  "));
    }
    println!();
}

fn star(rating: f64) -> String {
    if rating > 0.0 {
        format!("* {}", format_rating(rating)).yellow().to_string()
    } else {
        "no rating".dimmed().to_string()
    }
}
