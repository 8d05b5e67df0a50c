use crate::output::Output;
use comfy_table::{Cell, Table};
use indicatif::{ProgressBar, ProgressStyle};
use media_catalog_models::{CollectionName, MediaItem};
use media_catalog_store::{CollectionStore, PersistedKeyValueStore};
use media_catalog_tmdb::Page;
use owo_colors::OwoColorize;
use serde_json::json;
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown around network calls. Hidden when stderr is not a
/// terminal, so piped and scripted runs get clean output.
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        tracing::debug!(message = %message, "progress");
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(message.to_string());
    pb
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn rating_cell(item: &MediaItem) -> String {
    match item.vote_average() {
        Some(average) => match item.vote_count() {
            Some(count) => format!("★ {:.1} ({})", average, count),
            None => format!("★ {:.1}", average),
        },
        None => "-".to_string(),
    }
}

/// Membership markers shown next to each row, mirroring the card toggle
/// buttons: ♥ favorites, + watchlist.
fn membership_marker<S: PersistedKeyValueStore>(
    item: &MediaItem,
    store: &CollectionStore<S>,
) -> String {
    let mut marker = String::new();
    if store.contains(CollectionName::Favorites, &item.id) {
        marker.push('♥');
    }
    if store.contains(CollectionName::Watchlist, &item.id) {
        marker.push('+');
    }
    marker
}

pub fn media_table<S: PersistedKeyValueStore>(
    items: &[MediaItem],
    store: &CollectionStore<S>,
) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(""),
        Cell::new("Id").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Type").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(membership_marker(item, store)),
            Cell::new(item.id.to_string()),
            Cell::new(item.title().unwrap_or("-")),
            Cell::new(
                item.year()
                    .map(|year| year.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(item.media_type.to_string()),
            Cell::new(rating_cell(item)),
        ]);
    }
    table
}

/// Renders one fetched page: a heading, the table, and a pagination line in
/// human format; one structured object in the JSON formats.
pub fn page<S: PersistedKeyValueStore>(
    output: &Output,
    heading: &str,
    page: &Page<MediaItem>,
    store: &CollectionStore<S>,
) {
    output.json(&json!({
        "list": heading,
        "page": page.page,
        "total_pages": page.total_pages,
        "total_results": page.total_results,
        "results": page.results,
    }));

    if !output.is_human() || output.is_quiet() {
        return;
    }
    println!("\n{}", heading.bright_cyan().bold());
    if page.results.is_empty() {
        println!("{}", "No results.".bright_black());
        return;
    }
    println!("{}", media_table(&page.results, store));
    if page.total_pages > 1 {
        println!(
            "{}",
            format!("Page {} of {}", page.page, page.total_pages).bright_black()
        );
    }
}
