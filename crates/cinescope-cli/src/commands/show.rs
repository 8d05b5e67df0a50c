use super::{parse_media_id, render, App, MediaArg};
use crate::output::Output;
use clap::Args;
use color_eyre::Result;
use comfy_table::Cell;
use media_catalog_models::CollectionName;
use media_catalog_tmdb::{images, TitleDetails};
use owo_colors::OwoColorize;
use serde_json::Value;

const TOP_CAST_LIMIT: usize = 18;
const SIMILAR_LIMIT: usize = 12;

#[derive(Args)]
pub struct ShowArgs {
    /// Media type of the title
    #[arg(value_enum)]
    media: MediaArg,

    /// Provider id of the title
    id: String,
}

pub async fn run_show(args: ShowArgs, output: &Output) -> Result<()> {
    let app = App::new()?;
    let client = app.client()?;
    let store = app.open_store();
    let media = args.media.media_type();
    let id = parse_media_id(&args.id)?;

    let spinner = render::spinner("Fetching details...");
    let fetched = client.details(media, &id).await;
    spinner.finish_and_clear();
    let object = fetched?;

    output.json(&Value::Object(object.clone()));
    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    let details = TitleDetails::parse(&object)?;

    let title_line = match details.year() {
        Some(year) => format!("{} ({})", details.display_title(), year),
        None => details.display_title().to_string(),
    };
    println!("\n{}", title_line.bright_cyan().bold());
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        println!("{}", tagline.italic());
    }

    let mut badges: Vec<String> = Vec::new();
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        badges.push(names.join(", "));
    }
    if let Some(runtime) = details.runtime {
        badges.push(format!("{} min", runtime));
    }
    if let (Some(seasons), Some(episodes)) = (details.number_of_seasons, details.number_of_episodes)
    {
        badges.push(format!("{} seasons / {} episodes", seasons, episodes));
    }
    if let Some(status) = details.status.as_deref().filter(|s| !s.is_empty()) {
        badges.push(status.to_string());
    }
    if let Some(average) = details.vote_average {
        let votes = details.vote_count.unwrap_or(0);
        badges.push(format!("★ {:.1} ({} votes)", average, votes));
    }
    if !badges.is_empty() {
        println!("{}", badges.join("  ·  ").bright_black());
    }

    if let Some(overview) = details.overview.as_deref().filter(|o| !o.is_empty()) {
        println!("\n{}", overview);
    }

    println!(
        "\n{} {}",
        "Poster:".bold(),
        images::image_url(
            &app.config.tmdb.image_base_url,
            images::DEFAULT_POSTER_SIZE,
            details.poster_path.as_deref(),
        )
    );
    if let Some(trailer) = details.trailer_url() {
        println!("{} {}", "Trailer:".bold(), trailer);
    }

    let mut membership: Vec<&str> = Vec::new();
    if store.contains(CollectionName::Favorites, &id) {
        membership.push("favorites");
    }
    if store.contains(CollectionName::Watchlist, &id) {
        membership.push("watchlist");
    }
    if !membership.is_empty() {
        println!("{} {}", "In library:".bold(), membership.join(", "));
    }

    let cast = details.top_cast(TOP_CAST_LIMIT);
    if !cast.is_empty() {
        println!("\n{}", "Top Cast".bright_cyan().bold());
        let mut table = comfy_table::Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![Cell::new("Name"), Cell::new("Character")]);
        for member in cast {
            table.add_row(vec![
                Cell::new(&member.name),
                Cell::new(member.character.as_deref().unwrap_or("-")),
            ]);
        }
        println!("{}", table);
    }

    let similar = details.similar_items(media, SIMILAR_LIMIT);
    if !similar.is_empty() {
        println!("\n{}", "Similar Titles".bright_cyan().bold());
        println!("{}", render::media_table(&similar, &store));
    }

    Ok(())
}
