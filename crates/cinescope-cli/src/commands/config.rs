use super::{prompts, App};
use crate::output::Output;
use clap::{ArgAction, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API token)
    Show {
        /// Show the token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Set the TMDB API read access token
    #[command(
        long_about = "Store the TMDB API read access token. Create one at https://www.themoviedb.org/settings/api; the token is kept in the credentials file next to the config."
    )]
    Tmdb {
        /// Token value (prompted with masked input when omitted)
        #[arg(long)]
        token: Option<String>,
    },

    /// Tune the catalog filter parameters
    Catalog {
        /// Minimum vote count for movie lists
        #[arg(long)]
        movie_min_votes: Option<u32>,

        /// Minimum vote count for TV lists
        #[arg(long)]
        tv_min_votes: Option<u32>,

        /// Highest movie certification to show (e.g. PG-13, R)
        #[arg(long)]
        certification: Option<String>,

        /// Results language, e.g. en-US
        #[arg(long)]
        language: Option<String>,

        /// Highest page number to request from the provider
        #[arg(long)]
        max_pages: Option<u32>,
    },
}

pub async fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Tmdb { token } => configure_tmdb(token, output),
        ConfigCommands::Catalog {
            movie_min_votes,
            tv_min_votes,
            certification,
            language,
            max_pages,
        } => configure_catalog(
            movie_min_votes,
            tv_min_votes,
            certification,
            language,
            max_pages,
            output,
        ),
    }
}

// Char-wise so a token with multi-byte characters cannot split a
// codepoint.
fn mask_string(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len().max(4));
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let app = App::new()?;
    let credentials = app.credentials()?;
    let token = credentials.get_tmdb_api_token().cloned();
    let token_display = match &token {
        Some(value) if full => value.clone(),
        Some(value) => mask_string(value),
        None => "not set".to_string(),
    };

    output.json(&json!({
        "config_file": app.paths.config_file(),
        "tmdb": {
            "base_url": app.config.tmdb.base_url,
            "image_base_url": app.config.tmdb.image_base_url,
            "language": app.config.tmdb.language,
            "token": token_display,
            "token_updated": credentials.get_tmdb_token_updated(),
        },
        "catalog": {
            "movie_min_votes": app.config.catalog.movie_min_votes,
            "tv_min_votes": app.config.catalog.tv_min_votes,
            "movie_certification_ceiling": app.config.catalog.movie_certification_ceiling,
            "max_pages": app.config.catalog.max_pages,
        },
    }));
    if !output.is_human() || output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    println!(
        "{}",
        format!("File: {}", app.paths.config_file().display()).bright_black()
    );

    let mut tmdb_table = Table::new();
    tmdb_table.load_preset(comfy_table::presets::UTF8_FULL);
    tmdb_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    tmdb_table.set_header(vec![Cell::new("TMDB")
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    tmdb_table.add_row(vec![Cell::new("Base URL"), Cell::new(&app.config.tmdb.base_url)]);
    tmdb_table.add_row(vec![
        Cell::new("Image Base URL"),
        Cell::new(&app.config.tmdb.image_base_url),
    ]);
    tmdb_table.add_row(vec![
        Cell::new("Language"),
        Cell::new(&app.config.tmdb.language),
    ]);
    tmdb_table.add_row(vec![Cell::new("API Token"), Cell::new(&token_display)]);
    if let Some(updated) = credentials.get_tmdb_token_updated() {
        tmdb_table.add_row(vec![
            Cell::new("Token Updated"),
            Cell::new(updated.to_rfc3339()),
        ]);
    }
    println!("{}", tmdb_table);

    let mut catalog_table = Table::new();
    catalog_table.load_preset(comfy_table::presets::UTF8_FULL);
    catalog_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    catalog_table.set_header(vec![Cell::new("Catalog")
        .fg(comfy_table::Color::Cyan)
        .add_attribute(comfy_table::Attribute::Bold)]);
    catalog_table.add_row(vec![
        Cell::new("Movie Min Votes"),
        Cell::new(app.config.catalog.movie_min_votes),
    ]);
    catalog_table.add_row(vec![
        Cell::new("TV Min Votes"),
        Cell::new(app.config.catalog.tv_min_votes),
    ]);
    catalog_table.add_row(vec![
        Cell::new("Certification Ceiling"),
        Cell::new(&app.config.catalog.movie_certification_ceiling),
    ]);
    catalog_table.add_row(vec![
        Cell::new("Max Pages"),
        Cell::new(app.config.catalog.max_pages),
    ]);
    println!("{}", catalog_table);

    Ok(())
}

fn configure_tmdb(token: Option<String>, output: &Output) -> Result<()> {
    let app = App::new()?;
    let token = match token {
        Some(token) => token,
        None => prompts::prompt_password("TMDB API read access token")?,
    };
    if token.trim().is_empty() {
        return Err(eyre!("token must not be empty"));
    }

    let mut credentials = app.credentials()?;
    credentials.set_tmdb_api_token(token.trim().to_string());
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;

    output.success("TMDB API token saved");
    output.info("Try it: cinescope browse");
    Ok(())
}

fn configure_catalog(
    movie_min_votes: Option<u32>,
    tv_min_votes: Option<u32>,
    certification: Option<String>,
    language: Option<String>,
    max_pages: Option<u32>,
    output: &Output,
) -> Result<()> {
    let app = App::new()?;
    let mut config = app.config.clone();
    let mut changed = false;

    if let Some(votes) = movie_min_votes {
        config.catalog.movie_min_votes = votes;
        changed = true;
    }
    if let Some(votes) = tv_min_votes {
        config.catalog.tv_min_votes = votes;
        changed = true;
    }
    if let Some(ceiling) = certification {
        config.catalog.movie_certification_ceiling = ceiling;
        changed = true;
    }
    if let Some(language) = language {
        config.tmdb.language = language;
        changed = true;
    }
    if let Some(pages) = max_pages {
        config.catalog.max_pages = pages;
        changed = true;
    }

    if !changed {
        output.warn("Nothing to change. Pass one of --movie-min-votes, --tv-min-votes, --certification, --language, --max-pages");
        return Ok(());
    }

    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;
    config
        .save_to_file(&app.paths.config_file())
        .map_err(|e| eyre!("Failed to save config: {}", e))?;
    output.success(format!(
        "Configuration saved to {}",
        app.paths.config_file().display()
    ));
    Ok(())
}
