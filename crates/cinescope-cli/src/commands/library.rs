use super::{parse_media_id, render, App, CollectionArg, MediaArg};
use crate::output::Output;
use clap::Subcommand;
use color_eyre::Result;
use media_catalog_models::{CollectionName, MediaItem, MediaType};
use media_catalog_store::{CollectionStore, JsonFileStore, StoreError};
use media_catalog_tmdb::library_item;
use serde_json::json;

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// List a collection
    List {
        #[arg(value_enum)]
        name: CollectionArg,

        /// Only show one media type
        #[arg(long, value_enum)]
        media: Option<MediaArg>,
    },
    /// Fetch a title from the provider and add it to a collection
    Add {
        #[arg(value_enum)]
        name: CollectionArg,

        #[arg(value_enum)]
        media: MediaArg,

        /// Provider id of the title
        id: String,
    },
    /// Remove a title from a collection
    Remove {
        #[arg(value_enum)]
        name: CollectionArg,

        /// Provider id of the title
        id: String,
    },
    /// Add the title if absent, remove it if present
    Toggle {
        #[arg(value_enum)]
        name: CollectionArg,

        #[arg(value_enum)]
        media: MediaArg,

        /// Provider id of the title
        id: String,
    },
    /// Check whether a collection holds an id
    Contains {
        #[arg(value_enum)]
        name: CollectionArg,

        /// Provider id of the title
        id: String,
    },
}

pub async fn run_library(cmd: LibraryCommands, output: &Output) -> Result<()> {
    let app = App::new()?;
    let mut store = app.open_store();

    match cmd {
        LibraryCommands::List { name, media } => {
            list_collection(&store, name.name(), media, output);
            Ok(())
        }
        LibraryCommands::Add { name, media, id } => {
            let item = fetch_item(&app, media, &id).await?;
            add_item(&mut store, name.name(), item, output)
        }
        LibraryCommands::Remove { name, id } => {
            remove_item(&mut store, name.name(), &id, output)
        }
        LibraryCommands::Toggle { name, media, id } => {
            let name = name.name();
            let parsed = parse_media_id(&id)?;
            if store.contains(name, &parsed) {
                remove_item(&mut store, name, &id, output)
            } else {
                let item = fetch_item(&app, media, &id).await?;
                add_item(&mut store, name, item, output)
            }
        }
        LibraryCommands::Contains { name, id } => {
            let name = name.name();
            let parsed = parse_media_id(&id)?;
            let held = store.contains(name, &parsed);
            output.json(&json!({
                "collection": name.as_str(),
                "id": parsed,
                "contains": held,
            }));
            if held {
                output.info(format!("{} is in {}", parsed, name));
            } else {
                output.info(format!("{} is not in {}", parsed, name));
            }
            Ok(())
        }
    }
}

async fn fetch_item(app: &App, media: MediaArg, id: &str) -> Result<MediaItem> {
    let client = app.client()?;
    let media = media.media_type();
    let id = parse_media_id(id)?;

    let spinner = render::spinner("Fetching title...");
    let fetched = client.details(media, &id).await;
    spinner.finish_and_clear();

    // Detail-only payload sections are stripped before storage.
    Ok(library_item(media, fetched?))
}

fn add_item(
    store: &mut CollectionStore<JsonFileStore>,
    name: CollectionName,
    item: MediaItem,
    output: &Output,
) -> Result<()> {
    let title = item.title().unwrap_or("untitled").to_string();
    let id = item.id.clone();
    match store.add(name, item) {
        Ok(_) => {
            output.success(format!("Added '{}' to {}", title, name));
        }
        // The in-memory collection already holds the item; only the
        // write-back failed. Report it without undoing the add.
        Err(StoreError::Persistence { cause, .. }) => {
            output.warn(format!(
                "Added '{}' to {}, but saving the collection failed: {}",
                title, name, cause
            ));
        }
        Err(error) => return Err(error.into()),
    }
    output.json(&json!({
        "collection": name.as_str(),
        "added": id,
        "total": store.list(name).len(),
    }));
    Ok(())
}

fn remove_item(
    store: &mut CollectionStore<JsonFileStore>,
    name: CollectionName,
    id: &str,
    output: &Output,
) -> Result<()> {
    let id = parse_media_id(id)?;
    let held = store.contains(name, &id);
    match store.remove(name, &id) {
        Ok(_) if held => output.success(format!("Removed {} from {}", id, name)),
        Ok(_) => output.info(format!("{} was not in {}", id, name)),
        Err(StoreError::Persistence { cause, .. }) => {
            output.warn(format!(
                "Removed {} from {}, but saving the collection failed: {}",
                id, name, cause
            ));
        }
        Err(error) => return Err(error.into()),
    }
    output.json(&json!({
        "collection": name.as_str(),
        "removed": id,
        "was_present": held,
        "total": store.list(name).len(),
    }));
    Ok(())
}

fn list_collection(
    store: &CollectionStore<JsonFileStore>,
    name: CollectionName,
    media: Option<MediaArg>,
    output: &Output,
) {
    let items = store.list(name);
    let movies = items
        .iter()
        .filter(|item| item.media_type == MediaType::Movie)
        .count();
    let tv = items
        .iter()
        .filter(|item| item.media_type == MediaType::Tv)
        .count();

    let shown: Vec<MediaItem> = match media {
        None => items.to_vec(),
        Some(media) => {
            let wanted = media.media_type();
            items
                .iter()
                .filter(|item| item.media_type == wanted)
                .cloned()
                .collect()
        }
    };

    output.json(&json!({
        "collection": name.as_str(),
        "total": items.len(),
        "movies": movies,
        "tv": tv,
        "items": shown,
    }));

    if !output.is_human() || output.is_quiet() {
        return;
    }
    println!(
        "\n{}: {} items ({} movies, {} TV)",
        name,
        items.len(),
        movies,
        tv
    );
    if shown.is_empty() {
        println!("Nothing here yet. Add titles with 'cinescope library add'.");
        return;
    }
    println!("{}", render::media_table(&shown, store));
}
