use super::{render, App, MediaArg};
use crate::output::Output;
use clap::{Args, ValueEnum};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use media_catalog_models::MediaType;
use media_catalog_tmdb::{DiscoverFilter, MovieCategory, TvCategory};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
    AiringToday,
    OnTheAir,
    Trending,
}

#[derive(Args)]
pub struct BrowseArgs {
    /// Media type to browse (omit for trending movies and TV together)
    #[arg(long, value_enum)]
    media: Option<MediaArg>,

    /// Curated list to show
    #[arg(long, value_enum, default_value = "popular")]
    category: CategoryArg,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Filter by genre id (switches to the filtered discover listing)
    #[arg(long)]
    genre: Option<i64>,

    /// Filter by release year
    #[arg(long)]
    year: Option<i32>,

    /// Minimum average rating, 0-10
    #[arg(long)]
    min_rating: Option<f64>,

    /// Sort key for filtered listings, e.g. 'popularity.desc' or 'vote_average.desc'
    #[arg(long)]
    sort: Option<String>,

    /// Minimum runtime in minutes (movies only)
    #[arg(long)]
    min_runtime: Option<u32>,

    /// Maximum runtime in minutes (movies only)
    #[arg(long)]
    max_runtime: Option<u32>,

    /// List the genre ids for the selected media type and exit
    #[arg(long)]
    list_genres: bool,
}

pub async fn run_browse(args: BrowseArgs, output: &Output) -> Result<()> {
    let app = App::new()?;
    let client = app.client()?;
    let store = app.open_store();

    if args.list_genres {
        let media = require_media(args.media)?;
        let spinner = render::spinner("Fetching genres...");
        let genres = client.genres(media).await;
        spinner.finish_and_clear();
        let genres = genres?;

        output.json(&json!({
            "media_type": media.as_str(),
            "genres": genres.iter().map(|g| json!({"id": g.id, "name": g.name})).collect::<Vec<_>>(),
        }));
        if output.is_human() && !output.is_quiet() {
            let mut table = comfy_table::Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![Cell::new("Id"), Cell::new("Genre")]);
            for genre in &genres {
                table.add_row(vec![Cell::new(genre.id), Cell::new(&genre.name)]);
            }
            println!("{}", table);
        }
        return Ok(());
    }

    let filter = DiscoverFilter {
        sort_by: args.sort.clone(),
        genre_id: args.genre,
        year: args.year,
        min_rating: args.min_rating,
        min_runtime: args.min_runtime,
        max_runtime: args.max_runtime,
        status: None,
    };

    // Any filter flag switches from the curated lists to discover.
    if !filter.is_empty() {
        let media = require_media(args.media)?;
        let spinner = render::spinner("Fetching filtered results...");
        let fetched = match media {
            MediaType::Tv => client.discover_tv(&filter, args.page).await,
            _ => client.discover_movies(&filter, args.page).await,
        };
        spinner.finish_and_clear();
        let heading = match media {
            MediaType::Tv => "Filtered TV Shows",
            _ => "Filtered Movies",
        };
        render::page(output, heading, &fetched?, &store);
        return Ok(());
    }

    let Some(media) = args.media else {
        // The landing view: today's trending movies and TV, side by side.
        let spinner = render::spinner("Fetching trending titles...");
        let fetched = futures::try_join!(
            client.trending(MediaType::Movie),
            client.trending(MediaType::Tv)
        );
        spinner.finish_and_clear();
        let (movies, tv) = fetched?;
        render::page(output, "Trending Movies", &movies, &store);
        render::page(output, "Trending TV Shows", &tv, &store);
        return Ok(());
    };
    let media = media.media_type();

    let spinner = render::spinner("Fetching list...");
    let fetched = match (media, args.category) {
        (_, CategoryArg::Trending) => client.trending(media).await,
        (MediaType::Movie, category) => {
            client.movie_list(movie_category(category)?, args.page).await
        }
        (_, category) => client.tv_list(tv_category(category)?, args.page).await,
    };
    spinner.finish_and_clear();

    render::page(output, &heading(media, args.category), &fetched?, &store);
    Ok(())
}

fn require_media(media: Option<MediaArg>) -> Result<MediaType> {
    media
        .map(MediaArg::media_type)
        .ok_or_else(|| eyre!("pick a media type with --media movie or --media tv"))
}

fn movie_category(category: CategoryArg) -> Result<MovieCategory> {
    match category {
        CategoryArg::Popular => Ok(MovieCategory::Popular),
        CategoryArg::TopRated => Ok(MovieCategory::TopRated),
        CategoryArg::NowPlaying => Ok(MovieCategory::NowPlaying),
        CategoryArg::Upcoming => Ok(MovieCategory::Upcoming),
        other => Err(eyre!(
            "category '{:?}' is a TV list; use it with --media tv",
            other
        )),
    }
}

fn tv_category(category: CategoryArg) -> Result<TvCategory> {
    match category {
        CategoryArg::Popular => Ok(TvCategory::Popular),
        CategoryArg::TopRated => Ok(TvCategory::TopRated),
        CategoryArg::AiringToday => Ok(TvCategory::AiringToday),
        CategoryArg::OnTheAir => Ok(TvCategory::OnTheAir),
        other => Err(eyre!(
            "category '{:?}' is a movie list; use it with --media movie",
            other
        )),
    }
}

fn heading(media: MediaType, category: CategoryArg) -> String {
    let noun = match media {
        MediaType::Tv => "TV Shows",
        _ => "Movies",
    };
    let adjective = match category {
        CategoryArg::Popular => "Popular",
        CategoryArg::TopRated => "Top Rated",
        CategoryArg::NowPlaying => "Now Playing",
        CategoryArg::Upcoming => "Upcoming",
        CategoryArg::AiringToday => "Airing Today",
        CategoryArg::OnTheAir => "On The Air",
        CategoryArg::Trending => "Trending",
    };
    format!("{} {}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_and_tv_categories_reject_the_other_side() {
        assert!(movie_category(CategoryArg::AiringToday).is_err());
        assert!(movie_category(CategoryArg::OnTheAir).is_err());
        assert!(tv_category(CategoryArg::NowPlaying).is_err());
        assert!(tv_category(CategoryArg::Upcoming).is_err());
        assert_eq!(
            movie_category(CategoryArg::TopRated).unwrap(),
            MovieCategory::TopRated
        );
        assert_eq!(
            tv_category(CategoryArg::TopRated).unwrap(),
            TvCategory::TopRated
        );
    }

    #[test]
    fn test_headings_name_the_list() {
        assert_eq!(
            heading(MediaType::Movie, CategoryArg::NowPlaying),
            "Now Playing Movies"
        );
        assert_eq!(
            heading(MediaType::Tv, CategoryArg::Trending),
            "Trending TV Shows"
        );
    }
}
