use super::{render, App, MediaArg};
use crate::output::Output;
use clap::Args;
use color_eyre::Result;

#[derive(Args)]
pub struct SearchArgs {
    /// Title to search for
    query: String,

    /// Narrow the search to one media type
    #[arg(long, value_enum)]
    media: Option<MediaArg>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    page: u32,
}

pub async fn run_search(args: SearchArgs, output: &Output) -> Result<()> {
    let app = App::new()?;
    let client = app.client()?;
    let store = app.open_store();

    let spinner = render::spinner("Searching...");
    let fetched = match args.media {
        None => client.search_multi(&args.query, args.page).await,
        Some(MediaArg::Movie) => client.search_movies(&args.query, args.page).await,
        Some(MediaArg::Tv) => client.search_tv(&args.query, args.page).await,
    };
    spinner.finish_and_clear();

    let heading = format!("Results for '{}'", args.query);
    render::page(output, &heading, &fetched?, &store);
    Ok(())
}
